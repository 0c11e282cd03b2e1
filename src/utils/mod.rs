//! Shared helpers with no knowledge of posts or feeds.

pub mod date;
pub mod html;
pub mod path;
mod plural;

pub use plural::plural_count;
