//! Generated output files.
//!
//! - **Feed**: RSS 2.0 feed of the post collection (`rss.xml`)

pub mod feed;
