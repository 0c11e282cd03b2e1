//! Configuration section definitions.
//!
//! Each module corresponds to a section in `blog.toml`:
//!
//! | Module    | TOML Section  | Purpose                                  |
//! |-----------|---------------|------------------------------------------|
//! | `site`    | `[site]`      | Channel metadata and site URL            |
//! | `content` | `[content]`   | Content collection and post links        |
//! | `images`  | `[images]`    | Image tree scanned into the registry     |
//! | `build`   | `[build]`     | Output directory, minification           |
//! | `feed`    | `[feed]`      | Feed path, drafts, ordering, allow-list  |

mod build;
mod content;
mod feed;
mod images;
mod site;

pub use build::BuildConfig;
pub use content::ContentConfig;
pub use feed::{DraftPolicy, FeedSectionConfig, ItemOrder};
pub use images::ImagesConfig;
pub use site::SiteInfoConfig;
