//! Comments: sidecar annotations for files and directories
//!
//! Attach a free-text comment to any file or directory without modifying it.
//! Comments live in a hidden `.comments` directory beside the annotated nodes,
//! one `<name>.comment` file per node.

pub mod config;
pub mod error;
pub mod listing;
pub mod logging;
pub mod normalize;
pub mod render;
pub mod store;
pub mod tooling;
pub mod types;

pub use error::{ApiError, StoreError};
pub use listing::{Listing, ListingOptions};
pub use render::{RenderOptions, Renderer};
pub use store::CommentStore;
pub use types::{CommentMap, DeleteOutcome, Target, WriteMode};
