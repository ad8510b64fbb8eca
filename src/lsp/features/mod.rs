//! LSP features for MyST markdown
//!
//! `traits` defines the collaborator contracts the features consume;
//! `completion` holds the context classifier and its resolvers.

pub mod completion;
pub mod traits;

pub use traits::{
    CompletionServices, FileFinder, ImageDimensions, ImageMetadataProvider, OutlineOptions,
    OutlineProvider, ServiceError, TocHeading,
};
