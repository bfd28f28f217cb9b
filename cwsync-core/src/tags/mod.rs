//! Tag reconciliation.
//!
//! Brings the tags of a remote resource in line with a desired tag set:
//!
//! - [`TagsManager::fetch_tags`] reads the live tags of a resource
//! - [`diff`] computes the upserts and removals needed
//! - [`TagsManager::apply`] sends them as at most two batched calls
//!
//! The remote side is abstracted by [`TaggingApi`]; [`MemoryTagging`] is an
//! in-memory implementation.
//!
//! # Example
//!
//! ```ignore
//! use cwsync_core::tags::{TagsManager, MemoryTagging, TagSet, ResourceArn};
//! use cwsync_core::CallContext;
//!
//! let manager = TagsManager::new(Arc::new(MemoryTagging::new()));
//! let arn = ResourceArn::new("arn:aws:cloudwatch:us-west-2:123456789012:alarm:cpu");
//! let latest = manager.fetch_tags(&ctx, &arn).await?;
//! let operations = manager.diff(&desired, &latest);
//! manager.apply(&ctx, &arn, operations).await?;
//! ```

mod api;
mod convert;
mod manager;
mod memory;
mod types;

pub use api::{LIST_TAGS, REMOVE_TAGS, SET_TAGS, TagFuture, TaggingApi};
pub use convert::{from_external_tag_list, to_external_tag_list};
pub use manager::{TagsManager, diff};
pub use memory::{MemoryTagging, TaggingCall, TaggingCallKind};
pub use types::{ExternalTag, ResourceArn, TagOperation, TagSet};
