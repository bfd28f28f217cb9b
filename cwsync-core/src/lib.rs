//! cwsync core library.
//!
//! Reconciliation building blocks for keeping CloudWatch resources in sync
//! with their declared specifications.
//!
//! # Key Components
//!
//! - **Tags**: [`TagsManager`] diffs a desired tag set against the observed one
//!   and applies the result as batched calls through a [`TaggingApi`] backend
//! - **Body**: structural JSON comparison used to avoid false drift on
//!   serialized resource bodies
//! - **Delta**: per-field difference report between two resource versions
//! - **Context**: cancellation and deadlines for remote calls
//!
//! # Example
//!
//! ```ignore
//! use cwsync_core::{body, CallContext, TagsManager};
//!
//! let drifted = !body::equal(&desired_body, &observed_body);
//!
//! let latest = manager.fetch_tags(&ctx, &arn).await?;
//! manager.sync_tags(&ctx, &arn, &desired_tags, &latest).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod body;
pub mod context;
pub mod delta;
pub mod error;
pub mod tags;

pub use body::{BodyComparison, ComparisonReason};
pub use context::CallContext;
pub use delta::{Delta, Difference};
pub use error::{TagError, TagResult};
pub use tags::{
    ExternalTag, MemoryTagging, ResourceArn, TagOperation, TagSet, TaggingApi, TagsManager,
};
