//! Remote tagging capability.

use super::types::{ExternalTag, ResourceArn};
use crate::context::CallContext;
use crate::error::TagResult;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by [`TaggingApi`] methods.
pub type TagFuture<'a, T> = Pin<Box<dyn Future<Output = TagResult<T>> + Send + 'a>>;

/// Operation name for listing tags, as reported in errors and logs.
pub const LIST_TAGS: &str = "ListTagsForResource";
/// Operation name for setting tags.
pub const SET_TAGS: &str = "TagResource";
/// Operation name for removing tags.
pub const REMOVE_TAGS: &str = "UntagResource";

/// A backend that can read and mutate the tags of a remote resource.
///
/// # Implementation Notes
///
/// - Futures must not perform I/O until polled.
/// - Errors are returned as [`TagError::Remote`](crate::TagError::Remote) and
///   are passed to the caller unchanged.
/// - The context is handed to implementations for request scoping; the
///   [`TagsManager`](super::TagsManager) already enforces cancellation and
///   deadlines around every call.
pub trait TaggingApi: Send + Sync {
    /// List all tags currently attached to `arn`.
    fn list_tags<'a>(
        &'a self,
        ctx: &'a CallContext,
        arn: &'a ResourceArn,
    ) -> TagFuture<'a, Vec<ExternalTag>>;

    /// Add or overwrite the given tags on `arn`.
    fn set_tags<'a>(
        &'a self,
        ctx: &'a CallContext,
        arn: &'a ResourceArn,
        tags: Vec<ExternalTag>,
    ) -> TagFuture<'a, ()>;

    /// Remove the tags with the given keys from `arn`.
    fn remove_tags<'a>(
        &'a self,
        ctx: &'a CallContext,
        arn: &'a ResourceArn,
        keys: Vec<String>,
    ) -> TagFuture<'a, ()>;
}
