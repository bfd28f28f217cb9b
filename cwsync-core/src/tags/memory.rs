//! In-memory tagging backend.
//!
//! This backend is useful for:
//! - Unit and integration tests
//! - Local development without cloud credentials
//!
//! Every call is recorded, and failures can be injected per call kind.

use super::api::{TagFuture, TaggingApi};
use super::convert::{from_external_tag_list, to_external_tag_list};
use super::types::{ExternalTag, ResourceArn, TagSet};
use crate::context::CallContext;
use crate::error::{RESOURCE_NOT_FOUND, TagError, TagResult};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Kind of call made against the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaggingCallKind {
    /// `list_tags`
    ListTags,
    /// `set_tags`
    SetTags,
    /// `remove_tags`
    RemoveTags,
}

/// A call received by [`MemoryTagging`], with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaggingCall {
    /// Tags were listed.
    ListTags {
        /// Target resource.
        arn: ResourceArn,
    },
    /// Tags were set.
    SetTags {
        /// Target resource.
        arn: ResourceArn,
        /// Tags sent.
        tags: Vec<ExternalTag>,
    },
    /// Tags were removed.
    RemoveTags {
        /// Target resource.
        arn: ResourceArn,
        /// Keys sent.
        keys: Vec<String>,
    },
}

impl TaggingCall {
    /// The kind of this call.
    pub fn kind(&self) -> TaggingCallKind {
        match self {
            Self::ListTags { .. } => TaggingCallKind::ListTags,
            Self::SetTags { .. } => TaggingCallKind::SetTags,
            Self::RemoveTags { .. } => TaggingCallKind::RemoveTags,
        }
    }

    /// The resource this call targeted.
    pub fn arn(&self) -> &ResourceArn {
        match self {
            Self::ListTags { arn } | Self::SetTags { arn, .. } | Self::RemoveTags { arn, .. } => {
                arn
            }
        }
    }
}

/// Tagging backend holding resource tags in memory.
///
/// Unknown resources fail with `ResourceNotFoundException`, matching the
/// behavior of the real service.
#[derive(Debug, Default)]
pub struct MemoryTagging {
    resources: Mutex<HashMap<ResourceArn, TagSet>>,
    calls: Mutex<Vec<TaggingCall>>,
    failures: Mutex<HashMap<TaggingCallKind, TagError>>,
}

impl MemoryTagging {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource with its initial tags.
    pub fn insert_resource(&self, arn: impl Into<ResourceArn>, tags: TagSet) {
        self.resources.lock().insert(arn.into(), tags);
    }

    /// Current tags of a resource, or `None` if it is unknown.
    pub fn tags_of(&self, arn: &ResourceArn) -> Option<TagSet> {
        self.resources.lock().get(arn).cloned()
    }

    /// Make every call of `kind` fail with `error` until cleared.
    pub fn fail_on(&self, kind: TaggingCallKind, error: TagError) {
        self.failures.lock().insert(kind, error);
    }

    /// Remove all injected failures.
    pub fn clear_failures(&self) {
        self.failures.lock().clear();
    }

    /// All calls received so far, oldest first.
    pub fn calls(&self) -> Vec<TaggingCall> {
        self.calls.lock().clone()
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, call: TaggingCall) -> TagResult<()> {
        let kind = call.kind();
        self.calls.lock().push(call);
        match self.failures.lock().get(&kind) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn with_resource<T>(
        &self,
        arn: &ResourceArn,
        f: impl FnOnce(&mut TagSet) -> T,
    ) -> TagResult<T> {
        let mut resources = self.resources.lock();
        let tags = resources.get_mut(arn).ok_or_else(|| {
            TagError::remote(RESOURCE_NOT_FOUND, format!("Resource {arn} does not exist"))
        })?;
        Ok(f(tags))
    }
}

impl TaggingApi for MemoryTagging {
    fn list_tags<'a>(
        &'a self,
        _ctx: &'a CallContext,
        arn: &'a ResourceArn,
    ) -> TagFuture<'a, Vec<ExternalTag>> {
        Box::pin(async move {
            self.record(TaggingCall::ListTags { arn: arn.clone() })?;
            self.with_resource(arn, |tags| to_external_tag_list(tags))
        })
    }

    fn set_tags<'a>(
        &'a self,
        _ctx: &'a CallContext,
        arn: &'a ResourceArn,
        tags: Vec<ExternalTag>,
    ) -> TagFuture<'a, ()> {
        Box::pin(async move {
            self.record(TaggingCall::SetTags {
                arn: arn.clone(),
                tags: tags.clone(),
            })?;
            let incoming = from_external_tag_list(tags);
            self.with_resource(arn, |current| current.extend(incoming))
        })
    }

    fn remove_tags<'a>(
        &'a self,
        _ctx: &'a CallContext,
        arn: &'a ResourceArn,
        keys: Vec<String>,
    ) -> TagFuture<'a, ()> {
        Box::pin(async move {
            self.record(TaggingCall::RemoveTags {
                arn: arn.clone(),
                keys: keys.clone(),
            })?;
            self.with_resource(arn, |current| {
                for key in &keys {
                    current.remove(key);
                }
            })
        })
    }
}
