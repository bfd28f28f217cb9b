//! Types shared by all CloudWatch custom resources.

use cwsync_core::{ResourceArn, TagSet};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A key-value pair associated with a CloudWatch resource.
///
/// A missing value is treated as the empty string once the tag is reconciled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Tag key.
    pub key: String,

    /// Tag value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Tag {
    /// Create a tag with a value.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }
}

/// Build a tag set from a resource's tag list.
///
/// Later entries override earlier ones with the same key.
pub fn tag_set_from_tags(tags: &[Tag]) -> TagSet {
    tags.iter()
        .map(|tag| (tag.key.as_str(), tag.value.as_deref().unwrap_or_default()))
        .collect()
}

/// Identity of the backend resource, filled in once it exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMetadata {
    /// ARN of the backend resource.
    #[serde(default, rename = "arn", skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,

    /// Account that owns the backend resource.
    #[serde(default, rename = "ownerAccountID", skip_serializing_if = "Option::is_none")]
    pub owner_account_id: Option<String>,

    /// Region of the backend resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// Observed state shared by all CloudWatch resources.
///
/// Written by the controller that owns the resource lifecycle. The tag
/// controllers only read the ARN from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceStatus {
    /// Backend identity.
    #[serde(default, rename = "ackResourceMetadata", skip_serializing_if = "Option::is_none")]
    pub resource_metadata: Option<ResourceMetadata>,

    /// Conditions reported by the lifecycle controller.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<SyncCondition>,
}

impl ResourceStatus {
    /// ARN of the backend resource, if known.
    pub fn arn(&self) -> Option<ResourceArn> {
        self.resource_metadata
            .as_ref()
            .and_then(|m| m.arn.as_deref())
            .filter(|arn| !arn.is_empty())
            .map(ResourceArn::new)
    }

    /// Status with the given ARN set.
    pub fn with_arn(arn: impl Into<String>) -> Self {
        Self {
            resource_metadata: Some(ResourceMetadata {
                arn: Some(arn.into()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

/// Condition representing reconciliation state.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncCondition {
    /// Type of condition (Synced, Terminal).
    #[serde(rename = "type")]
    pub condition_type: String,

    /// Status of the condition (True, False, Unknown).
    pub status: String,

    /// Last time the condition transitioned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<String>,

    /// Human-readable message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
