//! MetricStream Custom Resource Definition.

use super::common::{ResourceStatus, Tag};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// MetricStream is the Schema for the metricstreams API.
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "cloudwatch.services.k8s.aws",
    version = "v1alpha1",
    kind = "MetricStream",
    plural = "metricstreams",
    namespaced,
    status = "ResourceStatus",
    printcolumn = r#"{"name":"Stream", "type":"string", "jsonPath":".spec.name"}"#,
    printcolumn = r#"{"name":"Format", "type":"string", "jsonPath":".spec.outputFormat"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct MetricStreamSpec {
    /// Name of the metric stream.
    pub name: String,

    /// ARN of the Firehose delivery stream receiving the metrics.
    #[serde(rename = "firehoseARN")]
    pub firehose_arn: String,

    /// ARN of the role used to write to the delivery stream.
    #[serde(rename = "roleARN")]
    pub role_arn: String,

    /// Output format (json, opentelemetry0.7, opentelemetry1.0).
    pub output_format: String,

    /// Metric namespaces to include. Empty means all namespaces.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include_filters: Vec<MetricStreamFilter>,

    /// Metric namespaces to exclude.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_filters: Vec<MetricStreamFilter>,

    /// Tags to attach to the metric stream.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

/// A metric namespace to include in or exclude from a stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricStreamFilter {
    /// Metric namespace.
    pub namespace: String,
}
