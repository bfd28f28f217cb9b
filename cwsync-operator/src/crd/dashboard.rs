//! Dashboard Custom Resource Definition.

use super::common::{ResourceStatus, Tag};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Dashboard is the Schema for the dashboards API.
///
/// The dashboard body is a JSON document; formatting differences between the
/// declared and observed body are not treated as drift.
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "cloudwatch.services.k8s.aws",
    version = "v1alpha1",
    kind = "Dashboard",
    plural = "dashboards",
    namespaced,
    status = "ResourceStatus",
    printcolumn = r#"{"name":"Name", "type":"string", "jsonPath":".spec.dashboardName"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSpec {
    /// Name of the dashboard.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard_name: Option<String>,

    /// Dashboard definition as a JSON string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard_body: Option<String>,

    /// Tags to attach to the dashboard.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}
