//! MetricAlarm Custom Resource Definition.

use super::common::{ResourceStatus, Tag};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// MetricAlarm is the Schema for the metricalarms API.
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "cloudwatch.services.k8s.aws",
    version = "v1alpha1",
    kind = "MetricAlarm",
    plural = "metricalarms",
    namespaced,
    status = "ResourceStatus",
    printcolumn = r#"{"name":"Alarm", "type":"string", "jsonPath":".spec.name"}"#,
    printcolumn = r#"{"name":"Metric", "type":"string", "jsonPath":".spec.metricName"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct MetricAlarmSpec {
    /// Name of the alarm.
    pub name: String,

    /// Namespace of the metric the alarm watches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Name of the metric the alarm watches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_name: Option<String>,

    /// Statistic applied to the metric (Average, Sum, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistic: Option<String>,

    /// Arithmetic operation used to compare the statistic with the threshold.
    pub comparison_operator: String,

    /// Value the statistic is compared against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,

    /// Number of periods over which data is compared to the threshold.
    pub evaluation_periods: i64,

    /// Length of one period in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<i64>,

    /// Description of the alarm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alarm_description: Option<String>,

    /// Actions run when the alarm enters the ALARM state.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alarm_actions: Vec<String>,

    /// Tags to attach to the alarm.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_alarm_serialization() {
        let spec = MetricAlarmSpec {
            name: "HighCPU".into(),
            namespace: Some("AWS/EC2".into()),
            metric_name: Some("CPUUtilization".into()),
            statistic: Some("Average".into()),
            comparison_operator: "GreaterThanThreshold".into(),
            threshold: Some(80.0),
            evaluation_periods: 3,
            period: Some(300),
            alarm_description: None,
            alarm_actions: vec![],
            tags: vec![Tag::new("team", "sre")],
        };

        let json =
            serde_json::to_string(&spec).expect("Failed to serialize MetricAlarmSpec to JSON");
        assert!(json.contains("\"metricName\":\"CPUUtilization\""));
        assert!(json.contains("\"evaluationPeriods\":3"));

        let parsed: MetricAlarmSpec =
            serde_json::from_str(&json).expect("Failed to parse MetricAlarmSpec from JSON");
        assert_eq!(parsed.threshold, Some(80.0));
        assert_eq!(parsed.tags.len(), 1);
    }
}
