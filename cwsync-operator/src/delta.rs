//! Drift detection between two versions of a resource.
//!
//! Every spec field is compared by value except `dashboardBody`, which is
//! compared structurally so that whitespace and key order do not count as
//! drift.

use crate::crd::{Dashboard, MetricAlarm, MetricStream, tag_set_from_tags};
use cwsync_core::Delta;

/// Differences between two dashboards.
pub fn dashboard_delta(a: &Dashboard, b: &Dashboard) -> Delta {
    let mut delta = Delta::new();
    delta.compare_body(
        "spec.dashboardBody",
        &a.spec.dashboard_body,
        &b.spec.dashboard_body,
    );
    delta.compare_field(
        "spec.dashboardName",
        &a.spec.dashboard_name,
        &b.spec.dashboard_name,
    );
    delta.compare_tags(
        "spec.tags",
        &tag_set_from_tags(&a.spec.tags),
        &tag_set_from_tags(&b.spec.tags),
    );
    delta
}

/// Differences between two metric alarms.
pub fn metric_alarm_delta(a: &MetricAlarm, b: &MetricAlarm) -> Delta {
    let (a, b) = (&a.spec, &b.spec);
    let mut delta = Delta::new();
    delta.compare_value("spec.name", &a.name, &b.name);
    delta.compare_field("spec.namespace", &a.namespace, &b.namespace);
    delta.compare_field("spec.metricName", &a.metric_name, &b.metric_name);
    delta.compare_field("spec.statistic", &a.statistic, &b.statistic);
    delta.compare_value(
        "spec.comparisonOperator",
        &a.comparison_operator,
        &b.comparison_operator,
    );
    delta.compare_field("spec.threshold", &a.threshold, &b.threshold);
    delta.compare_value(
        "spec.evaluationPeriods",
        &a.evaluation_periods,
        &b.evaluation_periods,
    );
    delta.compare_field("spec.period", &a.period, &b.period);
    delta.compare_field(
        "spec.alarmDescription",
        &a.alarm_description,
        &b.alarm_description,
    );
    delta.compare_value("spec.alarmActions", &a.alarm_actions, &b.alarm_actions);
    delta.compare_tags(
        "spec.tags",
        &tag_set_from_tags(&a.tags),
        &tag_set_from_tags(&b.tags),
    );
    delta
}

/// Differences between two metric streams.
pub fn metric_stream_delta(a: &MetricStream, b: &MetricStream) -> Delta {
    let (a, b) = (&a.spec, &b.spec);
    let mut delta = Delta::new();
    delta.compare_value("spec.name", &a.name, &b.name);
    delta.compare_value("spec.firehoseARN", &a.firehose_arn, &b.firehose_arn);
    delta.compare_value("spec.roleARN", &a.role_arn, &b.role_arn);
    delta.compare_value("spec.outputFormat", &a.output_format, &b.output_format);
    delta.compare_value("spec.includeFilters", &a.include_filters, &b.include_filters);
    delta.compare_value("spec.excludeFilters", &a.exclude_filters, &b.exclude_filters);
    delta.compare_tags(
        "spec.tags",
        &tag_set_from_tags(&a.tags),
        &tag_set_from_tags(&b.tags),
    );
    delta
}
