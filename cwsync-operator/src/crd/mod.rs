//! Custom Resource Definitions for CloudWatch resources.
//!
//! - [`Dashboard`]: A CloudWatch dashboard
//! - [`MetricAlarm`]: An alarm watching a single metric
//! - [`MetricStream`]: A stream of metrics to a Firehose delivery stream
//!
//! All kinds carry a tag list and share [`ResourceStatus`].

mod common;
mod dashboard;
mod metric_alarm;
mod metric_stream;

pub use common::{
    ResourceMetadata, ResourceStatus, SyncCondition, Tag, tag_set_from_tags,
};
pub use dashboard::{Dashboard, DashboardSpec};
pub use metric_alarm::{MetricAlarm, MetricAlarmSpec};
pub use metric_stream::{MetricStream, MetricStreamFilter, MetricStreamSpec};

use cwsync_core::{ResourceArn, TagSet};
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::CustomResourceExt;

/// A custom resource whose backend counterpart carries tags.
pub trait TaggedResource: kube::Resource<DynamicType = ()> {
    /// ARN of the backend resource, once it has been created.
    fn arn(&self) -> Option<ResourceArn>;

    /// Tags declared in the resource spec.
    fn spec_tags(&self) -> TagSet;
}

macro_rules! impl_tagged_resource {
    ($($kind:ty),+ $(,)?) => {
        $(
            impl TaggedResource for $kind {
                fn arn(&self) -> Option<ResourceArn> {
                    self.status.as_ref().and_then(ResourceStatus::arn)
                }

                fn spec_tags(&self) -> TagSet {
                    tag_set_from_tags(&self.spec.tags)
                }
            }
        )+
    };
}

impl_tagged_resource!(Dashboard, MetricAlarm, MetricStream);

/// Definitions of every custom resource this operator manages.
pub fn all_crds() -> Vec<CustomResourceDefinition> {
    vec![Dashboard::crd(), MetricAlarm::crd(), MetricStream::crd()]
}
