//! cwsync Kubernetes operator glue.
//!
//! Keeps the tags of CloudWatch resources in line with their custom resources
//! and reports spec drift between resource versions.
//!
//! # Custom Resource Definitions
//!
//! - **Dashboard**: A CloudWatch dashboard with a JSON body
//! - **MetricAlarm**: An alarm on a single metric
//! - **MetricStream**: A metric stream to Firehose
//!
//! # Example
//!
//! ```yaml
//! apiVersion: cloudwatch.services.k8s.aws/v1alpha1
//! kind: Dashboard
//! metadata:
//!   name: ops
//! spec:
//!   dashboardName: ops
//!   dashboardBody: '{"widgets": []}'
//!   tags:
//!     - key: team
//!       value: observability
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod controller;
pub mod crd;
pub mod delta;
pub mod error;
pub mod hooks;
pub mod observability;

pub use config::OperatorConfig;
pub use crd::{Dashboard, DashboardSpec, MetricAlarm, MetricStream, TaggedResource};
pub use error::{OperatorError, OperatorResult};
