//! Tag sync controllers for CloudWatch resources.
//!
//! [`TagController`] runs one reconciliation pass for any [`TaggedResource`]:
//! fetch the live tags, diff them against the declared tags, apply the result.
//!
//! # Usage with kube-runtime
//!
//! ```ignore
//! use cwsync_operator::controller::{ControllerContext, TagController, run};
//! use cwsync_operator::crd::Dashboard;
//!
//! let ctx = Arc::new(ControllerContext::new(manager, config));
//! run::<Dashboard>(client, TagController::new(ctx)).await?;
//! ```
//!
//! [`TaggedResource`]: crate::crd::TaggedResource

mod runner;
mod tags;

pub use runner::run;
pub use tags::{TagController, error_policy};

use crate::config::OperatorConfig;
use cwsync_core::{CallContext, TagsManager};

/// Shared context for controllers.
pub struct ControllerContext {
    /// Tag reconciler over the backend.
    pub manager: TagsManager,
    /// Requeue intervals and deadlines.
    pub config: OperatorConfig,
    /// Root context; cancelling it aborts every in-flight pass.
    pub shutdown: CallContext,
}

impl ControllerContext {
    /// Create a new controller context.
    pub fn new(manager: TagsManager, config: OperatorConfig) -> Self {
        Self {
            manager,
            config,
            shutdown: CallContext::background(),
        }
    }

    /// Context for one reconciliation pass.
    pub fn pass_context(&self) -> CallContext {
        let ctx = self.shutdown.child();
        match self.config.remote_call_timeout() {
            Some(timeout) => ctx.timeout(timeout),
            None => ctx,
        }
    }
}

/// Result type for reconciliation actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileAction {
    /// Requeue after the specified duration.
    Requeue(std::time::Duration),
    /// Don't requeue (reconciliation complete).
    Done,
}
