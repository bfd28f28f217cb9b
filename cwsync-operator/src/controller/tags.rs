//! Tag sync controller.

use super::{ControllerContext, ReconcileAction};
use crate::crd::TaggedResource;
use crate::error::{OperatorError, OperatorResult};
use cwsync_core::tags::diff;
use kube::ResourceExt;
use std::sync::Arc;

/// Controller keeping backend tags equal to the tags declared in a resource.
#[derive(Clone)]
pub struct TagController {
    ctx: Arc<ControllerContext>,
}

impl TagController {
    /// Create a new tag controller.
    pub fn new(ctx: Arc<ControllerContext>) -> Self {
        Self { ctx }
    }

    /// Shared controller context.
    pub fn context(&self) -> &Arc<ControllerContext> {
        &self.ctx
    }

    /// Reconcile the tags of one resource.
    ///
    /// 1. Waits for the resource to have an ARN
    /// 2. Fetches the live tags from the backend
    /// 3. Applies the difference to the declared tags
    pub async fn reconcile<R>(&self, resource: Arc<R>) -> OperatorResult<ReconcileAction>
    where
        R: TaggedResource,
    {
        let name = resource.name_any();
        let kind = R::kind(&());
        let config = &self.ctx.config;

        let Some(arn) = resource.arn() else {
            tracing::debug!(kind = %kind, name = %name, "Waiting for resource ARN");
            return Ok(ReconcileAction::Requeue(config.pending_interval()));
        };

        tracing::debug!(kind = %kind, name = %name, arn = %arn, "Reconciling tags");

        let ctx = self.ctx.pass_context();
        let manager = &self.ctx.manager;
        let desired = resource.spec_tags();
        let latest = manager.fetch_tags(&ctx, &arn).await?;
        let operations = diff(&desired, &latest);

        if operations.is_empty() {
            tracing::debug!(kind = %kind, name = %name, "Tags in sync");
            return Ok(ReconcileAction::Requeue(config.success_interval()));
        }

        let count = operations.len();
        manager.apply(&ctx, &arn, operations).await?;
        tracing::info!(
            kind = %kind,
            name = %name,
            arn = %arn,
            operations = count,
            "Tags reconciled"
        );

        Ok(ReconcileAction::Requeue(config.success_interval()))
    }
}

/// Error policy for the tag controller.
///
/// Passes interrupted by shutdown are not requeued; every other failure is
/// retried after the configured error interval.
pub fn error_policy(error: &OperatorError, ctx: &ControllerContext) -> ReconcileAction {
    if error.is_interrupted() && ctx.shutdown.is_cancelled() {
        tracing::debug!(error = %error, "Pass interrupted by shutdown");
        return ReconcileAction::Done;
    }
    tracing::warn!(error = %error, "Tag reconciliation failed");
    ReconcileAction::Requeue(ctx.config.error_interval())
}
