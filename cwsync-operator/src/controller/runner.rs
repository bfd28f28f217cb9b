//! kube-runtime wiring for the tag controller.

use super::{ReconcileAction, TagController, error_policy};
use crate::crd::TaggedResource;
use crate::error::OperatorError;
use cwsync_core::CallContext;
use futures::channel::oneshot;
use futures::{FutureExt, StreamExt};
use kube::runtime::Controller;
use kube::runtime::controller::Action;
use kube::runtime::watcher::Config as WatcherConfig;
use kube::{Api, Client};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;

/// Watch every resource of kind `R` and keep its tags reconciled.
///
/// Runs until the process receives SIGTERM or ctrl-c. The signal cancels the
/// controller context's shutdown token first, so passes blocked in a remote
/// call end as interrupted and are not requeued, then the controller drains
/// and stops.
pub async fn run<R>(client: Client, controller: TagController) -> anyhow::Result<()>
where
    R: TaggedResource + Clone + Debug + DeserializeOwned + Send + Sync + 'static,
{
    let kind = R::kind(&()).to_string();
    tracing::info!(kind = %kind, "Starting tag controller");

    let resources: Api<R> = Api::all(client);
    let ctx = controller.context().clone();
    let shutdown = ctx.shutdown.clone();

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let trigger = cancel_on(shutdown.clone(), wait_for_signal());
    let signal_task = tokio::spawn(async move {
        trigger.await;
        let _ = stop_tx.send(());
    });

    Controller::new(resources, WatcherConfig::default())
        .graceful_shutdown_on(stop_rx.map(|_| ()))
        .run(
            move |resource, _ctx| {
                let controller = controller.clone();
                async move { controller.reconcile(resource).await.map(into_action) }
            },
            |_resource, error: &OperatorError, ctx| into_action(error_policy(error, &ctx)),
            ctx,
        )
        .for_each(|result| {
            let kind = kind.clone();
            async move {
                match result {
                    Ok((obj, action)) => {
                        tracing::debug!(kind = %kind, name = %obj.name, ?action, "Reconciled");
                    }
                    Err(e) => {
                        tracing::warn!(kind = %kind, error = %e, "Controller stream error");
                    }
                }
            }
        })
        .await;

    signal_task.abort();
    shutdown.cancel();
    tracing::info!("Tag controller stopped");
    Ok(())
}

/// Cancel `shutdown` once `signal` resolves.
pub(crate) async fn cancel_on<S>(shutdown: CallContext, signal: S)
where
    S: Future<Output = ()>,
{
    signal.await;
    tracing::info!("Shutdown requested, cancelling in-flight passes");
    shutdown.cancel();
}

async fn wait_for_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = terminate.recv() => {}
                }
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Cannot listen for SIGTERM, waiting for ctrl-c only");
            }
        }
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Cannot listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

fn into_action(action: ReconcileAction) -> Action {
    match action {
        ReconcileAction::Requeue(duration) => Action::requeue(duration),
        ReconcileAction::Done => Action::await_change(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OperatorConfig;
    use crate::controller::ControllerContext;
    use crate::crd::{Dashboard, DashboardSpec, ResourceStatus};
    use cwsync_core::tags::{ExternalTag, ResourceArn, TagFuture, TaggingApi};
    use cwsync_core::TagsManager;
    use std::time::Duration;

    /// Backend whose calls never complete.
    struct StalledTagging;

    impl TaggingApi for StalledTagging {
        fn list_tags<'a>(
            &'a self,
            _ctx: &'a CallContext,
            _arn: &'a ResourceArn,
        ) -> TagFuture<'a, Vec<ExternalTag>> {
            Box::pin(std::future::pending())
        }

        fn set_tags<'a>(
            &'a self,
            _ctx: &'a CallContext,
            _arn: &'a ResourceArn,
            _tags: Vec<ExternalTag>,
        ) -> TagFuture<'a, ()> {
            Box::pin(std::future::pending())
        }

        fn remove_tags<'a>(
            &'a self,
            _ctx: &'a CallContext,
            _arn: &'a ResourceArn,
            _keys: Vec<String>,
        ) -> TagFuture<'a, ()> {
            Box::pin(std::future::pending())
        }
    }

    fn dashboard() -> Arc<Dashboard> {
        let mut dashboard = Dashboard::new(
            "ops",
            DashboardSpec {
                dashboard_name: Some("ops".into()),
                dashboard_body: Some(r#"{"widgets":[]}"#.into()),
                tags: vec![],
            },
        );
        dashboard.status = Some(ResourceStatus::with_arn(
            "arn:aws:cloudwatch::123456789012:dashboard/ops",
        ));
        Arc::new(dashboard)
    }

    #[test]
    fn actions_map_to_kube_actions() {
        let requeue = into_action(ReconcileAction::Requeue(Duration::from_secs(30)));
        assert_eq!(requeue, Action::requeue(Duration::from_secs(30)));
        assert_eq!(into_action(ReconcileAction::Done), Action::await_change());
    }

    #[tokio::test]
    async fn signal_interrupts_in_flight_pass() {
        let ctx = ControllerContext::new(
            TagsManager::new(Arc::new(StalledTagging)),
            OperatorConfig::default(),
        );
        let controller = TagController::new(Arc::new(ctx));

        let pass = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.reconcile(dashboard()).await })
        };
        tokio::task::yield_now().await;
        assert!(!pass.is_finished());

        let (signal_tx, signal_rx) = tokio::sync::oneshot::channel::<()>();
        let trigger = tokio::spawn(cancel_on(
            controller.context().shutdown.clone(),
            async move {
                let _ = signal_rx.await;
            },
        ));
        signal_tx.send(()).unwrap();
        trigger.await.unwrap();

        let err = tokio::time::timeout(Duration::from_secs(5), pass)
            .await
            .expect("pass should stop once shutdown is requested")
            .unwrap()
            .unwrap_err();
        assert!(err.is_interrupted());
        assert_eq!(
            error_policy(&err, controller.context()),
            ReconcileAction::Done
        );
    }
}
