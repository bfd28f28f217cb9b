//! Tag reconciliation against a remote tagging backend.

use super::api::{LIST_TAGS, REMOVE_TAGS, SET_TAGS, TaggingApi};
use super::convert::{from_external_tag_list, to_external_tag_list};
use super::types::{ResourceArn, TagOperation, TagSet};
use crate::context::CallContext;
use crate::error::{TagError, TagResult};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Compute the operations that turn `latest` into `desired`.
///
/// Keys missing from `latest`, or present with another value, are upserted.
/// Keys missing from `desired` are removed. The order of the returned
/// operations is unspecified.
pub fn diff(desired: &TagSet, latest: &TagSet) -> Vec<TagOperation> {
    if desired.is_empty() && latest.is_empty() {
        return Vec::new();
    }

    let upserts = desired
        .iter()
        .filter(|(key, value)| latest.get(key) != Some(*value))
        .map(|(key, value)| TagOperation::upsert(key, value));

    let removals = latest
        .keys()
        .filter(|key| !desired.contains_key(key))
        .map(TagOperation::remove);

    upserts.chain(removals).collect()
}

/// Reads and reconciles resource tags through a [`TaggingApi`].
///
/// The manager holds no per-resource state, so one instance can serve any
/// number of resources concurrently.
#[derive(Clone)]
pub struct TagsManager {
    api: Arc<dyn TaggingApi>,
}

impl TagsManager {
    /// Create a manager over a tagging backend.
    pub fn new(api: Arc<dyn TaggingApi>) -> Self {
        Self { api }
    }

    /// Fetch the tags currently attached to `arn`.
    ///
    /// A resource without tags yields an empty set. Backend errors are
    /// returned unchanged.
    pub async fn fetch_tags(&self, ctx: &CallContext, arn: &ResourceArn) -> TagResult<TagSet> {
        let list = ctx.run(LIST_TAGS, self.api.list_tags(ctx, arn)).await?;
        let tags = from_external_tag_list(list);

        tracing::debug!(arn = %arn, count = tags.len(), "Fetched resource tags");
        Ok(tags)
    }

    /// Compute the operations that turn `latest` into `desired`. See [`diff`].
    pub fn diff(&self, desired: &TagSet, latest: &TagSet) -> Vec<TagOperation> {
        diff(desired, latest)
    }

    /// Apply a set of operations to `arn`.
    ///
    /// Operations are grouped by key into one upsert batch and one removal
    /// batch; when a key appears more than once the last operation wins. The
    /// upsert batch is sent first. If it fails, the removal batch is not sent.
    /// An empty plan makes no remote calls.
    pub async fn apply<I>(
        &self,
        ctx: &CallContext,
        arn: &ResourceArn,
        operations: I,
    ) -> TagResult<()>
    where
        I: IntoIterator<Item = TagOperation>,
    {
        let plan = TagPlan::from_operations(operations)?;
        if plan.is_empty() {
            return Ok(());
        }

        if !plan.upserts.is_empty() {
            let tags = to_external_tag_list(&plan.upserts);
            let count = tags.len();
            ctx.run(SET_TAGS, self.api.set_tags(ctx, arn, tags))
                .await
                .inspect_err(|e| {
                    tracing::warn!(arn = %arn, error = %e, "Failed to set tags, skipping removals");
                })?;
            tracing::debug!(arn = %arn, count, "Upserted tags");
        }

        if !plan.removals.is_empty() {
            let keys: Vec<String> = plan.removals.into_iter().collect();
            let count = keys.len();
            ctx.run(REMOVE_TAGS, self.api.remove_tags(ctx, arn, keys))
                .await?;
            tracing::debug!(arn = %arn, count, "Removed tags");
        }

        Ok(())
    }

    /// Bring the tags of `arn` from `latest` to `desired`.
    pub async fn sync_tags(
        &self,
        ctx: &CallContext,
        arn: &ResourceArn,
        desired: &TagSet,
        latest: &TagSet,
    ) -> TagResult<()> {
        let operations = diff(desired, latest);
        if operations.is_empty() {
            tracing::trace!(arn = %arn, "Tags already in sync");
            return Ok(());
        }

        tracing::info!(arn = %arn, operations = operations.len(), "Syncing resource tags");
        self.apply(ctx, arn, operations).await
    }
}

/// Operations grouped into the two batches sent to the backend.
#[derive(Debug, Default)]
struct TagPlan {
    upserts: TagSet,
    removals: BTreeSet<String>,
}

impl TagPlan {
    fn from_operations<I>(operations: I) -> TagResult<Self>
    where
        I: IntoIterator<Item = TagOperation>,
    {
        let mut plan = Self::default();
        for operation in operations {
            if operation.key().is_empty() {
                return Err(TagError::InvalidTag("tag key must not be empty".into()));
            }
            match operation {
                TagOperation::Upsert { key, value } => {
                    plan.removals.remove(&key);
                    plan.upserts.insert(key, value);
                }
                TagOperation::Remove { key } => {
                    plan.upserts.remove(&key);
                    plan.removals.insert(key);
                }
            }
        }
        Ok(plan)
    }

    fn is_empty(&self) -> bool {
        self.upserts.is_empty() && self.removals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::memory::{MemoryTagging, TaggingCall, TaggingCallKind};

    fn tags(pairs: &[(&str, &str)]) -> TagSet {
        pairs.iter().copied().collect()
    }

    fn sorted(mut ops: Vec<TagOperation>) -> Vec<TagOperation> {
        ops.sort_by(|a, b| a.key().cmp(b.key()));
        ops
    }

    fn arn() -> ResourceArn {
        ResourceArn::new("arn:aws:cloudwatch:us-west-2:123456789012:dashboard/test")
    }

    #[test]
    fn diff_adds_updates_and_removes() {
        let desired = tags(&[("env", "prod"), ("team", "obs"), ("new", "1")]);
        let latest = tags(&[("env", "dev"), ("team", "obs"), ("old", "x")]);

        let ops = sorted(diff(&desired, &latest));
        assert_eq!(
            ops,
            vec![
                TagOperation::upsert("env", "prod"),
                TagOperation::upsert("new", "1"),
                TagOperation::remove("old"),
            ]
        );
    }

    #[test]
    fn diff_of_equal_sets_is_empty() {
        let set = tags(&[("env", "prod"), ("owner", "")]);
        assert!(diff(&set, &set).is_empty());
        assert!(diff(&TagSet::new(), &TagSet::new()).is_empty());
    }

    #[test]
    fn diff_empty_desired_removes_everything() {
        let latest = tags(&[("a", "1"), ("b", "2")]);
        let ops = sorted(diff(&TagSet::new(), &latest));
        assert_eq!(ops, vec![TagOperation::remove("a"), TagOperation::remove("b")]);
    }

    #[test]
    fn diff_detects_value_change_to_empty_string() {
        let ops = diff(&tags(&[("env", "")]), &tags(&[("env", "prod")]));
        assert_eq!(ops, vec![TagOperation::upsert("env", "")]);
    }

    #[test]
    fn applying_diff_converges() {
        let desired = tags(&[("env", "prod"), ("team", "obs")]);
        let mut latest = tags(&[("env", "dev"), ("stale", "yes")]);

        for op in diff(&desired, &latest) {
            latest.apply(&op);
        }
        assert_eq!(latest, desired);
        assert!(diff(&desired, &latest).is_empty());
    }

    #[test]
    fn plan_last_operation_per_key_wins() {
        let plan = TagPlan::from_operations(vec![
            TagOperation::upsert("a", "1"),
            TagOperation::remove("a"),
            TagOperation::remove("b"),
            TagOperation::upsert("b", "2"),
        ])
        .expect("plan should build");

        assert_eq!(plan.upserts, tags(&[("b", "2")]));
        assert_eq!(plan.removals.into_iter().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn plan_rejects_empty_key() {
        let result = TagPlan::from_operations(vec![TagOperation::upsert("", "x")]);
        assert!(matches!(result, Err(TagError::InvalidTag(_))));
    }

    #[tokio::test]
    async fn apply_without_operations_makes_no_calls() {
        let backend = Arc::new(MemoryTagging::new());
        let manager = TagsManager::new(backend.clone());

        manager
            .apply(&CallContext::background(), &arn(), Vec::new())
            .await
            .unwrap();

        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn apply_batches_upserts_then_removals() {
        let backend = Arc::new(MemoryTagging::new());
        backend.insert_resource(arn(), tags(&[("old", "x"), ("gone", "y")]));
        let manager = TagsManager::new(backend.clone());

        manager
            .apply(
                &CallContext::background(),
                &arn(),
                vec![
                    TagOperation::upsert("env", "prod"),
                    TagOperation::remove("old"),
                    TagOperation::upsert("team", "obs"),
                    TagOperation::remove("gone"),
                ],
            )
            .await
            .unwrap();

        let calls = backend.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].kind(), TaggingCallKind::SetTags);
        assert_eq!(calls[1].kind(), TaggingCallKind::RemoveTags);
        match &calls[1] {
            TaggingCall::RemoveTags { keys, .. } => assert_eq!(keys, &vec!["gone", "old"]),
            other => panic!("unexpected call {other:?}"),
        }
        assert_eq!(
            backend.tags_of(&arn()),
            Some(tags(&[("env", "prod"), ("team", "obs")]))
        );
    }

    #[tokio::test]
    async fn failed_upsert_skips_removal() {
        let backend = Arc::new(MemoryTagging::new());
        backend.insert_resource(arn(), tags(&[("old", "x")]));
        backend.fail_on(
            TaggingCallKind::SetTags,
            TagError::remote("ThrottlingException", "Rate exceeded"),
        );
        let manager = TagsManager::new(backend.clone());

        let err = manager
            .apply(
                &CallContext::background(),
                &arn(),
                vec![TagOperation::upsert("env", "prod"), TagOperation::remove("old")],
            )
            .await
            .unwrap_err();

        assert_eq!(err, TagError::remote("ThrottlingException", "Rate exceeded"));
        assert_eq!(backend.calls().len(), 1);
        assert_eq!(backend.tags_of(&arn()), Some(tags(&[("old", "x")])));
    }

    #[tokio::test]
    async fn cancelled_context_skips_remote_calls() {
        let backend = Arc::new(MemoryTagging::new());
        backend.insert_resource(arn(), TagSet::new());
        let manager = TagsManager::new(backend.clone());

        let ctx = CallContext::background();
        ctx.cancel();

        let err = manager.fetch_tags(&ctx, &arn()).await.unwrap_err();
        assert_eq!(err, TagError::Cancelled { operation: LIST_TAGS });

        let err = manager
            .apply(&ctx, &arn(), vec![TagOperation::upsert("env", "prod")])
            .await
            .unwrap_err();
        assert_eq!(err, TagError::Cancelled { operation: SET_TAGS });
        assert!(backend.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn expired_deadline_skips_remote_calls() {
        let backend = Arc::new(MemoryTagging::new());
        backend.insert_resource(arn(), TagSet::new());
        let manager = TagsManager::new(backend.clone());

        let ctx = CallContext::background().timeout(std::time::Duration::from_secs(1));
        tokio::time::advance(std::time::Duration::from_secs(2)).await;

        let err = manager
            .apply(&ctx, &arn(), vec![TagOperation::remove("stale")])
            .await
            .unwrap_err();
        assert_eq!(err, TagError::DeadlineExceeded { operation: REMOVE_TAGS });
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn fetch_tags_of_untagged_resource_is_empty() {
        let backend = Arc::new(MemoryTagging::new());
        backend.insert_resource(arn(), TagSet::new());
        let manager = TagsManager::new(backend);

        let fetched = manager
            .fetch_tags(&CallContext::background(), &arn())
            .await
            .unwrap();
        assert!(fetched.is_empty());
    }
}
