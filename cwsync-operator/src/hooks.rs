//! Tag hooks called by resource managers during update.

use crate::crd::TaggedResource;
use crate::error::OperatorResult;
use cwsync_core::{CallContext, TagSet, TagsManager};
use kube::ResourceExt;

/// Bring the backend tags of a resource from `latest`'s spec to `desired`'s spec.
///
/// Does nothing while `latest` has no ARN, since there is no backend resource
/// to tag yet.
pub async fn sync_resource_tags<R>(
    manager: &TagsManager,
    ctx: &CallContext,
    latest: &R,
    desired: &R,
) -> OperatorResult<()>
where
    R: TaggedResource,
{
    let Some(arn) = latest.arn() else {
        tracing::debug!(name = %latest.name_any(), "No ARN yet, skipping tag sync");
        return Ok(());
    };

    manager
        .sync_tags(ctx, &arn, &desired.spec_tags(), &latest.spec_tags())
        .await?;
    Ok(())
}

/// Live tags of a resource's backend counterpart.
///
/// Returns `None` while the resource has no ARN. Backend failures are returned
/// to the caller.
pub async fn observed_tags<R>(
    manager: &TagsManager,
    ctx: &CallContext,
    resource: &R,
) -> OperatorResult<Option<TagSet>>
where
    R: TaggedResource,
{
    match resource.arn() {
        Some(arn) => Ok(Some(manager.fetch_tags(ctx, &arn).await?)),
        None => Ok(None),
    }
}
