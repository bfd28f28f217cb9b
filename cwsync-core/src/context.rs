//! Caller-supplied cancellation and deadline context for remote calls.

use crate::error::{TagError, TagResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Cancellation and deadline scope for one reconciliation pass.
///
/// Cloning a context shares its cancellation token. A context that is already
/// cancelled or past its deadline makes every remote call fail before any I/O
/// is attempted.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl CallContext {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// A context driven by an existing cancellation token.
    pub fn with_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Set an absolute deadline.
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set a deadline relative to now.
    pub fn timeout(self, timeout: Duration) -> Self {
        self.deadline(Instant::now() + timeout)
    }

    /// Derive a child context. Cancelling the parent cancels the child, not the reverse.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    /// Cancel this context and every child derived from it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether the context has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Whether the deadline, if any, has passed.
    pub fn is_expired(&self) -> bool {
        self.deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Fail fast if the context can no longer run `operation`.
    pub fn check(&self, operation: &'static str) -> TagResult<()> {
        if self.is_cancelled() {
            return Err(TagError::Cancelled { operation });
        }
        if self.is_expired() {
            return Err(TagError::DeadlineExceeded { operation });
        }
        Ok(())
    }

    /// Drive `call` to completion unless the context is cancelled or expires first.
    pub async fn run<T, F>(&self, operation: &'static str, call: F) -> TagResult<T>
    where
        F: Future<Output = TagResult<T>>,
    {
        self.check(operation)?;

        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(TagError::Cancelled { operation }),
            _ = wait_for_deadline(self.deadline) => Err(TagError::DeadlineExceeded { operation }),
            result = call => result,
        }
    }
}

async fn wait_for_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn background_runs_call() {
        let ctx = CallContext::background();
        let value = ctx.run("ListTagsForResource", async { Ok(7) }).await;
        assert_eq!(value, Ok(7));
    }

    #[tokio::test]
    async fn cancelled_context_fails_before_polling() {
        let ctx = CallContext::background();
        ctx.cancel();

        let polled = std::sync::atomic::AtomicBool::new(false);
        let result: TagResult<()> = ctx
            .run("TagResource", async {
                polled.store(true, std::sync::atomic::Ordering::SeqCst);
                Ok(())
            })
            .await;

        assert_eq!(result, Err(TagError::Cancelled { operation: "TagResource" }));
        assert!(!polled.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_interrupts_slow_call() {
        let ctx = CallContext::background().timeout(Duration::from_millis(50));
        let result: TagResult<()> = ctx
            .run("UntagResource", async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                Ok(())
            })
            .await;

        assert_eq!(
            result,
            Err(TagError::DeadlineExceeded { operation: "UntagResource" })
        );
    }

    #[tokio::test]
    async fn expired_deadline_fails_fast() {
        let ctx = CallContext::background().deadline(Instant::now());
        assert!(ctx.is_expired());
        assert!(ctx.check("ListTagsForResource").is_err());
    }

    #[test]
    fn child_follows_parent_cancellation() {
        let parent = CallContext::background();
        let child = parent.child();
        parent.cancel();
        assert!(child.is_cancelled());

        let parent = CallContext::background();
        let child = parent.child();
        child.cancel();
        assert!(!parent.is_cancelled());
    }
}
