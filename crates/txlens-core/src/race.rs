//! First-success fan-out over a fixed set of asynchronous lookups.
//!
//! Every operation is spawned as its own task and reports into a single
//! completion channel. The resolver settles with the first `Some` in
//! completion order, or with `None` once every operation has reported.
//!
//! Operations are never cancelled: after a winner is found the remaining
//! tasks keep running until their own I/O completes, and their results are
//! dropped on send. All N calls therefore always run to completion.

use std::future::Future;

use tokio::sync::mpsc;

/// Resolve with the first operation whose result is `Some`.
///
/// Operations must not fail: callers convert errors to `None` before
/// handing them over. A panicking operation counts as `None`.
pub async fn first_success<I, F, T>(ops: I) -> Option<T>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Option<T>> + Send + 'static,
    T: Send + 'static,
{
    let ops: Vec<F> = ops.into_iter().collect();
    let total = ops.len();
    if total == 0 {
        return None;
    }

    // Each task sends at most once, so a channel sized to the task count
    // never blocks a sender.
    let (tx, mut rx) = mpsc::channel::<Option<T>>(total);
    for op in ops {
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = op.await;
            // The receiver is gone once a winner was taken.
            let _ = tx.send(result).await;
        });
    }
    drop(tx);

    let mut remaining = total;
    while remaining > 0 {
        match rx.recv().await {
            Some(Some(value)) => {
                tracing::trace!(total, remaining, "first success settled");
                return Some(value);
            }
            Some(None) => remaining -= 1,
            // Every sender dropped: the unreported tasks panicked.
            None => break,
        }
    }

    tracing::trace!(total, "all lookups completed without a result");
    None
}
