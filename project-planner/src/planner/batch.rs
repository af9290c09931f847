//! Bounded-concurrency fan-out for independent generation requests

use futures::{stream::FuturesUnordered, Future, StreamExt};
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::error::{PlannerError, PlannerResult};

/// Context provided to each item in a batch
#[derive(Debug, Clone, Copy)]
pub struct ItemContext {
    /// Item number (1-indexed for display)
    pub item_number: usize,
    /// Total number of items in this batch
    pub total_items: usize,
}

/// Run `executor` over `items` with at most `concurrency` in flight
///
/// Results are returned in input order. Fails fast: the first error is
/// returned and the remaining futures are dropped.
///
/// # Example
/// ```rust,no_run
/// # use project_planner::planner::batch::execute_batch;
/// # async fn demo() -> project_planner::PlannerResult<()> {
/// let doubled = execute_batch(vec![1, 2, 3], 2, |n, _ctx| async move { Ok(n * 2) }).await?;
/// assert_eq!(doubled, vec![2, 4, 6]);
/// # Ok(())
/// # }
/// ```
pub async fn execute_batch<T, F, Fut, R>(
    items: Vec<T>,
    concurrency: usize,
    executor: F,
) -> PlannerResult<Vec<R>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T, ItemContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = PlannerResult<R>> + Send + 'static,
{
    let total = items.len();
    let sem = Arc::new(Semaphore::new(concurrency.max(1)));
    let executor = Arc::new(executor);
    let mut tasks = FuturesUnordered::new();

    for (idx, item) in items.into_iter().enumerate() {
        let sem = sem.clone();
        let executor = executor.clone();

        let ctx = ItemContext {
            item_number: idx + 1,
            total_items: total,
        };

        tasks.push(async move {
            let _permit = sem
                .acquire()
                .await
                .map_err(|_| PlannerError::Batch("semaphore closed".to_string()))?;

            executor(item, ctx).await.map(|result| (idx, result))
        });
    }

    let mut slots: Vec<Option<R>> = (0..total).map(|_| None).collect();
    while let Some(result) = tasks.next().await {
        let (idx, value) = result?;
        slots[idx] = Some(value);
    }

    Ok(slots.into_iter().flatten().collect())
}
