use futures::stream::{self, StreamExt};
use std::future::Future;

/// Run `op` over every item with at most `limit` calls in flight.
/// Results come back in input order regardless of completion order.
pub async fn bounded<I, F, Fut, T>(items: I, limit: usize, op: F) -> Vec<T>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = T>,
{
    stream::iter(items)
        .map(op)
        .buffered(limit.max(1))
        .collect()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::sleep;

    #[actix_web::test]
    async fn results_keep_input_order() {
        // Later items finish first, output order must not change
        let results = bounded(0..8u64, 4, |i| async move {
            sleep(Duration::from_millis(8 - i)).await;
            i * 10
        })
        .await;
        assert_eq!(results, vec![0, 10, 20, 30, 40, 50, 60, 70]);
    }

    #[actix_web::test]
    async fn in_flight_never_exceeds_the_limit() {
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        bounded(0..20usize, 3, |_| {
            let active = Arc::clone(&active);
            let peak = Arc::clone(&peak);
            async move {
                let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                sleep(Duration::from_millis(3)).await;
                active.fetch_sub(1, Ordering::SeqCst);
            }
        })
        .await;

        assert!(peak.load(Ordering::SeqCst) <= 3);
        assert!(peak.load(Ordering::SeqCst) > 1);
    }

    #[actix_web::test]
    async fn zero_limit_is_treated_as_one() {
        let results = bounded(vec!["a", "b"], 0, |s| async move { s.len() }).await;
        assert_eq!(results, vec![1, 1]);
    }
}
