//! Filtered fetch of one resource page.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use ambassador_core::filter::Narrow;
use ambassador_core::{ListSource, Resource, Result};
use tokio_util::sync::CancellationToken;

use crate::TRACING_TARGET_LIST;

/// Holds the most recently fetched page of `R`.
///
/// Only the newest fetch may replace the held items; a response that arrives
/// after a newer fetch was started, or after [`close`](Self::close), is
/// returned to its caller but not kept.
pub struct ListController<R: Resource> {
    source: Arc<dyn ListSource<R>>,
    items: RwLock<Arc<[R]>>,
    issued: AtomicU64,
    cancel: CancellationToken,
}

impl<R: Resource> fmt::Debug for ListController<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListController")
            .field("path", &R::PATH)
            .field("items", &self.len())
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

impl<R: Resource> ListController<R> {
    pub fn new(source: Arc<dyn ListSource<R>>) -> Self {
        Self {
            source,
            items: RwLock::new(Arc::from(Vec::new())),
            issued: AtomicU64::new(0),
            cancel: CancellationToken::new(),
        }
    }

    /// Returns the held items in backend order.
    pub fn items(&self) -> Arc<[R]> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stops later responses from replacing the held items.
    pub fn close(&self) {
        self.cancel.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl<R: Resource + Clone> ListController<R> {
    /// Fetches the page matching `filter`.
    ///
    /// Every predicate of the filter is optional; unset predicates are
    /// omitted from the request.
    pub async fn fetch(&self, filter: &R::Filter) -> Result<Vec<R>> {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        let items = match self.source.fetch(filter).await {
            Ok(items) => items,
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET_LIST,
                    path = R::PATH,
                    status = error.status(),
                    error = %error,
                    "List fetch failed"
                );
                return Err(error);
            }
        };

        let latest = self.issued.load(Ordering::SeqCst) == ticket;
        if latest && !self.is_closed() {
            *self.items.write().unwrap_or_else(PoisonError::into_inner) = Arc::from(items.clone());
        }

        tracing::debug!(
            target: TRACING_TARGET_LIST,
            path = R::PATH,
            count = items.len(),
            kept = latest && !self.is_closed(),
            "List fetched"
        );
        Ok(items)
    }

    /// Narrows the held items without another request.
    pub fn narrow(&self, criteria: &impl Narrow<R>) -> Vec<R> {
        criteria.narrow(&self.items())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ambassador_core::filter::{CustomerFilter, TaskCriteria, TaskFilter};
    use ambassador_core::types::{Customer, Task};
    use ambassador_test::MockListSource;
    use bigdecimal::BigDecimal;

    use super::*;

    fn task(id: i64, name: &str, value: i64) -> Task {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "taskValue": value,
        }))
        .unwrap()
    }

    fn tasks() -> Vec<Task> {
        vec![
            task(1, "Alpha Boost", 10),
            task(2, "beta", 25),
            task(3, "ALPHA prime", 40),
        ]
    }

    #[tokio::test]
    async fn test_fetch_keeps_items_in_order() {
        let source = MockListSource::new(tasks());
        let controller = ListController::new(Arc::new(source.clone()));

        let fetched = controller.fetch(&TaskFilter::default()).await.unwrap();
        let ids: Vec<_> = controller.items().iter().map(|t| t.id.to_string()).collect();
        assert_eq!(fetched.len(), 3);
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_unset_predicates_are_omitted() {
        let source: MockListSource<Customer> = MockListSource::new(Vec::new());
        let controller = ListController::new(Arc::new(source.clone()));

        let filter = CustomerFilter::default().with_login_user_name("amy");
        controller.fetch(&filter).await.unwrap();

        let sent = &source.filters()[0];
        assert_eq!(sent["loginUserName"], "amy");
        assert!(sent.get("phoneNumber").is_none());
        assert!(sent.get("startDate").is_none());
    }

    #[tokio::test]
    async fn test_narrowing_is_idempotent() {
        let controller = ListController::new(Arc::new(MockListSource::new(tasks())));
        controller.fetch(&TaskFilter::default()).await.unwrap();

        let criteria = TaskCriteria::from_input("alpha", "", "30");
        let once = controller.narrow(&criteria);
        let twice = criteria.narrow(&once);

        assert_eq!(once.len(), 1);
        assert_eq!(once[0].task_value, Some(BigDecimal::from(10)));
        assert_eq!(once, twice);
        assert_eq!(controller.len(), 3);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_items() {
        let source = MockListSource::new(tasks());
        let controller = ListController::new(Arc::new(source.clone()));
        controller.fetch(&TaskFilter::default()).await.unwrap();

        source.set_failing(true);
        assert!(controller.fetch(&TaskFilter::default()).await.is_err());
        assert_eq!(controller.len(), 3);
    }

    #[tokio::test]
    async fn test_late_response_after_close_is_dropped() {
        let source = MockListSource::new(tasks()).with_delay(Duration::from_millis(50));
        let controller = Arc::new(ListController::new(Arc::new(source)));

        let fetch = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.fetch(&TaskFilter::default()).await })
        };
        controller.close();

        let fetched = fetch.await.unwrap().unwrap();
        assert_eq!(fetched.len(), 3);
        assert!(controller.is_empty());
    }

    #[tokio::test]
    async fn test_stale_response_does_not_replace_newer() {
        let slow = MockListSource::new(tasks()).with_delay(Duration::from_millis(100));
        let controller = ListController::new(Arc::new(slow.clone()));

        let filter = TaskFilter::default();
        let stale = controller.fetch(&filter);
        let newer = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            slow.set_items(vec![task(4, "gamma", 5)]);
            controller.fetch(&filter).await
        };
        let (stale, newer) = tokio::join!(stale, newer);

        assert_eq!(stale.unwrap().len(), 3);
        assert_eq!(newer.unwrap().len(), 1);
        assert_eq!(controller.len(), 1);
    }
}
