//! Mock list source.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use ambassador_core::{Error, ListSource, Resource, Result};

use super::lock;

struct ListState<R> {
    items: Vec<R>,
    failing: bool,
    delay: Option<Duration>,
    filters: Vec<serde_json::Value>,
}

/// List source returning canned items.
pub struct MockListSource<R> {
    state: Arc<Mutex<ListState<R>>>,
}

impl<R> Clone for MockListSource<R> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<R: Clone> MockListSource<R> {
    /// Returns `items` for every fetch.
    pub fn new(items: Vec<R>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ListState {
                items,
                failing: false,
                delay: None,
                filters: Vec::new(),
            })),
        }
    }

    /// Delays every response by `delay`.
    #[must_use]
    pub fn with_delay(self, delay: Duration) -> Self {
        lock(&self.state).delay = Some(delay);
        self
    }

    /// Replaces the canned items.
    pub fn set_items(&self, items: Vec<R>) {
        lock(&self.state).items = items;
    }

    /// Switches the failing mode.
    pub fn set_failing(&self, failing: bool) {
        lock(&self.state).failing = failing;
    }

    /// Every received filter, encoded as JSON, in order.
    pub fn filters(&self) -> Vec<serde_json::Value> {
        lock(&self.state).filters.clone()
    }
}

#[async_trait::async_trait]
impl<R> ListSource<R> for MockListSource<R>
where
    R: Resource + Clone + Sync,
{
    async fn fetch(&self, filter: &R::Filter) -> Result<Vec<R>> {
        let encoded = serde_json::to_value(filter)?;
        let (items, failing, delay) = {
            let mut state = lock(&self.state);
            state.filters.push(encoded);
            (state.items.clone(), state.failing, state.delay)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if failing {
            return Err(Error::network_error());
        }
        Ok(items)
    }
}
