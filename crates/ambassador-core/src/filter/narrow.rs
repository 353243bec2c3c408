//! Pure client-side narrowing of fetched lists.

use bigdecimal::BigDecimal;

use crate::types::{Task, amount};

/// A predicate narrowing an already-fetched sequence.
///
/// Narrowing never mutates the input and preserves its order, so applying the
/// same predicate twice yields the same result as applying it once.
pub trait Narrow<T> {
    /// Returns `true` if the item is kept.
    fn matches(&self, item: &T) -> bool;

    /// Returns the kept items in input order.
    fn narrow(&self, items: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        items
            .iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect()
    }
}

impl<T, F> Narrow<T> for F
where
    F: Fn(&T) -> bool,
{
    fn matches(&self, item: &T) -> bool {
        self(item)
    }
}

/// Name and price predicates of the task catalog screen.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TaskCriteria {
    /// Case-insensitive substring of the task name.
    pub name: Option<String>,
    /// Inclusive lower price bound.
    pub price_from: Option<BigDecimal>,
    /// Inclusive upper price bound.
    pub price_to: Option<BigDecimal>,
}

impl TaskCriteria {
    /// Builds criteria from raw form input; blank or unparsable fields are
    /// ignored.
    pub fn from_input(name: &str, price_from: &str, price_to: &str) -> Self {
        let name = name.trim();
        Self {
            name: (!name.is_empty()).then(|| name.to_lowercase()),
            price_from: amount::parse_input(price_from),
            price_to: amount::parse_input(price_to),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into().to_lowercase());
        self
    }

    pub fn with_price_range(mut self, from: BigDecimal, to: BigDecimal) -> Self {
        self.price_from = Some(from);
        self.price_to = Some(to);
        self
    }

    /// Returns `true` if no predicate is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price_from.is_none() && self.price_to.is_none()
    }
}

impl Narrow<Task> for TaskCriteria {
    fn matches(&self, task: &Task) -> bool {
        if let Some(needle) = &self.name {
            let hit = task
                .name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&needle.to_lowercase()));
            if !hit {
                return false;
            }
        }

        // Tasks without a price fail any price bound.
        if let Some(from) = &self.price_from
            && !task.task_value.as_ref().is_some_and(|value| value >= from)
        {
            return false;
        }
        if let Some(to) = &self.price_to
            && !task.task_value.as_ref().is_some_and(|value| value <= to)
        {
            return false;
        }

        true
    }
}
