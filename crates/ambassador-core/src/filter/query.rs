//! Server-side list filters.
//!
//! Each filter serializes to the query string of its list endpoint. Every
//! predicate is optional and unset predicates are omitted from the request.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::types::{EntityId, WithdrawalStatus};

/// Page selection shared by every list endpoint.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// One-based page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Maximum number of rows per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl Pagination {
    /// Default page size used by the list screens.
    pub const DEFAULT_LIMIT: u32 = 10;

    /// Returns a new [`Pagination`].
    #[inline]
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    /// Returns the page number, `1` when unset.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    /// Returns the page size.
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }
}

/// Online presence predicate of the customer list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Presence {
    #[default]
    All,
    Online,
    Offline,
}

/// Predicates of `GET /customers`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub online_offline: Option<Presence>,
    #[serde(flatten)]
    pub pagination: Pagination,
}

impl CustomerFilter {
    /// Restricts the list to customers created within `start..=end`.
    pub fn with_date_range(mut self, start: Date, end: Date) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn with_login_user_name(mut self, login_user_name: impl Into<String>) -> Self {
        self.login_user_name = Some(login_user_name.into());
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }
}

/// Predicates of `GET /withdrawals`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalFilter {
    #[serde(rename = "statusID", skip_serializing_if = "Option::is_none")]
    pub status_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<EntityId>,
    #[serde(flatten)]
    pub pagination: Pagination,
}

impl WithdrawalFilter {
    pub fn with_status(mut self, status: WithdrawalStatus) -> Self {
        self.status_id = Some(status.id());
        self
    }

    pub fn with_date_range(mut self, start: Date, end: Date) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }
}

/// Predicates of `GET /tasklists`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskFilter {
    #[serde(flatten)]
    pub pagination: Pagination,
}

/// Predicates of `GET /customer-tasks`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerTaskFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<EntityId>,
    #[serde(flatten)]
    pub pagination: Pagination,
}

/// Predicates of `GET /admin`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(flatten)]
    pub pagination: Pagination,
}

/// Predicates of the deposit and transaction record lists.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Date>,
    #[serde(flatten)]
    pub pagination: Pagination,
}

impl RecordFilter {
    pub fn with_date_range(mut self, start: Date, end: Date) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }
}

/// Lists without predicates (levels, currencies, projects, sales statuses).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoFilter {}
