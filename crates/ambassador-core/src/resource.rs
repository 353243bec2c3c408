//! REST resource descriptors.
//!
//! A [`Resource`] binds a record type to its collection path and list filter
//! so that the HTTP client can offer generic list, get, create, update and
//! delete operations.

use serde::Serialize;
use serde::de::DeserializeOwned;
use strum::{AsRefStr, Display, EnumString};
use validator::Validate;

use crate::filter::{
    AdminFilter, CustomerFilter, CustomerTaskFilter, NoFilter, RecordFilter, TaskFilter,
    WithdrawalFilter,
};
use crate::types::{
    AdminUser, AmbassadorLevel, AmbassadorLevelDraft, Customer, CustomerDraft, CustomerPatch,
    CustomerTask, DepositRecord, EntityId, Task, TaskDraft, TransactionRecord,
    Withdrawal,
};

/// A record type served from a REST collection.
pub trait Resource: DeserializeOwned + Send + 'static {
    /// Collection path relative to the API prefix, without slashes.
    const PATH: &'static str;

    /// Query predicates of the collection's list endpoint.
    type Filter: Serialize + Send + Sync;

    /// Path of one record of the collection.
    fn item_path(id: &EntityId) -> String {
        format!("/{}/{}", Self::PATH, id)
    }

    /// Path used to read one record; differs from [`Resource::item_path`]
    /// where the backend exposes a dedicated detail view.
    fn detail_path(id: &EntityId) -> String {
        Self::item_path(id)
    }
}

/// A resource accepting `POST` of a validated draft.
pub trait Creatable: Resource {
    type Draft: Serialize + Validate + Send + Sync;
}

/// A resource accepting `PATCH` of a validated partial update.
pub trait Updatable: Resource {
    type Patch: Serialize + Validate + Send + Sync;
}

impl Resource for Customer {
    const PATH: &'static str = "customers";
    type Filter = CustomerFilter;

    fn detail_path(id: &EntityId) -> String {
        format!("/{}/{}/detail", Self::PATH, id)
    }
}

impl Creatable for Customer {
    type Draft = CustomerDraft;
}

impl Updatable for Customer {
    type Patch = CustomerPatch;
}

impl Resource for Task {
    const PATH: &'static str = "tasklists";
    type Filter = TaskFilter;
}

impl Creatable for Task {
    type Draft = TaskDraft;
}

impl Updatable for Task {
    type Patch = TaskDraft;
}

impl Resource for CustomerTask {
    const PATH: &'static str = "customer-tasks";
    type Filter = CustomerTaskFilter;
}

impl Resource for Withdrawal {
    const PATH: &'static str = "withdrawals";
    type Filter = WithdrawalFilter;
}

impl Resource for AmbassadorLevel {
    const PATH: &'static str = "ambassador-levels";
    type Filter = NoFilter;
}

impl Creatable for AmbassadorLevel {
    type Draft = AmbassadorLevelDraft;
}

impl Updatable for AmbassadorLevel {
    type Patch = AmbassadorLevelDraft;
}

impl Resource for AdminUser {
    const PATH: &'static str = "admin";
    type Filter = AdminFilter;
}

impl Resource for DepositRecord {
    const PATH: &'static str = "deposit-records";
    type Filter = RecordFilter;
}

impl Resource for TransactionRecord {
    const PATH: &'static str = "transaction-records";
    type Filter = RecordFilter;
}

/// Master-data lists sharing the [`NamedItem`](crate::types::NamedItem) shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(AsRefStr, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum MasterData {
    Currencies,
    Projects,
    SalesStatuses,
}

impl MasterData {
    /// Collection path relative to the API prefix.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Currencies => "/currencies",
            Self::Projects => "/projects",
            Self::SalesStatuses => "/sales-statuses",
        }
    }
}
