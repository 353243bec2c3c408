//! Typed records exchanged with the back-office REST API.

mod admin;
pub mod amount;
mod auth;
mod customer;
mod id;
mod level;
mod record;
mod task;
mod withdrawal;

pub use admin::AdminUser;
pub use auth::{LoginCredentials, LoginResponse, Subject};
pub use customer::{Customer, CustomerDraft, CustomerFlags, CustomerPatch};
pub use id::EntityId;
pub use level::{AmbassadorLevel, AmbassadorLevelDraft};
pub use record::{DepositRecord, NamedItem, TransactionRecord};
pub use task::{CustomerTask, Task, TaskDraft};
pub use withdrawal::{StatusUpdate, Withdrawal, WithdrawalStatus};
