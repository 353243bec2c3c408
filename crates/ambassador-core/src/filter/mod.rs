//! List predicates: server-side query filters and client-side narrowing.

mod narrow;
mod query;

pub use narrow::{Narrow, TaskCriteria};
pub use query::{
    AdminFilter, CustomerFilter, CustomerTaskFilter, NoFilter, Pagination, Presence,
    RecordFilter, TaskFilter, WithdrawalFilter,
};
