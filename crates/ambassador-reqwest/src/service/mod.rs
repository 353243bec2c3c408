//! REST operations of the back-office API.
//!
//! This module implements the collaborator traits of `ambassador-core` for
//! [`ApiClient`](crate::ApiClient) and adds the per-resource operations.

mod auth;
mod customer;
mod dashboard;
mod resource;
mod withdrawal;
