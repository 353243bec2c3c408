//! List filter and fetch controllers.

mod controller;

pub use controller::ListController;
