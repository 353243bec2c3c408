//! Authentication session state machine.

mod controller;

pub use controller::{AuthController, AuthState};
