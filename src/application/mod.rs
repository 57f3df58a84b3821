//! Application layer managing state and workflows.
//!
//! This module coordinates between the domain layer and presentation layer,
//! managing application state, user interactions and background
//! translation requests.

pub mod state;
pub mod worker;

pub use state::*;
pub use worker::*;
