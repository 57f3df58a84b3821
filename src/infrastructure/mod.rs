//! Infrastructure layer providing external service integrations.
//!
//! This module contains the hosted-model client, file export, configuration
//! loading and clipboard access.

pub mod clipboard;
pub mod config;
pub mod export;
pub mod gemini;

pub use config::*;
pub use export::*;
pub use gemini::GeminiInvoker;
