pub mod models;
pub mod services;
pub mod errors;
pub mod workflow;
pub mod workspace;

pub use models::*;
pub use services::*;
pub use errors::*;
pub use workflow::*;
pub use workspace::*;
