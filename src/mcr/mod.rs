pub mod error;
pub mod models;
pub mod provisioning;
pub mod service;
pub mod validation;

pub use error::*;
pub use models::*;
pub use provisioning::*;
pub use service::*;
pub use validation::*;
