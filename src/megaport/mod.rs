pub mod client;
pub mod error;
pub mod product;

pub use client::*;
pub use error::*;
pub use product::*;
