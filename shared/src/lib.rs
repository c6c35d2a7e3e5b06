pub mod legacy;
pub mod models;
pub mod types;

pub use models::*;
pub use types::*;
