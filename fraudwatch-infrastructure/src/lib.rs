pub mod clients;
pub mod config;
pub mod services;

pub use clients::*;
pub use config::*;
pub use services::*;
