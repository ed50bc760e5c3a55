// Domain entities

pub mod case;
pub mod runtime_config;
pub mod simulation;
pub mod stats;
pub mod top_account;

pub use case::*;
pub use runtime_config::*;
pub use simulation::*;
pub use stats::*;
pub use top_account::*;
