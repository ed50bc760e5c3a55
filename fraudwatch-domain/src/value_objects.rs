// Domain value objects
pub mod model;
pub mod period;
pub mod severity;

pub use model::*;
pub use period::*;
pub use severity::*;
