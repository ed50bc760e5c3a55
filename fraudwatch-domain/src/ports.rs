// Gateway and Scheduler Port Traits (Interfaces)
// Define what the domain needs from infrastructure

pub mod clients;
pub mod scheduler;

pub use clients::*;
pub use scheduler::*;
