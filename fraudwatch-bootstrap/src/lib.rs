// Fraudwatch Bootstrap
// Wires config, HTTP client, scheduler and controller into a CLI session.

pub mod context;
pub mod runner;

pub use context::AppContext;
