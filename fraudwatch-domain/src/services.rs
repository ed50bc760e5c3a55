// Pure domain services

pub mod clock;
pub mod ranking;
pub mod timeline;

pub use clock::*;
pub use ranking::*;
pub use timeline::*;
