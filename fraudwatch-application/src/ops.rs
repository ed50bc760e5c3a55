// Stateful application components

pub mod simulation_controller;

pub use simulation_controller::*;
