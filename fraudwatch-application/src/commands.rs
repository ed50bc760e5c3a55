pub mod snapshot_commands;
