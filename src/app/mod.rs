// Application layer: wires CLI commands to the core helpers.

pub mod commands;

pub use commands::run_command;
