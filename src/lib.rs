pub mod commands;
pub mod config;
pub mod consistency;
pub mod error;
pub mod graph;
pub mod parser;
pub mod progress;
pub mod scanner;
pub mod scope;
pub mod snapshot;
pub mod validate;
pub mod validation;
pub mod violation;
