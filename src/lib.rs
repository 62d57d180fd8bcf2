pub mod cli;
pub mod config;
pub mod content;
pub mod domain;
pub mod errors;
pub mod parser;
pub mod services;
pub mod sources;
