pub mod browse;
pub mod cli;
pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod scanner;
pub mod session;
