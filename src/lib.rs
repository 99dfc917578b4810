pub mod api;
pub mod clients;
pub mod config;
pub mod differences;
pub mod error;
pub mod models;
pub mod notifier;
pub mod resolver;
pub mod workflow;
