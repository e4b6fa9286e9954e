pub mod config;
pub mod error;
pub mod message;
pub mod render;
pub mod services;
pub mod terminal;
