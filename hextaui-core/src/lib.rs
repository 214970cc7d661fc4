//! HextaUI catalog library exports

pub mod catalog;
pub mod config;
pub mod markdown;
pub mod server;
