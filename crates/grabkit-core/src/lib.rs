pub mod config;
pub mod logging;

pub mod command;
pub mod exec;
pub mod feed_db;
pub mod request;
