pub mod config;
pub mod fixture;
pub mod http;
pub mod server;
