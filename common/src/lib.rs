pub mod config;
pub mod log;
pub mod network;
pub mod results;
