pub mod cli;
pub mod config;
pub mod error;
pub mod ncaa;
pub mod server;
pub mod storage;
pub mod utils;
