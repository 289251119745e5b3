pub mod app;
pub mod bencode;
pub mod client;
pub mod config;
mod error;
pub mod magnet;
pub mod torrent;
pub use error::{Error, Result};

pub const NCORE_VERSION: &str = "ncore 0.1.0";
