pub mod config;
pub mod error;
pub mod llm;
pub mod server;
pub mod stylist;

pub use error::{Error, Result};
