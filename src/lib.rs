pub mod config;
pub mod error;
pub mod llm;
pub mod netinfo;
pub mod relay;
pub mod server;

pub use error::{Error, Result};
