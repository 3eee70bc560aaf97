pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod io;
pub mod paths;
pub mod prompt;
pub mod store;
pub mod types;

pub use error::{Result, SpecError};
