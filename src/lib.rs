pub mod models;
pub mod page;
pub mod services;
pub mod cli;
pub mod utils;

pub use anyhow::{Error, Result};
