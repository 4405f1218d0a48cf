pub mod domain;
pub mod error;
pub mod models;
pub mod upstream;
pub mod utils;

pub use error::{Error, Result};
