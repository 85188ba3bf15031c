#![forbid(unsafe_code)]

pub mod error;
pub mod evaluator;
pub mod gate;
pub mod model;
pub mod settings;
pub mod tasks;

pub use error::Error;
