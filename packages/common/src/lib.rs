pub mod error;
pub mod filesystem;
pub mod generator;

pub use error::*;
pub use filesystem::*;
pub use generator::*;
