pub mod error;
pub mod traits;

pub use error::{CoasterError, Result};
