pub mod errors;
pub mod format;

pub use errors::{PurgeError, Result};
