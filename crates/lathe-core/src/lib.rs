pub mod config;
pub mod error;
pub mod tolerance;
pub mod traits;

pub use config::{CrossSectionKind, LatheConfig};
pub use error::{LatheError, Result};
pub use tolerance::Tolerance;
