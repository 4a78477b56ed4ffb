pub mod error;
pub mod parsing;
pub mod time_value;
pub mod types;

#[cfg(feature = "measurement")]
pub mod measurement;

#[cfg(feature = "import")]
pub mod import;

#[cfg(feature = "portfolio")]
pub mod portfolio;

pub use error::Ifrs16Error;
pub use types::*;

/// Standard result type for all lease measurement operations
pub type Ifrs16Result<T> = Result<T, Ifrs16Error>;
