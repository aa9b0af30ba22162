pub mod config;
pub mod error;
pub mod tolerance;
pub mod traits;

pub use config::{CameraConfig, FieldSampling, StokesConfig, UvRanges};
pub use error::{Result, StokesError};
pub use tolerance::Tolerance;
