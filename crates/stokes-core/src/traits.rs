use crate::error::Result;

/// Validate a value before it is handed to the numerical core.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
