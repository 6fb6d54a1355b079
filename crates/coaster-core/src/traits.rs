use crate::error::Result;

/// Validate structural integrity of a configuration or geometric entity.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
