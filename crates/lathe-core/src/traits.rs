use crate::error::Result;

/// Validate the parameters of an entity before it is used to size buffers.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
