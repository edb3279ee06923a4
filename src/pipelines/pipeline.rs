//! Pipeline trait.
use crate::error::Error;

/// A runnable, fully configured pipeline (source and destination included).
///
/// Generic over the return type, so that pipelines can report what they did.
pub trait Pipeline<T> {
    fn run(&self) -> Result<T, Error>;
}
