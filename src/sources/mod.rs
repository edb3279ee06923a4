//! Dump readers.
mod wikipedia;

pub use wikipedia::Dump;
