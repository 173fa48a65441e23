//! Shared models and pure text handling for `pcislot`.
//!
//! Nothing in this crate spawns processes or touches the filesystem; the
//! parsers operate on text that the `core` crate obtained from external tools.

pub mod config;
pub mod error;
pub mod mapping;
pub mod pci;
pub mod slot;
