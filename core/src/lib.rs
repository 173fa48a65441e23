//! The slot/device inspection components.
//!
//! Each component borrows a [`runner::CommandRunner`] and the shared
//! [`pcislot_common::config::Config`]; none of them keeps state between calls,
//! so the only thing flowing from one to the next is a bus address.

pub mod devices;
pub mod inspect;
pub mod mapping;
pub mod runner;
pub mod slots;
pub mod sysfs;
pub mod system;
pub mod usage;
