//! # PCI Models
//!
//! Addresses, enumerator lines and multi-port grouping.

pub mod address;
pub mod device;

pub use address::{PciAddress, strip_default_domain, with_default_domain};
pub use device::{DeviceDescriptor, DeviceGroup, group_by_base, is_network_device};
