//! # PCI Bus Addresses
//!
//! Parses and renders `domain:bus:device.function` identifiers.
//!
//! Accepted forms:
//! * **Full**: `0000:01:00.0`
//! * **Short**: `01:00.0` (domain assumed `0000`, as printed by `lspci`)
//! * **Base**: `0000:01:00` or `01:00` (no function, i.e. the whole card)

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::PciSlotError;

/// Domain prefix that the enumerators print (or omit) for the default segment.
pub const DEFAULT_DOMAIN_PREFIX: &str = "0000:";

static PCI_ADDRESS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:([0-9a-fA-F]{4}):)?([0-9a-fA-F]{2}):([0-9a-fA-F]{2})(?:\.([0-7]))?$")
        .expect("invalid PCI address regex")
});

const MAX_DEVICE: u8 = 0x1f;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PciAddress {
    pub domain: u16,
    pub bus: u8,
    pub device: u8,
    /// `None` for a base address.
    pub function: Option<u8>,
}

impl PciAddress {
    pub fn new(domain: u16, bus: u8, device: u8, function: Option<u8>) -> Self {
        Self {
            domain,
            bus,
            device,
            function,
        }
    }

    /// The function-less part of the address, shared by every port of a card.
    pub fn base(&self) -> Self {
        Self {
            function: None,
            ..*self
        }
    }

    pub fn is_base(&self) -> bool {
        self.function.is_none()
    }

    /// Renders the address without the domain, the way `lspci` prints it.
    pub fn short(&self) -> String {
        match self.function {
            Some(function) => format!("{:02x}:{:02x}.{}", self.bus, self.device, function),
            None => format!("{:02x}:{:02x}", self.bus, self.device),
        }
    }
}

impl fmt::Display for PciAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}:{}", self.domain, self.short())
    }
}

impl FromStr for PciAddress {
    type Err = PciSlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PciSlotError::invalid(format!("'{s}' is not a PCI address"));
        let caps = PCI_ADDRESS_REGEX.captures(s.trim()).ok_or_else(invalid)?;

        let domain = match caps.get(1) {
            Some(m) => u16::from_str_radix(m.as_str(), 16).map_err(|_| invalid())?,
            None => 0,
        };
        let bus = u8::from_str_radix(&caps[2], 16).map_err(|_| invalid())?;
        let device = u8::from_str_radix(&caps[3], 16).map_err(|_| invalid())?;
        if device > MAX_DEVICE {
            return Err(invalid());
        }
        let function = match caps.get(4) {
            Some(m) => Some(m.as_str().parse::<u8>().map_err(|_| invalid())?),
            None => None,
        };

        Ok(Self::new(domain, bus, device, function))
    }
}

/// Removes a literal `0000:` prefix, leaving any other domain untouched.
pub fn strip_default_domain(address: &str) -> &str {
    address.strip_prefix(DEFAULT_DOMAIN_PREFIX).unwrap_or(address)
}

/// Adds the `0000:` prefix to an address that carries no domain.
pub fn with_default_domain(address: &str) -> String {
    if address.matches(':').count() >= 2 {
        address.to_string()
    } else {
        format!("{DEFAULT_DOMAIN_PREFIX}{address}")
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
