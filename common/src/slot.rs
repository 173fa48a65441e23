//! # Hardware Slot Records
//!
//! Block-scan parsing of the slot enumerator dump (`dmidecode -t slot`).
//!
//! A stanza looks like this:
//!
//! ```text
//! Handle 0x0903, DMI type 9, 17 bytes
//! System Slot Information
//!         Designation: PCIe Slot 3
//!         Type: x8 PCI Express 3
//!         Current Usage: In Use
//!         Bus Address: 0000:01:00.0
//!
//! ```
//!
//! The parsers never interpret the key/value structure beyond the few keys
//! they look for, so any other lines inside a block are tolerated.

use crate::error::{PciSlotError, Result};
use crate::pci::PciAddress;
use crate::pci::address::strip_default_domain;

const BUS_ADDRESS_KEY: &str = "Bus Address:";
const SLOT_KEYWORD: &str = "Slot";
const STANZA_TITLE: &str = "System Slot Information";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRecord {
    pub slot_number: String,
    pub raw_text_block: String,
    /// Domain-stripped bus address, present only when well formed.
    pub bus_address: Option<String>,
}

impl SlotRecord {
    /// Finds the block for `slot` in the enumerator dump.
    ///
    /// A missing bus address is not an error here; see [`SlotRecord::require_bus_address`].
    pub fn parse(dump: &str, slot: &str) -> Result<Self> {
        let block = extract_block(dump, slot).ok_or_else(|| PciSlotError::SlotNotFound {
            slot: slot.to_string(),
        })?;

        Ok(Self::from_block(slot, block))
    }

    fn from_block(slot: &str, block: String) -> Self {
        let bus_address = extract_bus_address(&block)
            .filter(|raw| raw.parse::<PciAddress>().is_ok_and(|a| !a.is_base()))
            .map(|raw| strip_default_domain(raw).to_string());

        Self {
            slot_number: slot.to_string(),
            raw_text_block: block,
            bus_address,
        }
    }

    pub fn require_bus_address(&self) -> Result<&str> {
        self.bus_address
            .as_deref()
            .ok_or_else(|| PciSlotError::BusAddressMissing {
                slot: self.slot_number.clone(),
            })
    }

    pub fn pci_address(&self) -> Result<PciAddress> {
        self.require_bus_address()?.parse()
    }

    pub fn designation(&self) -> Option<&str> {
        field_value(&self.raw_text_block, "Designation")
    }

    pub fn current_usage(&self) -> Option<&str> {
        field_value(&self.raw_text_block, "Current Usage")
    }

    pub fn slot_type(&self) -> Option<&str> {
        field_value(&self.raw_text_block, "Type")
    }
}

/// True when the line names `slot`, i.e. holds the tokens `Slot <slot>`.
///
/// Comparing whole tokens keeps `Slot 3` from matching `Slot 30`.
pub fn is_slot_header(line: &str, slot: &str) -> bool {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    tokens
        .windows(2)
        .any(|pair| pair[0] == SLOT_KEYWORD && pair[1] == slot)
}

/// Returns the lines from the first header naming `slot` up to, but not
/// including, the next blank line.
pub fn extract_block(dump: &str, slot: &str) -> Option<String> {
    let mut lines = dump.lines().skip_while(|line| !is_slot_header(line, slot));
    let header = lines.next()?;

    let block: Vec<&str> = std::iter::once(header)
        .chain(lines.take_while(|line| !line.trim().is_empty()))
        .collect();

    Some(block.join("\n"))
}

/// Third whitespace-separated token of the first `Bus Address:` line.
pub fn extract_bus_address(block: &str) -> Option<&str> {
    block
        .lines()
        .find(|line| line.contains(BUS_ADDRESS_KEY))
        .and_then(|line| line.split_whitespace().nth(2))
}

/// Value of a `Key: value` line inside a block.
pub fn field_value<'a>(block: &'a str, key: &str) -> Option<&'a str> {
    block.lines().find_map(|line| {
        let (k, v) = line.trim().split_once(':')?;
        (k == key).then(|| v.trim())
    })
}

/// Splits a full dump into one record per `System Slot Information` stanza.
///
/// The slot number is the token following `Slot` in the designation, or the
/// whole designation when it does not follow that pattern.
pub fn parse_all(dump: &str) -> Vec<SlotRecord> {
    let mut records = Vec::new();
    let mut lines = dump.lines();

    while let Some(line) = lines.next() {
        if line.trim() != STANZA_TITLE {
            continue;
        }
        let stanza: Vec<&str> = lines
            .by_ref()
            .take_while(|line| !line.trim().is_empty())
            .collect();
        let block = stanza.join("\n");

        let designation = field_value(&block, "Designation").unwrap_or_default();
        let slot_number = slot_number_of(designation).unwrap_or(designation).to_string();
        records.push(SlotRecord::from_block(&slot_number, block));
    }

    records
}

fn slot_number_of(designation: &str) -> Option<&str> {
    let tokens: Vec<&str> = designation.split_whitespace().collect();
    tokens
        .windows(2)
        .find(|pair| pair[0] == SLOT_KEYWORD)
        .map(|pair| pair[1])
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
