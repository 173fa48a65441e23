//! # Resource Mapping Requests
//!
//! Every field ends up inside a `key=value,...` argument of the cluster API
//! client, so each one is validated as a plain token before it is accepted.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{PciSlotError, Result};
use crate::pci::PciAddress;

const MAX_NAME_LEN: usize = 64;

static NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("invalid mapping name regex"));

static NODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?$").expect("invalid node name regex")
});

static VENDOR_DEVICE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{4}:[0-9a-fA-F]{4}$").expect("invalid vendor:device regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRequest {
    pub name: String,
    pub node: String,
    pub path: PciAddress,
    pub vendor_device_id: String,
}

impl MappingRequest {
    /// Validates every field and builds the request.
    pub fn new(name: &str, node: &str, path: &str, vendor_device_id: &str) -> Result<Self> {
        Ok(Self {
            name: validate_name(name)?,
            node: validate_node(node)?,
            path: path.trim().parse()?,
            vendor_device_id: validate_vendor_device_id(vendor_device_id)?,
        })
    }

    /// The `--map` property string understood by the cluster API.
    pub fn map_property(&self) -> String {
        format!(
            "node={},path={},id={}",
            self.node, self.path, self.vendor_device_id
        )
    }
}

pub fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.len() > MAX_NAME_LEN {
        return Err(PciSlotError::invalid(format!(
            "mapping name longer than {MAX_NAME_LEN} characters"
        )));
    }
    if !NAME_REGEX.is_match(name) {
        return Err(PciSlotError::invalid(format!(
            "mapping name '{name}' must start with a letter and contain only letters, digits, '-' or '_'"
        )));
    }
    Ok(name.to_string())
}

pub fn validate_node(node: &str) -> Result<String> {
    let node = node.trim();
    if !NODE_REGEX.is_match(node) {
        return Err(PciSlotError::invalid(format!("'{node}' is not a valid node name")));
    }
    Ok(node.to_string())
}

pub fn validate_vendor_device_id(id: &str) -> Result<String> {
    let id = id.trim();
    if !VENDOR_DEVICE_REGEX.is_match(id) {
        return Err(PciSlotError::invalid(format!(
            "'{id}' is not a vendor:device id (expected e.g. 8086:1521)"
        )));
    }
    Ok(id.to_ascii_lowercase())
}
