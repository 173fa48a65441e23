//! Per-device sysfs bindings and host interface details.

use std::fs;
use std::path::{Path, PathBuf};

use pcislot_common::pci::PciAddress;
use pnet::datalink::{self, NetworkInterface};
use tracing::debug;

/// Reads `<pci_devices>/<address>/...` entries.
pub struct DeviceBindings<'a> {
    root: &'a Path,
}

impl<'a> DeviceBindings<'a> {
    pub fn new(root: &'a Path) -> Self {
        Self { root }
    }

    pub fn device_dir(&self, address: &PciAddress) -> PathBuf {
        self.root.join(address.to_string())
    }

    /// Interface names under `net/`, sorted. Empty when the device has none.
    pub fn interfaces(&self, address: &PciAddress) -> Vec<String> {
        let net_dir = self.device_dir(address).join("net");
        let Ok(entries) = fs::read_dir(&net_dir) else {
            debug!(path = %net_dir.display(), "no network interfaces");
            return Vec::new();
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    /// Final path segment of the `driver` symlink.
    pub fn driver(&self, address: &PciAddress) -> Option<String> {
        link_name(&self.device_dir(address).join("driver"))
    }

    pub fn iommu_group(&self, address: &PciAddress) -> Option<String> {
        link_name(&self.device_dir(address).join("iommu_group"))
    }

    /// `vendor:device` from the `vendor` and `device` files, e.g. `8086:1521`.
    pub fn vendor_device_id(&self, address: &PciAddress) -> Option<String> {
        let dir = self.device_dir(address);
        let vendor = read_id(&dir.join("vendor"))?;
        let device = read_id(&dir.join("device"))?;
        Some(format!("{vendor}:{device}"))
    }
}

fn link_name(link: &Path) -> Option<String> {
    fs::read_link(link)
        .ok()
        .and_then(|target| target.file_name().map(|n| n.to_string_lossy().to_string()))
}

fn read_id(path: &Path) -> Option<String> {
    let raw = fs::read_to_string(path).ok()?;
    let id = raw.trim().trim_start_matches("0x").to_lowercase();
    (!id.is_empty()).then_some(id)
}

/// Link-layer details of one host interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceInfo {
    pub name: String,
    pub mac: Option<String>,
    /// `None` when the interface is missing from the host table.
    pub up: Option<bool>,
    pub ips: Vec<String>,
}

/// Snapshot of the host's interface table.
pub struct LinkTable {
    interfaces: Vec<NetworkInterface>,
}

impl LinkTable {
    pub fn from_host() -> Self {
        Self {
            interfaces: datalink::interfaces(),
        }
    }

    pub fn from_interfaces(interfaces: Vec<NetworkInterface>) -> Self {
        Self { interfaces }
    }

    /// Details for `name`, falling back to the bare name when the host does
    /// not list it.
    pub fn describe(&self, name: &str) -> InterfaceInfo {
        self.lookup(name).unwrap_or_else(|| InterfaceInfo {
            name: name.to_string(),
            mac: None,
            up: None,
            ips: Vec::new(),
        })
    }

    pub fn lookup(&self, name: &str) -> Option<InterfaceInfo> {
        self.interfaces
            .iter()
            .find(|iface| iface.name == name)
            .map(|iface| InterfaceInfo {
                name: iface.name.clone(),
                mac: iface.mac.map(|mac| mac.to_string()),
                up: Some(iface.is_up()),
                ips: iface.ips.iter().map(|net| net.to_string()).collect(),
            })
    }
}
