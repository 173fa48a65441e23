use std::fs;
use std::os::unix::fs::symlink;
use std::path::PathBuf;

use pcislot_common::config::{Config, DisplayOptions, SystemPaths};
use pnet::datalink::{MacAddr, NetworkInterface};
use pnet::ipnetwork::{IpNetwork, Ipv4Network};
use std::net::Ipv4Addr;
use tempfile::TempDir;

const IFF_UP: u32 = 1;

/// Temporary sysfs and VM configuration trees plus a matching [`Config`].
pub struct FakeHost {
    dir: TempDir,
}

impl FakeHost {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("sys/bus/pci/devices")).unwrap();
        fs::create_dir_all(dir.path().join("etc/pve/qemu-server")).unwrap();
        Self { dir }
    }

    pub fn devices_dir(&self) -> PathBuf {
        self.dir.path().join("sys/bus/pci/devices")
    }

    pub fn vm_dir(&self) -> PathBuf {
        self.dir.path().join("etc/pve/qemu-server")
    }

    pub fn config(&self, display: DisplayOptions) -> Config {
        Config {
            display,
            paths: SystemPaths {
                pci_devices: self.devices_dir(),
                vm_config_dir: self.vm_dir(),
            },
            ..Config::default()
        }
    }

    /// Adds `<devices>/<address>` with vendor/device ids and optional bindings.
    pub fn device(&self, address: &str, vendor: &str, device: &str) -> DeviceBuilder {
        let dir = self.devices_dir().join(address);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("vendor"), format!("0x{vendor}\n")).unwrap();
        fs::write(dir.join("device"), format!("0x{device}\n")).unwrap();
        DeviceBuilder { dir }
    }

    pub fn vm_config(&self, file: &str, contents: &str) {
        fs::write(self.vm_dir().join(file), contents).unwrap();
    }
}

pub struct DeviceBuilder {
    dir: PathBuf,
}

impl DeviceBuilder {
    pub fn driver(self, name: &str) -> Self {
        symlink(format!("../../../../bus/pci/drivers/{name}"), self.dir.join("driver")).unwrap();
        self
    }

    pub fn iommu_group(self, group: &str) -> Self {
        symlink(format!("../../../../kernel/iommu_groups/{group}"), self.dir.join("iommu_group")).unwrap();
        self
    }

    pub fn interface(self, name: &str) -> Self {
        fs::create_dir_all(self.dir.join("net").join(name)).unwrap();
        self
    }
}

pub fn ni(name: &str, mac: [u8; 6], ip: [u8; 4], up: bool) -> NetworkInterface {
    NetworkInterface {
        name: name.into(),
        description: "".into(),
        index: 2,
        mac: Some(MacAddr::new(mac[0], mac[1], mac[2], mac[3], mac[4], mac[5])),
        ips: vec![IpNetwork::V4(
            Ipv4Network::new(Ipv4Addr::new(ip[0], ip[1], ip[2], ip[3]), 24).unwrap(),
        )],
        flags: if up { IFF_UP } else { 0 },
    }
}
