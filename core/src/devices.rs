//! Device Correlator: bus enumerator queries and card grouping.

use pcislot_common::config::ToolSet;
use pcislot_common::error::{PciSlotError, Result};
use pcislot_common::pci::{DeviceDescriptor, DeviceGroup, PciAddress, group_by_base};
use tracing::debug;

use crate::runner::{CommandRunner, run_checked};

/// The network functions sharing one base address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkCard {
    pub base: PciAddress,
    pub ports: Vec<DeviceDescriptor>,
}

pub struct DeviceCorrelator<'a> {
    runner: &'a dyn CommandRunner,
    tools: &'a ToolSet,
}

impl<'a> DeviceCorrelator<'a> {
    pub fn new(runner: &'a dyn CommandRunner, tools: &'a ToolSet) -> Self {
        Self { runner, tools }
    }

    /// First line of `lspci -s <address>`, or `None` when nothing matches.
    pub fn lookup_device(&self, bus_address: &str) -> Result<Option<DeviceDescriptor>> {
        let address: PciAddress = bus_address.parse()?;
        let stdout = self.query(&["-s", &address.to_string()])?;
        Ok(stdout.lines().find_map(DeviceDescriptor::parse_line))
    }

    pub fn require_device(&self, bus_address: &str) -> Result<DeviceDescriptor> {
        self.lookup_device(bus_address)?
            .ok_or_else(|| PciSlotError::DeviceNotFound {
                address: bus_address.to_string(),
            })
    }

    /// Full multi-line `lspci -v` text for one address.
    pub fn describe_verbose(&self, address: &PciAddress) -> Result<Option<String>> {
        let stdout = self.query(&["-v", "-s", &address.to_string()])?;
        let text = stdout.trim_end();
        Ok((!text.is_empty()).then(|| text.to_string()))
    }

    /// Every function sharing `address`'s base, in enumerator order.
    pub fn card_functions(&self, address: &PciAddress) -> Result<Vec<DeviceDescriptor>> {
        let stdout = self.query(&["-s", &address.base().to_string()])?;
        Ok(parse_listing(&stdout))
    }

    pub fn list_devices(&self) -> Result<Vec<DeviceDescriptor>> {
        let stdout = self.query(&[])?;
        Ok(parse_listing(&stdout))
    }

    pub fn list_network_devices(&self) -> Result<Vec<DeviceDescriptor>> {
        let devices: Vec<DeviceDescriptor> = self
            .list_devices()?
            .into_iter()
            .filter(DeviceDescriptor::is_network)
            .collect();
        debug!(count = devices.len(), "network controllers found");
        Ok(devices)
    }

    /// Network controllers grouped per card, cards in ascending base order.
    pub fn network_groups(&self) -> Result<Vec<NetworkCard>> {
        let devices = self.list_network_devices()?;
        let groups: Vec<DeviceGroup> = group_by_base(devices.iter().map(|d| d.address));

        Ok(groups
            .into_iter()
            .map(|group| NetworkCard {
                base: group.base,
                ports: group
                    .ports
                    .iter()
                    .filter_map(|addr| devices.iter().find(|d| d.address == *addr).cloned())
                    .collect(),
            })
            .collect())
    }

    fn query(&self, args: &[&str]) -> Result<String> {
        run_checked(self.runner, &self.tools.lspci, args)
    }
}

fn parse_listing(stdout: &str) -> Vec<DeviceDescriptor> {
    stdout.lines().filter_map(DeviceDescriptor::parse_line).collect()
}
