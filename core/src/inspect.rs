//! Collects everything known about a card's ports into reports.
//!
//! Section lookups never abort a report: a failing section is recorded in
//! [`PortReport::problems`] and the remaining sections are still filled in.

use pcislot_common::config::{Config, DisplayOptions};
use pcislot_common::error::{PciSlotError, Result};
use pcislot_common::pci::{DeviceDescriptor, PciAddress};
use tracing::debug;

use crate::devices::DeviceCorrelator;
use crate::runner::CommandRunner;
use crate::sysfs::{DeviceBindings, InterfaceInfo, LinkTable};
use crate::usage::UsageChecker;

#[derive(Debug, Clone)]
pub struct PortReport {
    pub device: DeviceDescriptor,
    /// Multi-line enumerator text, filled in verbose mode.
    pub details: Option<String>,
    pub driver: Option<String>,
    pub iommu_group: Option<String>,
    pub vendor_device_id: Option<String>,
    pub interfaces: Vec<InterfaceInfo>,
    /// `None` when not requested or when the mapping dump was unavailable.
    pub mappings: Option<Vec<String>>,
    pub vm_usage: Vec<String>,
    pub problems: Vec<PciSlotError>,
}

#[derive(Debug, Clone)]
pub struct CardReport {
    pub base: PciAddress,
    pub ports: Vec<PortReport>,
}

pub struct PortInspector<'a> {
    devices: DeviceCorrelator<'a>,
    bindings: DeviceBindings<'a>,
    usage: UsageChecker<'a>,
    links: &'a LinkTable,
    display: DisplayOptions,
}

impl<'a> PortInspector<'a> {
    pub fn new(runner: &'a dyn CommandRunner, cfg: &'a Config, links: &'a LinkTable) -> Self {
        Self {
            devices: DeviceCorrelator::new(runner, &cfg.tools),
            bindings: DeviceBindings::new(&cfg.paths.pci_devices),
            usage: UsageChecker::new(runner, &cfg.tools, &cfg.paths),
            links,
            display: cfg.display,
        }
    }

    /// Reports the device at `address`; a base address covers every function
    /// of the card.
    pub fn inspect_address(&self, address: &PciAddress) -> Result<CardReport> {
        let ports = if address.is_base() {
            self.devices.card_functions(address)?
        } else {
            self.devices
                .lookup_device(&address.to_string())?
                .into_iter()
                .collect()
        };

        if ports.is_empty() {
            return Err(PciSlotError::DeviceNotFound {
                address: address.to_string(),
            });
        }

        Ok(self.card(address.base(), ports))
    }

    /// Reports every function of the card `address` belongs to.
    pub fn inspect_card(&self, address: &PciAddress) -> Result<CardReport> {
        self.inspect_address(&address.base())
    }

    /// Reports every network controller, one card per base address.
    pub fn inspect_network_cards(&self) -> Result<Vec<CardReport>> {
        Ok(self
            .devices
            .network_groups()?
            .into_iter()
            .map(|card| self.card(card.base, card.ports))
            .collect())
    }

    fn card(&self, base: PciAddress, ports: Vec<DeviceDescriptor>) -> CardReport {
        CardReport {
            base,
            ports: ports.into_iter().map(|device| self.inspect_port(device)).collect(),
        }
    }

    pub fn inspect_port(&self, device: DeviceDescriptor) -> PortReport {
        let address = device.address;
        let mut report = PortReport {
            details: None,
            driver: None,
            iommu_group: None,
            vendor_device_id: self.bindings.vendor_device_id(&address),
            interfaces: Vec::new(),
            mappings: None,
            vm_usage: Vec::new(),
            problems: Vec::new(),
            device,
        };

        if self.display.verbose {
            match self.devices.describe_verbose(&address) {
                Ok(details) => report.details = details,
                Err(e) => report.problems.push(e),
            }
        }

        if self.display.driver {
            report.driver = self.bindings.driver(&address);
            report.iommu_group = self.bindings.iommu_group(&address);
        }

        if self.display.net {
            if report.device.is_network() {
                report.interfaces = self
                    .bindings
                    .interfaces(&address)
                    .iter()
                    .map(|name| self.links.describe(name))
                    .collect();
            } else {
                report.problems.push(PciSlotError::ClassificationMismatch {
                    address: address.to_string(),
                    description: report.device.class_description.clone(),
                });
            }
        }

        if self.display.mapping {
            match self.usage.find_mapping(&address.to_string()) {
                Ok(lines) => report.mappings = Some(lines),
                Err(e) => {
                    debug!(%address, "mapping lookup failed");
                    report.problems.push(e);
                }
            }
        }

        if self.display.vms {
            report.vm_usage = self.usage.find_vm_usage(&address.to_string());
        }

        report
    }
}
