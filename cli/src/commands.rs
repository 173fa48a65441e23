pub mod all;
pub mod list;
pub mod map;
pub mod pci;
pub mod report;
pub mod slot;

use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use pcislot_common::config::{Config, DisplayOptions};
use pcislot_common::pci::PciAddress;
use pcislot_core::devices::DeviceCorrelator;
use pcislot_core::inspect::PortInspector;
use pcislot_core::mapping::MappingCreator;
use pcislot_core::runner::CommandRunner;
use pcislot_core::slots::SlotResolver;
use pcislot_core::sysfs::LinkTable;

#[derive(Parser, Debug)]
#[command(name = "pcislot")]
#[command(version, about = "Inspect PCI slots on a Proxmox host and register PCI resource mappings.")]
#[command(group(
    ArgGroup::new("mode")
        .args(["all", "slot", "pci", "list", "map"])
        .multiple(false)
))]
pub struct CommandLine {
    /// Report every network controller, grouped per card
    #[arg(long)]
    pub all: bool,
    /// Report the card in hardware slot N
    #[arg(long, value_name = "N")]
    pub slot: Option<String>,
    /// Report a device by PCI address (0000:01:00.0, 01:00.0 or 01:00)
    #[arg(long, value_name = "ID")]
    pub pci: Option<PciAddress>,
    /// List every hardware slot (default)
    #[arg(long)]
    pub list: bool,
    /// Interactively create PCI resource mappings
    #[arg(long)]
    pub map: bool,

    /// Show existing resource mappings
    #[arg(long)]
    pub mapping: bool,
    /// Show VMs passing the device through
    #[arg(long)]
    pub vms: bool,
    /// Show network interfaces
    #[arg(long)]
    pub net: bool,
    /// Show driver and IOMMU group
    #[arg(long)]
    pub driver: bool,
    /// Show full device descriptions
    #[arg(long)]
    pub verbose: bool,

    /// Write all output to a plain-text file instead of the terminal
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    List,
    All,
    Slot(String),
    Pci(PciAddress),
    Map,
}

impl CommandLine {
    pub fn mode(&self) -> Mode {
        if self.all {
            Mode::All
        } else if let Some(slot) = &self.slot {
            Mode::Slot(slot.clone())
        } else if let Some(address) = self.pci {
            Mode::Pci(address)
        } else if self.map {
            Mode::Map
        } else {
            Mode::List
        }
    }

    pub fn config(&self) -> Config {
        Config {
            display: DisplayOptions::from_flags(
                self.mapping,
                self.vms,
                self.net,
                self.driver,
                self.verbose,
            ),
            ..Config::default()
        }
    }
}

/// What every command needs: configuration, the tool runner and the host's
/// interface table.
pub struct Context<'a> {
    pub cfg: &'a Config,
    pub runner: &'a dyn CommandRunner,
    pub links: &'a LinkTable,
}

impl<'a> Context<'a> {
    pub fn slots(&self) -> SlotResolver<'a> {
        SlotResolver::new(self.runner, &self.cfg.tools)
    }

    pub fn devices(&self) -> DeviceCorrelator<'a> {
        DeviceCorrelator::new(self.runner, &self.cfg.tools)
    }

    pub fn inspector(&self) -> PortInspector<'a> {
        PortInspector::new(self.runner, self.cfg, self.links)
    }

    pub fn mappings(&self) -> MappingCreator<'a> {
        MappingCreator::new(self.runner, &self.cfg.tools)
    }

    pub fn dispatch(&self, mode: Mode) -> anyhow::Result<()> {
        match mode {
            Mode::List => list::list(self),
            Mode::All => all::all(self),
            Mode::Slot(slot_id) => slot::slot(self, &slot_id),
            Mode::Pci(address) => pci::pci(self, &address),
            Mode::Map => map::map(self),
        }
    }
}
