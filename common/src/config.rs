use std::path::PathBuf;

/// Runtime configuration, assembled once from the command line.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub display: DisplayOptions,
    pub tools: ToolSet,
    pub paths: SystemPaths,
}

/// Which sections of a port report get printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Existing cluster resource mappings referencing the device.
    pub mapping: bool,
    /// VM configurations passing the device through.
    pub vms: bool,
    /// Network interfaces backed by the device.
    pub net: bool,
    /// Bound kernel driver and IOMMU group.
    pub driver: bool,
    /// Full multi-line enumerator text instead of the one-line summary.
    pub verbose: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self::all()
    }
}

impl DisplayOptions {
    pub fn all() -> Self {
        Self {
            mapping: true,
            vms: true,
            net: true,
            driver: true,
            verbose: true,
        }
    }

    /// Builds the options from individual flags. When no flag is set every
    /// section is enabled.
    pub fn from_flags(mapping: bool, vms: bool, net: bool, driver: bool, verbose: bool) -> Self {
        if !(mapping || vms || net || driver || verbose) {
            return Self::all();
        }
        Self {
            mapping,
            vms,
            net,
            driver,
            verbose,
        }
    }
}

/// Program names of the external collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSet {
    pub dmidecode: String,
    pub lspci: String,
    pub pvesh: String,
}

impl Default for ToolSet {
    fn default() -> Self {
        Self {
            dmidecode: "dmidecode".to_string(),
            lspci: "lspci".to_string(),
            pvesh: "pvesh".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPaths {
    /// Per-device sysfs directories, named by full PCI address.
    pub pci_devices: PathBuf,
    /// Root of the VM configuration tree scanned for `hostpci` entries.
    pub vm_config_dir: PathBuf,
}

impl Default for SystemPaths {
    fn default() -> Self {
        Self {
            pci_devices: PathBuf::from("/sys/bus/pci/devices"),
            vm_config_dir: PathBuf::from("/etc/pve/qemu-server"),
        }
    }
}
