use std::collections::BTreeMap;

use crate::pci::PciAddress;

/// Class descriptions that mark a device as a network controller.
const NETWORK_CLASSES: [&str; 2] = ["Ethernet controller", "Network controller"];

/// Case-sensitive substring test against the enumerator's human-readable text.
///
/// Any wording outside [`NETWORK_CLASSES`] classifies as non-network.
pub fn is_network_device(description: &str) -> bool {
    NETWORK_CLASSES
        .iter()
        .any(|class| description.contains(class))
}

/// One line of bus enumerator output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub address: PciAddress,
    /// Text before the first `": "`, e.g. `Ethernet controller`.
    pub class_description: String,
    /// Text after it, e.g. `Intel Corporation I350 Gigabit Network Connection (rev 01)`.
    pub extra_summary: String,
}

impl DeviceDescriptor {
    /// Parses `01:00.0 Ethernet controller: Intel Corporation ...`.
    ///
    /// Returns `None` for lines that do not start with a PCI address.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        let (address, rest) = line.split_once(char::is_whitespace)?;
        let address: PciAddress = address.parse().ok()?;
        let rest = rest.trim();

        let (class_description, extra_summary) = match rest.split_once(": ") {
            Some((class, summary)) => (class.to_string(), summary.to_string()),
            None => (rest.to_string(), String::new()),
        };

        Some(Self {
            address,
            class_description,
            extra_summary,
        })
    }

    pub fn is_network(&self) -> bool {
        is_network_device(&self.description())
    }

    /// Class and summary joined back together, as the enumerator printed them.
    pub fn description(&self) -> String {
        if self.extra_summary.is_empty() {
            self.class_description.clone()
        } else {
            format!("{}: {}", self.class_description, self.extra_summary)
        }
    }

    /// The single summary line: short address followed by the description.
    pub fn summary(&self) -> String {
        format!("{} {}", self.address.short(), self.description())
    }
}

/// The ports of one multi-function card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceGroup {
    pub base: PciAddress,
    pub ports: Vec<PciAddress>,
}

/// Partitions addresses by their base address.
///
/// Groups come out in ascending base order; within a group the ports keep
/// their input order.
pub fn group_by_base<I>(addresses: I) -> Vec<DeviceGroup>
where
    I: IntoIterator<Item = PciAddress>,
{
    let mut groups: BTreeMap<PciAddress, Vec<PciAddress>> = BTreeMap::new();
    for address in addresses {
        groups.entry(address.base()).or_default().push(address);
    }

    groups
        .into_iter()
        .map(|(base, ports)| DeviceGroup { base, ports })
        .collect()
}
