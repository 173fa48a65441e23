use colored::*;
use pcislot_common::config::DisplayOptions;
use pcislot_core::inspect::{CardReport, PortReport};
use pcislot_core::sysfs::InterfaceInfo;
use tracing::warn;

use crate::mprint;
use crate::terminal::{colors, print};

type Detail = (String, ColoredString);

pub fn print_card(card: &CardReport, display: &DisplayOptions) {
    let ports = card.ports.len();
    print::print_status(format!(
        "Card {} with {} port{}",
        card.base.to_string().color(colors::PCI_ADDR),
        ports,
        if ports == 1 { "" } else { "s" }
    ));
    mprint!();

    for (idx, port) in card.ports.iter().enumerate() {
        print_port(port, idx, display);
        if idx + 1 != ports {
            mprint!();
        }
    }
}

pub fn print_port(port: &PortReport, idx: usize, display: &DisplayOptions) {
    print::tree_head(idx, &port.device.summary());
    if let Some(details) = &port.details {
        // The first line repeats the summary.
        let body: Vec<&str> = details.lines().skip(1).collect();
        print::indented_block(&body.join("\n"));
    }

    let mut details: Vec<Detail> = vec![(
        "Address".to_string(),
        port.device.address.to_string().color(colors::PCI_ADDR),
    )];

    if let Some(id) = &port.vendor_device_id {
        details.push(("ID".to_string(), id.normal()));
    }

    if display.driver {
        details.push(("Driver".to_string(), or_missing(port.driver.as_deref(), colors::DRIVER)));
        details.push(("IOMMU".to_string(), or_missing(port.iommu_group.as_deref(), colors::TEXT_DEFAULT)));
    }

    if display.net && port.device.is_network() {
        if port.interfaces.is_empty() {
            details.push(("Iface".to_string(), "none".color(colors::MISSING)));
        }
        details.extend(port.interfaces.iter().map(interface_to_detail));
    }

    if let Some(mappings) = &port.mappings {
        if mappings.is_empty() {
            details.push(("Mapping".to_string(), "not mapped".color(colors::MISSING)));
        }
        details.extend(
            mappings
                .iter()
                .map(|line| ("Mapping".to_string(), line.normal())),
        );
    }

    if display.vms {
        if port.vm_usage.is_empty() {
            details.push(("VM".to_string(), "not in use".color(colors::MISSING)));
        }
        details.extend(
            port.vm_usage
                .iter()
                .map(|line| ("VM".to_string(), line.yellow())),
        );
    }

    print::as_tree_one_level(details);

    for problem in &port.problems {
        warn!("{problem}");
    }
}

fn interface_to_detail(iface: &InterfaceInfo) -> Detail {
    let mut value = iface.name.bold().to_string();
    if let Some(mac) = &iface.mac {
        value.push_str(&format!(" {}", mac.color(colors::MAC_ADDR)));
    }
    match iface.up {
        Some(true) => value.push_str(&format!(" {}", "up".green())),
        Some(false) => value.push_str(&format!(" {}", "down".red())),
        None => {}
    }
    if !iface.ips.is_empty() {
        value.push_str(&format!(" {}", iface.ips.join(", ")));
    }
    ("Iface".to_string(), value.normal())
}

fn or_missing(value: Option<&str>, color: Color) -> ColoredString {
    match value {
        Some(v) => v.color(color),
        None => "none".color(colors::MISSING),
    }
}
