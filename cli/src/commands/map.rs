use colored::*;
use console::Term;
use pcislot_common::mapping::{MappingRequest, validate_name, validate_node, validate_vendor_device_id};
use pcislot_common::pci::{PciAddress, with_default_domain};
use pcislot_common::slot::SlotRecord;
use pcislot_core::inspect::CardReport;
use pcislot_core::system::local_node_name;
use tracing::{error, info, warn};

use crate::commands::{Context, report, slot};
use crate::mprint;
use crate::terminal::prompt::{Console, Prompter};
use crate::terminal::{colors, print};

const EXIT_WORD: &str = "exit";

pub fn map(ctx: &Context) -> anyhow::Result<()> {
    print::header("resource mapping");
    let created = run(ctx, &Prompter::new(Term::stderr()), local_node_name().as_deref())?;
    print::print_status(format!("{created} mapping(s) created"));
    Ok(())
}

/// Runs the slot loop until the user quits or input ends. Returns the
/// number of mappings created.
fn run<C: Console>(
    ctx: &Context,
    prompter: &Prompter<C>,
    node_default: Option<&str>,
) -> anyhow::Result<usize> {
    let mut created = 0;

    loop {
        let Some(slot_id) = prompter.ask(&format!("Slot number ('{EXIT_WORD}' to quit)"), None)?
        else {
            break;
        };
        if slot_id.eq_ignore_ascii_case(EXIT_WORD) {
            break;
        }

        match slot::inspect_slot(ctx, &slot_id) {
            Ok((record, card)) => {
                slot::print_slot(&record);
                mprint!();
                report::print_card(&card, &ctx.cfg.display);
                mprint!();
                if map_slot(ctx, prompter, &record, &card, node_default)? {
                    created += 1;
                }
            }
            Err(e) => error!("{e}"),
        }

        if !prompter.confirm("Process another slot?")? {
            break;
        }
        print::fat_separator();
    }

    Ok(created)
}

/// Collects the mapping fields for one slot and creates the mapping once
/// confirmed. Returns whether a mapping was created.
fn map_slot<C: Console>(
    ctx: &Context,
    prompter: &Prompter<C>,
    record: &SlotRecord,
    card: &CardReport,
    node_default: Option<&str>,
) -> anyhow::Result<bool> {
    let path_default = record.bus_address.as_deref().map(with_default_domain);
    let id_default = default_vendor_device_id(record, card);

    let Some(name) = prompter.ask_valid("Mapping name", None, validate_name)? else {
        warn!("no valid mapping name given, skipping slot {}", record.slot_number);
        return Ok(false);
    };
    let Some(node) = prompter.ask_valid("Node", node_default, validate_node)? else {
        warn!("no valid node given, skipping slot {}", record.slot_number);
        return Ok(false);
    };
    let Some(path) = prompter.ask_valid("PCI path", path_default.as_deref(), |s| {
        s.parse::<PciAddress>()
    })?
    else {
        warn!("no valid PCI path given, skipping slot {}", record.slot_number);
        return Ok(false);
    };
    let Some(id) =
        prompter.ask_valid("Vendor:device id", id_default.as_deref(), validate_vendor_device_id)?
    else {
        warn!("no valid vendor:device id given, skipping slot {}", record.slot_number);
        return Ok(false);
    };

    let request = MappingRequest::new(&name, &node, &path.to_string(), &id)?;
    print_request(&request);

    if !prompter.confirm("Create this mapping?")? {
        info!("mapping '{}' not created", request.name);
        return Ok(false);
    }

    match ctx.mappings().create_mapping(&request) {
        Ok(()) => Ok(true),
        Err(e) => {
            error!("{e}");
            Ok(false)
        }
    }
}

/// Id of the port sitting at the slot's bus address, else of the card's first port.
fn default_vendor_device_id(record: &SlotRecord, card: &CardReport) -> Option<String> {
    let slot_address = record.pci_address().ok();
    card.ports
        .iter()
        .find(|p| Some(p.device.address) == slot_address)
        .or_else(|| card.ports.first())
        .and_then(|p| p.vendor_device_id.clone())
}

fn print_request(request: &MappingRequest) {
    print::tree_head(0, &format!("Mapping {}", request.name.bold()));
    print::as_tree_one_level(vec![
        ("Node".to_string(), request.node.normal()),
        ("Path".to_string(), request.path.to_string().color(colors::PCI_ADDR)),
        ("ID".to_string(), request.vendor_device_id.color(colors::ACCENT)),
    ]);
    mprint!();
}
