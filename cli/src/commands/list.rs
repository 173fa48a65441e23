use colored::*;
use pcislot_common::pci::DeviceDescriptor;
use pcislot_common::slot::SlotRecord;
use tracing::{info_span, warn};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::commands::Context;
use crate::terminal::{colors, print};

pub fn list(ctx: &Context) -> anyhow::Result<()> {
    print::header("hardware slots");

    let slots: Vec<SlotRecord> = ctx.slots().list_slots()?;
    if slots.is_empty() {
        print::no_results();
        return Ok(());
    }

    let span = info_span!("slots", indicatif.pb_show = true);
    span.pb_set_message("querying devices");
    let guard = span.enter();

    let lines: Vec<String> = slots
        .iter()
        .map(|slot| slot_line(slot, device_in(ctx, slot).as_ref()))
        .collect();

    drop(guard);
    drop(span);

    for line in &lines {
        print::print(line);
    }

    print::print_status(format!("{} slots reported by firmware", slots.len()));
    Ok(())
}

/// The device seated at the slot's bus address, if the enumerator knows it.
fn device_in(ctx: &Context, slot: &SlotRecord) -> Option<DeviceDescriptor> {
    let address = slot.bus_address.as_deref()?;
    match ctx.devices().lookup_device(address) {
        Ok(device) => device,
        Err(e) => {
            warn!("slot {}: {e}", slot.slot_number);
            None
        }
    }
}

/// `Slot 3 (PCIe Slot 3) | In Use | 01:00.0 | Ethernet controller: ...`
fn slot_line(slot: &SlotRecord, device: Option<&DeviceDescriptor>) -> String {
    let sep = "|".color(colors::SEPARATOR);

    let title = match slot.designation() {
        Some(designation) => format!("Slot {} ({})", slot.slot_number, designation),
        None => format!("Slot {}", slot.slot_number),
    };
    let usage = slot.current_usage().unwrap_or("unknown");
    let bus = match slot.bus_address.as_deref() {
        Some(address) => address.color(colors::PCI_ADDR),
        None => "no bus".color(colors::MISSING),
    };
    let device = match (device, &slot.bus_address) {
        (Some(device), _) => device.description().normal(),
        (None, Some(_)) => "empty".color(colors::MISSING),
        (None, None) => "-".color(colors::MISSING),
    };

    format!(
        "{} {sep} {} {sep} {} {sep} {}",
        title.color(colors::PRIMARY),
        usage,
        bus,
        device
    )
}
