use colored::*;
use pcislot_common::error::Result;
use pcislot_common::slot::SlotRecord;
use pcislot_core::inspect::CardReport;

use crate::commands::{Context, report};
use crate::mprint;
use crate::terminal::{colors, print};

pub fn slot(ctx: &Context, slot_id: &str) -> anyhow::Result<()> {
    print::header(&format!("slot {slot_id}"));
    let (record, card) = inspect_slot(ctx, slot_id)?;
    print_slot(&record);
    mprint!();
    report::print_card(&card, &ctx.cfg.display);
    Ok(())
}

/// Resolves the slot and reports the card seated in it.
pub fn inspect_slot(ctx: &Context, slot_id: &str) -> Result<(SlotRecord, CardReport)> {
    let record = ctx.slots().resolve_slot(slot_id)?;
    let address = record.pci_address()?;
    ctx.devices().require_device(&address.to_string())?;
    let card = ctx.inspector().inspect_card(&address)?;
    Ok((record, card))
}

pub fn print_slot(record: &SlotRecord) {
    let mut details = Vec::new();
    if let Some(designation) = record.designation() {
        details.push(("Name".to_string(), designation.normal()));
    }
    if let Some(slot_type) = record.slot_type() {
        details.push(("Type".to_string(), slot_type.normal()));
    }
    if let Some(usage) = record.current_usage() {
        details.push(("Usage".to_string(), usage.normal()));
    }
    if let Some(address) = record.bus_address.as_deref() {
        details.push(("Bus".to_string(), address.color(colors::PCI_ADDR)));
    }

    print::tree_head(0, &format!("Slot {}", record.slot_number));
    print::as_tree_one_level(details);
}
