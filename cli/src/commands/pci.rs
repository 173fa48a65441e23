use pcislot_common::pci::PciAddress;

use crate::commands::{Context, report};
use crate::terminal::print;

pub fn pci(ctx: &Context, address: &PciAddress) -> anyhow::Result<()> {
    print::header(&format!("device {address}"));
    let card = ctx.inspector().inspect_address(address)?;
    report::print_card(&card, &ctx.cfg.display);
    Ok(())
}
