//! Slot Resolver: slot number to bus address.

use pcislot_common::config::ToolSet;
use pcislot_common::error::Result;
use pcislot_common::slot::{self, SlotRecord};
use tracing::debug;

use crate::runner::{CommandRunner, run_checked};

pub struct SlotResolver<'a> {
    runner: &'a dyn CommandRunner,
    tools: &'a ToolSet,
}

impl<'a> SlotResolver<'a> {
    pub fn new(runner: &'a dyn CommandRunner, tools: &'a ToolSet) -> Self {
        Self { runner, tools }
    }

    /// Raw `dmidecode -t slot` output.
    pub fn dump(&self) -> Result<String> {
        run_checked(self.runner, &self.tools.dmidecode, &["-t", "slot"])
    }

    /// Resolves `slot_id` to a record that is guaranteed to carry a bus address.
    pub fn resolve_slot(&self, slot_id: &str) -> Result<SlotRecord> {
        let dump = self.dump()?;
        let record = SlotRecord::parse(&dump, slot_id.trim())?;
        let address = record.require_bus_address()?;
        debug!(slot = %record.slot_number, address, "resolved slot");
        Ok(record)
    }

    /// Every slot the firmware reports, populated or not.
    pub fn list_slots(&self) -> Result<Vec<SlotRecord>> {
        let dump = self.dump()?;
        Ok(slot::parse_all(&dump))
    }
}
