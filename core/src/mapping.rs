//! Mapping Creator: registers a PCI resource mapping with the cluster API.

use pcislot_common::config::ToolSet;
use pcislot_common::error::{PciSlotError, Result};
use pcislot_common::mapping::MappingRequest;
use tracing::{debug, info};

use crate::runner::CommandRunner;

const MAPPING_STORE: &str = "/cluster/mapping/pci";

pub struct MappingCreator<'a> {
    runner: &'a dyn CommandRunner,
    tools: &'a ToolSet,
}

impl<'a> MappingCreator<'a> {
    pub fn new(runner: &'a dyn CommandRunner, tools: &'a ToolSet) -> Self {
        Self { runner, tools }
    }

    /// Arguments handed to `pvesh`, one element per argument.
    pub fn arguments(req: &MappingRequest) -> Vec<String> {
        vec![
            "create".to_string(),
            MAPPING_STORE.to_string(),
            "--id".to_string(),
            req.name.clone(),
            "--map".to_string(),
            req.map_property(),
        ]
    }

    /// Creates the mapping. Not idempotent: a second call with the same name
    /// fails with whatever the cluster API reports.
    pub fn create_mapping(&self, req: &MappingRequest) -> Result<()> {
        let args = Self::arguments(req);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        debug!(name = %req.name, node = %req.node, path = %req.path, "creating mapping");

        let output = self.runner.run(&self.tools.pvesh, &args)?;
        let stderr = output.stderr.trim();

        if !output.success || stderr.to_ascii_lowercase().contains("error") {
            let message = match stderr {
                "" => format!("{} exited with status {:?}", self.tools.pvesh, output.status),
                text => text.to_string(),
            };
            return Err(PciSlotError::Mapping { message });
        }

        info!(target: "pcislot::mapping", name = %req.name, "mapping created");
        Ok(())
    }
}
