use pcislot_common::error::{PciSlotError, Result};
use tracing::debug;

/// Slot tables and sysfs bindings are only readable by root.
pub fn ensure_privileged() -> Result<()> {
    if is_root::is_root() {
        Ok(())
    } else {
        Err(PciSlotError::Privilege)
    }
}

/// Host name of this node, the default target node for new mappings.
pub fn local_node_name() -> Option<String> {
    match sys_info::hostname() {
        Ok(name) => {
            // Proxmox node names are the short host name.
            let short = name.split('.').next().unwrap_or_default().trim().to_string();
            (!short.is_empty()).then_some(short)
        }
        Err(e) => {
            debug!("could not read host name: {e}");
            None
        }
    }
}
