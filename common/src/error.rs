//! Error types shared by every `pcislot` crate.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PciSlotError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PciSlotError {
    #[error("this tool must be run as root")]
    Privilege,

    #[error("'{tool}' is unavailable: {reason}")]
    ToolUnavailable { tool: String, reason: String },

    #[error("no slot matching '{slot}' found")]
    SlotNotFound { slot: String },

    #[error("slot '{slot}' does not report a bus address")]
    BusAddressMissing { slot: String },

    #[error("no PCI device found at {address}")]
    DeviceNotFound { address: String },

    #[error("{address} is not a network controller ({description})")]
    ClassificationMismatch { address: String, description: String },

    /// Text reported by the cluster API, passed through untouched.
    #[error("mapping creation failed: {message}")]
    Mapping { message: String },

    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },
}

impl PciSlotError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub fn tool(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ToolUnavailable {
            tool: tool.into(),
            reason: reason.into(),
        }
    }
}
