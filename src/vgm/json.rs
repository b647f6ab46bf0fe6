//! JSON serialization types for VGM data

use super::commands::VgmCommand;
use super::reader::{ChipInfo, VgmHeader};
use serde::Serialize;
use std::collections::HashMap;

/// Top-level JSON structure for a VGM file
#[derive(Debug, Clone, Serialize)]
pub struct VgmJson {
    /// VGM version as a string (e.g., "1.51")
    pub version: String,
    /// Header information
    pub header: VgmHeaderJson,
    /// VGM commands
    pub commands: Vec<VgmCommand>,
}

/// JSON representation of VGM header
#[derive(Debug, Clone, Serialize)]
pub struct VgmHeaderJson {
    /// Total samples in the file
    pub total_samples: u32,
    /// File size implied by the EOF offset
    pub file_size: u64,
    /// Loop offset (if looping)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loop_offset: Option<u32>,
    /// Sound chips used in this file
    pub chips: HashMap<String, ChipJson>,
}

/// JSON representation of chip information
#[derive(Debug, Clone, Serialize)]
pub struct ChipJson {
    /// Clock frequency in Hz
    pub clock: u32,
    /// Whether this is a dual-chip configuration
    #[serde(skip_serializing_if = "is_false")]
    pub dual: bool,
    /// AY8910 chip type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chip_type: Option<u8>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl VgmJson {
    /// Create a VgmJson from parsed VGM data
    pub fn new(header: &VgmHeader, commands: Vec<VgmCommand>) -> Self {
        Self {
            version: format_version(header.version),
            header: VgmHeaderJson::from(header),
            commands,
        }
    }

    /// Sum of all wait durations in the command list
    pub fn command_samples(&self) -> u64 {
        self.commands
            .iter()
            .filter_map(VgmCommand::wait_samples)
            .map(u64::from)
            .sum()
    }
}

impl From<&VgmHeader> for VgmHeaderJson {
    fn from(header: &VgmHeader) -> Self {
        let chips = header
            .chips
            .iter()
            .map(|(name, info)| {
                let mut chip = ChipJson::from(info);
                if name == "ay8910" {
                    chip.chip_type = Some(header.ay8910_type);
                }
                (name.clone(), chip)
            })
            .collect();

        Self {
            total_samples: header.total_samples,
            file_size: header.eof_offset as u64 + 4,
            loop_offset: if header.loop_offset != 0 {
                Some(header.loop_offset)
            } else {
                None
            },
            chips,
        }
    }
}

impl From<&ChipInfo> for ChipJson {
    fn from(info: &ChipInfo) -> Self {
        Self {
            clock: info.clock,
            dual: info.dual,
            chip_type: None,
        }
    }
}

/// Format a BCD version number as a string
fn format_version(version: u32) -> String {
    let major = (version >> 8) & 0xFF;
    let minor = version & 0xFF;
    format!("{}.{:02x}", major, minor)
}
