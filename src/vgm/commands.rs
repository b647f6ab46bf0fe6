//! VGM command definitions

use serde::Serialize;

/// VGM command opcodes
pub mod opcode {
    pub const WAIT_NNNN: u8 = 0x61;
    /// Wait 735 samples (1/60 second at 44100Hz)
    pub const WAIT_735: u8 = 0x62;
    /// Wait 882 samples (1/50 second at 44100Hz)
    pub const WAIT_882: u8 = 0x63;
    pub const END: u8 = 0x66;
    pub const DATA_BLOCK: u8 = 0x67;
    /// Wait n+1 samples (n = 0-15, command 0x70-0x7F)
    pub const WAIT_N_BASE: u8 = 0x70;
    pub const AY8910: u8 = 0xA0;
}

/// A parsed VGM command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum VgmCommand {
    /// AY-3-8910 write
    Ay8910Write { reg: u8, data: u8 },
    /// Wait up to 65535 samples
    Wait16 { samples: u16 },
    /// Wait 735 samples
    Wait735,
    /// Wait 882 samples
    Wait882,
    /// Wait 1-16 samples
    WaitShort { samples: u8 },
    /// End of sound data
    End,
    /// Any other command, skipped by size
    Unknown { opcode: u8, bytes: Vec<u8> },
}

impl VgmCommand {
    /// Encode the command as it appears in the data stream
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            VgmCommand::Ay8910Write { reg, data } => vec![opcode::AY8910, *reg, *data],
            VgmCommand::Wait16 { samples } => {
                let [lo, hi] = crate::codec::encode_u16(*samples);
                vec![opcode::WAIT_NNNN, lo, hi]
            }
            VgmCommand::Wait735 => vec![opcode::WAIT_735],
            VgmCommand::Wait882 => vec![opcode::WAIT_882],
            VgmCommand::WaitShort { samples } => {
                vec![opcode::WAIT_N_BASE + samples.saturating_sub(1).min(15)]
            }
            VgmCommand::End => vec![opcode::END],
            VgmCommand::Unknown { opcode, bytes } => {
                let mut out = vec![*opcode];
                out.extend_from_slice(bytes);
                out
            }
        }
    }

    /// Check if this is a wait command
    pub fn is_wait(&self) -> bool {
        self.wait_samples().is_some()
    }

    /// Get wait samples if this is a wait command
    pub fn wait_samples(&self) -> Option<u32> {
        match self {
            VgmCommand::Wait16 { samples } => Some(*samples as u32),
            VgmCommand::Wait735 => Some(735),
            VgmCommand::Wait882 => Some(882),
            VgmCommand::WaitShort { samples } => Some(*samples as u32),
            _ => None,
        }
    }
}

/// Get the number of bytes to read after the opcode for a command
pub fn command_size(opcode: u8) -> usize {
    match opcode {
        // 0 bytes after opcode
        0x62 | 0x63 | 0x66 => 0,
        // 1 byte after opcode
        0x30..=0x3F | 0x4F | 0x50 => 1,
        // 2 bytes after opcode
        0x40..=0x4E | 0x51..=0x5F | 0x61 | 0xA0..=0xBF => 2,
        // 3 bytes after opcode
        0xC0..=0xDF => 3,
        // 4 bytes after opcode
        0xE0..=0xFF => 4,
        // Short wait and YM2612 DAC
        0x70..=0x8F => 0,
        // Data block - size is in the data itself
        0x67 => 0,
        // PCM RAM write
        0x68 => 11,
        // DAC stream control
        0x90 | 0x91 | 0x95 => 4,
        0x92 => 5,
        0x93 => 10,
        0x94 => 1,
        _ => 0,
    }
}
