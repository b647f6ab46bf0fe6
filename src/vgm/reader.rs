//! VGM file reader and parser

use super::commands::{command_size, opcode, VgmCommand};
use super::header::{offset, CHIP_CLOCKS};
use crate::codec;
use crate::error::{Error, Result};
use std::collections::HashMap;

/// Parsed VGM header information
#[derive(Debug, Clone, Default)]
pub struct VgmHeader {
    pub version: u32,
    pub eof_offset: u32,
    pub total_samples: u32,
    pub loop_offset: u32,
    pub data_offset: u32,
    pub ay8910_type: u8,
    pub ay8910_flags: u8,
    pub chips: HashMap<String, ChipInfo>,
}

impl VgmHeader {
    /// Absolute offset of the first command
    pub fn data_start(&self) -> usize {
        self.data_offset as usize + offset::DATA_OFFSET
    }
}

/// Information about a chip in the VGM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipInfo {
    pub clock: u32,
    pub dual: bool,
}

/// VGM file reader
pub struct VgmReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> VgmReader<'a> {
    /// Create a new reader from raw VGM data
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Check if we've reached the end of data
    pub fn is_eof(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Get current position
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Seek to a position
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Read a single byte
    pub fn read_u8(&mut self) -> Result<u8> {
        let b = *self.data.get(self.pos).ok_or_else(|| {
            Error::VgmParse(format!("Unexpected end of data at 0x{:X}", self.pos))
        })?;
        self.pos += 1;
        Ok(b)
    }

    /// Read a 16-bit little-endian value
    pub fn read_u16_le(&mut self) -> Result<u16> {
        let lo = self.read_u8()?;
        let hi = self.read_u8()?;
        Ok(codec::decode_u16([lo, hi]))
    }

    /// Read bytes into a buffer
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        if self.pos + len > self.data.len() {
            return Err(Error::VgmParse(format!(
                "Unexpected end of data at 0x{:X}",
                self.pos
            )));
        }
        let bytes = self.data[self.pos..self.pos + len].to_vec();
        self.pos += len;
        Ok(bytes)
    }

    /// Read a u32 at a specific offset without advancing position
    fn peek_u32_at(&self, offset: usize) -> Result<u32> {
        codec::get_u32(self.data, offset)
            .ok_or_else(|| Error::VgmParse(format!("Offset 0x{:X} out of bounds", offset)))
    }

    /// Read a u8 at a specific offset without advancing position
    fn peek_u8_at(&self, offset: usize) -> Result<u8> {
        self.data
            .get(offset)
            .copied()
            .ok_or_else(|| Error::VgmParse(format!("Offset 0x{:X} out of bounds", offset)))
    }

    /// Validate VGM magic and parse header
    pub fn parse_header(&mut self) -> Result<VgmHeader> {
        if self.data.len() < 64 {
            return Err(Error::VgmParse("File too small for VGM header".into()));
        }
        if &self.data[0..4] != b"Vgm " {
            return Err(Error::VgmParse("Invalid VGM magic".into()));
        }

        let version = self.peek_u32_at(offset::VERSION)?;
        let eof_offset = self.peek_u32_at(offset::EOF_OFFSET)?;
        let total_samples = self.peek_u32_at(offset::TOTAL_SAMPLES)?;
        let loop_offset = self.peek_u32_at(offset::LOOP_OFFSET)?;

        // Data offset is relative to 0x34, default to 0x0C (so data starts at 0x40) for older versions
        let data_offset = if version >= 0x150 {
            match self.peek_u32_at(offset::DATA_OFFSET)? {
                0 => 0x0C,
                rel_offset => rel_offset,
            }
        } else {
            0x0C
        };

        let mut chips = HashMap::new();
        for &(name, clock_offset) in CHIP_CLOCKS {
            // Extended header chips (version >= 1.51)
            if version < 0x151 && clock_offset >= offset::SEGA_PCM_CLOCK {
                continue;
            }
            self.parse_chip_clock(&mut chips, name, clock_offset)?;
        }

        let (ay8910_type, ay8910_flags) = if chips.contains_key("ay8910") {
            (
                self.peek_u8_at(offset::AY8910_TYPE)?,
                self.peek_u8_at(offset::AY8910_FLAGS)?,
            )
        } else {
            (0, 0)
        };

        Ok(VgmHeader {
            version,
            eof_offset,
            total_samples,
            loop_offset,
            data_offset,
            ay8910_type,
            ay8910_flags,
            chips,
        })
    }

    /// Parse a chip clock from the header
    fn parse_chip_clock(
        &self,
        chips: &mut HashMap<String, ChipInfo>,
        name: &str,
        clock_offset: usize,
    ) -> Result<()> {
        // Header may end before this field in files with a small data offset
        if clock_offset + 4 > self.data.len() {
            return Ok(());
        }
        let clock = self.peek_u32_at(clock_offset)?;
        if clock != 0 {
            chips.insert(
                name.to_string(),
                ChipInfo {
                    clock: clock & 0x3FFF_FFFF,
                    dual: (clock & 0x4000_0000) != 0,
                },
            );
        }
        Ok(())
    }

    /// Parse all VGM commands from the data section
    pub fn parse_commands(&mut self, header: &VgmHeader) -> Result<Vec<VgmCommand>> {
        self.seek(header.data_start());

        let mut commands = Vec::new();

        while let Some(cmd) = self.parse_command()? {
            let is_end = matches!(cmd, VgmCommand::End);
            commands.push(cmd);
            if is_end {
                break;
            }
        }

        Ok(commands)
    }

    /// Parse a single VGM command
    fn parse_command(&mut self) -> Result<Option<VgmCommand>> {
        if self.is_eof() {
            return Ok(None);
        }

        let op = self.read_u8()?;

        let cmd = match op {
            opcode::AY8910 => {
                let reg = self.read_u8()?;
                let data = self.read_u8()?;
                VgmCommand::Ay8910Write { reg, data }
            }
            opcode::WAIT_NNNN => {
                let samples = self.read_u16_le()?;
                VgmCommand::Wait16 { samples }
            }
            opcode::WAIT_735 => VgmCommand::Wait735,
            opcode::WAIT_882 => VgmCommand::Wait882,
            opcode::END => VgmCommand::End,
            0x70..=0x7F => VgmCommand::WaitShort {
                samples: (op & 0x0F) + 1,
            },
            opcode::DATA_BLOCK => {
                // 0x67 0x66 tt ss ss ss ss <data>
                let mut bytes = self.read_bytes(6)?;
                let size = codec::decode_u32([bytes[2], bytes[3], bytes[4], bytes[5]]);
                bytes.extend(self.read_bytes(size as usize)?);
                VgmCommand::Unknown { opcode: op, bytes }
            }
            _ => {
                let bytes = self.read_bytes(command_size(op))?;
                VgmCommand::Unknown { opcode: op, bytes }
            }
        };

        Ok(Some(cmd))
    }
}
