//! PSG register dump reader
//!
//! A PSG file is a 16-byte header (`"PSG"`, 0x1A, then 12 bytes of
//! metadata) followed by a tag-prefixed stream of register writes and
//! waits. The stream has no terminator; it ends where the file ends.

use crate::error::{Error, Result};
use std::io::{ErrorKind, Read};

/// File magic: "PSG" followed by 0x1A
pub const PSG_MAGIC: [u8; 4] = *b"PSG\x1A";

/// Size of the metadata block following the magic
pub const PSG_METADATA_SIZE: usize = 12;

/// Offset of the first token in the stream
pub const PSG_DATA_START: u64 = (PSG_MAGIC.len() + PSG_METADATA_SIZE) as u64;

/// Token tag bytes
pub mod tag {
    /// Wait for a number of 4-frame units (one argument byte)
    pub const WAIT_RUN: u8 = 0xFE;
    /// Wait for a single frame
    pub const FRAME_WAIT: u8 = 0xFF;
}

/// Samples in one PSG frame at 44100Hz
pub const FRAME_SAMPLES: u32 = 882;

/// Frames per unit of a wait run
pub const FRAMES_PER_UNIT: u32 = 4;

/// Parsed PSG file header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PsgHeader {
    /// Metadata/padding bytes, unused by the converter
    pub metadata: [u8; PSG_METADATA_SIZE],
}

/// A single token from the PSG stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PsgEvent {
    /// Elapsed run of `units * 4` frames
    WaitRun { units: u8 },
    /// One elapsed frame
    FrameWait,
    /// Register write; the register index is not range-checked
    RegisterWrite { register: u8, value: u8 },
}

impl PsgEvent {
    /// Elapsed samples this event represents
    pub fn samples(&self) -> u32 {
        match self {
            PsgEvent::WaitRun { units } => *units as u32 * FRAMES_PER_UNIT * FRAME_SAMPLES,
            PsgEvent::FrameWait => FRAME_SAMPLES,
            PsgEvent::RegisterWrite { .. } => 0,
        }
    }
}

/// Streaming PSG token reader
pub struct PsgReader<R> {
    inner: R,
    /// Absolute offset of the next byte to be read
    pos: u64,
}

impl<R: Read> PsgReader<R> {
    /// Wrap a source positioned at the start of a PSG file
    pub fn new(inner: R) -> Self {
        Self { inner, pos: 0 }
    }

    /// Current offset in the source
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Read and validate the magic, then consume the metadata block
    pub fn read_header(&mut self) -> Result<PsgHeader> {
        let mut magic = [0u8; 4];
        self.read_exact(&mut magic, "PSG magic")?;
        if magic != PSG_MAGIC {
            return Err(Error::Format {
                offset: 0,
                found: magic,
            });
        }

        let mut header = PsgHeader::default();
        self.read_exact(&mut header.metadata, "PSG metadata block")?;
        Ok(header)
    }

    /// Read the next token.
    ///
    /// Returns `Ok(None)` when the input ends on a token boundary.
    pub fn next_event(&mut self) -> Result<Option<PsgEvent>> {
        let Some(tag) = self.read_byte()? else {
            return Ok(None);
        };

        let event = match tag {
            tag::WAIT_RUN => {
                let units = self.require_byte("wait run length")?;
                PsgEvent::WaitRun { units }
            }
            tag::FRAME_WAIT => PsgEvent::FrameWait,
            register => {
                let value = self.require_byte("register value")?;
                PsgEvent::RegisterWrite { register, value }
            }
        };

        Ok(Some(event))
    }

    /// Read one byte, `None` on end of input
    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.pos += 1;
                    return Ok(Some(buf[0]));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Read one byte that must be present
    fn require_byte(&mut self, context: &'static str) -> Result<u8> {
        let offset = self.pos;
        self.read_byte()?
            .ok_or(Error::Truncated { offset, context })
    }

    fn read_exact(&mut self, buf: &mut [u8], context: &'static str) -> Result<()> {
        for slot in buf.iter_mut() {
            *slot = self.require_byte(context)?;
        }
        Ok(())
    }
}

impl<R: Read> Iterator for PsgReader<R> {
    type Item = Result<PsgEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event().transpose()
    }
}
