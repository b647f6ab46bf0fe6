//! VGM file writer

use super::commands::opcode;
use super::header::{offset, VgmHeader, VGM_HEADER_SIZE};
use super::wait;
use crate::codec;
use crate::error::Result;
use std::io::{Seek, SeekFrom, Write};

/// Reference sample rate for all VGM wait arithmetic
pub const VGM_SAMPLE_RATE: f64 = 44100.0;

/// Values patched into the header by [`VgmWriter::finalize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finalized {
    /// Total file size in bytes
    pub file_size: u64,
    /// Value stored at the EOF offset field
    pub eof_offset: u32,
    /// Value stored at the AY8910 clock field
    pub effective_clock: u32,
}

/// AY clock rescaled by the frame duration: `round(rate * frame_samples / 44100)`
pub fn effective_clock(nominal_rate: u32, frame_samples: f64) -> u32 {
    (nominal_rate as f64 * frame_samples / VGM_SAMPLE_RATE).round() as u32
}

/// VGM file writer.
///
/// Commands are streamed straight to the sink; the header is written as a
/// placeholder first and patched in place once the totals are known.
pub struct VgmWriter<W> {
    inner: W,
    /// Offset of the next byte to be written
    pos: u64,
}

impl<W: Write + Seek> VgmWriter<W> {
    /// Wrap a seekable sink positioned at offset 0
    pub fn new(inner: W) -> Self {
        Self { inner, pos: 0 }
    }

    /// Write the placeholder header for a single AY-3-8910
    pub fn write_header(&mut self, clock_rate: u32, chip_type: u8) -> Result<()> {
        let header = VgmHeader::for_ay8910(clock_rate, chip_type);
        self.inner.seek(SeekFrom::Start(0))?;
        self.inner.write_all(header.as_bytes())?;
        self.pos = VGM_HEADER_SIZE as u64;
        Ok(())
    }

    /// Write raw bytes to data section
    pub fn write_data(&mut self, data: &[u8]) -> Result<()> {
        self.inner.write_all(data)?;
        self.pos += data.len() as u64;
        Ok(())
    }

    /// Write a single byte command
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.write_data(&[byte])
    }

    /// AY-3-8910 register write (0xA0 rr dd)
    pub fn write_ay8910(&mut self, reg: u8, data: u8) -> Result<()> {
        self.write_data(&[opcode::AY8910, reg, data])
    }

    /// Wait command with a 16-bit sample count (0x61 nn nn)
    pub fn write_wait16(&mut self, samples: u16) -> Result<()> {
        let [lo, hi] = codec::encode_u16(samples);
        self.write_data(&[opcode::WAIT_NNNN, lo, hi])
    }

    /// Wait 882 samples (0x63)
    pub fn write_wait_882(&mut self) -> Result<()> {
        self.write_byte(opcode::WAIT_882)
    }

    /// Write an arbitrary wait as a run of 16-bit waits
    pub fn write_wait_run(&mut self, samples: u32) -> Result<()> {
        for chunk in wait::wait_run_chunks(samples) {
            self.write_wait16(chunk)?;
        }
        Ok(())
    }

    /// Write end of data marker
    pub fn write_end(&mut self) -> Result<()> {
        self.write_byte(opcode::END)
    }

    /// Overwrite 4 bytes of the already-written file, then return to the end
    pub fn patch_u32(&mut self, offset: usize, value: u32) -> Result<()> {
        self.inner.seek(SeekFrom::Start(offset as u64))?;
        self.inner.write_all(&codec::encode_u32(value))?;
        self.inner.seek(SeekFrom::Start(self.pos))?;
        Ok(())
    }

    /// Terminate the command stream and patch the header totals.
    ///
    /// The AY clock field is replaced by [`effective_clock`], not the rate
    /// the header was written with.
    pub fn finalize(
        &mut self,
        total_samples: u32,
        nominal_rate: u32,
        frame_samples: f64,
    ) -> Result<Finalized> {
        self.write_end()?;

        // EOF offset is relative to 0x04
        let eof_offset = (self.pos - offset::EOF_OFFSET as u64) as u32;
        self.patch_u32(offset::EOF_OFFSET, eof_offset)?;
        self.patch_u32(offset::TOTAL_SAMPLES, total_samples)?;

        let clock = effective_clock(nominal_rate, frame_samples);
        self.patch_u32(offset::AY8910_CLOCK, clock)?;

        self.inner.flush()?;

        Ok(Finalized {
            file_size: self.pos,
            eof_offset,
            effective_clock: clock,
        })
    }

    /// Get current position
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Recover the sink
    pub fn into_inner(self) -> W {
        self.inner
    }
}
