//! PSG token stream to VGM command stream

use crate::error::{Error, Result};
use crate::psg::{PsgEvent, PsgReader};
use crate::vgm::VgmWriter;
use log::debug;
use std::io::{Read, Seek, Write};

/// Token counts gathered during a transcode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranscodeStats {
    pub register_writes: u64,
    pub frame_waits: u64,
    pub wait_runs: u64,
}

/// Streaming PSG to VGM transcoder.
///
/// Each token is written out as soon as it is read; only the running
/// sample total is kept.
#[derive(Debug, Default)]
pub struct Transcoder {
    sample_num: u64,
    stats: TranscodeStats,
}

impl Transcoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples accounted for so far
    pub fn sample_num(&self) -> u64 {
        self.sample_num
    }

    pub fn stats(&self) -> TranscodeStats {
        self.stats
    }

    /// Convert the whole PSG stream, returning the total sample count.
    ///
    /// The writer must already hold the header; commands follow it directly.
    /// Counters start from zero on every call.
    pub fn transcode<R: Read, W: Write + Seek>(
        &mut self,
        source: R,
        writer: &mut VgmWriter<W>,
    ) -> Result<u32> {
        self.sample_num = 0;
        self.stats = TranscodeStats::default();

        let mut reader = PsgReader::new(source);
        let header = reader.read_header()?;
        debug!("PSG metadata: {:02X?}", header.metadata);

        while let Some(event) = reader.next_event()? {
            self.emit(event, writer)?;
        }

        debug!(
            "Transcoded {} register writes, {} frame waits, {} wait runs ({} source bytes)",
            self.stats.register_writes,
            self.stats.frame_waits,
            self.stats.wait_runs,
            reader.position()
        );

        Ok(self.sample_num as u32)
    }

    /// Write the VGM commands for one token and account for its duration
    fn emit<W: Write + Seek>(
        &mut self,
        event: PsgEvent,
        writer: &mut VgmWriter<W>,
    ) -> Result<()> {
        match event {
            PsgEvent::WaitRun { .. } => {
                writer.write_wait_run(event.samples())?;
                self.stats.wait_runs += 1;
            }
            PsgEvent::FrameWait => {
                writer.write_wait_882()?;
                self.stats.frame_waits += 1;
            }
            PsgEvent::RegisterWrite { register, value } => {
                writer.write_ay8910(register, value)?;
                self.stats.register_writes += 1;
            }
        }
        self.sample_num += event.samples() as u64;
        if self.sample_num > u32::MAX as u64 {
            return Err(Error::SampleOverflow(self.sample_num));
        }
        Ok(())
    }
}
