//! VGM header layout and construction

use crate::codec;

/// VGM file version written by the converter (1.51)
pub const VGM_VERSION: u32 = 0x151;

/// Header size in bytes; command data starts right after it
pub const VGM_HEADER_SIZE: usize = 0x80;

/// VGM header offsets (in bytes)
pub mod offset {
    /// "Vgm " identifier
    pub const IDENT: usize = 0x00;
    /// End of file offset (relative to 0x04)
    pub const EOF_OFFSET: usize = 0x04;
    /// Version number
    pub const VERSION: usize = 0x08;
    /// SN76489 clock
    pub const SN76489_CLOCK: usize = 0x0C;
    /// YM2413 clock
    pub const YM2413_CLOCK: usize = 0x10;
    /// GD3 offset (relative to 0x14)
    pub const GD3_OFFSET: usize = 0x14;
    /// Total samples
    pub const TOTAL_SAMPLES: usize = 0x18;
    /// Loop offset (relative to 0x1C)
    pub const LOOP_OFFSET: usize = 0x1C;
    /// Loop samples
    pub const LOOP_SAMPLES: usize = 0x20;
    /// Recording rate
    pub const RATE: usize = 0x24;
    /// YM2612 clock
    pub const YM2612_CLOCK: usize = 0x2C;
    /// YM2151 clock
    pub const YM2151_CLOCK: usize = 0x30;
    /// VGM data offset (relative to 0x34)
    pub const DATA_OFFSET: usize = 0x34;
    /// Sega PCM clock
    pub const SEGA_PCM_CLOCK: usize = 0x38;
    /// YM2203 clock
    pub const YM2203_CLOCK: usize = 0x44;
    /// YM2608 clock
    pub const YM2608_CLOCK: usize = 0x48;
    /// YM2610/B clock
    pub const YM2610_CLOCK: usize = 0x4C;
    /// YM3812 clock
    pub const YM3812_CLOCK: usize = 0x50;
    /// YM3526 clock
    pub const YM3526_CLOCK: usize = 0x54;
    /// Y8950 clock
    pub const Y8950_CLOCK: usize = 0x58;
    /// YMF262 clock
    pub const YMF262_CLOCK: usize = 0x5C;
    /// YMF278B clock
    pub const YMF278B_CLOCK: usize = 0x60;
    /// YMF271 clock
    pub const YMF271_CLOCK: usize = 0x64;
    /// YMZ280B clock
    pub const YMZ280B_CLOCK: usize = 0x68;
    /// RF5C164 clock
    pub const RF5C164_CLOCK: usize = 0x6C;
    /// PWM clock
    pub const PWM_CLOCK: usize = 0x70;
    /// AY8910 clock
    pub const AY8910_CLOCK: usize = 0x74;
    /// AY8910 chip type
    pub const AY8910_TYPE: usize = 0x78;
    /// AY8910 flags
    pub const AY8910_FLAGS: usize = 0x79;
}

/// Chip clock fields present in a 1.51 header, by name
pub const CHIP_CLOCKS: &[(&str, usize)] = &[
    ("sn76489", offset::SN76489_CLOCK),
    ("ym2413", offset::YM2413_CLOCK),
    ("ym2612", offset::YM2612_CLOCK),
    ("ym2151", offset::YM2151_CLOCK),
    ("sega_pcm", offset::SEGA_PCM_CLOCK),
    ("ym2203", offset::YM2203_CLOCK),
    ("ym2608", offset::YM2608_CLOCK),
    ("ym2610", offset::YM2610_CLOCK),
    ("ym3812", offset::YM3812_CLOCK),
    ("ym3526", offset::YM3526_CLOCK),
    ("y8950", offset::Y8950_CLOCK),
    ("ymf262", offset::YMF262_CLOCK),
    ("ymf278b", offset::YMF278B_CLOCK),
    ("ymf271", offset::YMF271_CLOCK),
    ("ymz280b", offset::YMZ280B_CLOCK),
    ("rf5c164", offset::RF5C164_CLOCK),
    ("pwm", offset::PWM_CLOCK),
    ("ay8910", offset::AY8910_CLOCK),
];

/// VGM header structure
#[derive(Debug, Clone)]
pub struct VgmHeader {
    data: [u8; VGM_HEADER_SIZE],
}

impl VgmHeader {
    /// Blank header: magic, version and data offset set, everything else zero
    pub fn new() -> Self {
        let mut header = Self {
            data: [0; VGM_HEADER_SIZE],
        };

        header.data[offset::IDENT..offset::IDENT + 4].copy_from_slice(b"Vgm ");
        header.write_u32(offset::VERSION, VGM_VERSION);

        // Relative to 0x34, so data begins at 0x80
        header.write_u32(offset::DATA_OFFSET, (VGM_HEADER_SIZE - offset::DATA_OFFSET) as u32);

        header
    }

    /// Header for a single AY-3-8910 recording.
    ///
    /// EOF offset and total samples stay zero until the file is finalized.
    pub fn for_ay8910(clock_rate: u32, chip_type: u8) -> Self {
        let mut header = Self::new();
        header.write_u32(offset::AY8910_CLOCK, clock_rate);
        header.write_u8(offset::AY8910_TYPE, chip_type);
        header.write_u8(offset::AY8910_FLAGS, 0x00);
        header
    }

    pub fn write_u8(&mut self, offset: usize, value: u8) {
        if offset < VGM_HEADER_SIZE {
            self.data[offset] = value;
        }
    }

    pub fn write_u32(&mut self, offset: usize, value: u32) {
        codec::put_u32(&mut self.data, offset, value);
    }

    pub fn read_u32(&self, offset: usize) -> Option<u32> {
        codec::get_u32(&self.data, offset)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Default for VgmHeader {
    fn default() -> Self {
        Self::new()
    }
}
