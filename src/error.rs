use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid PSG magic at offset 0x{offset:X}: expected 50 53 47 1A, found {found:02X?}")]
    Format { offset: u64, found: [u8; 4] },

    #[error("Truncated input at offset 0x{offset:X}: missing {context}")]
    Truncated { offset: u64, context: &'static str },

    #[error("Sample count {0} does not fit in the VGM header")]
    SampleOverflow(u64),

    #[error("VGM parse error: {0}")]
    VgmParse(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
