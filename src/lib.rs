pub mod codec;
pub mod convert;
pub mod error;
pub mod psg;
pub mod transcode;
pub mod vgm;

pub use convert::{convert, convert_file, ConvertOptions, ConvertSummary};
pub use error::Error;
pub use transcode::Transcoder;
