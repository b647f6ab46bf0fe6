pub mod commands;
pub mod header;
pub mod json;
pub mod reader;
pub mod wait;
pub mod writer;

pub use commands::VgmCommand;
pub use json::VgmJson;
pub use reader::{ChipInfo, VgmReader};
pub use writer::{Finalized, VgmWriter};
