//! Document I/O for keysplice
//!
//! Reads documents verbatim and writes them back atomically, never
//! translating line endings in either direction.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod line_ending;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use io::RobustnessConfig;
pub use line_ending::LineEnding;
pub use path::NormalizedPath;
