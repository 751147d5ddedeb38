//! Configuration file support.
//!
//! The user configuration lives in `~/.geopothole/config.ini`. Each INI
//! section maps to one settings struct:
//!
//! | Section       | Struct               |
//! |---------------|----------------------|
//! | `[server]`    | [`ServerSettings`]    |
//! | `[location]`  | [`LocationSettings`]  |
//! | `[detection]` | [`DetectionSettings`] |
//! | `[logging]`   | [`LoggingSettings`]   |
//!
//! Missing files and missing keys fall back to defaults; present but invalid
//! values are rejected with [`ConfigFileError::InvalidValue`].
//!
//! # Example
//!
//! ```
//! use geopothole::config::ConfigFile;
//!
//! let config = ConfigFile::default();
//! assert_eq!(config.server.endpoint, "/api/report-pothole");
//! assert_eq!(config.gpsd_config().address(), "127.0.0.1:2947");
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    ConfigFile, DetectionSettings, LocationSettings, LoggingSettings, ServerSettings,
};
