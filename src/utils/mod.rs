pub mod config;
pub mod dupes_toml;
pub mod logger;

pub use config::*;
pub use dupes_toml::{DupesToml, apply_file_to_opts, load_dupes_toml, parse_dupes_toml};
pub use logger::setup_logging;
