//! Load `.dupes.toml` from a directory (CLI only). Library callers build [`Opts`] directly.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::Opts;
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub struct DupesToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    db_path: Option<String>,
    algorithm: Option<String>,
    replace: Option<bool>,
    include_empty: Option<bool>,
    show: Option<bool>,
    sort: Option<String>,
    verbose: Option<bool>,
}

impl DupesToml {
    /// `verbose` from the file, needed before the logger is set up.
    pub fn verbose(&self) -> Option<bool> {
        self.settings.verbose
    }
}

/// Parse config text.
pub fn parse_dupes_toml(text: &str) -> Result<DupesToml> {
    toml::from_str(text).context("parse config file")
}

/// Load `.dupes.toml` from `dir`. `Ok(None)` when there is no such file; `Err` when it cannot be
/// read or is malformed.
pub fn load_dupes_toml(dir: &Path) -> Result<Option<DupesToml>> {
    let path = dir.join(PackagePaths::get().config_filename());
    let s = match std::fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("read {}", path.display())),
    };
    parse_dupes_toml(&s)
        .with_context(|| path.display().to_string())
        .map(Some)
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($sec:expr, $opts:expr, $sec_field:ident => $opts_field:ident) => {
        if let Some(v) = $sec.$sec_field {
            $opts.$opts_field = v;
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before applying CLI.
/// Unknown `algorithm` or `sort` values are configuration errors.
pub fn apply_file_to_opts(file: &DupesToml, opts: &mut Opts) -> Result<()> {
    let sec = &file.settings;
    if let Some(ref p) = sec.db_path {
        opts.db_path = PathBuf::from(p);
    }
    if let Some(ref a) = sec.algorithm {
        opts.algorithm = a.parse().context("config file: algorithm")?;
    }
    if let Some(ref s) = sec.sort {
        opts.sort = s.parse().context("config file: sort")?;
    }
    apply_file_opt!(sec, opts, replace => replace);
    apply_file_opt!(sec, opts, include_empty => include_empty);
    apply_file_opt!(sec, opts, show => report);
    apply_file_opt!(sec, opts, verbose => verbose);
    Ok(())
}
