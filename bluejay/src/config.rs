use std::path::{Path, PathBuf};

use serde::Deserialize;

use plotmark::chart::{style, Defaults};
use plotmark::error::{Chainable, Result};

/// Site settings, read from `config.toml` at the input root. Every field
/// has a default; a site without a config file builds fine.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Absolute site root prepended to post URLs.
    pub root: String,
    /// Chart defaults: options merged under every chart, and the per-type
    /// style tables. An empty style table means the built-in palette.
    pub charts: Defaults,
    pub store: StoreSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Where the search store lands, relative to the output root.
    pub output: PathBuf,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings { output: PathBuf::from("assets/js/lunr/lunr-store.js") }
    }
}

impl Settings {
    pub fn load(input: &Path) -> Result<Settings> {
        let path = input.join(crate::CONFIG_FILE);
        let mut settings = match std::fs::read_to_string(&path) {
            Ok(text) => toml::from_str::<Settings>(&text).chain_with(|| plotmark::error! {
                "invalid site configuration",
                "path" => path.display(),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Settings::default(),
            Err(e) => return Err(plotmark::error::Error::from(e).chain(plotmark::error! {
                "failed to read site configuration",
                "path" => path.display(),
            })),
        };

        while settings.root.ends_with('/') {
            settings.root.pop();
        }

        if settings.charts.styles.is_empty() {
            settings.charts.styles = style::builtin_styles();
        }

        Ok(settings)
    }
}
