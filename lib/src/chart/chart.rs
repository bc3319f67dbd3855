use std::sync::Arc;
use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::jmap;
use crate::merge::merge_map;
use crate::chart::{csv, style, fragments, resolve_callbacks, TickFormatter};
use crate::chart::style::StyleTable;

/// The decorative plugin attached to every constructed chart.
pub const ROUGH_PLUGIN: &str = "rough";

/// Explicit defaults handed to every chart construction call.
///
/// `options` merges into chart options before any fragment does; `styles`
/// is the per-chart-type style table. There is no library-wide mutable
/// defaults object to poke at.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub options: Map<String, Value>,
    pub styles: FxHashMap<Arc<str>, StyleTable>,
}

impl Defaults {
    /// Empty options plus the built-in style palette.
    pub fn builtin() -> Self {
        Defaults {
            options: Map::new(),
            styles: style::builtin_styles(),
        }
    }

    pub fn style(&self, kind: &str) -> Option<&StyleTable> {
        self.styles.get(kind)
    }
}

/// A fully resolved chart configuration: exactly what the charting library
/// receives at render time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: Arc<str>,
    pub data: Map<String, Value>,
    pub options: Map<String, Value>,
    pub plugins: Vec<Arc<str>>,
}

/// A constructed chart: its configuration plus the tick formatters
/// resolved from it, one per Y axis.
#[derive(Debug)]
pub struct Chart {
    config: ChartConfig,
    ticks: Vec<Option<TickFormatter>>,
}

impl Chart {
    /// Assembles a chart from a canvas body.
    ///
    /// `body` supplies the configuration fragments; `csv` supplies the data
    /// rows. The two are separate because an external `data-chart-src`
    /// replaces the inline CSV while the body's fragments still apply.
    ///
    /// Fragments apply in document order over the base options and
    /// `defaults.options`; within one fragment, `defaultOptions` merges
    /// before `options`.
    pub fn assemble(kind: &str, body: &str, csv: &str, defaults: &Defaults) -> Chart {
        let mut options = jmap! {
            "responsive" => true,
            "maintainAspectRatio" => false,
        };

        merge_map(&mut options, &defaults.options);

        let mut data = Map::new();
        for fragment in fragments(body) {
            if let Some(ref incoming) = fragment.data {
                merge_map(&mut data, incoming);
            }

            if let Some(ref incoming) = fragment.default_options {
                merge_map(&mut options, incoming);
            }

            if let Some(ref incoming) = fragment.options {
                merge_map(&mut options, incoming);
            }
        }

        csv::apply(&mut data, csv);

        if let Some(table) = defaults.style(kind) {
            if let Some(datasets) = data.get_mut("datasets").and_then(Value::as_array_mut) {
                style::apply(table, datasets);
            }
        }

        let ticks = resolve_callbacks(&mut options);
        Chart {
            config: ChartConfig {
                kind: kind.into(),
                data,
                options,
                plugins: vec![ROUGH_PLUGIN.into()],
            },
            ticks,
        }
    }

    /// [`Chart::assemble()`] with the CSV taken from the body itself.
    pub fn from_body(kind: &str, body: &str, defaults: &Defaults) -> Chart {
        let csv = super::without_comments(body);
        Chart::assemble(kind, body, &csv, defaults)
    }

    /// Reconstructs a chart from a stored configuration. Tick formatters
    /// are re-resolved from the canonical names the configuration carries.
    pub fn from_config(mut config: ChartConfig) -> Chart {
        let ticks = resolve_callbacks(&mut config.options);
        Chart { config, ticks }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn kind(&self) -> &str {
        &self.config.kind
    }

    /// The resolved tick formatter for the Y axis at `index`, if any.
    pub fn tick_formatter(&self, index: usize) -> Option<TickFormatter> {
        self.ticks.get(index).copied().flatten()
    }

    /// Tears the instance down, yielding its configuration.
    pub fn destroy(self) -> ChartConfig {
        self.config
    }

    /// Destroys `self` and reconstructs it from its stored configuration
    /// verbatim, after `delay` has passed. The delay gives a containing
    /// layout transition time to finish.
    pub fn recreate(self, delay: Duration) -> Chart {
        let config = self.destroy();
        std::thread::sleep(delay);
        Chart::from_config(config)
    }

    pub fn to_json(&self) -> String {
        // ChartConfig serialization cannot fail: every field is JSON-shaped.
        serde_json::to_string(&self.config).expect("chart config is valid JSON")
    }
}
