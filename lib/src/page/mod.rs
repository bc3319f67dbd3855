//! Page decoration: resolving chart canvases in a built HTML page.

mod scan;

pub use scan::*;

use std::path::Path;

use tracing::warn;

use crate::chart::{self, Chart, Defaults};
use crate::fetch::PendingFetch;

/// A page after decoration: the rewritten markup plus every chart canvas
/// that was found, with constructed charts attached.
#[derive(Debug)]
pub struct DecoratedPage {
    pub html: String,
    pub canvases: Vec<Canvas>,
}

impl DecoratedPage {
    pub fn charts(&self) -> impl Iterator<Item = &Chart> {
        self.canvases.iter().filter_map(|canvas| canvas.chart.as_ref())
    }
}

/// Resolves every chart canvas in `html` and splices the resolved
/// configuration back into each canvas body as an embedded JSON payload.
///
/// Remote `data-chart-src` fetches are started as soon as their canvases
/// are discovered and joined only when that canvas's chart is constructed.
/// A canvas whose data cannot be obtained is left exactly as it was, apart
/// from a logged warning; one bad canvas never fails the page.
pub fn decorate(html: &str, defaults: &Defaults, base: &Path) -> DecoratedPage {
    let mut canvases = scan(html);
    let mut pending: Vec<Option<PendingFetch>> = canvases.iter()
        .map(|canvas| canvas.src.as_deref().map(|src| PendingFetch::spawn(src, base)))
        .collect();

    let mut output = String::with_capacity(html.len());
    let mut cursor = 0;
    for (canvas, pending) in canvases.iter_mut().zip(pending.drain(..)) {
        let csv = match pending {
            Some(pending) => match pending.join() {
                Ok(text) => text,
                Err(e) => {
                    warn!(
                        src = canvas.src.as_deref().unwrap_or(""),
                        chart = &*canvas.kind,
                        error = %e.message(),
                        "failed to get chart data; chart not created",
                    );
                    continue;
                }
            },
            None => chart::without_comments(&canvas.body),
        };

        let chart = Chart::assemble(&canvas.kind, &canvas.body, &csv, defaults);
        let config = chart.to_json();
        canvas.chart = Some(chart);

        output.push_str(&html[cursor..canvas.body_span.start]);
        output.push_str("<script type=\"application/json\" data-chart-config>");
        output.push_str(&config);
        output.push_str("</script>");
        cursor = canvas.body_span.end;
    }

    output.push_str(&html[cursor..]);
    DecoratedPage { html: output, canvases }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use super::*;

    #[test]
    fn canvas_bodies_are_replaced_with_config_payloads() {
        let html = "<h1>Q3</h1>\n\
            <canvas data-chart=\"bar\"><!-- {\"data\":{\"labels\":[\"a\",\"b\"]}} -->\n\
            sales,1,2</canvas>\n<p>after</p>";

        let page = decorate(html, &Defaults::default(), Path::new("."));
        assert!(page.html.starts_with("<h1>Q3</h1>"));
        assert!(page.html.ends_with("<p>after</p>"));
        assert!(page.html.contains("<canvas data-chart=\"bar\">"));
        assert!(page.html.contains("<script type=\"application/json\" data-chart-config>"));
        assert!(!page.html.contains("sales,1,2</canvas>"));

        let chart = page.canvases[0].chart.as_ref().unwrap();
        assert_eq!(chart.kind(), "bar");
        assert_eq!(chart.config().data["labels"], json!(["a", "b"]));
    }

    #[test]
    fn embedded_config_parses_back_as_json() {
        let html = "<canvas data-chart=\"line\">jan,1\nfeb,2</canvas>";
        let page = decorate(html, &Defaults::builtin(), Path::new("."));

        let start = page.html.find("data-chart-config>").unwrap() + "data-chart-config>".len();
        let end = page.html.rfind("</script>").unwrap();
        let config: serde_json::Value = serde_json::from_str(&page.html[start..end]).unwrap();

        assert_eq!(config["type"], json!("line"));
        assert_eq!(config["plugins"], json!(["rough"]));
        assert_eq!(config["options"]["responsive"], json!(true));
    }

    #[test]
    fn local_source_replaces_inline_csv_but_fragments_still_apply() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("q.csv"), "team,5,6\n").unwrap();

        let html = "<canvas data-chart=\"bar\" data-chart-src=\"q.csv\">\
            <!-- {\"data\":{\"labels\":[\"x\",\"y\"]}} -->\nignored,1,2</canvas>";
        let page = decorate(html, &Defaults::default(), dir.path());

        let chart = page.canvases[0].chart.as_ref().unwrap();
        assert_eq!(chart.config().data["labels"], json!(["x", "y"]));
        assert_eq!(chart.config().data["datasets"], json!([
            { "label": "team", "data": [5.0, 6.0] },
        ]));
    }

    #[test]
    fn failed_source_leaves_the_canvas_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let html = "<canvas data-chart=\"bar\" data-chart-src=\"missing.csv\">a,1</canvas>\
                    <canvas data-chart=\"bar\">b,2</canvas>";
        let page = decorate(html, &Defaults::default(), dir.path());

        assert!(page.html.contains(">a,1</canvas>"));
        assert!(page.canvases[0].chart.is_none());
        assert!(page.canvases[1].chart.is_some());
        assert_eq!(page.charts().count(), 1);
    }

    #[test]
    fn pages_without_charts_pass_through_unchanged() {
        let html = "<html><body><p>nothing here</p></body></html>";
        let page = decorate(html, &Defaults::default(), Path::new("."));
        assert_eq!(page.html, html);
        assert!(page.canvases.is_empty());
    }
}
