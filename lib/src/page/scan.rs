use std::ops::Range;
use std::sync::Arc;

use memchr::memmem;
use once_cell::sync::Lazy;

use crate::chart::Chart;

static OPEN_TAG: Lazy<memmem::Finder<'static>> = Lazy::new(|| memmem::Finder::new("<canvas"));
static CLOSE_TAG: Lazy<memmem::Finder<'static>> = Lazy::new(|| memmem::Finder::new("</canvas>"));

/// One chart-bearing canvas element lifted out of a page.
///
/// `body_span` is the byte range of the element's inner content within the
/// original page, so a decorated replacement can be spliced back in place.
/// The constructed chart is attached here once resolution succeeds.
#[derive(Debug)]
pub struct Canvas {
    /// The `data-chart` attribute: which chart variant to construct.
    pub kind: Arc<str>,
    /// The `data-chart-src` attribute, an external CSV source.
    pub src: Option<Arc<str>>,
    /// Every attribute on the tag, as written.
    pub attrs: Vec<(Arc<str>, Arc<str>)>,
    /// The element's inner content: CSV interleaved with comment fragments.
    pub body: Arc<str>,
    pub body_span: Range<usize>,
    pub chart: Option<Chart>,
}

impl Canvas {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter()
            .find(|(attr, _)| &**attr == name)
            .map(|(_, value)| &**value)
    }
}

/// Extracts every `<canvas>` element carrying a `data-chart` attribute, in
/// document order. Unterminated elements and canvases without the
/// attribute are passed over.
pub fn scan(html: &str) -> Vec<Canvas> {
    let bytes = html.as_bytes();
    let mut canvases = vec![];
    let mut pos = 0;

    while let Some(found) = OPEN_TAG.find(&bytes[pos..]) {
        let tag_start = pos + found;
        let attr_start = tag_start + "<canvas".len();
        match bytes.get(attr_start) {
            Some(b'>') | Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r') => {}
            // A longer tag name that merely starts with "canvas".
            _ => {
                pos = attr_start;
                continue;
            }
        }

        let Some(tag_end) = tag_close(bytes, attr_start) else { break };
        let body_start = tag_end + 1;
        let Some(found) = CLOSE_TAG.find(&bytes[body_start..]) else { break };
        let body_end = body_start + found;
        pos = body_end + "</canvas>".len();

        let attrs = attributes(&html[attr_start..tag_end]);
        let kind = attrs.iter().find(|(name, _)| &**name == "data-chart");
        let Some((_, kind)) = kind else { continue };

        canvases.push(Canvas {
            kind: kind.clone(),
            src: attrs.iter()
                .find(|(name, _)| &**name == "data-chart-src")
                .map(|(_, value)| value.clone()),
            body: html[body_start..body_end].into(),
            body_span: body_start..body_end,
            attrs,
            chart: None,
        });
    }

    canvases
}

/// The position of the `>` ending the tag, honoring quoted attribute
/// values.
fn tag_close(bytes: &[u8], mut i: usize) -> Option<usize> {
    while i < bytes.len() {
        match bytes[i] {
            b'>' => return Some(i),
            quote @ (b'"' | b'\'') => {
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    i += 1;
                }

                i += 1;
            }
            _ => i += 1,
        }
    }

    None
}

fn attributes(tag: &str) -> Vec<(Arc<str>, Arc<str>)> {
    let bytes = tag.as_bytes();
    let mut attrs = vec![];
    let mut i = 0;

    while i < bytes.len() {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let name_start = i;
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'=' {
            i += 1;
        }

        if i == name_start {
            break;
        }

        let name = &tag[name_start..i];
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        let value = if bytes.get(i) == Some(&b'=') {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }

            match bytes.get(i) {
                Some(&quote @ (b'"' | b'\'')) => {
                    i += 1;
                    let value_start = i;
                    while i < bytes.len() && bytes[i] != quote {
                        i += 1;
                    }

                    let value = &tag[value_start..i];
                    i += 1;
                    value
                }
                _ => {
                    let value_start = i;
                    while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
                        i += 1;
                    }

                    &tag[value_start..i]
                }
            }
        } else {
            ""
        };

        attrs.push((name.into(), value.into()));
    }

    attrs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_chart_canvases_are_picked_up() {
        let html = r#"
            <canvas id="plain"></canvas>
            <canvas id="q" data-chart="bar" class="fig">a,1,2</canvas>
            <canvas data-chart='line' data-chart-src="/assets/q.csv"></canvas>
        "#;

        let canvases = scan(html);
        assert_eq!(canvases.len(), 2);

        assert_eq!(&*canvases[0].kind, "bar");
        assert_eq!(canvases[0].attr("id"), Some("q"));
        assert_eq!(canvases[0].attr("class"), Some("fig"));
        assert_eq!(&*canvases[0].body, "a,1,2");
        assert!(canvases[0].src.is_none());

        assert_eq!(&*canvases[1].kind, "line");
        assert_eq!(canvases[1].src.as_deref(), Some("/assets/q.csv"));
        assert_eq!(&*canvases[1].body, "");
    }

    #[test]
    fn body_span_addresses_the_original_page() {
        let html = "<p>intro</p><canvas data-chart=\"bar\">a,1</canvas>";
        let canvases = scan(html);
        assert_eq!(&html[canvases[0].body_span.clone()], "a,1");
    }

    #[test]
    fn quoted_angle_brackets_do_not_end_the_tag() {
        let html = "<canvas data-chart=\"bar\" title=\"a > b\">x,1</canvas>";
        let canvases = scan(html);
        assert_eq!(canvases.len(), 1);
        assert_eq!(canvases[0].attr("title"), Some("a > b"));
        assert_eq!(&*canvases[0].body, "x,1");
    }

    #[test]
    fn unterminated_canvas_is_ignored() {
        let canvases = scan("<canvas data-chart=\"bar\">a,1");
        assert!(canvases.is_empty());
    }

    #[test]
    fn similarly_named_tags_are_skipped() {
        let canvases = scan("<canvasser data-chart=\"bar\">x</canvasser>");
        assert!(canvases.is_empty());
    }

    #[test]
    fn comments_stay_inside_the_body() {
        let html = "<canvas data-chart=\"pie\"><!-- {\"options\":{}} -->s,1,2</canvas>";
        let canvases = scan(html);
        assert!(canvases[0].body.contains("<!--"));
    }
}
