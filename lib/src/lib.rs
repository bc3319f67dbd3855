#![doc = svgbobdoc::transform!(
//! Build-time decoration for static-blog assets.
//!
//! # Overview
//!
//! Plotmark takes the pages and posts of a built blog and resolves two
//! kinds of derived assets ahead of time, so the browser ships data
//! instead of logic:
//!
//! ```svgbob
//!   +-----------+   scan    +--------+   assemble   +-------+
//!   | HTML page +---------->| Canvas +------------->| Chart |
//!   +-----------+           +---+----+              +---+---+
//!                               |                       |
//!                   data-chart-src?                 config JSON
//!                               |                       |
//!                          +----+----+             +----+-----+
//!                          |  fetch  |             | rewrite  |
//!                          +---------+             +----------+
//!
//!   +-----------+   front matter   +------+   sort    +-------+
//!   | posts/*.md+----------------->| Post +---------->| Store |
//!   +-----------+   + excerpt      +------+           +-------+
//! ```
//!
//! In words:
//!
//!   * **Charts.** A page may carry `<canvas data-chart="bar">` elements
//!     whose bodies hold inline CSV interleaved with HTML-comment JSON
//!     fragments. [`page::decorate()`] resolves each into a complete chart
//!     configuration and splices it back into the canvas as an embedded
//!     JSON payload; a one-line browser shim hands that payload to the
//!     charting library verbatim. External data named by `data-chart-src`
//!     is fetched while the rest of the page is scanned and joined before
//!     the chart is constructed.
//!
//!   * **The search store.** Markdown posts with TOML front matter become
//!     the pre-generated record array (`var store = [...]`) the site's
//!     search widget consumes: title, excerpt, categories, tags, url,
//!     teaser per post.
//!
//! All merging of chart configuration is destination-biased and recursive
//! over JSON objects; see [`merge::merge()`].
)]

#[macro_use]
pub mod error;
pub mod util;
pub mod merge;
pub mod chart;
pub mod page;
pub mod fetch;
pub mod store;

pub use chart::{Chart, ChartConfig, Defaults, TickFormatter};
pub use page::{Canvas, DecoratedPage};
pub use store::{Post, Store};

pub use rayon;
