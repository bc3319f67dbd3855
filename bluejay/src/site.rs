use std::path::{Path, PathBuf};

use tracing::{info, warn};

use plotmark::rayon::prelude::*;
use plotmark::error::{Chainable, Result};
use plotmark::{err, error, page, Post, Store};

use crate::config::Settings;

/// The site pass: decorate pages, collect posts, copy the rest through.
#[derive(Debug)]
pub struct Bluejay {
    pub input: PathBuf,
    pub output: PathBuf,
    pub settings: Settings,
}

#[derive(Debug, Default)]
pub struct BuildSummary {
    pub pages: usize,
    pub charts: usize,
    pub posts: usize,
    pub assets: usize,
}

const PAGE_EXTS: &[&str] = &["html", "htm"];
const POST_EXTS: &[&str] = &["md", "mdown", "markdown"];

impl Bluejay {
    pub fn new<I, O>(input: I, output: O) -> Result<Self>
        where I: AsRef<Path>, O: AsRef<Path>
    {
        let input = input.as_ref().to_path_buf();
        if !input.is_dir() {
            return err! {
                "input must point to an existing directory",
                "path" => input.display(),
            };
        }

        Ok(Bluejay {
            settings: Settings::load(&input)?,
            output: output.as_ref().to_path_buf(),
            input,
        })
    }

    pub fn build(&self) -> Result<BuildSummary> {
        let mut pages = vec![];
        let mut posts = vec![];
        let mut assets = vec![];

        for entry in jwalk::WalkDir::new(&self.input).skip_hidden(true) {
            let entry = entry.map_err(|e| error!("failed to walk site tree", e))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative = path.strip_prefix(&self.input)
                .expect("walked paths live under the input root")
                .to_path_buf();

            if relative == Path::new(crate::CONFIG_FILE) {
                continue;
            }

            let ext = relative.extension().and_then(|e| e.to_str()).unwrap_or("");
            if PAGE_EXTS.contains(&ext) {
                pages.push(relative);
            } else if relative.starts_with(crate::CONTENT_DIR) && POST_EXTS.contains(&ext) {
                posts.push(relative);
            } else {
                assets.push(relative);
            }
        }

        let charts = pages.par_iter()
            .map(|relative| self.decorate_page(relative))
            .try_reduce(|| 0, |a, b| Ok(a + b))?;

        let records = posts.par_iter()
            .filter_map(|relative| self.parse_post(relative))
            .collect::<Vec<_>>();

        assets.par_iter().try_for_each(|relative| self.copy_asset(relative))?;

        let store = Store::from_posts(records);
        self.write_store(&store)?;

        Ok(BuildSummary {
            pages: pages.len(),
            charts,
            posts: store.len(),
            assets: assets.len(),
        })
    }

    /// Resolves one page's chart canvases into the output tree. Returns
    /// the number of charts constructed.
    fn decorate_page(&self, relative: &Path) -> Result<usize> {
        let source = self.input.join(relative);
        let html = std::fs::read_to_string(&source).chain_with(|| error! {
            "failed to read page",
            "path" => source.display(),
        })?;

        let decorated = page::decorate(&html, &self.settings.charts, &self.input);
        let charts = decorated.charts().count();
        if charts > 0 {
            info!(page = %relative.display(), charts, "resolved chart canvases");
        }

        self.write_output(relative, decorated.html.as_bytes())?;
        Ok(charts)
    }

    /// Parses one post into its store record. A post that fails to parse
    /// is reported and left out; it never fails the build.
    fn parse_post(&self, relative: &Path) -> Option<Post> {
        let source = self.input.join(relative);
        let text = match std::fs::read_to_string(&source) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %source.display(), error = %e, "failed to read post; skipping");
                return None;
            }
        };

        let stem = relative.file_stem().and_then(|s| s.to_str()).unwrap_or("post");
        match Post::parse(stem, &text, &self.settings.root) {
            Ok(post) => post,
            Err(e) => {
                warn!(path = %source.display(), error = %e.message(), "skipping unparsable post");
                None
            }
        }
    }

    fn copy_asset(&self, relative: &Path) -> Result<()> {
        let source = self.input.join(relative);
        let target = self.output.join(relative);
        self.ensure_parent(&target)?;
        std::fs::copy(&source, &target).map(|_| ()).chain_with(|| error! {
            "failed to copy asset",
            "source path" => source.display(),
            "destination path" => target.display(),
        })
    }

    fn write_store(&self, store: &Store) -> Result<()> {
        let target = self.output.join(&self.settings.store.output);
        self.ensure_parent(&target)?;
        std::fs::write(&target, store.to_js()).chain_with(|| error! {
            "failed to write search store",
            "path" => target.display(),
        })
    }

    fn write_output(&self, relative: &Path, bytes: &[u8]) -> Result<()> {
        let target = self.output.join(relative);
        self.ensure_parent(&target)?;
        std::fs::write(&target, bytes).chain_with(|| error! {
            "failed to write page",
            "path" => target.display(),
        })
    }

    fn ensure_parent(&self, target: &Path) -> Result<()> {
        match target.parent() {
            Some(parent) => Ok(std::fs::create_dir_all(parent)?),
            None => Ok(()),
        }
    }
}
