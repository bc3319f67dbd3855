//! External chart data, named by a canvas's `data-chart-src` attribute.
//!
//! Remote fetches start on a background thread the moment a source is
//! discovered and are joined right before chart construction, so data is
//! always complete before a chart exists without the scan ever blocking on
//! the network. Local sources resolve against the site tree at join time.

use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

use either::Either;

use crate::{err, error};
use crate::error::{Chainable, Result};

/// Classifies a source as a site-tree path or a remote URL.
pub fn classify(src: &str, base: &Path) -> Either<PathBuf, String> {
    match src.starts_with("http://") || src.starts_with("https://") {
        true => Either::Right(src.into()),
        false => Either::Left(base.join(src.trim_start_matches('/'))),
    }
}

/// An in-flight chart data source.
#[derive(Debug)]
pub struct PendingFetch {
    source: Either<PathBuf, (String, JoinHandle<Result<String>>)>,
}

impl PendingFetch {
    pub fn spawn(src: &str, base: &Path) -> PendingFetch {
        let source = match classify(src, base) {
            Either::Left(path) => Either::Left(path),
            Either::Right(url) => {
                let handle = std::thread::spawn({
                    let url = url.clone();
                    move || fetch_remote(&url)
                });

                Either::Right((url, handle))
            }
        };

        PendingFetch { source }
    }

    /// Blocks until the source's payload is available.
    pub fn join(self) -> Result<String> {
        match self.source {
            Either::Left(path) => std::fs::read_to_string(&path).chain_with(|| error! {
                "failed to read chart data file",
                "path" => path.display(),
            }),
            Either::Right((url, handle)) => match handle.join() {
                Ok(result) => result.chain_with(|| error! {
                    "failed to fetch chart data",
                    "url" => url,
                }),
                Err(_) => err! {
                    "chart data fetch thread panicked",
                    "url" => url,
                },
            },
        }
    }
}

fn fetch_remote(url: &str) -> Result<String> {
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    Ok(response.text()?)
}
