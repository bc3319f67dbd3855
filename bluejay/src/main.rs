use std::time::Instant;

use tracing_subscriber::EnvFilter;

use crate::site::Bluejay;

mod config;
mod site;

pub const CONTENT_DIR: &str = "content";
pub const CONFIG_FILE: &str = "config.toml";

mod flags {
    use std::path::PathBuf;

    xflags::xflags! {
        /// Decorates a built blog: resolves chart canvases in place and
        /// generates the search store.
        cmd bluejay {
            /// Site source tree.
            required input: PathBuf
            /// Directory the decorated site is written to.
            required output: PathBuf
            /// More logging; repeat for debug output.
            repeated -v, --verbose
        }
    }
}

pub fn main() {
    let flags = flags::Bluejay::from_env_or_exit();
    init_logging(flags.verbose);

    let start = Instant::now();
    let result = Bluejay::new(&flags.input, &flags.output)
        .and_then(|site| site.build());

    match result {
        Ok(summary) => {
            println!(
                "{} pages ({} charts), {} posts, {} assets",
                summary.pages, summary.charts, summary.posts, summary.assets,
            );
            println!("total time: {}ms", start.elapsed().as_millis());
        }
        Err(e) => {
            println!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbosity: u32) {
    let directive = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let filter = EnvFilter::try_from_env("BLUEJAY_LOG")
        .unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
