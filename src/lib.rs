pub mod binding;
pub mod colors;
pub mod config;
pub mod conflict;
pub mod error;
pub mod logging;
pub mod normalize;
mod output;
pub mod parser;
pub mod progress;
pub mod walker;

pub use binding::{BindingRecord, Source, SourceKind};
pub use colors::{should_use_colors, Colors};
pub use config::{
    find_config_file, generate_init_file, load_config, merge_settings, CliOptions, ConfigError,
    KeyclashToml, Settings, KEYCLASH_TOML_TEMPLATE,
};
pub use conflict::{detect_conflicts, ConflictReport, SystemScope};
pub use error::{ParseError, ParseFailure};
pub use normalize::{canonicalize, normalize_combo};
pub use output::{print_report, write_report, OutputContext, OutputMode, RunResult};
pub use parser::SourceFile;
pub use progress::ProgressReporter;
pub use walker::{discover_sources, DiscoveryOptions};

use std::io;
use std::path::PathBuf;

use tracing::warn;

/// Bindings gathered from a set of sources, plus the sources that failed
#[derive(Debug, Default)]
pub struct ScanResult {
    pub bindings: Vec<BindingRecord>,
    pub failures: Vec<ParseFailure>,
}

/// Parse every source in order.
///
/// A source that cannot be read or parsed is logged and recorded as a
/// failure; the remaining sources are still processed.
pub fn scan_sources(sources: &[SourceFile], progress: &ProgressReporter) -> ScanResult {
    let mut result = ScanResult::default();

    for source in sources {
        progress.start(source);

        match source.parse() {
            Ok(records) => result.bindings.extend(records),
            Err(failure) => {
                warn!("Error parsing {failure}");
                result.failures.push(failure);
            }
        }

        progress.inc();
    }

    progress.finish();
    result
}

/// Main entry point: discover, parse, and check all sources under `paths`.
///
/// Nothing is printed; see [`print_report`]. Fails only when a root path does
/// not exist.
pub fn run(paths: &[PathBuf], settings: &Settings, ctx: &OutputContext) -> io::Result<RunResult> {
    if let Some(missing) = paths.iter().find(|p| !p.exists()) {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{}: no such file or directory", missing.display()),
        ));
    }

    let (sources, walk_errors) = discover_sources(paths, &settings.discovery);
    for e in &walk_errors {
        warn!("Error walking files: {e}");
    }

    let progress = ProgressReporter::new(sources.len() as u64, ctx.show_progress);
    let scan = scan_sources(&sources, &progress);
    let report = detect_conflicts(&scan.bindings, settings.scope);

    Ok(RunResult {
        sources_scanned: sources.len(),
        report,
        failures: scan.failures,
    })
}
