use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use keyclash::{
    find_config_file, generate_init_file, load_config, logging, merge_settings, print_report, run,
    should_use_colors, CliOptions, KeyclashToml, OutputContext, OutputMode, SystemScope,
};

/// Exit code when no binding source could be found at all
const EXIT_NO_SOURCES: u8 = 2;

#[derive(Parser)]
#[command(name = "keyclash")]
#[command(
    version,
    about = "Report keyboard shortcuts claimed by more than one configuration system"
)]
struct Cli {
    /// Project roots or individual files to scan [default: project root]
    paths: Vec<PathBuf>,

    /// Project root used when no paths are given
    #[arg(long, env = "KEYCLASH_PROJECT_DIR", value_name = "DIR", hide_env_values = true)]
    project_dir: Option<PathBuf>,

    /// Directory holding structured binding YAML files
    #[arg(long, value_name = "DIR")]
    data_dir: Option<String>,

    /// What counts as a separate configuration system
    #[arg(long, value_enum)]
    scope: Option<SystemScope>,

    /// Print the report as JSON
    #[arg(long, conflicts_with = "quiet")]
    json: bool,

    /// Print only the conflicting key combinations
    #[arg(short, long)]
    quiet: bool,

    /// Exit with status 1 when conflicts are found
    #[arg(long)]
    strict: bool,

    /// Also scan files matched by .gitignore
    #[arg(long)]
    no_gitignore: bool,

    /// Force coloured output
    #[arg(long, conflicts_with = "no_color")]
    color: bool,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,

    /// Append run logs to this file
    #[arg(long, value_name = "PATH", conflicts_with = "no_log_file")]
    log_file: Option<PathBuf>,

    /// Do not write a log file
    #[arg(long)]
    no_log_file: bool,

    /// Specify config file path (overrides auto-discovery)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Generate a template keyclash.toml configuration file
    #[arg(long)]
    init: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.init {
        return handle_init();
    }

    let paths = resolve_paths(&cli);

    let toml_config = load_configuration(cli.config.as_deref(), &paths);
    let settings = merge_settings(&build_cli_options(&cli), toml_config.as_ref());

    let _log_guard = logging::init(settings.log_file.as_deref());

    let output_mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let show_progress = output_mode == OutputMode::Normal && std::io::stderr().is_terminal();
    let ctx = OutputContext::new(
        output_mode,
        should_use_colors(cli.color, cli.no_color),
        show_progress,
    );

    let result = match run(&paths, &settings, &ctx) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    if result.sources_scanned == 0 {
        eprintln!(
            "Error: no binding sources found under {}",
            display_paths(&paths)
        );
        return ExitCode::from(EXIT_NO_SOURCES);
    }

    if let Err(e) = print_report(&result, &ctx) {
        eprintln!("Error: {e}");
        return ExitCode::from(1);
    }

    if cli.strict && result.has_conflicts() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

fn handle_init() -> ExitCode {
    match generate_init_file() {
        Ok(path) => {
            println!("Created {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn resolve_paths(cli: &Cli) -> Vec<PathBuf> {
    if !cli.paths.is_empty() {
        return cli.paths.clone();
    }
    let root = cli
        .project_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    vec![root]
}

fn load_configuration(explicit_path: Option<&Path>, paths: &[PathBuf]) -> Option<KeyclashToml> {
    let config_path = explicit_path.map(Path::to_path_buf).or_else(|| {
        let first = paths.first()?;
        let start = if first.is_dir() {
            first.clone()
        } else {
            first.parent()?.to_path_buf()
        };
        find_config_file(&std::fs::canonicalize(&start).unwrap_or(start))
    });

    config_path.and_then(|p| match load_config(&p) {
        Ok(config) => Some(config),
        Err(e) => {
            eprintln!("Warning: Failed to load {}: {}", p.display(), e);
            None
        }
    })
}

fn build_cli_options(cli: &Cli) -> CliOptions {
    // Boolean flags in clap are always present (default false), so we
    // treat false as "not set" for proper merging with config file.
    CliOptions {
        data_dir: cli.data_dir.clone(),
        scope: cli.scope,
        no_gitignore: cli.no_gitignore.then_some(true),
        log_file: cli.log_file.clone(),
        no_log_file: cli.no_log_file.then_some(true),
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
