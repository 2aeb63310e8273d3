use crate::binding::{Source, SourceKind};
use crate::colors::Colors;
use crate::conflict::ConflictReport;
use crate::error::ParseFailure;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Normal,
    Quiet,
    Json,
}

pub struct OutputContext {
    pub mode: OutputMode,
    pub colors: Colors,
    pub show_progress: bool,
}

impl OutputContext {
    pub fn new(mode: OutputMode, use_colors: bool, show_progress: bool) -> Self {
        Self {
            mode,
            // JSON goes to machines, never colour it
            colors: Colors::new(use_colors && mode != OutputMode::Json),
            show_progress,
        }
    }
}

#[derive(Debug)]
pub struct RunResult {
    pub sources_scanned: usize,
    pub report: ConflictReport,
    pub failures: Vec<ParseFailure>,
}

impl RunResult {
    pub fn has_conflicts(&self) -> bool {
        self.report.has_conflicts()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    total_bindings: usize,
    conflict_count: usize,
    conflicts: Vec<JsonConflict<'a>>,
    failures: Vec<JsonFailure>,
}

#[derive(Serialize)]
struct JsonConflict<'a> {
    combo: &'a str,
    bindings: Vec<JsonBinding<'a>>,
}

#[derive(Serialize)]
struct JsonBinding<'a> {
    source: &'a Source,
    system: SourceKind,
    action: &'a str,
    status: &'a str,
}

#[derive(Serialize)]
struct JsonFailure {
    path: String,
    system: SourceKind,
    error: String,
}

pub fn print_report(result: &RunResult, ctx: &OutputContext) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, result, ctx)
}

pub fn write_report<W: Write>(out: &mut W, result: &RunResult, ctx: &OutputContext) -> io::Result<()> {
    match ctx.mode {
        OutputMode::Quiet => write_quiet(out, result),
        OutputMode::Json => write_json(out, result),
        OutputMode::Normal => write_normal(out, result, &ctx.colors),
    }
}

fn write_quiet<W: Write>(out: &mut W, result: &RunResult) -> io::Result<()> {
    for combo in result.report.conflicts.keys() {
        writeln!(out, "{combo}")?;
    }
    Ok(())
}

fn write_json<W: Write>(out: &mut W, result: &RunResult) -> io::Result<()> {
    let report = &result.report;
    let json = JsonReport {
        total_bindings: report.total_bindings,
        conflict_count: report.conflict_count(),
        conflicts: report
            .conflicts
            .iter()
            .map(|(combo, records)| JsonConflict {
                combo,
                bindings: records
                    .iter()
                    .map(|r| JsonBinding {
                        source: &r.source,
                        system: r.system(),
                        action: &r.action,
                        status: &r.status,
                    })
                    .collect(),
            })
            .collect(),
        failures: result
            .failures
            .iter()
            .map(|f| JsonFailure {
                path: f.path.display().to_string(),
                system: f.kind,
                error: f.error.to_string(),
            })
            .collect(),
    };

    serde_json::to_writer_pretty(&mut *out, &json)?;
    writeln!(out)
}

fn write_normal<W: Write>(out: &mut W, result: &RunResult, colors: &Colors) -> io::Result<()> {
    let report = &result.report;

    if report.has_conflicts() {
        writeln!(
            out,
            "{}Found {} potential conflicts:{}",
            colors.conflict,
            report.conflict_count(),
            colors.reset()
        )?;

        for (combo, records) in &report.conflicts {
            writeln!(out)?;
            writeln!(
                out,
                "Key combination '{}{}{}' used in:",
                colors.combo,
                combo,
                colors.reset()
            )?;
            for record in records {
                writeln!(
                    out,
                    "  - {}: {} {}({}){}",
                    record.source,
                    record.action,
                    colors.dim,
                    record.status,
                    colors.reset()
                )?;
            }
        }
    } else {
        writeln!(
            out,
            "{}No conflicts found!{} Checked {} bindings.",
            colors.clean,
            colors.reset(),
            report.total_bindings
        )?;
    }

    if !result.failures.is_empty() {
        writeln!(out)?;
        writeln!(
            out,
            "{}Skipped {} unreadable source(s){}",
            colors.warning,
            result.failures.len(),
            colors.reset()
        )?;
        for failure in &result.failures {
            writeln!(out, "  - {failure}")?;
        }
    }

    Ok(())
}
