use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use termsheet::{CanonicalBatch, PipelineOptions, RawDocument, SourceRegistry};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One JSON object per canonical row.
    Json,
    /// Row count per issuer.
    Summary,
}

/// Extract canonical pricing rows from term-sheet HTML documents.
#[derive(Parser, Debug)]
#[command(name = "termsheet", version)]
struct Args {
    /// Glob patterns of HTML files to read
    #[arg(required = true)]
    patterns: Vec<String>,

    /// Source key for every document (overrides detection)
    #[arg(long)]
    source: Option<String>,

    /// Sender address used to detect the source
    #[arg(long)]
    sender: Option<String>,

    /// YAML source registry layered over the built-in one
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read documents from unknown sources from their largest table
    #[arg(long, default_value_t = false)]
    relaxed: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

fn expand_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for pattern in patterns {
        let matches =
            glob::glob(pattern).with_context(|| format!("invalid glob pattern `{}`", pattern))?;
        for entry in matches {
            match entry {
                Ok(path) if path.is_file() => paths.push(path),
                Ok(_) => {}
                Err(e) => warn!(error = %e, "unreadable glob entry"),
            }
        }
    }
    paths.sort();
    paths.dedup();
    Ok(paths)
}

/// File contents as text. Bytes that are not UTF-8 are replaced.
fn read_markup(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// `--source`, else `--sender` detection, else a file stem naming a source.
fn document_source(args: &Args, path: &Path, registry: &SourceRegistry) -> Option<String> {
    if let Some(source) = &args.source {
        return Some(source.clone());
    }
    if let Some(sender) = &args.sender {
        return registry.detect_sender(sender).map(|p| p.key.clone());
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .and_then(|stem| registry.get(stem))
        .map(|p| p.key.clone())
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,termsheet=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let registry = match &args.config {
        Some(path) => SourceRegistry::from_yaml_file(path)?,
        None => SourceRegistry::builtin().clone(),
    };
    let options = if args.relaxed {
        PipelineOptions::relaxed()
    } else {
        PipelineOptions::default()
    };

    let paths = expand_patterns(&args.patterns)?;
    if paths.is_empty() {
        bail!("no files match {:?}", args.patterns);
    }
    info!(files = paths.len(), relaxed = args.relaxed, "reading documents");

    let mut documents = Vec::with_capacity(paths.len());
    let mut read_paths = Vec::with_capacity(paths.len());
    for path in &paths {
        let markup = match read_markup(path) {
            Ok(markup) => markup,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "document skipped");
                continue;
            }
        };
        let source = document_source(&args, path, &registry);
        documents.push(RawDocument::new(markup, source.as_deref()));
        read_paths.push(path);
    }

    let batch = CanonicalBatch::assemble(&documents, &registry, &options);
    for skipped in batch.skipped() {
        warn!(
            file = %read_paths[skipped.index].display(),
            reason = %skipped.reason,
            "no rows extracted"
        );
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Json => {
            for row in batch.rows() {
                serde_json::to_writer(&mut out, row)?;
                writeln!(out)?;
            }
        }
        OutputFormat::Summary => {
            for (issuer, count) in batch.counts_by_issuer() {
                let issuer = if issuer.is_empty() { "<none>" } else { issuer.as_str() };
                writeln!(out, "{issuer}\t{count}")?;
            }
            writeln!(out, "total\t{}", batch.len())?;
            writeln!(out, "skipped\t{}", batch.skipped().len())?;
        }
    }
    Ok(())
}
