//! Chunk a document and stream it as memory records.
//!
//! ```bash
//! cleave novel.txt --chunk-size 1000 > memories.jsonl
//! cleave novel.txt --start-from 5 --max-chunks 10 --output batch.jsonl
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use cleave::{
    ingest, read_document, BatchPlan, ChapterChunker, ChunkSize, Destination, IngestReport,
    IngestionSink, JsonLinesSink, LengthMetric,
};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "cleave")]
#[command(about = "Split a document into sentence-aligned, chapter-aware chunks for a memory store")]
#[command(version)]
struct Cli {
    /// Document to chunk
    file: PathBuf,

    /// Minimum chunk length in characters
    #[arg(short = 's', long, default_value_t = ChunkSize::DEFAULT)]
    chunk_size: usize,

    /// First chunk to submit (1-based); earlier chunks are skipped
    #[arg(long, default_value_t = 1)]
    start_from: usize,

    /// Submit at most this many chunks
    #[arg(short = 'n', long)]
    max_chunks: Option<usize>,

    /// Count grapheme clusters instead of chars
    #[arg(long)]
    graphemes: bool,

    /// Write records here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Group id (default: $EVERMEMOS_GROUP_ID or group_123)
    #[arg(long)]
    group_id: Option<String>,

    /// Group name (default: $EVERMEMOS_GROUP_NAME)
    #[arg(long)]
    group_name: Option<String>,

    /// Sender id (default: $EVERMEMOS_SENDER or user_001)
    #[arg(long)]
    sender: Option<String>,

    /// Sender name (default: $EVERMEMOS_SENDER_NAME)
    #[arg(long)]
    sender_name: Option<String>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn destination(&self) -> Destination {
        self.destination_from(|key| std::env::var(key).ok())
    }

    /// Resolve ids through `lookup`; flags win over looked-up values.
    fn destination_from(&self, lookup: impl Fn(&str) -> Option<String>) -> Destination {
        let mut dest = Destination::from_lookup(lookup);
        if let Some(v) = &self.group_id {
            dest.group_id.clone_from(v);
        }
        if let Some(v) = &self.group_name {
            dest.group_name.clone_from(v);
        }
        if let Some(v) = &self.sender {
            dest.sender.clone_from(v);
        }
        if let Some(v) = &self.sender_name {
            dest.sender_name.clone_from(v);
        }
        dest
    }

    fn chunk_size(&self) -> Result<ChunkSize> {
        let metric = if self.graphemes {
            LengthMetric::Graphemes
        } else {
            LengthMetric::Chars
        };
        Ok(ChunkSize::new(self.chunk_size)?.with_metric(metric))
    }

    fn plan(&self) -> BatchPlan {
        BatchPlan {
            start_from: self.start_from.max(1),
            max_chunks: self.max_chunks,
        }
    }
}

/// Filter directive for `-v` count; the end-of-run summary logs at info.
fn log_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "cleave=info",
        1 => "cleave=debug",
        _ => "cleave=trace",
    }
}

fn init_tracing(verbose: u8) -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env().add_directive(log_directive(verbose).parse()?))
        .init();
    Ok(())
}

fn summarize(report: &IngestReport, plan: &BatchPlan) {
    if report.skipped > 0 {
        info!(skipped = report.skipped, "skipped leading chunks");
    }
    if report.limit_reached {
        info!(max = ?plan.max_chunks, "stopped at chunk limit");
    }
    match (&report.failure, report.failed_at()) {
        (Some(failure), Some(sequence)) => error!(
            sequence,
            succeeded = report.succeeded,
            %failure,
            "ingestion stopped; resume with --start-from {sequence}"
        ),
        _ => info!(succeeded = report.succeeded, "all chunks stored"),
    }
    info!(
        seen = report.seen,
        processed = report.processed,
        chars = report.total_chars,
        "done"
    );
}

/// Chunk the document and hand every chunk to `sink`.
///
/// Returns whether every submitted chunk was accepted.
fn process<S: IngestionSink>(cli: &Cli, sink: S) -> Result<bool> {
    let size = cli.chunk_size()?;
    let plan = cli.plan();

    let text = read_document(&cli.file)?;
    info!(
        file = %cli.file.display(),
        chunk_size = size.get(),
        "chunking document"
    );

    let chunks = ChapterChunker::with_size(size).chunks(&text);
    let report = ingest(chunks, sink, &plan);
    summarize(&report, &plan);
    Ok(report.is_success())
}

fn run(cli: &Cli) -> Result<bool> {
    // Validate before touching the output file.
    cli.chunk_size()?;
    let destination = cli.destination();
    info!(group = %destination.group_id, sender = %destination.sender, "destination");

    let writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    process(cli, JsonLinesSink::new(writer, destination))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_tracing(cli.verbose) {
        eprintln!("error: {err:#}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
