use anyhow::Result;
use clap::Parser;
use novel_shelf::{BookOutcome, process_job, resolve_jobs};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(
    name = "split-novel",
    about = "Split raw novel text files into per-chapter files plus a manifest"
)]
struct Cli {
    /// Delete existing chapter files and manifest.json before splitting
    /// (accepted before or after the positional arguments)
    #[arg(long)]
    clean: bool,

    /// JSON file listing {"src", "encoding", "out_dir"} entries to process
    #[arg(long, value_name = "FILE")]
    books: Option<PathBuf>,

    /// Process a single book instead of the built-in list
    #[arg(num_args = 3, value_names = ["SRC", "ENCODING", "OUT_DIR"])]
    book: Vec<String>,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let start_time = Instant::now();
    let cli = Cli::parse();
    let jobs = resolve_jobs(&cli.book, cli.books.as_deref())?;

    let mut failed = 0;
    for job in &jobs {
        match process_job(job, cli.clean) {
            BookOutcome::Written(manifest) => println!(
                "[OK] {}: {} chapters written from {}",
                job.out_dir.display(),
                manifest.chapter_count(),
                job.src.display()
            ),
            BookOutcome::SourceMissing => {
                println!("[WARN] Source not found: {}", job.src.display())
            }
            BookOutcome::Failed(e) => {
                failed += 1;
                eprintln!("[ERROR] {}: {}", job.out_dir.display(), e);
            }
        }
    }

    tracing::debug!(
        books = jobs.len(),
        failed,
        elapsed_secs = start_time.elapsed().as_secs_f64(),
        "batch finished"
    );

    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
