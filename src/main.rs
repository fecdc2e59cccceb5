use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use hash_sample::sample::{
    report, wildcard, ConfigFile, HashRegistry, OutputFormat, SampleConfig, SampleEngine,
    SampleError,
};

const LOG_ENV: &str = "HASH_SAMPLE_LOG";

/// Randomly samples streaks of bytes in a file to get a similar effect to hashing the
/// whole file.
///
/// Intended for large files where a quick check is useful enough for integrity without
/// reading everything. It should not be used to guarantee every byte matches; it is a
/// sanity check. The total number of bytes read is sample_size * interval_count.
#[derive(Parser, Debug)]
#[command(name = "hash-sample", version)]
struct Cli {
    /// List all available algorithms separated by spaces
    #[arg(short = 'l', long)]
    list: bool,

    /// Hashing algorithm to use for the samples [default: md5]
    #[arg(short = 'a', long = "algo", value_name = "ALGORITHM")]
    algorithm: Option<String>,

    /// Size of each sample in bytes or percent of the file (%, KB, KiB, MB, MiB, GB, GiB)
    /// [default: 1%]
    #[arg(short = 's', long, value_name = "SAMPLE_SIZE")]
    size: Option<String>,

    /// Number of samples to take [default: 10]
    #[arg(short = 'c', long, value_name = "INTERVAL_COUNT")]
    count: Option<u64>,

    /// Any phrase or value to seed sample placement [default: current day]
    #[arg(short = 'p', long, value_name = "SEED_PHRASE")]
    phrase: Option<String>,

    /// Sample at equally spaced intervals instead of randomly; overrides --phrase
    #[arg(short = 'u', long)]
    uniform: bool,

    /// Only print `digest  file` for each file
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Print one JSON object per file
    #[arg(long, conflicts_with = "quiet")]
    json: bool,

    /// Hash several files at once
    #[arg(long)]
    parallel: bool,

    /// Defaults file [default: <config dir>/hash-sample/config.toml]
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log planning and read details to stderr
    #[arg(long)]
    debug: bool,

    /// Files to check; wildcards are expanded
    #[arg(value_name = "FILE")]
    files: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.debug) {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        return ExitCode::from(2);
    }

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::from(2)
        }
    }
}

fn init_logging(debug: bool) -> Result<()> {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {}", e))
}

fn run(cli: Cli) -> Result<ExitCode> {
    if cli.list {
        println!("{}", HashRegistry::names().join(" "));
        return Ok(ExitCode::SUCCESS);
    }

    let config = build_config(&cli)?;
    config.validate()?;
    let engine = SampleEngine::from_config(&config)?;
    let format = OutputFormat::from_flags(config.verbose, config.json);

    tracing::debug!(
        algorithm = %config.algorithm,
        size = %config.size_spec,
        count = config.sample_count,
        mode = %config.mode(),
        files = config.files.len(),
        "starting batch"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut first = true;

    let summary = engine.run(&config.files, |outcome| match &outcome.result {
        Ok(digest) => match report::render(digest, format) {
            Ok(text) => {
                // Blank line between multi-line reports
                let separator = if !first && format == OutputFormat::Verbose {
                    "\n"
                } else {
                    ""
                };
                first = false;
                if let Err(err) = writeln!(out, "{}{}", separator, text) {
                    tracing::error!(error = %err, "failed to write report");
                }
            }
            Err(err) => report_failure(&outcome.path, "Report", &err.to_string()),
        },
        Err(err) => report_failure(&outcome.path, err.kind(), &err.to_string()),
    });

    tracing::debug!(
        hashed = summary.files_hashed,
        failed = summary.files_failed,
        underfilled = summary.files_underfilled,
        "batch finished"
    );

    Ok(if summary.files_failed > 0 {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

fn report_failure(path: &std::path::Path, kind: &str, message: &str) {
    eprintln!(
        "{} {}",
        "error:".red().bold(),
        report::failure_line(path, kind, message)
    );
}

/// Defaults, then the config file, then command-line flags
fn build_config(cli: &Cli) -> Result<SampleConfig, SampleError> {
    let mut config = SampleConfig::default();

    let file = match &cli.config {
        Some(path) => Some(ConfigFile::load(path)?),
        None => ConfigFile::load_default()?,
    };
    if let Some(file) = file {
        file.apply(&mut config);
    }

    if let Some(algorithm) = &cli.algorithm {
        config.algorithm = algorithm.clone();
    }
    if let Some(size) = &cli.size {
        config.size_spec = size.clone();
    }
    if let Some(count) = cli.count {
        config.sample_count = count;
    }
    if let Some(phrase) = &cli.phrase {
        config.seed_phrase = phrase.clone();
    }
    config.uniform |= cli.uniform;
    config.parallel |= cli.parallel;
    config.verbose = !cli.quiet;
    config.json = cli.json;
    config.files = wildcard::expand_all(&cli.files)?;

    Ok(config)
}
