use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use ltsv2avro_core::{Codec, Config, LtsvConfig};
use ltsv2avro_feeds::{file_lines, stdin_lines};
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(
    name = "ltsv2avro",
    about = "Convert LTSV lines into an Avro object container on stdout"
)]
struct Cli {
    /// Avro schema file (overrides ENV_SCHEMA_FILENAME).
    #[arg(long, value_name = "PATH")]
    schema: Option<PathBuf>,

    /// Optional TOML configuration file, applied before environment overrides.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Read from this file instead of stdin.
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Block codec: null, deflate, snappy, zstandard (bzip2 and xz are written uncompressed).
    #[arg(long)]
    codec: Option<Codec>,

    #[arg(long, value_name = "N")]
    block_length: Option<usize>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(if cli.debug { "debug" } else { "info" })
            }),
        )
        .init();

    match run(cli).await {
        Ok(records) => {
            tracing::info!(records, "conversion finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<u64> {
    let mut cfg = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(schema) = cli.schema {
        cfg.decode.schema_filename = Some(schema);
    }
    if let Some(codec) = cli.codec {
        cfg.encode.codec = codec;
    }
    if let Some(n) = cli.block_length {
        anyhow::ensure!(n > 0, "--block-length must be positive");
        cfg.encode.block_length = n;
    }

    let ltsv = LtsvConfig::from_config(&cfg).context("invalid ltsv configuration")?;
    let schema_path = cfg
        .decode
        .schema_filename
        .clone()
        .context("no schema given: pass --schema or set ENV_SCHEMA_FILENAME")?;
    let schema = ltsv2avro_sink::load_schema(&schema_path, cfg.decode.schema_size_max)
        .with_context(|| format!("loading schema {}", schema_path.display()))?;

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, stopping after the current record");
            on_signal.cancel();
        }
    });

    let encode = cfg.encode;
    let input = cli.input;
    tokio::task::spawn_blocking(move || -> anyhow::Result<u64> {
        let out = BufWriter::new(io::stdout().lock());
        let written = match input {
            Some(path) => {
                let source = file_lines(&path)?;
                ltsv2avro::convert(source, &ltsv, &schema, out, &encode, cancel)?
            }
            None => ltsv2avro::convert(stdin_lines(), &ltsv, &schema, out, &encode, cancel)?,
        };
        Ok(written)
    })
    .await
    .context("conversion task failed")?
}
