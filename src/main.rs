use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use grub_state::config::StateFile;
use grub_state::host::fs::FsHost;
use grub_state::state;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn usage() -> &'static str {
    "Usage:\n  grub-state <state-file.toml>"
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let path = match args.as_slice() {
        [path] => PathBuf::from(path),
        _ => bail!(usage()),
    };

    let state_file = StateFile::load(&path)
        .with_context(|| format!("loading state file '{}'", path.display()))?;
    let reports = state::apply(&state_file, &FsHost, &FsHost)
        .with_context(|| format!("applying state file '{}'", path.display()))?;

    println!(
        "{}",
        serde_json::to_string_pretty(&reports).context("serializing state reports")?
    );

    let failed = reports.iter().filter(|r| !r.result).count();
    if failed > 0 {
        bail!("{failed} state(s) failed");
    }
    Ok(())
}
