//! Rewrites an `ip6.arpa` zone file so that `ip6walk` style enumeration
//! has to expand every node.

use anyhow::Context;
use clap::Parser;
use ip6walk_application::services::ZoneHider;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ip6hide")]
#[command(version)]
#[command(about = "Add wildcard decoys to an ip6.arpa zone file to defeat tree walking")]
struct Cli {
    /// Zone file to read
    #[arg(value_name = "ZONEFILE")]
    zone_file: PathBuf,

    /// Label used for the decoy records (defaults to a random UUID)
    #[arg(long, value_name = "LABEL")]
    secret: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let contents = std::fs::read_to_string(&cli.zone_file)
        .with_context(|| format!("failed to read zone file {}", cli.zone_file.display()))?;

    let mut hider = match cli.secret {
        Some(secret) => ZoneHider::new(secret),
        None => ZoneHider::with_random_secret(),
    };

    let mut stdout = std::io::stdout().lock();
    for line in hider.scan(contents.lines()) {
        writeln!(stdout, "{}", line)?;
    }
    stdout.flush()?;

    Ok(())
}
