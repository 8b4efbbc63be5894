use clap::Parser;
use ip6walk_application::use_cases::WalkPrefixUseCase;
use ip6walk_domain::{CliOverrides, ConfigError, DomainError, NibblePath};
use ip6walk_infrastructure::dns::HickoryPtrResolver;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

mod bootstrap;
mod reporter;

use reporter::StderrProbeReporter;

#[derive(Parser, Debug)]
#[command(name = "ip6walk")]
#[command(version)]
#[command(about = "Enumerate PTR records below an IPv6 prefix by walking the ip6.arpa tree")]
struct Cli {
    /// Prefix to walk, ADDRESS/SIZE with SIZE a multiple of 4 up to 124
    #[arg(value_name = "PREFIX")]
    prefix: String,

    /// Resolver to query: IP, IP:PORT, [IPv6]:PORT, udp://… or tcp://… (repeatable)
    #[arg(short = 'r', long = "resolver", value_name = "ADDR")]
    resolvers: Vec<String>,

    /// Print every probe and its classification to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Prune timed-out branches instead of aborting
    #[arg(short = 'i', long)]
    ignore_timeout: bool,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Per-query timeout in milliseconds
    #[arg(short = 't', long = "timeout", value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Maximum number of queries in flight
    #[arg(short = 'j', long, value_name = "N")]
    concurrency: Option<usize>,

    /// Send queries without an EDNS(0) OPT record
    #[arg(long)]
    no_edns: bool,

    /// Log level (trace, debug, info, warn, error) or a tracing filter directive
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            resolvers: self.resolvers.clone(),
            timeout_ms: self.timeout_ms,
            concurrency: self.concurrency,
            ignore_timeout: self.ignore_timeout,
            verbose: self.verbose,
            no_edns: self.no_edns,
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ip6walk: {}", e);
            ExitCode::from(exit_status(&e))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
    bootstrap::init_logging(&config.logging, cli.log_level.is_some());

    let prefix = NibblePath::parse_cidr(&cli.prefix)?;
    let walk_config = bootstrap::walk_config(&config)?;

    info!(
        prefix = %cli.prefix,
        resolvers = walk_config.resolvers.len(),
        concurrency = walk_config.concurrency,
        timeout_policy = walk_config.timeout_policy.as_str(),
        "Starting walk"
    );

    let resolver = Arc::new(HickoryPtrResolver::from_walk_config(&walk_config));
    let use_case = WalkPrefixUseCase::new(resolver).with_reporter(Arc::new(StderrProbeReporter));
    let results = use_case.execute(&prefix, &walk_config).await?;

    let mut stdout = std::io::stdout().lock();
    for line in results.report_lines() {
        writeln!(stdout, "{}", line)?;
    }
    stdout.flush()?;

    Ok(())
}

/// 2 for anything rejected before the first query, 1 for a failed walk.
fn exit_status(error: &anyhow::Error) -> u8 {
    if error.downcast_ref::<ConfigError>().is_some() {
        return 2;
    }
    match error.downcast_ref::<DomainError>() {
        Some(e) if e.is_validation() => 2,
        _ => 1,
    }
}
