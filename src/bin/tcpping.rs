use clap::{ArgAction, Parser};
use console::{Term, set_colors_enabled, style};
use std::io::{self, IsTerminal};
use std::net::Ipv4Addr;
use std::process;
use tokio::signal;
use tokio::time::Instant;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use tcpping::domain::config::{DEFAULT_COUNT, DEFAULT_INTERVAL, MIN_INTERVAL};
use tcpping::{Config, ProbeLoop, ProbeObserver, ProbeResult, TcppingError, fmt, resolve};

/// Exit code for fatal runtime failures (resolution, output).
const EXIT_FATAL: i32 = 9;
const EXIT_USAGE: i32 = 2;

#[derive(Parser, Debug)]
#[command(name = "tcpping")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Ping a host by repeatedly opening and closing TCP connections")]
struct Args {
    /// Destination host name or IPv4 address
    #[arg(value_name = "destination")]
    destination: String,

    /// Destination TCP port
    #[arg(value_name = "port", value_parser = clap::value_parser!(u16).range(1..))]
    port: u16,

    /// Stop after making count SYN/ACK attempts
    #[arg(short = 'c', value_name = "count", default_value_t = DEFAULT_COUNT,
          value_parser = clap::value_parser!(u32).range(1..))]
    count: u32,

    /// Wait interval seconds between connection attempts; cannot be less than 0.2s
    #[arg(short = 'i', value_name = "interval", default_value_t = DEFAULT_INTERVAL)]
    interval: f64,

    /// Numeric output only, no reverse lookup of the destination address
    #[arg(short = 'n')]
    numeric_only: bool,

    /// Print the summary as JSON on stdout; progress lines move to stderr
    #[arg(short = 'j', long)]
    json: bool,

    /// Pretty-print JSON
    #[arg(short = 'p', long)]
    pretty: bool,

    /// Disable colored output
    #[arg(long = "no-color", alias = "nocolor")]
    no_color: bool,

    /// More diagnostics on stderr (-v debug, -vv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

/// Writes replies to `out` and failures to `err` as probes complete.
struct TermObserver<'a> {
    out: &'a Term,
    err: &'a Term,
}

impl ProbeObserver for TermObserver<'_> {
    fn on_reply(
        &mut self,
        ip: Ipv4Addr,
        port: u16,
        seq: u32,
        result: &ProbeResult,
    ) -> Result<(), TcppingError> {
        self.out
            .write_line(&fmt::text::render_reply(ip, port, seq, result))?;
        Ok(())
    }

    fn on_failure(
        &mut self,
        ip: Ipv4Addr,
        port: u16,
        seq: u32,
        result: &ProbeResult,
    ) -> Result<(), TcppingError> {
        self.err
            .write_line(&fmt::text::render_failure(ip, port, seq, result))?;
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let want_color = !args.json
        && io::stdout().is_terminal()
        && std::env::var_os("NO_COLOR").is_none()
        && !args.no_color;
    set_colors_enabled(want_color);
    console::set_colors_enabled_stderr(want_color);

    let term = Term::stdout();
    let err_term = Term::stderr();

    let exit_code = match run(&args, &term, &err_term).await {
        Ok(()) => 0,
        Err(e) => handle_error(&err_term, e),
    };
    process::exit(exit_code);
}

async fn run(args: &Args, term: &Term, err_term: &Term) -> Result<(), TcppingError> {
    let config = Config::new(
        &args.destination,
        args.port,
        args.count,
        args.interval,
        args.numeric_only,
    )?;
    // with --json, stdout carries only the summary document
    let lines = if args.json { err_term } else { term };
    if config.interval_clamped {
        lines.write_line(&fmt::text::render_interval_warning(MIN_INTERVAL))?;
    }

    let target = resolve(&config.host, config.numeric_only).await?;
    lines.write_line(&fmt::text::render_header(&target))?;

    let mut observer = TermObserver {
        out: lines,
        err: err_term,
    };
    let started = Instant::now();
    let stats = ProbeLoop::new(&config, target.ip)
        .run(&mut observer, interrupted())
        .await?;
    let total = started.elapsed();
    if stats.interrupted() {
        debug!(attempted = stats.attempted, "interrupted by user");
    }

    if args.json {
        let s = fmt::json::summary_to_json(&target, config.port, &stats, total, args.pretty)?;
        term.write_line(&s)?;
    } else {
        term.write_line(&fmt::text::render_footer(&stats, total, &target))?;
    }
    Ok(())
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn interrupted() {
    if let Err(e) = signal::ctrl_c().await {
        debug!(error = %e, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tcpping={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn handle_error(term: &Term, err: TcppingError) -> i32 {
    term.write_line(&style(format!("Error: {}", err)).red().to_string())
        .ok();
    match err {
        TcppingError::Config(_) => EXIT_USAGE,
        _ => EXIT_FATAL,
    }
}
