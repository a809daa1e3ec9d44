use std::io;

use birthday_book::cli::Cli;
use birthday_book::console::Console;
use birthday_book::store::Store;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    let mut store = Store::new();
    let mut console = Console::new(io::stdin().lock(), io::stdout().lock(), cli.file);
    if let Err(e) = console.run(&mut store) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    // RUST_LOG, when set, wins over -d
    let env_filter = EnvFilter::builder()
        .with_default_directive(filter.into())
        .from_env_lossy();

    // stdout belongs to the menu, so logs go to stderr
    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(env_filter))
        .init();

    tracing::debug!(?filter, "logging initialised");
}
