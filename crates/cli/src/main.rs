mod options;

use anyhow::{Context, Result, bail};
use cascade_args::Parser;
use std::io::{self, IsTerminal, Write};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    init_tracing();

    let mut parser = Parser::from_env();
    options::register(&mut parser);
    parser.parse().context("failed to parse command line")?;
    tracing::debug!(passes = parser.passes(), "command line parsed");

    let mut stdout = io::stdout().lock();

    if parser.flag("help") {
        parser.print_usage(&mut stdout)?;
        return Ok(());
    }

    if parser.flag("strict") && !parser.unknown_options().is_empty() {
        let flags: Vec<&str> = parser
            .unknown_options()
            .iter()
            .map(|u| u.flag.as_str())
            .collect();
        bail!("unknown options: {}", flags.join(", "));
    }

    if parser.flag("json") {
        let json = parser
            .values_json()
            .context("failed to serialize option values")?;
        writeln!(stdout, "{json}")?;
        return Ok(());
    }

    if parser.flag("print-values") {
        parser.print_current_values(&mut stdout)?;
    }

    for (index, arg) in parser.args().iter().enumerate() {
        writeln!(stdout, "arg[{index}]: {arg}")?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .compact()
        .init();
}
