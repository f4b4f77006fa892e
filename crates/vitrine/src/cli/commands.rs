//! # Dispatch
//!
//! The only place in the codebase that:
//! - Installs the tracing subscriber
//! - Reads the process working directory
//! - Writes results to stdout
//!
//! Library errors arrive as `VitrineError` and leave as `anyhow::Error` with the
//! command name attached as context.

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use vitrineapp::commands::CmdResult;
use vitrineapp::init::{initialize, VitrineContext};

use super::render::{render_json, render_listing, render_options, render_quote};
use super::setup::{parse_cli, Cli, Commands, FilterArgs, OutputMode};

pub fn run() -> anyhow::Result<()> {
    let cli = parse_cli();
    init_tracing(cli.verbose);

    let cwd = std::env::current_dir().context("Failed to read the working directory")?;
    let ctx = initialize(&cwd, cli.catalog.clone());
    tracing::debug!(catalog = %ctx.catalog_path.display(), "dispatching");

    let output = dispatch(&cli, &ctx)?;
    print!("{}", output);
    Ok(())
}

/// Logs go to stderr so JSON on stdout stays parseable. `RUST_LOG` wins over
/// `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "vitrine=debug,vitrineapp=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn dispatch(cli: &Cli, ctx: &VitrineContext) -> anyhow::Result<String> {
    let currency = ctx.config.currency_symbol.as_str();

    match &cli.command {
        None => {
            let request = FilterArgs::default().request(&ctx.config);
            let result = ctx.api.browse(&request).context("browse failed")?;
            render(cli.output, &result, |r| render_listing(r, currency))
        }
        Some(Commands::Browse(args)) => {
            let result = ctx
                .api
                .browse(&args.request(&ctx.config))
                .context("browse failed")?;
            render(cli.output, &result, |r| render_listing(r, currency))
        }
        Some(Commands::Search { terms, filters }) => {
            let result = ctx
                .api
                .search(terms.as_slice(), &filters.request(&ctx.config))
                .context("search failed")?;
            render(cli.output, &result, |r| render_listing(r, currency))
        }
        Some(Commands::Options { popularity }) => {
            let result = ctx.api.options(*popularity).context("options failed")?;
            render(cli.output, &result, render_options)
        }
        Some(Commands::Quote { items }) => {
            let result = ctx.api.quote(items.as_slice()).context("quote failed")?;
            render(cli.output, &result, |r| render_quote(r, currency))
        }
    }
}

fn render(
    mode: OutputMode,
    result: &CmdResult,
    text: impl FnOnce(&CmdResult) -> String,
) -> anyhow::Result<String> {
    match mode {
        OutputMode::Text => Ok(text(result)),
        OutputMode::Json => render_json(result),
    }
}
