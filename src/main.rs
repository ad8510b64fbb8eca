use clap::Parser;
use tower_lsp::{LspService, Server};
use tracing::info;

use myst_language_server::logging::init_logger;
use myst_language_server::lsp::backend::MystBackend;

/// Language server offering MyST markdown completions
#[derive(Parser, Debug)]
#[command(name = "myst-language-server", version, about)]
struct Cli {
    /// Communicate over stdin/stdout (the only supported transport)
    #[arg(long)]
    stdio: bool,

    /// Log filter for stderr (e.g. "debug", "myst_language_server=trace"); defaults to RUST_LOG or info
    #[arg(long)]
    log_level: Option<String>,

    /// Disable ANSI colors in stderr logs
    #[arg(long)]
    no_color: bool,

    /// Do not write a session log to the user cache directory
    #[arg(long)]
    no_file_logging: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _guard = init_logger(cli.no_color, cli.log_level.as_deref(), !cli.no_file_logging)?;
    if !cli.stdio {
        info!("No transport flag given; serving over stdio");
    }
    info!("Starting myst-language-server {}", env!("CARGO_PKG_VERSION"));

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(MystBackend::new);

    Server::new(stdin, stdout, socket).serve(service).await;

    info!("Server stopped");
    Ok(())
}
