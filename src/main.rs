use anyhow::Result;
use clap::Parser;

use cutlist_optimizer_cli::{cli::args::Cli, logging};

#[cfg(feature = "fast-alloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init_cli(cli.verbose) {
        eprintln!("failed to initialize logging: {e}");
        std::process::exit(1);
    }

    cli.execute().await?;

    Ok(())
}
