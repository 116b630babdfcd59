mod commands;
mod terminal;

use commands::{CommandLine, sweep};
use terminal::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CommandLine::parse_args();

    logging::init();

    sweep::run(args).await
}
