//! Helsa CLI entry point.

use helsa_lib::cli::{self, Cli};
use helsa_lib::core::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Execute the command
    cli::execute(cli).await
}
