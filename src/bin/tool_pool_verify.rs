/// Pool Verify Tool
///
/// Prints the contract verification command for a deployed pool.
/// Gateway failures are not handled here and end the process with a non-zero status.
///
/// Usage: cargo run --bin tool_pool_verify -- [--deployment NAME] [--debug-verify]

use pooltools::arguments::{patterns, print_debug_info};
use pooltools::invoker::verify;
use pooltools::invoker::ToolContext;
use pooltools::logger::{self, LogTag};
use std::io;
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    if patterns::is_help_requested() {
        verify::command().print_help()?;
        println!();
        return Ok(());
    }

    let args = match verify::parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(e.exit_code());
        }
    };

    pooltools::paths::ensure_all_directories().map_err(anyhow::Error::msg)?;
    logger::init();
    print_debug_info();
    logger::debug(LogTag::Verify, "Starting pool verify tool");

    let ctx = ToolContext::load(args.settings.as_deref())?;
    let gateway = ctx.gateway()?;
    let result = verify::run_verify(&gateway, &args, &ctx, &mut io::stdout()).await;
    logger::flush();

    result?;
    Ok(())
}
