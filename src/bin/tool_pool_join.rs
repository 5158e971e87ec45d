/// Pool Join Tool
///
/// Joins a pool with the initial tokens described in a pool definition file.
/// A failed join is reported with a hint and the tool still exits with status 0.
///
/// Usage: cargo run --bin tool_pool_join -- <POOL_CONFIG> [--deployment NAME] [--debug-join]

use pooltools::arguments::{patterns, print_debug_info};
use pooltools::errors::PoolToolError;
use pooltools::invoker::join::{self, JoinArgs};
use pooltools::invoker::ToolContext;
use pooltools::logger::{self, LogTag};
use std::io;
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if patterns::is_help_requested() {
        let _ = join::command().print_help();
        println!();
        return;
    }

    // Argument errors are reported before any file is touched
    let args = match join::parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(e.exit_code());
        }
    };

    if let Err(e) = pooltools::paths::ensure_all_directories() {
        eprintln!("Failed to create required directories: {}", e);
        process::exit(1);
    }
    logger::init();
    print_debug_info();

    let result = run(&args).await;
    logger::flush();

    if let Err(e) = result {
        logger::error(LogTag::Join, &e.to_string());
        eprintln!("{}", e);
        process::exit(e.exit_code());
    }
}

async fn run(args: &JoinArgs) -> Result<(), PoolToolError> {
    let ctx = ToolContext::load(args.settings.as_deref())?;
    let gateway = ctx.gateway()?;
    join::run_join(&gateway, args, &ctx, &mut io::stdout()).await
}
