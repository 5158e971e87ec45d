use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use colored::Colorize;
use pooltools::arguments::{logging_args, print_debug_info};
use pooltools::errors::PoolToolError;
use pooltools::invoker::join::{self, JoinArgs};
use pooltools::invoker::verify::{self, VerifyArgs};
use pooltools::invoker::ToolContext;
use pooltools::logger::{self, LogTag};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

/// Pool tools - join pools with their initial tokens and print verification commands
///
/// Shares its behavior with the standalone `tool_pool_join` / `tool_pool_verify`
/// binaries: join failures are reported and swallowed, verify failures end the
/// process with a non-zero status.
#[derive(Parser, Debug)]
#[command(name = "pooltools", author, version, about, long_about = None)]
struct Cli {
    /// Tool settings file (TOML)
    #[arg(long, global = true, value_name = "PATH")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Join a pool with the initial tokens described in a pool definition file
    Join {
        /// Pool definition file (JSON, comments allowed)
        #[arg(value_name = "POOL_CONFIG")]
        pool_config: PathBuf,

        /// Deployment to join
        #[arg(short, long, value_name = "NAME")]
        deployment: Option<String>,

        /// Network name, overriding the pool file and the deployment
        #[arg(short, long)]
        network: Option<String>,
    },

    /// Print the contract verification command for a deployed pool
    Verify {
        /// Deployment to verify
        #[arg(short, long, value_name = "NAME")]
        deployment: Option<String>,

        /// Network name, overriding the deployment
        #[arg(short, long)]
        network: Option<String>,
    },

    /// List known deployments
    Deployments,
}

fn parse_cli() -> Cli {
    let command = Cli::command().args(logging_args().into_iter().map(|arg| arg.global(true)));
    let matches = command.get_matches();
    match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = parse_cli();

    pooltools::paths::ensure_all_directories().map_err(anyhow::Error::msg)?;
    logger::init();
    print_debug_info();

    let ctx = ToolContext::load(cli.settings.as_deref())?;

    let result = match cli.command {
        Commands::Join {
            pool_config,
            deployment,
            network,
        } => {
            let args = JoinArgs {
                config_path: pool_config,
                deployment,
                network,
                settings: cli.settings.clone(),
            };
            run_join(&ctx, &args).await
        }
        Commands::Verify {
            deployment,
            network,
        } => {
            let args = VerifyArgs {
                deployment,
                network,
                settings: cli.settings.clone(),
            };
            let gateway = ctx.gateway()?;
            let result = verify::run_verify(&gateway, &args, &ctx, &mut io::stdout()).await;
            logger::flush();
            result?;
            return Ok(());
        }
        Commands::Deployments => print_deployments(&ctx, &mut io::stdout()).map_err(PoolToolError::from),
    };

    logger::flush();

    // Only input errors reach here; the join itself never fails the process
    if let Err(e) = result {
        logger::error(LogTag::System, &e.to_string());
        eprintln!("{}", e);
        process::exit(e.exit_code());
    }
    Ok(())
}

async fn run_join(ctx: &ToolContext, args: &JoinArgs) -> Result<(), PoolToolError> {
    let gateway = ctx.gateway()?;
    join::run_join(&gateway, args, ctx, &mut io::stdout()).await
}

fn print_deployments<W: Write>(ctx: &ToolContext, out: &mut W) -> io::Result<()> {
    let default_name = ctx.deployments.resolve(None).ok().map(|d| d.name.clone());

    writeln!(out, "{}", "Known deployments".bold())?;
    for deployment in ctx.deployments.entries() {
        let marker = if Some(&deployment.name) == default_name.as_ref() {
            " (default)".green().to_string()
        } else {
            String::new()
        };
        writeln!(out, "  {}{}", deployment.name.cyan(), marker)?;
        writeln!(
            out,
            "    network:       {}",
            deployment
                .network
                .as_deref()
                .unwrap_or(&ctx.settings.network.default_network)
        )?;
        writeln!(out, "    pool id:       {}", deployment.pool_id)?;
        match &deployment.creation_hash {
            Some(hash) => writeln!(out, "    creation hash: {}", hash)?,
            None => writeln!(out, "    creation hash: {}", "unknown".dimmed())?,
        }
    }
    Ok(())
}
