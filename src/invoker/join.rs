/// Pool join invoker
///
/// Loads a pool definition, extracts its gas price override and asks the protocol to
/// join the pool with its initial tokens. Input problems (missing argument, missing or
/// malformed file, unknown deployment) are returned as errors. A failed delegated call
/// is printed together with the ownership hint and then swallowed: `run_join` still
/// returns `Ok(())`.
use super::{resolve_network, ToolContext};
use crate::arguments::logging_args;
use crate::deployments::Deployment;
use crate::errors::PoolToolError;
use crate::logger::{self, LogTag};
use crate::pool_config::PoolConfig;
use crate::protocol::{JoinReceipt, PoolProtocol};
use clap::{value_parser, Arg, Command};
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

/// Printed after every failed join
pub const OWNER_HINT: &str =
    "Only the pool owner can join a pool with its initial tokens. Check that the configured account created this pool.";

#[derive(Debug, Clone, PartialEq)]
pub struct JoinArgs {
    pub config_path: PathBuf,
    pub deployment: Option<String>,
    pub network: Option<String>,
    pub settings: Option<PathBuf>,
}

/// clap definition for `tool_pool_join`
pub fn command() -> Command {
    Command::new("tool_pool_join")
        .about("Join a pool with the initial tokens described in a pool definition file")
        .arg(
            Arg::new("pool_config")
                .value_name("POOL_CONFIG")
                .help("Pool definition file (JSON, comments allowed)")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("deployment")
                .short('d')
                .long("deployment")
                .value_name("NAME")
                .help("Deployment to join (defaults to the first known deployment)"),
        )
        .arg(
            Arg::new("network")
                .short('n')
                .long("network")
                .value_name("NETWORK")
                .help("Network name, overriding the pool file and the deployment"),
        )
        .arg(
            Arg::new("settings")
                .long("settings")
                .value_name("PATH")
                .help("Tool settings file (TOML)")
                .value_parser(value_parser!(PathBuf)),
        )
        .args(logging_args())
}

/// Parse `argv` (program name first). Any clap failure becomes `PoolToolError::Usage`.
pub fn parse_args<I, T>(args: I) -> Result<JoinArgs, PoolToolError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command()
        .try_get_matches_from(args)
        .map_err(|e| PoolToolError::usage(e.render().to_string()))?;

    let config_path = matches
        .get_one::<PathBuf>("pool_config")
        .cloned()
        .ok_or_else(|| PoolToolError::usage(command().render_usage().to_string()))?;

    Ok(JoinArgs {
        config_path,
        deployment: matches.get_one::<String>("deployment").cloned(),
        network: matches.get_one::<String>("network").cloned(),
        settings: matches.get_one::<PathBuf>("settings").cloned(),
    })
}

/// The delegated call itself, with gateway failures wrapped as `DelegatedCall`
pub async fn join_pool<P: PoolProtocol + ?Sized>(
    protocol: &P,
    pool: &PoolConfig,
    deployment: &Deployment,
    network: &str,
) -> Result<JoinReceipt, PoolToolError> {
    let gas_price_override = pool.gas_price_override();
    logger::info(
        LogTag::Join,
        &format!(
            "Joining pool {} on {} (gas price override: {})",
            deployment.pool_id, network, gas_price_override
        ),
    );

    let receipt = protocol
        .join_pool_initial_tokens(network, pool, &deployment.pool_id, gas_price_override)
        .await?;
    Ok(receipt)
}

/// Full join flow; writes the outcome to `out`
pub async fn run_join<P, W>(
    protocol: &P,
    args: &JoinArgs,
    ctx: &ToolContext,
    out: &mut W,
) -> Result<(), PoolToolError>
where
    P: PoolProtocol + ?Sized,
    W: Write,
{
    let pool = PoolConfig::load(&args.config_path)?;
    let deployment = ctx.deployment(args.deployment.as_deref())?;
    let network = resolve_network(
        &[
            args.network.as_deref(),
            pool.network(),
            deployment.network.as_deref(),
        ],
        &ctx.settings.network.default_network,
    );

    logger::debug(
        LogTag::Join,
        &format!(
            "Deployment '{}' selected for {} (network {})",
            deployment.name,
            pool.path().display(),
            network
        ),
    );

    match join_pool(protocol, &pool, deployment, &network).await {
        Ok(receipt) => {
            logger::info(
                LogTag::Join,
                &format!("Join transaction submitted: {}", receipt.tx_hash),
            );
            writeln!(out, "Joined pool {} on {}", deployment.pool_id, network)?;
            writeln!(out, "Transaction: {}", receipt.tx_hash)?;
            if let Some(url) = &receipt.explorer_url {
                writeln!(out, "Explorer: {}", url)?;
            }
        }
        Err(e) => {
            logger::error(LogTag::Join, &format!("Join failed: {}", e));
            if let PoolToolError::DelegatedCall(gateway_err) = &e {
                if gateway_err.is_recoverable() {
                    logger::warning(
                        LogTag::Join,
                        "The gateway could not be reached or was busy; the join can be run again",
                    );
                } else if gateway_err.is_rejection() {
                    logger::debug(LogTag::Join, "The protocol rejected the join request");
                }
            }
            writeln!(out, "Joining pool {} failed: {}", deployment.pool_id, e)?;
            writeln!(out, "{}", OWNER_HINT)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GatewayError;
    use crate::invoker::testing::{test_context, RecordedCall, RecordingProtocol};

    fn write_pool(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn args_for(path: &std::path::Path) -> JoinArgs {
        JoinArgs {
            config_path: path.to_path_buf(),
            deployment: None,
            network: None,
            settings: None,
        }
    }

    fn joined_override(protocol: &RecordingProtocol) -> f64 {
        match protocol.calls().as_slice() {
            [RecordedCall::Join {
                gas_price_override, ..
            }] => *gas_price_override,
            other => panic!("expected a single join call, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_arguments_is_usage_error() {
        let err = parse_args(["tool_pool_join"]).unwrap_err();
        assert!(matches!(err, PoolToolError::Usage { .. }));
        assert!(err.to_string().contains("POOL_CONFIG"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_parse_args() {
        let args = parse_args([
            "tool_pool_join",
            "pools/50-50.json",
            "--deployment",
            "kovan-weighted-80-20",
            "--debug-join",
        ])
        .unwrap();
        assert_eq!(args.config_path, PathBuf::from("pools/50-50.json"));
        assert_eq!(args.deployment.as_deref(), Some("kovan-weighted-80-20"));
        assert_eq!(args.network, None);
        assert_eq!(args.settings, None);
    }

    #[test]
    fn test_parse_args_accepts_logger_flags() {
        let args = parse_args([
            "tool_pool_join",
            "pool.json",
            "--verbose-gateway",
            "--log-level=debug",
            "--quiet",
        ])
        .unwrap();
        assert_eq!(args.config_path, PathBuf::from("pool.json"));

        let err = parse_args(["tool_pool_join", "pool.json", "--verbose-nothing"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_missing_path_makes_no_delegated_call() {
        let dir = tempfile::tempdir().unwrap();
        let protocol = RecordingProtocol::new();
        let mut out = Vec::<u8>::new();

        let err = run_join(
            &protocol,
            &args_for(&dir.path().join("absent.json")),
            &test_context(),
            &mut out,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, PoolToolError::ConfigNotFound { .. }));
        assert!(err.to_string().contains("does not exist"));
        assert!(protocol.calls().is_empty());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_empty_override_passes_sentinel() {
        let file = write_pool(r#"{ "gasPriceOverride": "" }"#);
        let protocol = RecordingProtocol::new();
        let mut out = Vec::<u8>::new();

        run_join(&protocol, &args_for(file.path()), &test_context(), &mut out)
            .await
            .unwrap();

        assert_eq!(joined_override(&protocol), -1.0);
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Transaction: 0xjoin"));
    }

    #[tokio::test]
    async fn test_numeric_override_is_passed_through() {
        let file = write_pool("/* pool */ { \"gasPriceOverride\": \"42.5\" }");
        let protocol = RecordingProtocol::new();
        let mut out = Vec::<u8>::new();

        run_join(&protocol, &args_for(file.path()), &test_context(), &mut out)
            .await
            .unwrap();

        assert_eq!(joined_override(&protocol), 42.5);
    }

    #[tokio::test]
    async fn test_delegated_failure_is_reported_and_swallowed() {
        let file = write_pool(r#"{ "gasPriceOverride": "" }"#);
        let protocol = RecordingProtocol::failing(GatewayError::Status {
            status: 400,
            message: "BAL#401 SENDER_NOT_ALLOWED".to_string(),
        });
        let mut out = Vec::<u8>::new();

        let result = run_join(&protocol, &args_for(file.path()), &test_context(), &mut out).await;

        assert!(result.is_ok());
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("BAL#401 SENDER_NOT_ALLOWED"));
        assert!(printed.contains(OWNER_HINT));
        assert_eq!(protocol.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_network_precedence() {
        let file = write_pool(r#"{ "gasPriceOverride": "", "network": "goerli" }"#);
        let ctx = test_context();

        let protocol = RecordingProtocol::new();
        run_join(&protocol, &args_for(file.path()), &ctx, &mut Vec::<u8>::new())
            .await
            .unwrap();
        assert!(matches!(
            &protocol.calls()[0],
            RecordedCall::Join { network, .. } if network == "goerli"
        ));

        let protocol = RecordingProtocol::new();
        let mut args = args_for(file.path());
        args.network = Some("sepolia".to_string());
        run_join(&protocol, &args, &ctx, &mut Vec::<u8>::new()).await.unwrap();
        assert!(matches!(
            &protocol.calls()[0],
            RecordedCall::Join { network, .. } if network == "sepolia"
        ));
    }

    #[tokio::test]
    async fn test_selected_deployment_pool_id_is_used() {
        let file = write_pool(r#"{ "gasPriceOverride": "1" }"#);
        let protocol = RecordingProtocol::new();
        let mut args = args_for(file.path());
        args.deployment = Some("kovan-weighted-80-20".to_string());

        run_join(&protocol, &args, &test_context(), &mut Vec::<u8>::new())
            .await
            .unwrap();

        assert!(matches!(
            &protocol.calls()[0],
            RecordedCall::Join { pool_id, .. }
                if pool_id == "0xbadba5a33d10da850bcf4d47c39ae0e727dc2e8800020000000000000000001b"
        ));
    }

    #[tokio::test]
    async fn test_unknown_deployment_makes_no_call() {
        let file = write_pool(r#"{ "gasPriceOverride": "" }"#);
        let protocol = RecordingProtocol::new();
        let mut args = args_for(file.path());
        args.deployment = Some("nope".to_string());

        let err = run_join(&protocol, &args, &test_context(), &mut Vec::<u8>::new())
            .await
            .unwrap_err();
        assert!(matches!(err, PoolToolError::UnknownDeployment { .. }));
        assert!(protocol.calls().is_empty());
    }
}
