/// Pool verification invoker
///
/// Asks the protocol for the contract verification command of a deployed pool and prints
/// it along with the help link. There is no error handling around the delegated call:
/// whatever the protocol reports is returned to the caller.
use super::{resolve_network, ToolContext};
use crate::arguments::logging_args;
use crate::deployments::Deployment;
use crate::errors::PoolToolError;
use crate::logger::{self, LogTag};
use crate::protocol::PoolProtocol;
use clap::{value_parser, Arg, Command};
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerifyArgs {
    pub deployment: Option<String>,
    pub network: Option<String>,
    pub settings: Option<PathBuf>,
}

/// clap definition for `tool_pool_verify`
pub fn command() -> Command {
    Command::new("tool_pool_verify")
        .about("Print the contract verification command for a deployed pool")
        .arg(
            Arg::new("deployment")
                .short('d')
                .long("deployment")
                .value_name("NAME")
                .help("Deployment to verify (defaults to the first known deployment)"),
        )
        .arg(
            Arg::new("network")
                .short('n')
                .long("network")
                .value_name("NETWORK")
                .help("Network name, overriding the deployment"),
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

pub fn parse_args<I, T>(args: I) -> Result<VerifyArgs, PoolToolError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command()
        .try_get_matches_from(args)
        .map_err(|e| PoolToolError::usage(e.render().to_string()))?;

    Ok(VerifyArgs {
        deployment: matches.get_one::<String>("deployment").cloned(),
        network: matches.get_one::<String>("network").cloned(),
        settings: matches.get_one::<PathBuf>("settings").cloned(),
    })
}

/// Ask the protocol for the verification command, passing the creation hash when known
pub async fn generate_verification_command<P: PoolProtocol + ?Sized>(
    protocol: &P,
    deployment: &Deployment,
    network: &str,
) -> Result<String, PoolToolError> {
    let command = match &deployment.creation_hash {
        Some(hash) => {
            logger::debug(
                LogTag::Verify,
                &format!(
                    "Generating creation arguments for {} (creation tx {})",
                    deployment.pool_id, hash
                ),
            );
            protocol
                .generate_pool_creation_arguments(network, &deployment.pool_id, Some(hash))
                .await?
        }
        None => {
            logger::warning(
                LogTag::Verify,
                &format!(
                    "Deployment '{}' has no creation hash; the protocol will have to look it up",
                    deployment.name
                ),
            );
            protocol
                .generate_pool_creation_arguments(network, &deployment.pool_id, None)
                .await?
        }
    };
    Ok(command)
}

/// Full verify flow; returns the command after writing it to `out`
pub async fn run_verify<P, W>(
    protocol: &P,
    args: &VerifyArgs,
    ctx: &ToolContext,
    out: &mut W,
) -> Result<String, PoolToolError>
where
    P: PoolProtocol + ?Sized,
    W: Write,
{
    let deployment = ctx.deployment(args.deployment.as_deref())?;
    let network = resolve_network(
        &[args.network.as_deref(), deployment.network.as_deref()],
        &ctx.settings.network.default_network,
    );

    let command = generate_verification_command(protocol, deployment, &network).await?;
    logger::info(
        LogTag::Verify,
        &format!("Verification command ready for {}", deployment.name),
    );

    writeln!(out, "Sample command for contract verification:")?;
    writeln!(out, "{}", command)?;
    writeln!(
        out,
        "To verify, follow the instructions at {}",
        ctx.settings.network.help_url
    )?;
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_VERIFY_HELP_URL;
    use crate::deployments::{DeploymentTable, PoolId};
    use crate::errors::GatewayError;
    use crate::invoker::testing::{test_context, RecordedCall, RecordingProtocol};

    #[tokio::test]
    async fn test_output_contains_pool_hash_and_help_url() {
        let ctx = test_context();
        let deployment = ctx.deployments.resolve(None).unwrap().clone();
        let protocol = RecordingProtocol::new();
        let mut out = Vec::<u8>::new();

        run_verify(&protocol, &VerifyArgs::default(), &ctx, &mut out)
            .await
            .unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with("Sample command for contract verification:\n"));
        assert!(printed.contains(deployment.pool_id.as_str()));
        assert!(printed.contains(deployment.creation_hash.unwrap().as_str()));
        assert!(printed.contains(DEFAULT_VERIFY_HELP_URL));
    }

    #[tokio::test]
    async fn test_creation_hash_is_forwarded() {
        let ctx = test_context();
        let protocol = RecordingProtocol::new();
        let args = VerifyArgs {
            deployment: Some("kovan-weighted-80-20".to_string()),
            ..VerifyArgs::default()
        };

        run_verify(&protocol, &args, &ctx, &mut Vec::<u8>::new())
            .await
            .unwrap();

        assert_eq!(
            protocol.calls(),
            vec![RecordedCall::CreationArguments {
                network: "kovan".to_string(),
                pool_id: "0xbadba5a33d10da850bcf4d47c39ae0e727dc2e8800020000000000000000001b"
                    .to_string(),
                creation_hash: Some(
                    "0x30f9f2d7cfdf2fc8dc36da81a359e3f58ee5466de7a858615e5a3bd86d2d2cc0"
                        .to_string()
                ),
            }]
        );
    }

    #[tokio::test]
    async fn test_delegated_error_propagates() {
        let protocol = RecordingProtocol::failing(GatewayError::Timeout { seconds: 120 });
        let mut out = Vec::<u8>::new();

        let err = run_verify(&protocol, &VerifyArgs::default(), &test_context(), &mut out)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PoolToolError::DelegatedCall(GatewayError::Timeout { seconds: 120 })
        ));
        assert_ne!(err.exit_code(), 0);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_deployment_without_hash() {
        let mut ctx = test_context();
        ctx.deployments = DeploymentTable::from_entries(vec![Deployment {
            name: "local".to_string(),
            network: None,
            pool_id: PoolId::new("0x02"),
            creation_hash: None,
        }]);
        ctx.settings.network.default_network = "localhost".to_string();
        let protocol = RecordingProtocol::new();

        let command = run_verify(&protocol, &VerifyArgs::default(), &ctx, &mut Vec::<u8>::new())
            .await
            .unwrap();

        assert_eq!(
            command,
            "yarn hardhat verify-contract --network localhost --pool-id 0x02"
        );
        assert!(matches!(
            &protocol.calls()[0],
            RecordedCall::CreationArguments { creation_hash: None, .. }
        ));
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_args(["tool_pool_verify"]).unwrap(), VerifyArgs::default());

        let args = parse_args(["tool_pool_verify", "-n", "goerli", "--settings", "s.toml"]).unwrap();
        assert_eq!(args.network.as_deref(), Some("goerli"));
        assert_eq!(args.settings, Some(PathBuf::from("s.toml")));

        let args = parse_args(["tool_pool_verify", "--verbose-verify", "--log-level", "verbose"])
            .unwrap();
        assert_eq!(args, VerifyArgs::default());

        let err = parse_args(["tool_pool_verify", "extra"]).unwrap_err();
        assert!(matches!(err, PoolToolError::Usage { .. }));
    }
}
