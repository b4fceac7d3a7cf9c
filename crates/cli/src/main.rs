//! The `batchcall` command line interface.

pub(crate) mod decimals;
pub(crate) mod error;
pub(crate) mod log_args;
pub(crate) mod output;

use batchcall_common::{constants::CHAIN_ID_POLYGON, ether::provider::MultiTransportProvider};
use batchcall_config::{config, ConfigArgs, Configuration};
use batchcall_multicall::{multicall, MulticallArgs};
use clap::{Parser, Subcommand};
use decimals::DecimalsArgs;
use error::Error;
use log_args::LogArgs;
use output::{render, OutputFormat};
use tracing::{debug, warn};

#[derive(Debug, Parser)]
#[clap(name = "batchcall", version)]
pub(crate) struct Arguments {
    #[clap(subcommand)]
    pub sub: Subcommands,

    #[clap(flatten)]
    logs: LogArgs,
}

#[derive(Debug, Subcommand)]
#[clap(
    about = "batchcall calls the same view method on many contracts in a single RPC round trip, through an on-chain multicall aggregator."
)]
#[allow(clippy::large_enum_variant)]
pub(crate) enum Subcommands {
    #[clap(name = "call", about = "Call one method on many contracts in a single multicall")]
    Call(MulticallArgs),

    #[clap(name = "decimals", about = "Fetch the decimals of well-known Polygon tokens")]
    Decimals(DecimalsArgs),

    #[clap(name = "config", about = "Display and edit the current configuration")]
    Config(ConfigArgs),
}

/// Fill options the user left unset from the configuration file. A configured aggregator is only
/// used once it validates.
fn apply_configuration(
    cmd: &mut MulticallArgs,
    configuration: &Configuration,
) -> Result<(), Error> {
    if cmd.rpc_url.is_empty() {
        cmd.rpc_url = configuration.rpc_url.clone();
    }
    if cmd.multicall_address.is_empty() {
        cmd.multicall_address = configuration.multicall_address()?.to_checksum(None);
    }
    if cmd.gas_limit.is_none() {
        cmd.gas_limit = Some(configuration.gas_limit);
    }

    Ok(())
}

/// Run a multicall and print the response.
async fn run(cmd: MulticallArgs, labels: &[String]) -> Result<(), Error> {
    let format = cmd.output.parse::<OutputFormat>()?;
    let method = cmd.method.clone();

    let response = multicall(cmd).await?;
    println!("{}", render(&response, &method, labels, format)?);

    Ok(())
}

/// Warn when the provider is not on Polygon, where the built-in token list lives.
async fn check_polygon(rpc_url: &str) {
    let chain_id = match MultiTransportProvider::connect(rpc_url).await {
        Ok(provider) => provider.get_chainid().await,
        Err(e) => Err(e),
    };

    match chain_id {
        Ok(CHAIN_ID_POLYGON) => {}
        Ok(chain_id) => warn!(
            "provider is on chain {}, but the built-in tokens are deployed on Polygon ({})",
            chain_id, CHAIN_ID_POLYGON
        ),
        Err(e) => debug!("failed to fetch chain id: {}", e),
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // load `.env` before parsing so `RPC_URL` can come from it
    let _ = dotenvy::dotenv();
    let args = Arguments::parse();

    // setup logging
    let _guard = args
        .logs
        .init_tracing()
        .map_err(|e| Error::Generic(format!("failed to initialize tracing: {}", e)))?;
    args.logs.color.apply();

    let configuration = Configuration::load()
        .map_err(|e| Error::Generic(format!("failed to load configuration: {}", e)))?;
    match args.sub {
        Subcommands::Call(mut cmd) => {
            apply_configuration(&mut cmd, &configuration)?;
            run(cmd, &[]).await?;
        }

        Subcommands::Decimals(cmd) => {
            let mut cmd = cmd.into_multicall_args();
            apply_configuration(&mut cmd, &configuration)?;

            check_polygon(&cmd.rpc_url).await;
            run(cmd, &DecimalsArgs::labels()).await?;
        }

        Subcommands::Config(cmd) => {
            config(cmd)?;
        }
    }

    Ok(())
}
