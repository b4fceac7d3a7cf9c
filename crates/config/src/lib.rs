//! Configuration management for batchcall
//!
//! This crate provides functionality for managing the batchcall configuration,
//! including loading, saving, updating, and deleting configuration settings.

/// Error types for the configuration module
pub mod error;

use crate::error::Error;
use alloy::primitives::Address;
use batchcall_common::{
    constants::{DEFAULT_MULTICALL_ADDRESS, DEFAULT_STATIC_CALL_GAS_REQUIRED},
    ether::address::contract_address,
    utils::{
        env::get_env,
        io::file::{delete_path, read_file, write_file},
    },
};
use clap::Parser;
use serde::{Deserialize, Serialize};
#[allow(deprecated)]
use std::env::home_dir;
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Environment variable overriding the directory holding `config.toml`.
pub const CONFIG_DIR_ENV: &str = "BATCHCALL_HOME";

/// Command line arguments for the configuration command
#[derive(Debug, Clone, Parser)]
#[clap(
    about = "Display and edit the current configuration",
    override_usage = "batchcall config [OPTIONS]"
)]
pub struct ConfigArgs {
    /// The target key to update.
    #[clap(required = false, default_value = "")]
    key: String,

    /// The value to set the key to.
    #[clap(required = false, default_value = "")]
    value: String,
}

/// The [`Configuration`] struct represents the configuration of the CLI. Command line arguments
/// take precedence; any option left unset falls back to this configuration.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Configuration {
    /// The URL for the Ethereum RPC endpoint
    pub rpc_url: String,

    /// The address of the deployed multicall aggregator
    pub multicall_address: String,

    /// The gas allowance forwarded to every sub-call of a batch
    pub gas_limit: u64,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            rpc_url: "".to_string(),
            multicall_address: DEFAULT_MULTICALL_ADDRESS.to_checksum(None),
            gas_limit: DEFAULT_STATIC_CALL_GAS_REQUIRED,
        }
    }
}

/// Returns the path of the configuration file, `$BATCHCALL_HOME/config.toml` if the variable is
/// set and `$HOME/.batchcall/config.toml` otherwise.
#[allow(deprecated)]
pub fn config_path() -> Result<PathBuf, Error> {
    let mut path = match get_env(CONFIG_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => {
            let mut home = home_dir().ok_or_else(|| {
                Error::Generic(
                    "failed to get home directory. does your os support `std::env::home_dir()`?"
                        .to_string(),
                )
            })?;
            home.push(".batchcall");
            home
        }
    };
    path.push("config.toml");

    Ok(path)
}

fn config_path_str() -> Result<String, Error> {
    config_path()?
        .to_str()
        .map(str::to_string)
        .ok_or_else(|| Error::Generic("failed to convert path to string".to_string()))
}

impl Configuration {
    /// Returns the current configuration.
    pub fn load() -> Result<Self, Error> {
        let path = config_path()?;

        // if the config file doesn't exist, create it
        if !path.exists() {
            let config = Configuration::default();
            config.save()?;
        }

        // read the config file
        let contents = read_file(&config_path_str()?)
            .map_err(|e| Error::Generic(format!("failed to read config file: {e}")))?;

        // parse the config file
        let mut config: Configuration = toml::from_str(&contents)
            .map_err(|e| Error::ParseError(format!("failed to parse config file: {e}")))?;

        // load mesc config if enabled
        if !mesc::is_mesc_enabled() {
            return Ok(config);
        }

        if let Some(endpoint) = mesc::get_default_endpoint(Some("batchcall"))? {
            debug!("overriding rpc_url with mesc endpoint");
            config.rpc_url = endpoint.url;
        }

        Ok(config)
    }

    /// Saves the current configuration to disk.
    pub fn save(&self) -> Result<(), Error> {
        write_file(
            &config_path_str()?,
            &toml::to_string(&self)
                .map_err(|e| Error::ParseError(format!("failed to serialize config: {e}")))?,
        )
        .map_err(|e| Error::Generic(format!("failed to write config file: {e}")))?;

        Ok(())
    }

    /// Deletes the configuration file.
    pub fn delete() -> Result<(), Error> {
        if !delete_path(&config_path_str()?) {
            return Err(Error::Generic("failed to delete config file".to_string()));
        }

        Ok(())
    }

    /// Update a single key/value pair in the configuration.
    pub fn update(&mut self, key: &str, value: &str) -> Result<(), Error> {
        // update the key in the struct and ensure it's the correct type
        match key {
            "rpc_url" => {
                self.rpc_url = value.to_string();
            }
            "multicall_address" => {
                let address = contract_address(value).map_err(|e| Error::InvalidValue {
                    key: key.to_string(),
                    reason: e.to_string(),
                })?;
                self.multicall_address = address.to_checksum(None);
            }
            "gas_limit" => {
                self.gas_limit = parse_gas_limit(value).map_err(|reason| Error::InvalidValue {
                    key: key.to_string(),
                    reason,
                })?;
            }
            _ => {
                return Err(Error::Generic(format!(
                    "invalid key: \'{key}\' is not a valid configuration key."
                )))
            }
        }

        // write the updated config to disk
        self.save()?;

        Ok(())
    }

    /// The configured aggregator address, validated.
    pub fn multicall_address(&self) -> Result<Address, Error> {
        contract_address(&self.multicall_address).map_err(|e| Error::InvalidValue {
            key: "multicall_address".to_string(),
            reason: e.to_string(),
        })
    }
}

/// The `config` command is used to display and edit the current configuration.
pub fn config(args: ConfigArgs) -> Result<(), Error> {
    if !args.key.is_empty() {
        if !args.value.is_empty() {
            // read the config file and update the key/value pair
            let mut config = Configuration::load()?;
            config.update(&args.key, &args.value)?;
            info!("updated configuration! Set \'{}\' = \'{}\' .", &args.key, &args.value);
        } else {
            // key is set, but no value is set
            error!("found key but no value to set. Please specify a value to set, use `batchcall config --help` for more information.");
        }
    } else {
        // no key is set, print the config file
        println!("{:#?}", Configuration::load()?);
        info!("use `batchcall config <KEY> <VALUE>` to set a key/value pair.");
    }

    Ok(())
}

/// Parse user input --rpc-url into a full url, resolving MESC endpoint names when MESC is
/// enabled.
pub fn parse_url_arg(url: &str) -> Result<String, String> {
    if mesc::is_mesc_enabled() {
        if let Ok(Some(endpoint)) = mesc::get_endpoint_by_query(url, Some("batchcall")) {
            return Ok(endpoint.url);
        }
    }
    Ok(url.to_string())
}

/// Parse user input --gas-limit, accepting `_` separators (e.g. `1_000_000`). Zero is rejected,
/// since it would fail every sub-call. Values above `i64::MAX` cannot be written to the TOML
/// config file and are rejected as well.
pub fn parse_gas_limit(value: &str) -> Result<u64, String> {
    let gas_limit = value
        .replace('_', "")
        .parse::<u64>()
        .map_err(|e| format!("'{value}' is not a valid gas limit: {e}"))?;

    if gas_limit == 0 {
        return Err("gas limit must be greater than zero".to_string());
    }
    if gas_limit > i64::MAX as u64 {
        return Err(format!("gas limit must be at most {}", i64::MAX));
    }

    Ok(gas_limit)
}
