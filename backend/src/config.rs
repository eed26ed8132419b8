//! Environment-driven gateway settings.
//!
//! Centralises parsing of the deployment variables so they are validated in
//! one place and can be exercised with `MockEnv` in tests. Debug builds
//! tolerate missing chain settings and fall back to an in-memory chain; release
//! builds refuse to start without them.

use std::path::Path;
use std::time::Duration;

use mockable::Env;
use tracing::warn;
use url::Url;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::{AccountAddress, AccountAddressError};

const PORT_ENV: &str = "PORT";
const CONTRACT_ADDRESS_ENV: &str = "CONTRACT_ADDRESS";
const ACCOUNT_PRIVATE_KEY_ENV: &str = "ACCOUNT_PRIVATE_KEY";
const TOKEN_SECRET_ENV: &str = "USR_PASSPHRASE";
const NETWORK_ENV: &str = "APTOS_NETWORK";
const NODE_URL_ENV: &str = "APTOS_NODE_URL";
const TOKEN_TTL_ENV: &str = "SESSION_TOKEN_TTL_SECS";

const DEFAULT_PORT: u16 = 8080;
const PORT_EXPECTED: &str = "a TCP port number";
const NETWORK_EXPECTED: &str = "mainnet|testnet|devnet|local";
const URL_EXPECTED: &str = "an absolute http(s) URL";
const TTL_EXPECTED: &str = "a positive number of seconds";

/// Build mode for settings validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate missing chain settings and emit warnings.
    Debug,
    /// Release builds require every chain setting.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipe_gateway::config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Public Aptos networks the gateway knows node URLs for.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum AptosNetwork {
    Mainnet,
    #[default]
    Testnet,
    Devnet,
    /// A node running on this host, e.g. `aptos node run-local-testnet`.
    Local,
}

impl AptosNetwork {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Some(Self::Mainnet),
            "testnet" => Some(Self::Testnet),
            "devnet" => Some(Self::Devnet),
            "local" | "localnet" => Some(Self::Local),
            _ => None,
        }
    }

    /// REST endpoint of the network's public fullnode.
    pub fn node_url(self) -> &'static str {
        match self {
            Self::Mainnet => "https://api.mainnet.aptoslabs.com/v1",
            Self::Testnet => "https://api.testnet.aptoslabs.com/v1",
            Self::Devnet => "https://api.devnet.aptoslabs.com/v1",
            Self::Local => "http://127.0.0.1:8080/v1",
        }
    }
}

/// Settings for talking to a real Aptos node.
pub struct AptosSettings {
    /// Address the `recipes` module is published under.
    pub contract: AccountAddress,
    /// Hex-encoded Ed25519 private key of the gateway account.
    pub private_key: Zeroizing<String>,
    /// Node REST base URL, including the `/v1` path.
    pub node_url: Url,
}

/// Which chain client the gateway wires at start-up.
pub enum ChainSettings {
    /// Sign and submit against an Aptos node.
    Aptos(AptosSettings),
    /// In-memory fixture; only produced in debug builds.
    Fixture { contract: AccountAddress },
}

/// Gateway settings derived from the process environment.
pub struct GatewaySettings {
    /// Port to listen on, bound on all interfaces.
    pub port: u16,
    /// Chain client selection.
    pub chain: ChainSettings,
    /// HMAC secret for session tokens.
    pub token_secret: Zeroizing<Vec<u8>>,
    /// Lifetime of issued tokens; `None` issues tokens without expiry.
    pub token_ttl: Option<Duration>,
}

/// Errors raised while validating gateway settings.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// `CONTRACT_ADDRESS` is not a valid account address.
    #[error("invalid CONTRACT_ADDRESS: {source}")]
    InvalidContract {
        #[source]
        source: AccountAddressError,
    },
}

/// Load `KEY=value` pairs from `path` into the process environment.
///
/// Variables already present in the environment are left untouched. Returns
/// `Ok(false)` when the file does not exist.
///
/// # Errors
/// Returns [`dotenvy::Error`] when the file exists but cannot be read or
/// parsed.
pub fn load_env_file(path: &Path) -> Result<bool, dotenvy::Error> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(err) if err.not_found() => Ok(false),
        Err(err) => Err(err),
    }
}

/// Build gateway settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use recipe_gateway::config::{BuildMode, ChainSettings, gateway_settings_from_env};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "CONTRACT_ADDRESS" => Some("0xcafe".to_string()),
///     "ACCOUNT_PRIVATE_KEY" => Some(format!("0x{}", "01".repeat(32))),
///     "USR_PASSPHRASE" => Some("secret".to_string()),
///     _ => None,
/// });
///
/// let settings = gateway_settings_from_env(&env, BuildMode::Release)?;
/// assert_eq!(settings.port, 8080);
/// assert!(matches!(settings.chain, ChainSettings::Aptos(_)));
/// # Ok(())
/// # }
/// ```
pub fn gateway_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<GatewaySettings, ConfigError> {
    let port = port_from_env(env)?;
    let chain = chain_from_env(env, mode)?;
    let token_secret = token_secret_from_env(env, mode)?;
    let token_ttl = token_ttl_from_env(env)?;

    Ok(GatewaySettings {
        port,
        chain,
        token_secret,
        token_ttl,
    })
}

fn non_blank<E: Env>(env: &E, name: &str) -> Option<String> {
    env.string(name).filter(|value| !value.trim().is_empty())
}

fn port_from_env<E: Env>(env: &E) -> Result<u16, ConfigError> {
    match non_blank(env, PORT_ENV) {
        Some(value) => value
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidEnv {
                name: PORT_ENV,
                value,
                expected: PORT_EXPECTED,
            }),
        None => Ok(DEFAULT_PORT),
    }
}

fn contract_from_env<E: Env>(env: &E) -> Result<Option<AccountAddress>, ConfigError> {
    non_blank(env, CONTRACT_ADDRESS_ENV)
        .map(|raw| {
            AccountAddress::parse(&raw).map_err(|source| ConfigError::InvalidContract { source })
        })
        .transpose()
}

fn chain_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<ChainSettings, ConfigError> {
    let contract = contract_from_env(env)?;
    let private_key = non_blank(env, ACCOUNT_PRIVATE_KEY_ENV).map(Zeroizing::new);

    match (contract, private_key) {
        (Some(contract), Some(private_key)) => Ok(ChainSettings::Aptos(AptosSettings {
            contract,
            private_key,
            node_url: node_url_from_env(env)?,
        })),
        (contract, private_key) if mode.is_debug() => {
            warn!(
                contract_set = contract.is_some(),
                private_key_set = private_key.is_some(),
                "chain settings incomplete; using in-memory fixture chain (dev only)"
            );
            Ok(ChainSettings::Fixture {
                contract: contract.unwrap_or_else(|| AccountAddress::from_bytes([0; 32])),
            })
        }
        (None, _) => Err(ConfigError::MissingEnv {
            name: CONTRACT_ADDRESS_ENV,
        }),
        (Some(_), None) => Err(ConfigError::MissingEnv {
            name: ACCOUNT_PRIVATE_KEY_ENV,
        }),
    }
}

fn node_url_from_env<E: Env>(env: &E) -> Result<Url, ConfigError> {
    let raw = match non_blank(env, NODE_URL_ENV) {
        Some(explicit) => explicit,
        None => network_from_env(env)?.node_url().to_owned(),
    };
    match Url::parse(raw.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
        _ => Err(ConfigError::InvalidEnv {
            name: NODE_URL_ENV,
            value: raw,
            expected: URL_EXPECTED,
        }),
    }
}

fn network_from_env<E: Env>(env: &E) -> Result<AptosNetwork, ConfigError> {
    match non_blank(env, NETWORK_ENV) {
        Some(value) => AptosNetwork::parse(&value).ok_or(ConfigError::InvalidEnv {
            name: NETWORK_ENV,
            value,
            expected: NETWORK_EXPECTED,
        }),
        None => Ok(AptosNetwork::default()),
    }
}

fn token_secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<Zeroizing<Vec<u8>>, ConfigError> {
    if let Some(secret) = non_blank(env, TOKEN_SECRET_ENV) {
        return Ok(Zeroizing::new(secret.into_bytes()));
    }
    if mode.is_debug() {
        warn!("USR_PASSPHRASE not set; using temporary token secret (dev only)");
        let mut secret = Vec::with_capacity(32);
        secret.extend_from_slice(Uuid::new_v4().as_bytes());
        secret.extend_from_slice(Uuid::new_v4().as_bytes());
        Ok(Zeroizing::new(secret))
    } else {
        Err(ConfigError::MissingEnv {
            name: TOKEN_SECRET_ENV,
        })
    }
}

fn token_ttl_from_env<E: Env>(env: &E) -> Result<Option<Duration>, ConfigError> {
    let Some(value) = non_blank(env, TOKEN_TTL_ENV) else {
        return Ok(None);
    };
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Some(Duration::from_secs(secs))),
        _ => Err(ConfigError::InvalidEnv {
            name: TOKEN_TTL_ENV,
            value,
            expected: TTL_EXPECTED,
        }),
    }
}
