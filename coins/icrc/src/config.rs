//! Balance query configuration, read once from the environment at startup.

use candid::Principal;
use icrc_error::{IcrcError, Result};
use icrc_provider::{presets, ProviderConfig};

/// Every setting is read from `ICRC_<NAME>`.
pub const ENV_PREFIX: &str = "ICRC_";

/// Ledgers shown when `ICRC_TOKENS` is not set.
pub const DEFAULT_TOKENS: [&str; 4] = ["ICP", "CHAT", "SNS1", "CKBTC"];

/// Scale of the default ledgers.
pub const DEFAULT_DECIMALS: u8 = 8;

/// Fractional digits kept when rendering balances.
pub const DEFAULT_MAX_DECIMALS: u32 = 5;

/// One ledger to query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenConfig {
    pub symbol: String,
    /// Ledger canister; `None` falls back to the anonymous principal
    pub ledger_id: Option<Principal>,
    /// Known scale; `None` asks the ledger for `icrc1_decimals` and shows
    /// the ledger's own `icrc1_symbol`
    pub decimals: Option<u8>,
}

impl TokenConfig {
    pub fn new(symbol: impl Into<String>, ledger_id: Option<Principal>) -> Self {
        Self {
            symbol: symbol.into(),
            ledger_id,
            decimals: None,
        }
    }

    pub fn with_decimals(mut self, decimals: u8) -> Self {
        self.decimals = Some(decimals);
        self
    }
}

#[derive(Debug, Clone)]
pub struct BalanceConfig {
    pub provider: ProviderConfig,
    /// Account whose balances are shown
    pub owner: Principal,
    /// Stand-in ledger id for tokens without one
    pub anonymous_principal: Principal,
    pub tokens: Vec<TokenConfig>,
    /// Optional counter canister queried alongside the ledgers
    pub backend: Option<Principal>,
    pub max_decimals: Option<u32>,
    pub certified: bool,
}

impl BalanceConfig {
    /// Defaults for `owner`: local replica, the four default tokens without
    /// ledger ids, five display decimals, uncertified queries.
    pub fn new(owner: Principal) -> Self {
        Self {
            provider: presets::local(),
            owner,
            anonymous_principal: Principal::anonymous(),
            tokens: DEFAULT_TOKENS
                .iter()
                .map(|symbol| TokenConfig::new(*symbol, None).with_decimals(DEFAULT_DECIMALS))
                .collect(),
            backend: None,
            max_decimals: Some(DEFAULT_MAX_DECIMALS),
            certified: false,
        }
    }

    pub fn with_provider(mut self, provider: ProviderConfig) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_tokens(mut self, tokens: Vec<TokenConfig>) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn with_max_decimals(mut self, max_decimals: Option<u32>) -> Self {
        self.max_decimals = max_decimals;
        self
    }

    pub fn with_certified(mut self, certified: bool) -> Self {
        self.certified = certified;
        self
    }

    /// Ledger canister to query for `token`
    pub fn ledger_id(&self, token: &TokenConfig) -> Principal {
        token.ledger_id.unwrap_or(self.anonymous_principal)
    }

    /// Reads the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from `lookup`, which maps full variable
    /// names (`ICRC_AGENT_HOST`, ...) to values. Blank values count as unset.
    ///
    /// | Variable | Meaning |
    /// |---|---|
    /// | `WALLET_PRINCIPAL_ID` | owner, required |
    /// | `AGENT_HOST` | network host |
    /// | `FETCH_ROOT_KEY` | override root key fetching |
    /// | `ANONYMOUS_PRINCIPAL` | fallback ledger id |
    /// | `TOKENS` | comma separated symbols |
    /// | `<SYMBOL>_LEDGER_CANISTER_ID` | ledger per symbol |
    /// | `<SYMBOL>_DECIMALS` | scale per symbol |
    /// | `BACKEND_CANISTER_ID` | counter canister |
    /// | `MAX_DECIMALS` | display precision, `none` keeps every digit |
    /// | `CERTIFIED` | use certified calls |
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(&format!("{ENV_PREFIX}{name}"))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let owner_var = "WALLET_PRINCIPAL_ID";
        let owner = get(owner_var)
            .ok_or_else(|| IcrcError::MissingConfig(format!("{ENV_PREFIX}{owner_var}")))?;
        let mut config = Self::new(parse_principal(&owner)?);

        if let Some(host) = get("AGENT_HOST") {
            config.provider = ProviderConfig::new(host);
        }
        if let Some(fetch) = get("FETCH_ROOT_KEY") {
            config.provider.fetch_root_key = parse_bool("FETCH_ROOT_KEY", &fetch)?;
        }
        config.provider.validate()?;

        if let Some(anonymous) = get("ANONYMOUS_PRINCIPAL") {
            config.anonymous_principal = parse_principal(&anonymous)?;
        }

        let symbols: Vec<String> = match get("TOKENS") {
            Some(list) => list
                .split(',')
                .map(|s| s.trim().to_ascii_uppercase())
                .filter(|s| !s.is_empty())
                .collect(),
            None => DEFAULT_TOKENS.iter().map(|s| s.to_string()).collect(),
        };

        config.tokens = symbols
            .into_iter()
            .map(|symbol| -> Result<TokenConfig> {
                let ledger_id = get(&format!("{symbol}_LEDGER_CANISTER_ID"))
                    .map(|id| parse_principal(&id))
                    .transpose()?;
                let decimals = match get(&format!("{symbol}_DECIMALS")) {
                    Some(d) => Some(d.parse::<u8>()?),
                    None if DEFAULT_TOKENS.contains(&symbol.as_str()) => Some(DEFAULT_DECIMALS),
                    None => None,
                };
                Ok(TokenConfig {
                    symbol,
                    ledger_id,
                    decimals,
                })
            })
            .collect::<Result<_>>()?;

        if let Some(backend) = get("BACKEND_CANISTER_ID") {
            config.backend = Some(parse_principal(&backend)?);
        }
        if let Some(max) = get("MAX_DECIMALS") {
            config.max_decimals = if max.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(max.parse()?)
            };
        }
        if let Some(certified) = get("CERTIFIED") {
            config.certified = parse_bool("CERTIFIED", &certified)?;
        }

        Ok(config)
    }
}

pub fn parse_principal(text: &str) -> Result<Principal> {
    Principal::from_text(text).map_err(|e| IcrcError::InvalidPrincipal {
        text: text.to_string(),
        reason: e.to_string(),
    })
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(IcrcError::ConfigError(format!(
            "{ENV_PREFIX}{name}: expected a boolean, got '{value}'"
        ))),
    }
}
