use std::{env, path::PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum LedgerBackend {
    File(PathBuf),
    Remote { base_url: String, auth: Option<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuSource {
    pub sheet_id: String,
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub ledger: LedgerBackend,
    pub menu: Option<MenuSource>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                warn!("invalid PORT {raw:?}, using 8080");
                8080
            }),
            None => 8080,
        };

        let ledger = match var("LEDGER_URL") {
            Some(base_url) => LedgerBackend::Remote {
                base_url,
                auth: var("LEDGER_AUTH"),
            },
            None => LedgerBackend::File(resolve_data_path(var("APP_DATA_PATH"))),
        };

        let menu = match (var("MENU_SHEET_ID"), var("MENU_API_KEY")) {
            (Some(sheet_id), Some(api_key)) => Some(MenuSource { sheet_id, api_key }),
            (None, None) => None,
            _ => {
                warn!("MENU_SHEET_ID and MENU_API_KEY must both be set, using bundled catalog");
                None
            }
        };

        Self { port, ledger, menu }
    }

    pub fn log_summary(&self) {
        match &self.ledger {
            LedgerBackend::File(path) => info!(path = %path.display(), "ledger backend: file"),
            LedgerBackend::Remote { base_url, auth } => {
                info!(%base_url, authenticated = auth.is_some(), "ledger backend: remote")
            }
        }
        match &self.menu {
            Some(_) => info!("menu source: spreadsheet"),
            None => info!("menu source: bundled catalog"),
        }
    }
}

pub fn resolve_data_path(configured: Option<String>) -> PathBuf {
    configured
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/ledger.json"))
}
