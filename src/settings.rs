//! Process-wide configuration, built once at start-up and passed down.
//!
//! Values come from an optional `faktura.{toml,yaml,json}` file and the
//! environment (a `.env` file is honoured):
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `AUTOMATION_SECRET` | shared secret for automation intake; unset disables intake |
//! | `WEBHOOK_SECRET` | HMAC key for completion webhooks; unset blocks delivery |
//! | `WEBHOOK_ALLOWED_DOMAINS` | comma-separated webhook host allowlist |
//! | `ISSUE_PLACE` | issue place of automation invoices |
//! | `DEFAULT_SELLER_NAME`, `DEFAULT_SELLER_NIP`, `DEFAULT_SELLER_ADDRESS_1`, `DEFAULT_SELLER_ADDRESS_2`, `DEFAULT_SELLER_PHONE`, `DEFAULT_SELLER_BANK`, `DEFAULT_SELLER_BANK_ADDRESS`, `DEFAULT_SELLER_IBAN` | seller used when a request has none |

use config::{Config, Environment, File};
use secrecy::Secret;
use serde::Deserialize;
use thiserror::Error;

use crate::core::Party;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Expected value of the `X-Automation-Secret` header.
    #[serde(default)]
    pub automation_secret: Option<Secret<String>>,
    /// Key for `X-Webhook-Signature`.
    #[serde(default)]
    pub webhook_secret: Option<Secret<String>>,
    /// Comma-separated host allowlist for webhook URLs.
    #[serde(default)]
    webhook_allowed_domains: Option<String>,
    #[serde(default = "default_issue_place")]
    pub issue_place: String,
    #[serde(flatten)]
    pub default_seller: SellerDefaults,
}

/// Seller identity applied to automation invoices lacking one.
#[derive(Debug, Clone, Deserialize)]
pub struct SellerDefaults {
    #[serde(rename = "default_seller_name", default = "default_seller_name")]
    pub name: String,
    #[serde(rename = "default_seller_nip", default = "default_seller_nip")]
    pub tax_id: String,
    #[serde(rename = "default_seller_address_1", default = "default_seller_address_1")]
    pub address_line_1: String,
    #[serde(rename = "default_seller_address_2", default = "default_seller_address_2")]
    pub address_line_2: String,
    #[serde(rename = "default_seller_phone", default = "default_seller_phone")]
    pub phone: String,
    #[serde(rename = "default_seller_bank", default = "default_seller_bank")]
    pub bank_name: String,
    #[serde(
        rename = "default_seller_bank_address",
        default = "default_seller_bank_address"
    )]
    pub bank_branch_address: String,
    #[serde(rename = "default_seller_iban", default = "default_seller_iban")]
    pub iban: String,
}

fn default_issue_place() -> String {
    "Warszawa".to_string()
}

fn default_seller_name() -> String {
    "Nazwa firmy".to_string()
}

fn default_seller_nip() -> String {
    "000-000-00-00".to_string()
}

fn default_seller_address_1() -> String {
    "Adres firmy".to_string()
}

fn default_seller_address_2() -> String {
    "Kod, Miasto".to_string()
}

fn default_seller_phone() -> String {
    "+48 000 000 000".to_string()
}

fn default_seller_bank() -> String {
    "Bank".to_string()
}

fn default_seller_bank_address() -> String {
    "Adres banku".to_string()
}

fn default_seller_iban() -> String {
    "PL00 0000 0000 0000 0000 0000 0000".to_string()
}

/// Webhook hosts accepted when no allowlist is configured.
pub const DEFAULT_WEBHOOK_DOMAINS: [&str; 2] = ["localhost", "127.0.0.1"];

impl Settings {
    /// Load from `faktura.*` and the environment.
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name("faktura").required(false))
            .add_source(Environment::default())
            .build()?;

        Self::from_config(config)
    }

    /// Deserialize from an already assembled [`Config`].
    pub fn from_config(config: Config) -> Result<Self, SettingsError> {
        Ok(config.try_deserialize()?)
    }

    /// Webhook host allowlist, trimmed, empty entries dropped.
    pub fn webhook_allowed_domains(&self) -> Vec<String> {
        match &self.webhook_allowed_domains {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_WEBHOOK_DOMAINS.iter().map(|d| d.to_string()).collect(),
        }
    }

    pub fn default_seller(&self) -> Party {
        let seller = &self.default_seller;
        Party {
            name: seller.name.clone(),
            tax_id: seller.tax_id.clone(),
            address_line_1: seller.address_line_1.clone(),
            address_line_2: seller.address_line_2.clone(),
            phone: Some(seller.phone.clone()),
            bank_name: Some(seller.bank_name.clone()),
            bank_branch_address: Some(seller.bank_branch_address.clone()),
            iban: Some(seller.iban.clone()),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            automation_secret: None,
            webhook_secret: None,
            webhook_allowed_domains: None,
            issue_place: default_issue_place(),
            default_seller: SellerDefaults {
                name: default_seller_name(),
                tax_id: default_seller_nip(),
                address_line_1: default_seller_address_1(),
                address_line_2: default_seller_address_2(),
                phone: default_seller_phone(),
                bank_name: default_seller_bank(),
                bank_branch_address: default_seller_bank_address(),
                iban: default_seller_iban(),
            },
        }
    }
}
