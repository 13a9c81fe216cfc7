use serde::{Deserialize, Serialize};
use std::fmt;

/// Product tier of a bank account as reported by the provider.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountType {
    Black,
    White,
    Platinum,
    Iron,
    Fop,
    Yellow,
    EAid,
    /// Tier introduced after this release; never tracked.
    #[serde(other)]
    Other,
}

impl AccountType {
    pub fn as_str(self) -> &'static str {
        match self {
            AccountType::Black => "black",
            AccountType::White => "white",
            AccountType::Platinum => "platinum",
            AccountType::Iron => "iron",
            AccountType::Fop => "fop",
            AccountType::Yellow => "yellow",
            AccountType::EAid => "eAid",
            AccountType::Other => "other",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A card account belonging to the client.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    #[serde(default)]
    pub send_id: String,
    pub balance: i64,
    #[serde(default)]
    pub credit_limit: i64,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub currency_code: u16,
    #[serde(default)]
    pub cashback_type: String,
    #[serde(default)]
    pub masked_pan: Vec<String>,
    #[serde(default)]
    pub iban: String,
}

/// A goal-based savings jar. Jars carry their own balance and are tracked
/// regardless of currency.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Jar {
    pub id: String,
    #[serde(default)]
    pub send_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub balance: i64,
    pub currency_code: u16,
    #[serde(default)]
    pub goal: i64,
}

/// Full client profile returned by `GET /personal/client-info`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub web_hook_url: String,
    #[serde(default)]
    pub permissions: String,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub jars: Vec<Jar>,
}
