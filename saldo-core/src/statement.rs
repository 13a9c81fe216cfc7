use serde::{Deserialize, Serialize};

/// Event kind carrying a ledger entry; the only kind that changes state.
pub const STATEMENT_ITEM_KIND: &str = "StatementItem";

/// A completed or pending ledger entry as delivered by the provider.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub time: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub mcc: i32,
    #[serde(default)]
    pub original_mcc: i32,
    #[serde(default)]
    pub hold: bool,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub operation_amount: i64,
    #[serde(default)]
    pub currency_code: u16,
    #[serde(default)]
    pub commission_rate: i64,
    #[serde(default)]
    pub cashback_amount: i64,
    /// Account balance after this entry, in minor units.
    pub balance: i64,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub receipt_id: String,
    #[serde(default)]
    pub invoice_id: String,
    #[serde(default)]
    pub counter_edrpou: String,
    #[serde(default)]
    pub counter_iban: String,
}

/// Payload of a statement event: the affected account id plus the entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementData {
    pub account: String,
    pub statement_item: StatementItem,
}

/// Envelope of an inbound webhook delivery. The kind is kept as an open
/// string so unknown event types pass through without failing the decode.
#[derive(Clone, Debug, Deserialize)]
pub struct WebhookPayload {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// The state transition extracted from a statement notification.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BalanceUpdate {
    pub id: String,
    pub balance: i64,
}

impl From<crate::TrackedBalance> for BalanceUpdate {
    fn from(entry: crate::TrackedBalance) -> Self {
        Self {
            id: entry.id,
            balance: entry.balance,
        }
    }
}

impl WebhookPayload {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Extract the balance update this delivery carries. `Ok(None)` means the
    /// kind is not a statement entry and the delivery is a no-op; an error
    /// means the data does not match the statement schema.
    pub fn into_update(self) -> Result<Option<BalanceUpdate>, serde_json::Error> {
        if self.kind != STATEMENT_ITEM_KIND {
            return Ok(None);
        }
        let data: StatementData = serde_json::from_value(self.data)?;
        Ok(Some(BalanceUpdate {
            id: data.account,
            balance: data.statement_item.balance,
        }))
    }
}
