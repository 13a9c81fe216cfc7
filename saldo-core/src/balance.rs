use serde::{Deserialize, Serialize};

use crate::profile::{AccountType, ClientInfo};

/// ISO-4217 numeric code of the tracked currency (UAH).
pub const TARGET_CURRENCY: u16 = 980;

/// One tracked entity: a card account or a jar, reduced to the fields the
/// registry cares about. Accounts and jars share the id namespace.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TrackedBalance {
    pub id: String,
    /// Last known balance in minor currency units.
    pub balance: i64,
}

impl TrackedBalance {
    pub fn new(id: impl Into<String>, balance: i64) -> Self {
        Self {
            id: id.into(),
            balance,
        }
    }
}

/// Reduce a client profile to the entities that are tracked: accounts on the
/// unrestricted tier denominated in the target currency, and every jar.
pub fn eligible_balances(info: &ClientInfo) -> Vec<TrackedBalance> {
    let mut tracked = Vec::with_capacity(info.accounts.len() + info.jars.len());
    for account in &info.accounts {
        if account.account_type == AccountType::White && account.currency_code == TARGET_CURRENCY {
            tracked.push(TrackedBalance::new(account.id.clone(), account.balance));
        }
    }
    for jar in &info.jars {
        tracked.push(TrackedBalance::new(jar.id.clone(), jar.balance));
    }
    tracked
}
