//! Core domain types and tracking rules for the Saldo balance tracker.

mod balance;
mod profile;
mod statement;

pub use balance::{eligible_balances, TrackedBalance, TARGET_CURRENCY};
pub use profile::{Account, AccountType, ClientInfo, Jar};
pub use statement::{
    BalanceUpdate, StatementData, StatementItem, WebhookPayload, STATEMENT_ITEM_KIND,
};
