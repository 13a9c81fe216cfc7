//! Monobank personal API connector used by the Saldo runtime.

mod client;
mod error;

pub use client::MonobankClient;
pub use error::{ProviderError, ProviderResult};
