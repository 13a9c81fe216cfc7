use std::collections::HashSet;

use saldo_core::{BalanceUpdate, TrackedBalance};

use crate::{RegistryError, RegistryResult};

/// Outcome of applying a balance update to the registry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Applied {
    Updated,
    /// The id is outside the tracked set; nothing changed.
    Ignored,
}

/// The authoritative set of tracked balances. Seeded exactly once; the id
/// set is frozen afterwards and only balances mutate.
#[derive(Debug)]
pub struct Registry {
    entries: Vec<TrackedBalance>,
}

impl Registry {
    /// Build the registry from the filtered snapshot. Two entries sharing an
    /// id indicate a corrupt snapshot and fail the seed.
    pub fn seed(entries: Vec<TrackedBalance>) -> RegistryResult<Self> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.id.as_str()) {
                return Err(RegistryError::DuplicateId(entry.id.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// Overwrite the balance of the matching entry. Updates for untracked
    /// ids are ignored: the provider also notifies about entities that
    /// failed the eligibility filter.
    pub fn apply(&mut self, update: &BalanceUpdate) -> Applied {
        match self.entries.iter_mut().find(|entry| entry.id == update.id) {
            Some(entry) => {
                entry.balance = update.balance;
                Applied::Updated
            }
            None => Applied::Ignored,
        }
    }

    /// Sum of all tracked balances in minor units.
    pub fn total(&self) -> i64 {
        self.entries.iter().map(|entry| entry.balance).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackedBalance> {
        self.entries.iter()
    }
}
