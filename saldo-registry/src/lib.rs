//! Balance registry and total publishing for the Saldo runtime.

mod error;
mod registry;
mod sink;

pub use error::{RegistryError, RegistryResult, SinkError, SinkResult};
pub use registry::{Applied, Registry};
pub use sink::TotalSink;

#[cfg(test)]
mod tests {
    use super::*;
    use saldo_core::{BalanceUpdate, TrackedBalance};

    fn seeded() -> Registry {
        Registry::seed(vec![
            TrackedBalance::new("a", 1000),
            TrackedBalance::new("b", 500),
            TrackedBalance::new("j1", 200),
        ])
        .unwrap()
    }

    fn update(id: &str, balance: i64) -> BalanceUpdate {
        BalanceUpdate {
            id: id.into(),
            balance,
        }
    }

    #[test]
    fn total_after_seed_is_the_sum_of_balances() {
        assert_eq!(seeded().total(), 1700);
    }

    #[test]
    fn duplicate_ids_fail_the_seed() {
        let result = Registry::seed(vec![
            TrackedBalance::new("a", 1),
            TrackedBalance::new("a", 2),
        ]);
        assert!(matches!(result, Err(RegistryError::DuplicateId(id)) if id == "a"));
    }

    #[test]
    fn apply_overwrites_the_matching_balance() {
        let mut registry = seeded();
        assert_eq!(registry.apply(&update("a", 1200)), Applied::Updated);
        assert_eq!(registry.total(), 1900);
    }

    #[test]
    fn apply_is_idempotent() {
        let mut registry = seeded();
        registry.apply(&update("a", 1200));
        registry.apply(&update("a", 1200));
        assert_eq!(registry.total(), 1900);
    }

    #[test]
    fn unknown_id_is_a_no_op() {
        let mut registry = seeded();
        assert_eq!(registry.apply(&update("z", 9999)), Applied::Ignored);
        assert_eq!(registry.total(), 1700);
    }

    #[test]
    fn sink_renders_major_units_with_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("total");
        let sink = TotalSink::new(&path);
        sink.publish(1900).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "19\n");
        sink.publish(-250).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "-2\n");
    }

    #[test]
    fn sink_overwrites_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("total");
        let sink = TotalSink::new(&path);
        sink.publish(1_000_000).unwrap();
        sink.publish(100).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1\n");
    }
}
