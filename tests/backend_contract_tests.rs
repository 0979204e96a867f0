//! Point read/write contract tests for both reference backends:
//! - MemoryBackend (snapshot only, default scan adaptor)
//! - OrderedBackend (native range scans)
//!
//! Each property is checked against every backend through `&dyn TableBackend`,
//! the same way the table view sees them.

mod common;

use artable_store::databases::{MemoryBackend, OrderedBackend};
use artable_store::datum::DatumObject;
use artable_store::prelude::*;
use assert_matches::assert_matches;
use common::*;
use std::thread;

fn backends() -> Vec<(&'static str, Box<dyn TableBackend>)> {
    vec![
        ("memory", Box::new(MemoryBackend::new("id"))),
        ("ordered", Box::new(OrderedBackend::new("id"))),
    ]
}

// ============================================================================
// PRIMARY KEY NAME
// ============================================================================

#[test]
fn test_primary_key_name_is_stable() {
    init_logging();
    for (label, backend) in backends() {
        let first = backend.primary_key_name().to_string();
        assert!(!first.is_empty(), "{label}: empty primary key name");
        for _ in 0..100 {
            assert_eq!(backend.primary_key_name(), first, "{label}: name changed");
        }
    }
}

#[test]
fn test_primary_key_name_is_stable_across_threads() {
    let backend = MemoryBackend::new("name");
    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..100 {
                    assert_eq!(backend.primary_key_name(), "name");
                }
            });
        }
    });
}

// ============================================================================
// CRUD
// ============================================================================

#[test]
fn test_insert_then_read() {
    init_logging();
    let interruptor = Interruptor::new();
    for (label, backend) in backends() {
        let key = Datum::from("a");
        assert_eq!(backend.read_row(&key, &interruptor), Ok(None), "{label}: table not empty");

        let stored = backend
            .write_row(&key, false, Some(row("a", 1)), &interruptor)
            .unwrap();
        assert_eq!(stored, Some(row("a", 1)), "{label}: write amended an unamended row");
        assert_eq!(backend.read_row(&key, &interruptor), Ok(Some(row("a", 1))), "{label}");
    }
}

#[test]
fn test_update_overwrites_row() {
    let interruptor = Interruptor::new();
    for (label, backend) in backends() {
        let key = Datum::from("a");
        backend.write_row(&key, false, Some(row("a", 1)), &interruptor).unwrap();
        backend.write_row(&key, false, Some(row("a", 2)), &interruptor).unwrap();
        assert_eq!(backend.read_row(&key, &interruptor), Ok(Some(row("a", 2))), "{label}");
    }
}

#[test]
fn test_delete_then_read_is_absent() {
    let interruptor = Interruptor::new();
    for (label, backend) in backends() {
        let key = Datum::from("a");
        backend.write_row(&key, false, Some(row("a", 1)), &interruptor).unwrap();

        let result = backend.write_row(&key, false, None, &interruptor).unwrap();
        assert_eq!(result, None, "{label}: deletion returned a row");
        assert_eq!(backend.read_row(&key, &interruptor), Ok(None), "{label}: row survived deletion");
    }
}

#[test]
fn test_delete_of_missing_row_is_not_an_error() {
    let interruptor = Interruptor::new();
    for (label, backend) in backends() {
        let result = backend.write_row(&Datum::from("ghost"), false, None, &interruptor);
        assert_eq!(result, Ok(None), "{label}");
    }
}

#[test]
fn test_autogenerated_key_is_accepted_verbatim() {
    let interruptor = Interruptor::new();
    for (label, backend) in backends() {
        let generated = Datum::from("7f1b0c6e-2f0e-4a53-9d59-0f3d5c7a1e42");
        let value = Datum::object([("value", Datum::from("x"))]);

        backend.write_row(&generated, true, Some(value), &interruptor).unwrap();

        let expected = Datum::object([("id", generated.clone()), ("value", Datum::from("x"))]);
        assert_eq!(backend.read_row(&generated, &interruptor), Ok(Some(expected)), "{label}");
    }
}

#[test]
fn test_mismatched_primary_key_is_rejected() {
    let interruptor = Interruptor::new();
    for (label, backend) in backends() {
        let result = backend.write_row(&Datum::from("a"), false, Some(row("b", 1)), &interruptor);
        assert_matches!(result, Err(BackendError::Validation(_)), "{label}");
        assert_eq!(backend.read_row(&Datum::from("a"), &interruptor), Ok(None), "{label}");
    }
}

#[test]
fn test_non_object_row_is_rejected() {
    let interruptor = Interruptor::new();
    for (label, backend) in backends() {
        let result = backend.write_row(&Datum::from("a"), false, Some(Datum::from(3)), &interruptor);
        let error = result.expect_err(label);
        assert_eq!(error.to_string(), "Expected type OBJECT but found NUMBER.");
    }
}

// ============================================================================
// AMENDMENTS
// ============================================================================

mod amendment_tests {
    use super::*;

    fn backend_with_defaults() -> MemoryBackend {
        let mut defaults = DatumObject::new();
        defaults.insert("durability".to_string(), Datum::from("hard"));
        defaults.insert("shards".to_string(), Datum::from(1));
        MemoryBackend::new("id").with_defaults(defaults)
    }

    #[test]
    fn test_amended_value_is_returned_and_stored() {
        let backend = backend_with_defaults();
        let interruptor = Interruptor::new();
        let key = Datum::from("a");

        let stored = backend
            .write_row(&key, false, Some(row("a", 1)), &interruptor)
            .unwrap()
            .expect("upsert must return a row");
        assert_eq!(stored.get_field("durability"), Some(&Datum::from("hard")));
        assert_eq!(stored.get_field("value"), Some(&Datum::from(1)));
        assert_eq!(backend.read_row(&key, &interruptor), Ok(Some(stored)));
    }

    #[test]
    fn test_amendment_stabilizes() {
        let backend = backend_with_defaults();
        let interruptor = Interruptor::new();
        let key = Datum::from("a");

        backend.write_row(&key, false, Some(row("a", 1)), &interruptor).unwrap();
        let first = backend.read_row(&key, &interruptor).unwrap();

        backend.write_row(&key, false, first.clone(), &interruptor).unwrap();
        let second = backend.read_row(&key, &interruptor).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_explicit_fields_win_over_defaults() {
        let backend = backend_with_defaults();
        let interruptor = Interruptor::new();
        let key = Datum::from("a");
        let explicit = row("a", 1).merge(&Datum::object([("shards", Datum::from(4))]));

        let stored = backend.write_row(&key, false, Some(explicit), &interruptor).unwrap();
        assert_eq!(
            stored.and_then(|r| r.get_field("shards").cloned()),
            Some(Datum::from(4))
        );
    }

    #[test]
    fn test_deletion_is_never_amended() {
        let backend = backend_with_defaults();
        let interruptor = Interruptor::new();
        assert_eq!(backend.write_row(&Datum::from("a"), false, None, &interruptor), Ok(None));
    }
}

// ============================================================================
// VALIDATION RULES
// ============================================================================

#[test]
fn test_generated_keys_can_be_refused() {
    let backend = MemoryBackend::new("id").rejecting_generated_keys();
    let interruptor = Interruptor::new();
    let value = Datum::object([("value", Datum::from("x"))]);

    let result = backend.write_row(&Datum::from("uuid"), true, Some(value.clone()), &interruptor);
    assert_matches!(result, Err(BackendError::Validation(message)) if message.contains("`id`"));
    assert_eq!(backend.is_empty(), Ok(true));

    // the same key, supplied explicitly, is fine
    let result = backend.write_row(&Datum::from("uuid"), false, Some(value), &interruptor);
    assert!(result.is_ok());
}

#[test]
fn test_storage_errors_carry_their_message() {
    let backend = UnavailableBackend;
    let interruptor = Interruptor::new();
    let error = backend.read_row(&Datum::from("s1"), &interruptor).unwrap_err();
    assert_eq!(error.to_string(), "The cluster metadata is unavailable.");
    assert!(!error.is_interrupted());
    assert!(!error.is_retryable());
}

#[test]
fn test_missing_scan_strategy_is_a_contract_violation() {
    let backend = NoScanBackend;
    let interruptor = Interruptor::new();

    let result = backend.scan_stream(&DatumRange::universe(), Sorting::Ascending, &interruptor);
    assert_matches!(result, Err(ref e) if e.is_contract_violation());

    let result = backend.scan_vector(&interruptor);
    assert_matches!(result, Err(BackendError::ContractViolation(_)));
}

#[test]
fn test_interrupted_point_operations() {
    let interruptor = Interruptor::new();
    interruptor.interrupt();
    for (label, backend) in backends() {
        assert_eq!(
            backend.read_row(&Datum::from("a"), &interruptor),
            Err(BackendError::Interrupted),
            "{label}"
        );
        assert_eq!(
            backend.write_row(&Datum::from("a"), false, Some(row("a", 1)), &interruptor),
            Err(BackendError::Interrupted),
            "{label}"
        );
    }
}
