//! Protocol tests for the atomizer-core crate.
//!
//! Tests cover:
//! - Trait object safety (Arc<dyn Trait> is Send + Sync)
//! - Typed ID conversions and serde shape
//! - Properties outcome handling

use atomizer_core::*;
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Object safety
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn _assert_send_sync<T: Send + Sync>() {}

#[test]
fn arc_atom_is_send_sync() {
    _assert_send_sync::<Arc<dyn Atom>>();
}

#[test]
fn arc_conductor_is_send_sync() {
    _assert_send_sync::<Arc<dyn Conductor>>();
}

#[test]
fn arc_registrant_is_send_sync() {
    _assert_send_sync::<Arc<dyn Registrant>>();
}

#[test]
fn arc_registration_source_is_send_sync() {
    _assert_send_sync::<Arc<dyn RegistrationSource>>();
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// IDs and serde
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn typed_ids_convert_and_display() {
    let from_str: AtomId = "resize".into();
    let from_string: AtomId = String::from("resize").into();
    assert_eq!(from_str, from_string);
    assert_eq!(from_str.as_str(), "resize");
    assert_eq!(from_str.to_string(), "resize");
}

#[test]
fn electron_serializes_with_plain_string_ids() {
    let electron = Electron::new("e-1", "resize", json!({"width": 640}));
    let value = serde_json::to_value(&electron).unwrap();
    assert_eq!(
        value,
        json!({"id": "e-1", "atom": "resize", "payload": {"width": 640}})
    );
}

#[test]
fn electron_payload_defaults_to_null() {
    let electron: Electron = serde_json::from_value(json!({"id": "e", "atom": "a"})).unwrap();
    assert_eq!(electron.payload, serde_json::Value::Null);
}

#[test]
fn properties_split_outcome() {
    let now = Utc::now();
    let ok = Properties::new(
        ElectronId::new("e"),
        AtomId::new("a"),
        ConductorId::new("c"),
        now,
        now,
        Ok(json!(1)),
    );
    assert!(!ok.is_error());
    assert_eq!(ok.result, Some(json!(1)));

    let failed = Properties::new(
        ElectronId::new("e"),
        AtomId::new("a"),
        ConductorId::new("c"),
        now,
        now,
        Err("nope".to_string()),
    );
    assert!(failed.is_error());
    assert_eq!(failed.error.as_deref(), Some("nope"));
    assert_eq!(failed.result, None);
}
