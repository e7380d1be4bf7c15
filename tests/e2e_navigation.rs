//! End-to-end tests for the full navigation surface.
//!
//! Each test builds a realistic nested document and exercises resolution,
//! typed getters, shape inspection, sub-navigation, and mutation through
//! the public API only.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use treenav::{Map, Navigator, Qual, Source, Value};

fn config() -> Navigator {
    Navigator::from_json(serde_json::json!({
        "service": {
            "name": "ingest",
            "port": 8080,
            "sample_rate": 0.25,
            "debug": false,
        },
        "limits": { "max_batch": 512, "timeout_secs": 42.9 },
        "hosts": ["alpha", "beta", "gamma", "delta", "epsilon"],
        "weights": [1, -1, 256],
    }))
    .expect("object document")
}

// ============================================================================
// 1. Typed reads with and without defaults
// ============================================================================

#[test]
fn test_scalar_reads() {
    let nav = config();

    assert_eq!(nav.string(&Qual::new("service.name"), None), "ingest");
    assert_eq!(nav.u16(&Qual::new("service.port"), None), 8080);
    assert_eq!(nav.f64(&Qual::new("service.sample_rate"), None), 0.25);
    assert!(!nav.bool(&Qual::new("service.debug"), true));

    // Absent qualifiers take the caller's default.
    assert_eq!(nav.i64(&Qual::new("service.retries"), 7), 7);
    assert_eq!(nav.string(&Qual::new("service.owner"), "ops".to_string()), "ops");
}

// ============================================================================
// 2. Numeric coercion through the getter family
// ============================================================================

#[test]
fn test_numeric_coercion_reads() {
    let nav = config();
    let timeout = Qual::new("limits.timeout_secs");

    // Stored as 42.9: truncation toward zero, whatever width is asked.
    assert_eq!(nav.i64(&timeout, 7), 42);
    assert_eq!(nav.u8(&timeout, None), 42);
    assert_eq!(nav.f32(&timeout, None), 42.9);

    // Narrowing wraps: 256 → u8 is 0, -1 → u8 is 255.
    assert_eq!(nav.u8(&Qual::new("weights.2"), None), 0);
    assert_eq!(nav.u8(&Qual::new("weights.1"), None), 255);

    // Text never coerces to a number.
    assert_eq!(nav.i64(&Qual::new("hosts.0"), 7), 7);
}

// ============================================================================
// 3. Length inspection
// ============================================================================

#[test]
fn test_len() {
    let nav = config();

    assert_eq!(nav.len(&Qual::new("hosts")), 5);
    assert_eq!(nav.len(&Qual::new("service")), 4);
    assert_eq!(nav.len(&Qual::new("service.name")), 6);
    // No length concept for numbers; absent is the same sentinel.
    assert_eq!(nav.len(&Qual::new("service.port")), -1);
    assert_eq!(nav.len(&Qual::new("nope")), -1);
}

// ============================================================================
// 4. Sub-navigation shares structure
// ============================================================================

#[test]
fn test_subnavigator_over_map_and_list() {
    let nav = config();

    let service = nav.navigator(&Qual::new("service")).expect("map is navigable");
    assert_eq!(service.u16(&Qual::new("port"), None), 8080);

    let hosts = nav.navigator(&Qual::new("hosts")).expect("list is navigable");
    assert_eq!(hosts.string(&Qual::new("1"), None), "beta");

    // A plain integer yields no navigator.
    assert!(nav.navigator(&Qual::new("service.port")).is_none());
    assert!(nav.navigator(&Qual::new("missing")).is_none());
}

#[test]
fn test_subnavigator_mutation_is_visible_both_ways() {
    let nav = config();
    let service = nav.navigator(&Qual::new("service")).unwrap();

    // Write through the child, read through the parent.
    assert!(service.set(&Qual::new("port"), 9090i64));
    assert_eq!(nav.u16(&Qual::new("service.port"), None), 9090);

    // Write through the parent, read through the child.
    assert!(nav.set(&Qual::new("service.name"), "egress"));
    assert_eq!(service.string(&Qual::new("name"), None), "egress");
}

// ============================================================================
// 5. Source capability
// ============================================================================

/// An external object acting as a backing store: resolves anything under
/// a fixed prefix to its own path text.
struct Echo;

impl Source for Echo {
    fn resolve(&self, qual: &Qual) -> Option<Value> {
        (!qual.is_empty()).then(|| Value::from(qual.to_string()))
    }
}

#[test]
fn test_navigator_wraps_source_capability() {
    let mut entries = Map::new();
    entries.insert("ext".into(), Value::source(Arc::new(Echo)));
    let nav = Navigator::from_entries(entries);

    // Resolution mid-path hands the suffix to the capability.
    assert_eq!(nav.string(&Qual::new("ext.a.b"), None), "a.b");

    // Sub-navigation wraps the capability directly.
    let ext = nav.navigator(&Qual::new("ext")).expect("source is navigable");
    assert_eq!(ext.string(&Qual::new("x"), None), "x");

    // Direct construction over the capability.
    let direct = Navigator::new(Arc::new(Echo));
    assert_eq!(direct.string(&Qual::new("y.z"), None), "y.z");
}

// ============================================================================
// 6. Assignability-checked retrieval
// ============================================================================

#[test]
fn test_safe_value() {
    let nav = config();

    // Text default accepts the stored text.
    assert_eq!(
        nav.safe_value(&Qual::new("service.name"), Value::from("")),
        Value::from("ingest")
    );
    // Text default rejects an integer: one-directional assignability.
    assert_eq!(
        nav.safe_value(&Qual::new("service.port"), Value::from("")),
        Value::from("")
    );
    // The dynamic default accepts everything.
    assert_eq!(
        nav.safe_value(&Qual::new("service.port"), Value::Null),
        Value::I64(8080)
    );
}

// ============================================================================
// 7. Presence vs. zero ambiguity
// ============================================================================

#[test]
fn test_presence_disambiguation() {
    let nav = Navigator::from_json(serde_json::json!({ "count": 0 })).unwrap();

    // The getter cannot distinguish a stored zero from absence...
    assert_eq!(nav.i64(&Qual::new("count"), None), 0);
    assert_eq!(nav.i64(&Qual::new("missing"), None), 0);

    // ...so presence is its own query.
    assert!(nav.has(&Qual::new("count")));
    assert!(!nav.has(&Qual::new("missing")));
    assert_eq!(nav.get(&Qual::new("missing")), None);
}

// ============================================================================
// 8. Deep mixed-shape paths
// ============================================================================

#[test]
fn test_deep_paths_across_shapes() {
    let nav = Navigator::from_json(serde_json::json!({
        "clusters": [
            { "name": "eu", "nodes": [{ "ip": "10.0.0.1" }] },
            { "name": "us", "nodes": [] },
        ]
    }))
    .unwrap();

    assert_eq!(nav.string(&Qual::new("clusters.0.nodes.0.ip"), None), "10.0.0.1");
    assert_eq!(nav.len(&Qual::new("clusters.1.nodes")), 0);
    // A scalar mid-path kills the walk; the default comes back.
    assert_eq!(nav.string(&Qual::new("clusters.0.name.x"), None), "");
}
