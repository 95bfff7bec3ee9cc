//! Store behaviour observed through the fragment string.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use fragstate_repo::{FragmentFormat, MemoryFragment, RepositoryConfig, HashRepository};
use fragstate_serial::{JsonSerializer, StringSerializer};
use fragstate_store::{ActionMap, Shape, State, StatePatch, Store, StoreError};
use serde_json::{json, Value};

fn patch(key: &str, value: Value) -> StatePatch {
    StatePatch::from([(key.to_string(), value)])
}

fn increment(state: &State, _: &Value) -> StatePatch {
    let n = state["count"].as_i64().unwrap_or(0);
    patch("count", json!(n + 1))
}

#[test]
fn counter_scenario() {
    let port = MemoryFragment::default();
    let store = Store::with_port(Shape::new().with("count", JsonSerializer::<i64>::new()), port.clone());

    store.set_state(patch("count", json!(0))).unwrap();
    assert_eq!(port.get(), "#?count=0");
    assert_eq!(store.get_state_key("count").unwrap(), json!(0));

    let actions = store.define_actions(ActionMap::new().with("increment", increment));
    actions.dispatch("increment", Value::Null).unwrap();
    actions.dispatch("increment", Value::Null).unwrap();

    assert_eq!(store.get_state_key("count").unwrap(), json!(2));
    assert_eq!(port.get(), "#?count=2");
}

#[test]
fn settings_scenario() {
    let port = MemoryFragment::new("#settings?theme=dark&lang=en");
    let store = Store::with_port(Shape::new().with("lang", StringSerializer), port.clone());

    store.set_state(patch("lang", json!("fr"))).unwrap();

    assert_eq!(port.get(), "#settings?theme=dark&lang=fr");
}

#[test]
fn key_isolation() {
    let port = MemoryFragment::new("#?a=1&b=2&c=v");
    let shape = Shape::new().with("a", StringSerializer).with("b", StringSerializer);
    let store = Store::with_port(shape, port.clone());

    store.set_state(patch("a", json!("x"))).unwrap();

    assert_eq!(port.get(), "#?a=x&b=2&c=v");
}

#[test]
fn deletion_removes_the_pair() {
    let port = MemoryFragment::new("#?a=1&b=2");
    let shape = Shape::new().with("a", StringSerializer).with("b", StringSerializer);
    let store = Store::with_port(shape, port.clone());

    store.set_state(patch("a", Value::Null)).unwrap();

    assert_eq!(port.get(), "#?b=2");
    assert!(!port.get().contains("a="));
}

#[test]
fn unknown_key_leaves_fragment_untouched() {
    let port = MemoryFragment::new("#?a=1&c=v");
    let store = Store::with_port(Shape::new().with("a", StringSerializer), port.clone());

    let err = store.set_state(patch("c", json!("x"))).unwrap_err();

    assert!(matches!(err, StoreError::UnknownKey { .. }));
    assert_eq!(port.get(), "#?a=1&c=v");
    assert_eq!(port.writes(), 0);
}

#[test]
fn non_managed_key_through_repository_leaves_fragment_untouched() {
    let port = MemoryFragment::new("#?a=1&c=v");
    let repo = HashRepository::with_port(port.clone(), ["a"]);
    // The shape claims `c`, but the injected repository does not manage it.
    let store = Store::with_repository(
        Shape::new().with("a", StringSerializer).with("c", StringSerializer),
        repo,
    );

    let err = store.set_state(patch("c", json!("x"))).unwrap_err();

    assert!(matches!(err, StoreError::Repository(_)));
    assert_eq!(port.get(), "#?a=1&c=v");
}

#[test]
fn stale_url_with_garbage_reads_as_null() {
    let port = MemoryFragment::new("#?filters=%7Bbroken&count=3");
    let shape = Shape::new()
        .with("filters", JsonSerializer::<Value>::new())
        .with("count", JsonSerializer::<i64>::new());
    let store = Store::with_port(shape, port);

    let state = store.get_state().unwrap();

    assert_eq!(state["filters"], Value::Null);
    assert_eq!(state["count"], json!(3));
}

#[test]
fn listener_fan_out() {
    let port = MemoryFragment::default();
    let store = Store::with_port(Shape::new().with("count", JsonSerializer::<i64>::new()), port);
    let calls: Arc<Mutex<Vec<(usize, Value)>>> = Arc::default();
    for i in 0..4 {
        let calls = calls.clone();
        store.subscribe(move |state| calls.lock().unwrap().push((i, state["count"].clone())));
    }

    store.set_state(patch("count", json!(7))).unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![(0, json!(7)), (1, json!(7)), (2, json!(7)), (3, json!(7))]
    );
}

#[test]
fn external_navigation_is_visible_to_reads() {
    let port = MemoryFragment::new("#?count=1");
    let store = Store::with_port(Shape::new().with("count", JsonSerializer::<i64>::new()), port.clone());

    port.navigate("#?count=41");
    let actions = store.define_actions(ActionMap::new().with("increment", increment));
    actions.dispatch("increment", Value::Null).unwrap();

    assert_eq!(port.get(), "#?count=42");
}

#[test]
fn bare_query_layout_from_config() {
    let port = MemoryFragment::default();
    let config = RepositoryConfig {
        format: FragmentFormat::BareQuery,
        managed_keys: vec!["count".into()],
    };
    let store = Store::with_repository(
        Shape::new().with("count", JsonSerializer::<i64>::new()),
        HashRepository::from_config(port.clone(), config),
    );

    store.set_state(patch("count", json!(1))).unwrap();

    assert_eq!(port.get(), "#count=1");
    assert_eq!(store.get_state_key("count").unwrap(), json!(1));
}

#[test]
fn json_values_are_percent_encoded() {
    let port = MemoryFragment::default();
    let store = Store::with_port(Shape::new().with("filters", JsonSerializer::<Value>::new()), port.clone());
    let filters = json!({"q": "a&b=c", "tags": ["x y"]});

    store.set_state(patch("filters", filters.clone())).unwrap();

    assert_eq!(
        port.get(),
        "#?filters=%7B%22q%22:%22a%26b%3Dc%22,%22tags%22:%5B%22x%20y%22%5D%7D"
    );
    assert_eq!(store.get_state_key("filters").unwrap(), filters);
}

#[test]
fn empty_set_state_is_silent() {
    let port = MemoryFragment::new("#home?count=1");
    let store = Store::with_port(Shape::new().with("count", JsonSerializer::<i64>::new()), port.clone());
    let notified = Arc::new(AtomicUsize::new(0));
    let n = notified.clone();
    store.subscribe(move |_| {
        n.fetch_add(1, Ordering::SeqCst);
    });

    store.set_state(StatePatch::new()).unwrap();
    store.set_state_opt(None).unwrap();

    assert_eq!(port.get(), "#home?count=1");
    assert_eq!(port.writes(), 0);
    assert_eq!(notified.load(Ordering::SeqCst), 0);
}
