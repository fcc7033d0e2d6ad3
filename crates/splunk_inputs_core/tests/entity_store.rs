use serde_json::json;
use splunk_inputs_core::db::open_db_in_memory;
use splunk_inputs_core::{
    Args, EntityBackend, Input, InputError, InputService, PersistError, ServiceContext,
    SqliteEntityBackend, RESTRICT_TO_HOST,
};

fn attrs(pairs: &[(&str, serde_json::Value)]) -> Args {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

#[test]
fn insert_and_fetch_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteEntityBackend::new(&conn);

    store
        .insert_entity(
            "/services/data/inputs/udp/514",
            &attrs(&[("index", json!("net")), ("disabled", json!(false))]),
        )
        .unwrap();

    let snapshot = store.fetch("/services/data/inputs/udp/514").unwrap();
    assert_eq!(snapshot.title, "514");
    assert_eq!(snapshot.attributes.get("index"), Some(&json!("net")));
    assert_eq!(snapshot.attributes.get("disabled"), Some(&json!(false)));
}

#[test]
fn insert_duplicate_path_is_conflict() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteEntityBackend::new(&conn);
    store
        .insert_entity("/services/data/inputs/udp/514", &Args::new())
        .unwrap();

    let err = store
        .insert_entity("/services/data/inputs/udp/514", &Args::new())
        .unwrap_err();
    assert!(matches!(err, PersistError::Conflict(_)));
}

#[test]
fn commit_to_missing_entity_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteEntityBackend::new(&conn);

    let err = store
        .commit(
            "/services/data/inputs/udp/514",
            &attrs(&[("index", json!("net"))]),
        )
        .unwrap_err();
    assert!(matches!(err, PersistError::NotFound(_)));
}

#[test]
fn host_change_moves_entity_and_its_attributes() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteEntityBackend::new(&conn);
    store
        .insert_entity(
            "/services/data/inputs/tcp/raw/9997",
            &attrs(&[("index", json!("main"))]),
        )
        .unwrap();

    let service = InputService::new(ServiceContext::from_version_str("6.0").unwrap(), &store);
    let mut input = Input::new("/services/data/inputs/tcp/raw/9997");
    service
        .update(
            &mut input,
            &attrs(&[(RESTRICT_TO_HOST, json!("myhost"))]),
        )
        .unwrap();

    assert_eq!(input.path(), "/services/data/inputs/tcp/raw/myhost:9997");
    assert!(!store.contains("/services/data/inputs/tcp/raw/9997").unwrap());

    service.refresh(&mut input).unwrap();
    assert_eq!(input.restrict_to_host().as_deref(), Some("myhost"));
    assert_eq!(input.entity().content().get("index"), Some(&json!("main")));

    let snapshot = store.fetch(input.path()).unwrap();
    assert_eq!(snapshot.title, input.title());
}

#[test]
fn clearing_host_round_trips_to_bare_port() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteEntityBackend::new(&conn);
    store
        .insert_entity("/services/data/inputs/tcp/cooked/myhost:9997", &Args::new())
        .unwrap();

    let service = InputService::new(ServiceContext::from_version_str("7.2").unwrap(), &store);
    let mut input = Input::new("/services/data/inputs/tcp/cooked/myhost:9997");
    input.set_restrict_to_host("");
    service.update_staged(&mut input).unwrap();

    assert_eq!(input.title(), "9997");
    assert!(store.contains("/services/data/inputs/tcp/cooked/9997").unwrap());
}

#[test]
fn rename_onto_existing_entity_is_rolled_back() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteEntityBackend::new(&conn);
    store
        .insert_entity(
            "/services/data/inputs/tcp/raw/9997",
            &attrs(&[("index", json!("main"))]),
        )
        .unwrap();
    store
        .insert_entity("/services/data/inputs/tcp/raw/myhost:9997", &Args::new())
        .unwrap();

    let service = InputService::new(ServiceContext::from_version_str("6.0").unwrap(), &store);
    let mut input = Input::new("/services/data/inputs/tcp/raw/9997");
    let err = service
        .update(
            &mut input,
            &attrs(&[
                (RESTRICT_TO_HOST, json!("myhost")),
                ("index", json!("net")),
            ]),
        )
        .unwrap_err();

    assert!(matches!(err, InputError::Persist(PersistError::Conflict(_))));
    assert_eq!(input.path(), "/services/data/inputs/tcp/raw/9997");

    let snapshot = store.fetch("/services/data/inputs/tcp/raw/9997").unwrap();
    assert_eq!(snapshot.attributes.get("index"), Some(&json!("main")));
    assert_eq!(snapshot.attributes.get(RESTRICT_TO_HOST), None);
}
