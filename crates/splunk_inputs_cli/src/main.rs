//! Command-line probe for `splunk_inputs_core`.
//!
//! # Responsibility
//! - Classify input paths and preview host-restriction renames offline.
//! - Seed inputs into the local entity store and change their host
//!   restriction there.
//!
//! Commands:
//! - `kind <path>...`
//! - `rename-preview <title> <host>`
//! - `add-input <path> [name=value]...`
//! - `set-host <path> <host>`
//! - `version`
//!
//! `add-input` and `set-host` read `SPLUNK_INPUTS_*` settings and need both
//! `SPLUNK_INPUTS_PLATFORM_VERSION` and `SPLUNK_INPUTS_STORE`.

use log::info;
use serde_json::{json, Value};
use splunk_inputs_core::config::ENV_STORE_PATH;
use splunk_inputs_core::db::open_db;
use splunk_inputs_core::model::path::{port_from_title, renamed_identifier};
use splunk_inputs_core::{
    core_version, init_logging_from_config, Args, ClientConfig, EntityBackend, Input, InputKind,
    InputService, SqliteEntityBackend, RESTRICT_TO_HOST,
};
use rusqlite::Connection;
use std::process::ExitCode;

const USAGE: &str = "usage: splunk_inputs_cli <kind <path>... | rename-preview <title> <host> | add-input <path> [name=value]... | set-host <path> <host> | version>";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["kind", paths @ ..] if !paths.is_empty() => classify_paths(paths),
        ["rename-preview", title, host] => rename_preview(title, host),
        ["add-input", path, pairs @ ..] => run_add_input(path, pairs),
        ["set-host", path, host] => run_set_host(path, host),
        ["version"] => {
            println!("splunk_inputs_core version={}", core_version());
            Ok(())
        }
        _ => Err(USAGE.to_string()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn classify_paths(paths: &[&str]) -> Result<(), String> {
    let mut failed = false;
    for path in paths {
        match InputKind::classify(path) {
            Ok(kind) if kind.is_known() => println!("{path}\t{kind}"),
            Ok(kind) => println!("{path}\t{kind}\t(unrecognized)"),
            Err(err) => {
                eprintln!("{path}\terror: {err}");
                failed = true;
            }
        }
    }
    if failed {
        return Err("one or more paths could not be classified".to_string());
    }
    Ok(())
}

fn rename_preview(title: &str, host: &str) -> Result<(), String> {
    let port = port_from_title(title).map_err(|err| err.to_string())?;
    println!("{}", renamed_identifier(port, host));
    Ok(())
}

fn run_add_input(path: &str, pairs: &[&str]) -> Result<(), String> {
    let config = ClientConfig::from_env().map_err(|err| err.to_string())?;
    init_logging_from_config(&config)?;
    let conn = open_store(&config)?;

    let attributes = parse_attributes(pairs)?;
    add_input(&SqliteEntityBackend::new(&conn), path, &attributes)?;
    info!("event=cli_add_input module=cli status=ok attributes={}", attributes.len());
    println!("{path}");
    Ok(())
}

fn run_set_host(path: &str, host: &str) -> Result<(), String> {
    let config = ClientConfig::from_env().map_err(|err| err.to_string())?;
    init_logging_from_config(&config)?;
    let context = config.service_context().map_err(|err| err.to_string())?;
    let conn = open_store(&config)?;

    let store = SqliteEntityBackend::new(&conn);
    let service = InputService::new(context, &store);
    let new_path = set_host(&service, path, host)?;
    info!("event=cli_set_host module=cli status=ok");
    println!("{new_path}");
    Ok(())
}

// An in-memory store would be empty on every run, so store commands need a file.
fn open_store(config: &ClientConfig) -> Result<Connection, String> {
    let store_path = config
        .store_path
        .as_deref()
        .ok_or_else(|| format!("`{ENV_STORE_PATH}` must point at the entity store file"))?;
    open_db(store_path).map_err(|err| err.to_string())
}

fn add_input(store: &SqliteEntityBackend<'_>, path: &str, attributes: &Args) -> Result<(), String> {
    InputKind::classify(path).map_err(|err| err.to_string())?;
    store
        .insert_entity(path, attributes)
        .map_err(|err| err.to_string())
}

fn set_host<B: EntityBackend>(
    service: &InputService<B>,
    path: &str,
    host: &str,
) -> Result<String, String> {
    let mut input = Input::new(path);
    let mut changes = Args::new();
    changes.insert(RESTRICT_TO_HOST.to_string(), json!(host));
    service
        .update(&mut input, &changes)
        .map_err(|err| err.to_string())?;
    Ok(input.path().to_string())
}

/// Parses `name=value` pairs; values that are not JSON are kept as strings.
fn parse_attributes(pairs: &[&str]) -> Result<Args, String> {
    pairs
        .iter()
        .map(|pair| {
            let (name, raw) = pair
                .split_once('=')
                .filter(|(name, _)| !name.is_empty())
                .ok_or_else(|| format!("attribute must be `name=value`, got `{pair}`"))?;
            let value =
                serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
            Ok((name.to_string(), value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{add_input, parse_attributes, set_host};
    use serde_json::json;
    use splunk_inputs_core::db::open_db_in_memory;
    use splunk_inputs_core::{EntityBackend, InputService, ServiceContext, SqliteEntityBackend};

    #[test]
    fn parse_attributes_keeps_json_and_plain_values() {
        let args = parse_attributes(&["index=net", "disabled=false", "host=\"\""])
            .expect("attributes should parse");
        assert_eq!(args.get("index"), Some(&json!("net")));
        assert_eq!(args.get("disabled"), Some(&json!(false)));
        assert_eq!(args.get("host"), Some(&json!("")));

        assert!(parse_attributes(&["index"]).is_err());
        assert!(parse_attributes(&["=net"]).is_err());
    }

    #[test]
    fn added_input_can_have_its_host_set() {
        let conn = open_db_in_memory().expect("store");
        let store = SqliteEntityBackend::new(&conn);
        let attributes = parse_attributes(&["index=main"]).expect("attributes");
        add_input(&store, "/services/data/inputs/tcp/raw/9997", &attributes)
            .expect("input should be added");

        let service = InputService::new(
            ServiceContext::from_version_str("6.0").expect("context"),
            &store,
        );
        let new_path = set_host(&service, "/services/data/inputs/tcp/raw/9997", "myhost")
            .expect("host should be set");

        assert_eq!(new_path, "/services/data/inputs/tcp/raw/myhost:9997");
        let snapshot = store.fetch(&new_path).expect("renamed input");
        assert_eq!(snapshot.attributes.get("index"), Some(&json!("main")));
    }

    #[test]
    fn set_host_on_missing_input_reports_not_found() {
        let conn = open_db_in_memory().expect("store");
        let store = SqliteEntityBackend::new(&conn);
        let service = InputService::new(
            ServiceContext::from_version_str("6.0").expect("context"),
            &store,
        );

        let err = set_host(&service, "/services/data/inputs/tcp/raw/9997", "myhost")
            .expect_err("missing input must fail");
        assert!(err.contains("not found"));
    }

    #[test]
    fn add_input_rejects_paths_outside_inputs() {
        let conn = open_db_in_memory().expect("store");
        let store = SqliteEntityBackend::new(&conn);
        assert!(add_input(&store, "/services/apps/local/search", &Default::default()).is_err());
    }
}
