use splunk_inputs_core::{known_kinds, AddressError, Input, InputKind};

#[test]
fn tcp_paths_use_two_level_key() {
    let kind = InputKind::classify("/services/data/inputs/tcp/raw/9997").unwrap();
    assert_eq!(kind, InputKind::TcpRaw);
    assert_eq!(kind.relative_path(), "tcp/raw");

    let kind = InputKind::classify("/services/data/inputs/tcp/cooked/9998").unwrap();
    assert_eq!(kind, InputKind::TcpCooked);
}

#[test]
fn other_paths_use_first_segment() {
    let kind = InputKind::classify("/services/data/inputs/monitor/var%2Flog").unwrap();
    assert_eq!(kind, InputKind::Monitor);

    let kind = InputKind::classify("/services/data/inputs/win-event-log-collections/localhost")
        .unwrap();
    assert_eq!(kind, InputKind::WindowsEventLog);
}

#[test]
fn namespaced_paths_classify_like_global_ones() {
    let kind =
        InputKind::classify("/servicesNS/nobody/search/data/inputs/script/%24SPLUNK_HOME%2Fbin")
            .unwrap();
    assert_eq!(kind, InputKind::Script);
}

#[test]
fn unknown_kinds_are_unrecognized_not_errors() {
    let kind = InputKind::classify("/services/data/inputs/http/my-token").unwrap();
    assert_eq!(kind, InputKind::Unrecognized("http".to_string()));

    let kind = InputKind::classify("/services/data/inputs/tcp/ssl/9999").unwrap();
    assert_eq!(kind, InputKind::Unrecognized("tcp/ssl".to_string()));
}

#[test]
fn classification_is_total_for_every_known_collection() {
    for kind in known_kinds() {
        let path = format!("{}/some-id", kind.endpoint("/services"));
        assert_eq!(&InputKind::classify(&path).unwrap(), kind, "path {path}");
    }
}

#[test]
fn malformed_paths_fail_closed() {
    assert_eq!(
        InputKind::classify("/services/data/inputs/tcp").unwrap_err(),
        AddressError::MissingTransportSegment("/services/data/inputs/tcp".to_string())
    );
    assert_eq!(
        InputKind::classify("/services/data/inputs/tcp/").unwrap_err(),
        AddressError::MissingTransportSegment("/services/data/inputs/tcp/".to_string())
    );
    assert!(matches!(
        InputKind::classify("/services/data/inputs/").unwrap_err(),
        AddressError::MissingKindSegment(_)
    ));
    assert!(matches!(
        InputKind::classify("/services/apps/local/search").unwrap_err(),
        AddressError::OutsideNamespace(_)
    ));
}

#[test]
fn input_kind_is_derived_from_path() {
    let input = Input::new("/services/data/inputs/udp/514");
    assert_eq!(input.kind().unwrap(), InputKind::Udp);
    assert_eq!(input.title(), "514");
}
