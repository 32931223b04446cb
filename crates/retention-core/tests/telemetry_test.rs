use retention_core::telemetry::spans::names;
use retention_core::{pull_span, push_span, store_span};

/// Spans are only materialized while a subscriber is installed.
fn with_registry(f: impl FnOnce()) {
    tracing::subscriber::with_default(tracing_subscriber::registry(), f);
}

#[test]
fn span_macros_use_the_shared_names() {
    with_registry(|| {
        let push = push_span!("ws://localhost:8080/ws/alertas");
        assert_eq!(push.metadata().map(|m| m.name()), Some(names::PUSH));

        let pull = pull_span!("http://localhost:8080/alertas", std::time::Duration::from_secs(30));
        assert_eq!(pull.metadata().map(|m| m.name()), Some(names::PULL));

        let store = store_span!(42);
        assert_eq!(store.metadata().map(|m| m.name()), Some(names::STORE));
    });
}

#[test]
fn span_fields_are_recorded() {
    with_registry(|| {
        let span = pull_span!("http://localhost:8080/alertas", std::time::Duration::from_secs(5));
        let fields = span.metadata().map(|m| m.fields());
        let recorded: Vec<&str> = fields.iter().flat_map(|f| f.iter().map(|f| f.name())).collect();
        assert_eq!(recorded, ["endpoint", "interval"]);
    });
}
