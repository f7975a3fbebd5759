use async_trait::async_trait;
use cosmogram_core::resource::resolver::{
    resolve_constants, resolve_palette, resolve_registry, resolve_schema, DEFAULT_SOURCE_TIMEOUT,
};
use cosmogram_core::{
    resolve_first, FileSource, InlineSource, NumerologyConstants, Palette, ResolvedOrigin,
    ResourceSource, SourceError,
};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Source that counts loads and then fails or hangs.
struct ScriptedSource {
    label: &'static str,
    calls: Arc<AtomicUsize>,
    hang: bool,
}

#[async_trait]
impl ResourceSource for ScriptedSource {
    fn label(&self) -> String {
        self.label.to_string()
    }

    async fn load(&self) -> Result<String, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.hang {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        Err(SourceError::Unavailable {
            source_label: self.label.to_string(),
            reason: "offline".to_string(),
        })
    }
}

fn boxed(source: impl ResourceSource + 'static) -> Box<dyn ResourceSource> {
    Box::new(source)
}

#[tokio::test]
async fn second_source_wins_and_third_is_never_loaded() {
    let third_calls = Arc::new(AtomicUsize::new(0));
    let sources = vec![
        boxed(InlineSource::new("broken", "{ not json")),
        boxed(InlineSource::new("bundled", r##"{ "background": "#222222" }"##)),
        boxed(ScriptedSource {
            label: "remote",
            calls: Arc::clone(&third_calls),
            hang: false,
        }),
    ];

    let resolved = resolve_palette(&sources, DEFAULT_SOURCE_TIMEOUT).await;

    assert_eq!(
        resolved.origin,
        ResolvedOrigin::Source {
            index: 1,
            label: "bundled".to_string()
        }
    );
    assert_eq!(resolved.value.background.to_hex(), "#222222");
    assert_eq!(resolved.notice, "palette loaded from bundled");
    assert_eq!(resolved.fallback_notice(), None);
    assert_eq!(resolved.failures.len(), 1);
    assert_eq!(resolved.failures[0].source_label(), "broken");
    assert_eq!(third_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn all_failures_fall_back_with_a_notice() {
    let sources = vec![
        boxed(FileSource::new("/definitely/not/here/palette.json")),
        boxed(InlineSource::new("array", "[1, 2]")),
    ];

    let resolved = resolve_palette(&sources, DEFAULT_SOURCE_TIMEOUT).await;

    assert!(resolved.is_fallback());
    assert_eq!(resolved.value, Palette::default());
    assert_eq!(
        resolved.fallback_notice(),
        Some("fallback palette active (built-in defaults)")
    );
    assert!(matches!(resolved.failures[0], SourceError::Io { .. }));
    assert!(matches!(resolved.failures[1], SourceError::Parse { .. }));
}

#[tokio::test(start_paused = true)]
async fn hanging_source_times_out_and_resolution_moves_on() {
    let calls = Arc::new(AtomicUsize::new(0));
    let sources = vec![
        boxed(ScriptedSource {
            label: "slow",
            calls: Arc::clone(&calls),
            hang: true,
        }),
        boxed(InlineSource::new("inline", "42")),
    ];

    let resolved = resolve_first(
        "answer",
        &sources,
        Duration::from_millis(250),
        |text| text.trim().parse::<u32>().map_err(|err| err.to_string()),
        || 0,
    )
    .await;

    assert_eq!(resolved.value, 42);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        resolved.failures,
        vec![SourceError::Timeout {
            source_label: "slow".to_string(),
            after_ms: 250
        }]
    );
}

#[tokio::test]
async fn registry_loads_from_a_file_source() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, r#"{{ "nodes": [ {{ "id": "ARC-000" }} ] }}"#).expect("write registry");

    let sources = vec![boxed(FileSource::new(file.path()))];
    let resolved = resolve_registry(&sources, DEFAULT_SOURCE_TIMEOUT).await;

    assert!(!resolved.is_fallback());
    assert_eq!(resolved.value.len(), 1);
    assert_eq!(resolved.value[0]["id"], "ARC-000");
}

#[tokio::test]
async fn malformed_schema_falls_through_to_builtin() {
    let sources = vec![boxed(InlineSource::new(
        "schema.json",
        r#"{ "idPattern": "([unclosed" }"#,
    ))];
    let resolved = resolve_schema(&sources, DEFAULT_SOURCE_TIMEOUT).await;

    assert!(resolved.is_fallback());
    assert_eq!(resolved.value.lineages.len(), 8);
    assert!(matches!(resolved.failures[0], SourceError::Parse { .. }));
}

#[tokio::test]
async fn constants_document_defaults_only_its_invalid_keys() {
    let sources = vec![boxed(InlineSource::new(
        "constants.json",
        r#"{ "SEVEN": -1, "NINE": 10 }"#,
    ))];
    let resolved = resolve_constants(&sources, DEFAULT_SOURCE_TIMEOUT).await;

    let defaults = NumerologyConstants::default();
    assert_eq!(
        resolved.origin,
        ResolvedOrigin::Source {
            index: 0,
            label: "constants.json".to_string()
        }
    );
    assert_eq!(resolved.notice, "constants loaded from constants.json");
    assert_eq!(resolved.value.seven, defaults.seven);
    assert_eq!(resolved.value.nine, 10.0);
    assert_eq!(
        NumerologyConstants {
            nine: defaults.nine,
            ..resolved.value
        },
        defaults
    );
}

#[tokio::test]
async fn non_object_constants_fall_back_to_defaults() {
    let sources = vec![boxed(InlineSource::new("constants.json", "[3, 7, 9]"))];
    let resolved = resolve_constants(&sources, DEFAULT_SOURCE_TIMEOUT).await;

    assert!(resolved.is_fallback());
    assert_eq!(resolved.value, NumerologyConstants::default());
    assert_eq!(
        resolved.fallback_notice(),
        Some("fallback constants active (built-in defaults)")
    );
    assert!(matches!(resolved.failures[0], SourceError::Parse { .. }));
}
