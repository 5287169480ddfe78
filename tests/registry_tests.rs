use chapter_charts::api::{ChartRegistry, CreateOutcome};
use chapter_charts::core::{ChartConfig, DatasetTag, TargetId};
use chapter_charts::platform::HeadlessDocument;
use chapter_charts::render::{BackendEvent, HeadlessBackend};
use serde_json::json;

fn config(height: u32) -> ChartConfig {
    ChartConfig::new().with("chart", json!({ "type": "bar", "height": height }))
}

fn build() -> (ChartRegistry<HeadlessBackend>, HeadlessBackend, HeadlessDocument) {
    let backend = HeadlessBackend::new();
    let document = HeadlessDocument::with_nodes(["#chart-population", "#chart-education"]);
    (ChartRegistry::new(backend.clone()), backend, document)
}

#[test]
fn create_once_keeps_the_first_instance() {
    let (mut registry, backend, document) = build();
    let target = TargetId::new("#chart-population");

    let first = registry.create_once(&document, &target, &config(250));
    let second = registry.create_once(&document, &target, &config(400));

    assert_eq!(first, CreateOutcome::Created);
    assert_eq!(second, CreateOutcome::AlreadyBound);
    assert_eq!(backend.constructed(), 1);
    assert_eq!(backend.destroyed(), 0);
    assert_eq!(registry.len(), 1);

    let chart = registry.get(&target).expect("bound chart");
    assert!(chart.is_rendered());
    assert_eq!(chart.config().lookup("chart.height"), Some(&json!(250)));
}

#[test]
fn create_or_replace_destroys_before_constructing() {
    let (mut registry, backend, document) = build();
    let target = TargetId::new("#chart-population");

    let first = registry.create_or_replace(&document, &target, &config(250), None);
    let second = registry.create_or_replace(&document, &target, &config(400), None);

    assert_eq!(first, CreateOutcome::Created);
    assert_eq!(second, CreateOutcome::Replaced);
    assert_eq!(backend.constructed(), 2);
    assert_eq!(backend.destroyed(), 1);
    assert_eq!(backend.live_charts(), 1);

    let events = backend.events();
    assert_eq!(
        events,
        vec![
            BackendEvent::Constructed {
                chart: 0,
                target: target.clone()
            },
            BackendEvent::Rendered { chart: 0 },
            BackendEvent::Destroyed { chart: 0 },
            BackendEvent::Constructed {
                chart: 1,
                target: target.clone()
            },
            BackendEvent::Rendered { chart: 1 },
        ]
    );

    let chart = registry.get(&target).expect("bound chart");
    assert_eq!(chart.id(), 1);
    assert_eq!(chart.config().lookup("chart.height"), Some(&json!(400)));
}

#[test]
fn missing_target_is_a_silent_no_op_on_both_paths() {
    let (mut registry, backend, document) = build();
    let target = TargetId::new("#chart-not-yet-loaded");

    assert_eq!(
        registry.create_once(&document, &target, &config(250)),
        CreateOutcome::MissingTarget
    );
    assert_eq!(
        registry.create_or_replace(&document, &target, &config(250), None),
        CreateOutcome::MissingTarget
    );
    assert!(registry.get(&target).is_none());
    assert_eq!(backend.constructed(), 0);

    document.insert("#chart-not-yet-loaded");
    assert_eq!(
        registry.create_once(&document, &target, &config(250)),
        CreateOutcome::Created
    );
}

#[test]
fn replace_with_vanished_target_keeps_existing_chart() {
    let (mut registry, backend, document) = build();
    let target = TargetId::new("#chart-education");

    registry.create_or_replace(&document, &target, &config(250), None);
    document.remove("#chart-education");
    let outcome = registry.create_or_replace(&document, &target, &config(400), None);

    assert_eq!(outcome, CreateOutcome::MissingTarget);
    assert_eq!(backend.destroyed(), 0);
    let chart = registry.get(&target).expect("still bound");
    assert_eq!(chart.config().lookup("chart.height"), Some(&json!(250)));
}

#[test]
fn backend_failure_leaves_target_unbound() {
    let (mut registry, backend, document) = build();
    let target = TargetId::new("#chart-population");
    backend.fail_target("#chart-population");

    let outcome = registry.create_once(&document, &target, &config(250));

    assert_eq!(outcome, CreateOutcome::BackendFailed);
    assert!(!outcome.is_bound());
    assert!(!registry.is_bound(&target));
}

#[test]
fn dataset_tag_is_replaced_when_supplied_and_kept_otherwise() {
    let (mut registry, _backend, document) = build();
    let target = TargetId::new("#chart-population");

    registry.create_or_replace(&document, &target, &config(250), Some(DatasetTag::new("births")));
    assert_eq!(registry.dataset(&target), Some(&DatasetTag::new("births")));

    registry.create_or_replace(&document, &target, &config(250), None);
    assert_eq!(registry.dataset(&target), Some(&DatasetTag::new("births")));

    registry.create_or_replace(&document, &target, &config(250), Some(DatasetTag::new("deaths")));
    assert_eq!(registry.dataset(&target), Some(&DatasetTag::new("deaths")));

    let deaths = DatasetTag::new("deaths");
    assert_eq!(
        registry.targets_with_dataset(&deaths).collect::<Vec<_>>(),
        vec![&target]
    );
}

#[test]
fn series_toggle_flips_visibility_and_resets_on_replace() {
    let (mut registry, backend, document) = build();
    let target = TargetId::new("#chart-population");

    assert_eq!(registry.toggle_series(&target, "Spain"), None);

    registry.create_or_replace(&document, &target, &config(250), None);
    assert_eq!(registry.is_series_visible(&target, "Spain"), Some(true));
    assert_eq!(registry.toggle_series(&target, "Spain"), Some(false));
    assert!(registry.get(&target).expect("chart").is_series_hidden("Spain"));
    assert_eq!(registry.toggle_series(&target, "Spain"), Some(true));
    assert_eq!(registry.toggle_series(&target, "Spain"), Some(false));

    registry.create_or_replace(&document, &target, &config(250), None);
    assert_eq!(registry.is_series_visible(&target, "Spain"), Some(true));
    assert!(
        backend
            .events()
            .contains(&BackendEvent::SeriesShown {
                chart: 0,
                series: "Spain".to_owned()
            })
    );
}
