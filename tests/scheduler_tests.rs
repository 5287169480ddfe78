use std::time::Duration;

use chapter_charts::api::{LazyTriggerScheduler, RegisterOutcome, SectionSpec, SectionState};
use chapter_charts::core::{ElementRect, SectionId, TriggerStart};
use chapter_charts::platform::{
    Document, HeadlessDocument, HeadlessTriggerHost, TriggerEvent, TriggerHost,
};

type Log = Vec<String>;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn recorder(label: &'static str) -> Box<dyn FnOnce(&mut Log)> {
    Box::new(move |log: &mut Log| log.push(label.to_owned()))
}

fn start() -> TriggerStart {
    "top 85%".parse().expect("valid trigger start")
}

#[test]
fn repeated_crossings_fire_the_initializer_once() {
    let document = HeadlessDocument::with_nodes(["#chapter-1"]);
    let mut host = HeadlessTriggerHost::new(800.0);
    let mut scheduler = LazyTriggerScheduler::<Log>::new();

    let outcome = scheduler.register(
        SectionSpec::scroll("chapter-1", "#chapter-1", start()).with_settle_delay(ms(100)),
        recorder("chapter-1"),
        &document,
        &mut host,
    );
    assert_eq!(outcome, RegisterOutcome::Armed);
    let handle = host
        .handle_for(document.query_one("#chapter-1").expect("node"))
        .expect("trigger registered");

    let fired: Vec<_> = (0..3)
        .filter_map(|_| scheduler.on_trigger(TriggerEvent::enter(handle), ms(10), &mut host))
        .collect();
    assert_eq!(fired, vec![SectionId::new("chapter-1")]);
    assert_eq!(
        scheduler.state(&SectionId::new("chapter-1")),
        Some(SectionState::Fired)
    );

    let mut log = Log::new();
    assert_eq!(scheduler.run_due(ms(50), &mut log), 0);
    assert_eq!(scheduler.run_due(ms(110), &mut log), 1);
    assert_eq!(scheduler.run_due(ms(500), &mut log), 0);
    assert_eq!(log, vec!["chapter-1"]);
}

#[test]
fn enter_back_counts_as_a_crossing_but_still_fires_once() {
    let document = HeadlessDocument::with_nodes(["#chapter-2"]);
    let mut host = HeadlessTriggerHost::new(800.0);
    let mut scheduler = LazyTriggerScheduler::<Log>::new();
    scheduler.register(
        SectionSpec::scroll("chapter-2", "#chapter-2", start()),
        recorder("chapter-2"),
        &document,
        &mut host,
    );
    let handle = host
        .handle_for(document.query_one("#chapter-2").expect("node"))
        .expect("trigger registered");

    assert!(
        scheduler
            .on_trigger(TriggerEvent::enter_back(handle), ms(0), &mut host)
            .is_some()
    );
    assert!(
        scheduler
            .on_trigger(TriggerEvent::enter(handle), ms(0), &mut host)
            .is_none()
    );

    let mut log = Log::new();
    scheduler.run_due(ms(0), &mut log);
    assert_eq!(log, vec!["chapter-2"]);
}

#[test]
fn absent_trigger_node_skips_the_section() {
    let document = HeadlessDocument::new();
    let mut host = HeadlessTriggerHost::new(800.0);
    let mut scheduler = LazyTriggerScheduler::<Log>::new();

    let outcome = scheduler.register(
        SectionSpec::scroll("chapter-9", "#chapter-9", start()),
        recorder("chapter-9"),
        &document,
        &mut host,
    );

    assert_eq!(outcome, RegisterOutcome::Skipped);
    assert!(scheduler.is_empty());
    assert_eq!(host.registered_total(), 0);
    assert_eq!(scheduler.state(&SectionId::new("chapter-9")), None);
}

#[test]
fn sections_fire_in_scroll_order_not_registration_order() {
    let document = HeadlessDocument::new();
    let first_node = document.insert("#chapter-1");
    let second_node = document.insert("#chapter-2");
    let mut host = HeadlessTriggerHost::new(1_000.0);
    host.set_layout(first_node, ElementRect::new(3_000.0, 600.0));
    host.set_layout(second_node, ElementRect::new(1_200.0, 600.0));

    let mut scheduler = LazyTriggerScheduler::<Log>::new();
    for (id, selector) in [("chapter-1", "#chapter-1"), ("chapter-2", "#chapter-2")] {
        scheduler.register(
            SectionSpec::scroll(id, selector, start()).with_settle_delay(ms(100)),
            recorder(id),
            &document,
            &mut host,
        );
    }

    let mut log = Log::new();
    for (step, scroll_y) in [(0u64, 0.0), (1, 500.0), (2, 2_500.0), (3, 100.0), (4, 2_600.0)] {
        let now = ms(step * 200);
        for event in host.scroll_to(scroll_y) {
            scheduler.on_trigger(event, now, &mut host);
        }
        scheduler.run_due(now, &mut log);
    }
    scheduler.run_due(ms(10_000), &mut log);

    assert_eq!(log, vec!["chapter-2", "chapter-1"]);
    assert_eq!(host.active_triggers(), 0);
}

#[test]
fn one_fast_scroll_queues_several_sections_each_once() {
    let document = HeadlessDocument::new();
    let nodes: Vec<_> = ["#a", "#b", "#c"]
        .into_iter()
        .map(|selector| document.insert(selector))
        .collect();
    let mut host = HeadlessTriggerHost::new(900.0);
    for (index, node) in nodes.iter().enumerate() {
        host.set_layout(*node, ElementRect::new(1_000.0 + 800.0 * index as f64, 500.0));
    }

    let mut scheduler = LazyTriggerScheduler::<Log>::new();
    for (id, selector) in [("a", "#a"), ("b", "#b"), ("c", "#c")] {
        scheduler.register(
            SectionSpec::scroll(id, selector, start()).with_settle_delay(ms(100)),
            recorder(id),
            &document,
            &mut host,
        );
    }

    let mut events = host.scroll_to(5_000.0);
    assert_eq!(events.len(), 3);
    events.extend(events.clone());

    let fired: Vec<_> = events
        .into_iter()
        .filter_map(|event| scheduler.on_trigger(event, ms(0), &mut host))
        .collect();
    assert_eq!(fired.len(), 3);
    assert_eq!(scheduler.pending_count(), 3);
    assert_eq!(scheduler.next_due(), Some(ms(100)));

    let mut log = Log::new();
    assert_eq!(scheduler.run_due(ms(100), &mut log), 3);
    assert_eq!(log, vec!["a", "b", "c"]);
}

#[test]
fn manual_sections_fire_only_through_trigger_section() {
    let document = HeadlessDocument::new();
    let mut host = HeadlessTriggerHost::new(800.0);
    let mut scheduler = LazyTriggerScheduler::<Log>::new();
    let id = SectionId::new("dashboard:birth");

    assert_eq!(
        scheduler.register(
            SectionSpec::manual(id.clone()).with_settle_delay(ms(300)),
            recorder("birth"),
            &document,
            &mut host,
        ),
        RegisterOutcome::Armed
    );
    assert_eq!(host.registered_total(), 0);

    assert!(scheduler.trigger_section(&id, ms(0), &mut host));
    assert!(!scheduler.trigger_section(&id, ms(50), &mut host));
    assert!(scheduler.is_pending(&id));

    let mut log = Log::new();
    assert_eq!(scheduler.run_due(ms(299), &mut log), 0);
    assert_eq!(scheduler.run_due(ms(300), &mut log), 1);
    assert!(!scheduler.is_pending(&id));
    assert_eq!(log, vec!["birth"]);
}

#[test]
fn duplicate_registration_keeps_the_first_initializer() {
    let document = HeadlessDocument::new();
    let mut host = HeadlessTriggerHost::new(800.0);
    let mut scheduler = LazyTriggerScheduler::<Log>::new();

    scheduler.register(SectionSpec::manual("x"), recorder("first"), &document, &mut host);
    let outcome =
        scheduler.register(SectionSpec::manual("x"), recorder("second"), &document, &mut host);
    assert_eq!(outcome, RegisterOutcome::Duplicate);

    scheduler.trigger_section(&SectionId::new("x"), ms(0), &mut host);
    let mut log = Log::new();
    scheduler.run_due(ms(0), &mut log);
    assert_eq!(log, vec!["first"]);
}

#[test]
fn fired_section_releases_its_host_trigger() {
    let document = HeadlessDocument::with_nodes(["#chapter-3"]);
    let mut host = HeadlessTriggerHost::new(800.0);
    let mut scheduler = LazyTriggerScheduler::<Log>::new();
    scheduler.register(
        SectionSpec::scroll("chapter-3", "#chapter-3", start()),
        recorder("chapter-3"),
        &document,
        &mut host,
    );
    let handle = host
        .handle_for(document.query_one("#chapter-3").expect("node"))
        .expect("trigger registered");
    assert_eq!(host.active_triggers(), 1);

    scheduler.on_trigger(TriggerEvent::enter(handle), ms(0), &mut host);
    assert_eq!(host.active_triggers(), 0);

    host.release_trigger(handle);
    assert!(
        scheduler
            .on_trigger(TriggerEvent::enter(handle), ms(0), &mut host)
            .is_none()
    );
}
