use gltf_testbench::config::{OverlayConfig, PlatformCaps};
use gltf_testbench::events::LoaderEvent;
use gltf_testbench::overlay::{scale_factor, Overlay, OverlayLayout, LOCAL_FILE_SCHEME};
use gltf_testbench::sample_set::{SampleSet, TestEntry};
use gltf_testbench::stopwatch::Stopwatch;

fn desktop_caps() -> PlatformCaps {
    PlatformCaps { local_file_scheme: true, native_file_dialog: false, suppress_overlay: false }
}

fn overlay_with(caps: PlatformCaps) -> Overlay {
    Overlay::new(caps, OverlayLayout::scaled(&OverlayConfig::default(), 1.0))
}

fn set(name: &str, remote: &[(&str, &str)], local: &[(&str, &str)]) -> SampleSet {
    SampleSet::from_entries(
        name,
        remote.iter().map(|(label, locator)| TestEntry::new(*label, *locator)).collect(),
        local.iter().map(|(label, locator)| TestEntry::new(*label, *locator)).collect(),
    )
}

#[test]
fn scale_factor_is_floor_of_dpi_over_hundred_with_minimum_one() {
    for (dpi, expected) in [(0.0, 1.0), (72.0, 1.0), (96.0, 1.0), (150.0, 1.0), (200.0, 2.0), (320.0, 3.0)]
    {
        assert_eq!(scale_factor(dpi), expected, "dpi {dpi}");
        assert!(scale_factor(dpi) >= 1.0);
    }
}

#[test]
fn population_totals_sum_over_sample_sets() {
    let mut overlay = overlay_with(desktop_caps());
    overlay.append_sample_set(&set(
        "a",
        &[("Duck", "http://x/duck.glb"), ("Box", "http://x/box.glb")],
        &[("Duck", "assets/duck.glb")],
    ));
    overlay.append_sample_set(&set("b", &[("Helmet", "http://x/helmet.glb")], &[
        ("Helmet", "assets/helmet.glb"),
        ("Lantern", "assets/lantern.glb"),
    ]));

    assert_eq!(overlay.entries().len(), 3);
    assert_eq!(overlay.entries_local().len(), 3);
}

#[test]
fn local_rewrite_prefixes_scheme_exactly_once_and_keeps_labels() {
    let mut overlay = overlay_with(desktop_caps());
    overlay.append_sample_set(&set("a", &[], &[
        ("Duck", "assets/duck.glb"),
        ("Prefixed", "file://assets/box.glb"),
    ]));

    let locals = overlay.entries_local();
    assert_eq!(locals[0], TestEntry::new("Duck", "file://assets/duck.glb"));
    assert_eq!(locals[1], TestEntry::new("Prefixed", "file://assets/box.glb"));
    for entry in locals {
        assert_eq!(entry.locator.matches(LOCAL_FILE_SCHEME).count(), 1);
    }
}

#[test]
fn local_entries_stay_verbatim_without_the_rewrite_cap() {
    let mut overlay =
        overlay_with(PlatformCaps { local_file_scheme: false, ..desktop_caps() });
    overlay.append_sample_set(&set("a", &[], &[("Duck", "assets/duck.glb")]));
    assert_eq!(overlay.entries_local(), &[TestEntry::new("Duck", "assets/duck.glb")]);
}

#[test]
fn duck_sample_keeps_remote_and_rewrites_local() {
    let mut overlay = overlay_with(desktop_caps());
    overlay.append_sample_set(&set(
        "S",
        &[("Duck", "http://x/duck.glb")],
        &[("Duck", "assets/duck.glb")],
    ));
    assert_eq!(overlay.entries()[0], TestEntry::new("Duck", "http://x/duck.glb"));
    assert_eq!(overlay.entries_local()[0], TestEntry::new("Duck", "file://assets/duck.glb"));
}

#[test]
fn mode_toggle_switches_lists_without_mutation() {
    let mut overlay = overlay_with(desktop_caps());
    overlay.append_sample_set(&set(
        "a",
        &[("Duck", "http://x/duck.glb")],
        &[("Duck", "assets/duck.glb")],
    ));
    let remote_before = overlay.entries().to_vec();
    let local_before = overlay.entries_local().to_vec();

    assert!(!overlay.local_mode());
    overlay.set_local_mode(true);
    assert!(overlay.local_mode());
    overlay.set_local_mode(false);

    assert_eq!(overlay.entries(), remote_before.as_slice());
    assert_eq!(overlay.entries_local(), local_before.as_slice());
}

#[test]
fn activating_an_entry_hides_the_menu_and_yields_its_locator() {
    let mut overlay = overlay_with(desktop_caps());
    overlay.append_sample_set(&set(
        "a",
        &[("Duck", "http://x/duck.glb"), ("Box", "http://x/box.glb")],
        &[],
    ));

    assert!(overlay.menu_visible());
    let locator = overlay.activate_entry(1);
    assert_eq!(locator.as_deref(), Some("http://x/box.glb"));
    assert!(!overlay.menu_visible());
}

#[test]
fn activating_a_local_entry_uses_the_local_list() {
    let mut overlay = overlay_with(desktop_caps());
    overlay.append_sample_set(&set(
        "a",
        &[("Duck", "http://x/duck.glb")],
        &[("Duck", "assets/duck.glb")],
    ));
    overlay.set_local_mode(true);
    assert_eq!(overlay.activate_entry(0).as_deref(), Some("file://assets/duck.glb"));
}

#[test]
fn out_of_range_activation_issues_nothing_and_keeps_the_menu() {
    let mut overlay = overlay_with(desktop_caps());
    assert_eq!(overlay.activate_entry(0), None);
    assert!(overlay.menu_visible());
}

#[test]
fn loading_end_always_shows_the_menu() {
    let mut overlay = overlay_with(desktop_caps());
    let mut stopwatch = Stopwatch::new();

    overlay.append_sample_set(&set("a", &[("Duck", "http://x/duck.glb")], &[]));
    overlay.activate_entry(0);
    assert!(!overlay.menu_visible());

    overlay.handle_event(&LoaderEvent::LoadingEnd, &mut stopwatch);
    assert!(overlay.menu_visible());

    // Already visible: stays visible.
    overlay.handle_event(&LoaderEvent::LoadingEnd, &mut stopwatch);
    assert!(overlay.menu_visible());
}

#[test]
fn loader_events_drive_the_stopwatch_and_url_field() {
    let mut overlay = overlay_with(desktop_caps());
    let mut stopwatch = Stopwatch::new();

    overlay.handle_event(
        &LoaderEvent::UrlChanged { locator: "http://x/duck.glb".to_string() },
        &mut stopwatch,
    );
    assert!(stopwatch.is_running());
    assert_eq!(overlay.url_field(), "http://x/duck.glb");

    overlay.handle_event(&LoaderEvent::LoadingBegin, &mut stopwatch);
    assert!(stopwatch.is_running());

    overlay.handle_event(&LoaderEvent::LoadingEnd, &mut stopwatch);
    assert!(!stopwatch.is_running());
    assert!(stopwatch.current().is_some(), "final reading survives the stop");
}

#[test]
fn suppressed_overlay_starts_hidden_and_renders_no_widgets() {
    let mut overlay = overlay_with(PlatformCaps { suppress_overlay: true, ..desktop_caps() });
    assert!(!overlay.menu_visible());

    let ctx = egui::Context::default();
    let mut actions = Default::default();
    let _ = ctx.run(egui::RawInput::default(), |ctx| {
        actions = overlay.ui(ctx);
    });
    assert_eq!(actions, Default::default());
    assert!(!overlay.menu_visible());
}

#[test]
fn visible_overlay_runs_an_egui_frame_without_requests() {
    let mut overlay = overlay_with(desktop_caps());
    overlay.append_sample_set(&set(
        "a",
        &[("Duck", "http://x/duck.glb")],
        &[("Duck", "assets/duck.glb")],
    ));

    let ctx = egui::Context::default();
    let mut actions = Default::default();
    for _ in 0..2 {
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            actions = overlay.ui(ctx);
        });
    }
    assert_eq!(actions, Default::default(), "no interaction, no load request");
    assert!(overlay.menu_visible());
}
