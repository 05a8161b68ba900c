//! Engine integration tests against fixture providers: the output
//! invariants (altitude, azimuth, ordering, dedup, determinism) and the
//! failure-policy scenarios.

mod common;

use common::{
    equator_observer, fixture_epoch, star, zenith_ra_hours, FixtureCatalog, FixtureEphemeris,
    FixtureResolver,
};

use skywatch::skywatch_errors::SkywatchError;
use skywatch::visibility::{ObjectKind, VisibilityEngine};

fn empty_catalog() -> FixtureCatalog {
    FixtureCatalog::new(Vec::new())
}

#[test]
fn body_at_known_altitude_comes_back_exactly() {
    let ephemeris = FixtureEphemeris::new().with_body("mars", 45.0, 180.0);
    let engine = VisibilityEngine::new(ephemeris, empty_catalog());

    let report = engine
        .compute_visible(&equator_observer(), Some(fixture_epoch()))
        .unwrap();

    assert_eq!(report.objects.len(), 1);
    let mars = &report.objects[0];
    assert_eq!(mars.name, "Mars");
    assert_eq!(mars.kind, ObjectKind::Planet);
    assert_eq!(mars.raw_identifier, "mars");
    assert!((mars.altitude - 45.0).abs() < 5e-3);
    assert!((mars.azimuth - 180.0).abs() < 5e-3);
}

#[test]
fn everything_below_horizon_is_an_empty_report() {
    let ephemeris = FixtureEphemeris::new()
        .with_body("mars", -12.0, 90.0)
        .with_body("moon", -0.01, 250.0)
        .with_body("sun", 0.0, 10.0); // altitude exactly 0 is not visible

    let report = VisibilityEngine::new(ephemeris, empty_catalog())
        .compute_visible(&equator_observer(), Some(fixture_epoch()))
        .unwrap();

    assert!(report.is_empty());
    assert!(report.star_catalog_degraded.is_none());
}

#[test]
fn every_output_is_above_horizon_with_normalized_azimuth() {
    let ephemeris = FixtureEphemeris::new()
        .with_body("mercury", 3.0, 360.0) // normalizes to 0
        .with_body("venus", -3.0, 45.0)
        .with_body("moon", 62.5, 725.0) // normalizes to 5
        .with_body("mars", 0.0, 100.0);

    let report = VisibilityEngine::new(ephemeris, empty_catalog())
        .compute_visible(&equator_observer(), Some(fixture_epoch()))
        .unwrap();

    assert_eq!(report.objects.len(), 2);
    for object in &report.objects {
        assert!(object.altitude > 0.0);
        assert!((0.0..360.0).contains(&object.azimuth));
    }
    assert_eq!(report.objects[0].azimuth, 5.0);
}

#[test]
fn output_is_sorted_by_altitude_descending() {
    let ephemeris = FixtureEphemeris::new()
        .with_body("mercury", 10.0, 0.0)
        .with_body("venus", 80.0, 0.0)
        .with_body("mars", 40.0, 0.0)
        .with_body("moon", 55.5, 0.0);

    let report = VisibilityEngine::new(ephemeris, empty_catalog())
        .compute_visible(&equator_observer(), Some(fixture_epoch()))
        .unwrap();

    let names: Vec<&str> = report.objects.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, ["Venus", "Moon", "Mars", "Mercury"]);
    for pair in report.objects.windows(2) {
        assert!(pair[0].altitude >= pair[1].altitude);
    }
}

#[test]
fn ties_keep_encounter_order() {
    let ephemeris = FixtureEphemeris::new()
        .with_body("mercury", 30.0, 10.0)
        .with_body("venus", 30.0, 20.0)
        .with_body("mars", 30.0, 30.0);

    let report = VisibilityEngine::new(ephemeris, empty_catalog())
        .compute_visible(&equator_observer(), Some(fixture_epoch()))
        .unwrap();

    let names: Vec<&str> = report.objects.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, ["Mercury", "Venus", "Mars"]);
}

#[test]
fn failing_body_never_aborts_the_batch() {
    let ephemeris = FixtureEphemeris::new()
        .with_body("mars", 20.0, 90.0)
        .with_failing_body("vulcan")
        .with_body("moon", 50.0, 270.0);

    let report = VisibilityEngine::new(ephemeris, empty_catalog())
        .compute_visible(&equator_observer(), Some(fixture_epoch()))
        .unwrap();

    assert_eq!(report.objects.len(), 2);
}

#[test]
fn the_observers_own_body_is_skipped() {
    let ephemeris = FixtureEphemeris::new()
        .with_body("earth", 89.0, 0.0)
        .with_body("mars", 15.0, 120.0);

    let report = VisibilityEngine::new(ephemeris, empty_catalog())
        .compute_visible(&equator_observer(), Some(fixture_epoch()))
        .unwrap();

    assert_eq!(report.objects.len(), 1);
    assert_eq!(report.objects[0].name, "Mars");
}

#[test]
fn barycenter_keys_get_clean_display_names() {
    let ephemeris = FixtureEphemeris::new()
        .with_body("jupiter barycenter", 33.0, 200.0)
        .with_body("ceres", 21.0, 40.0);

    let report = VisibilityEngine::new(ephemeris, empty_catalog())
        .compute_visible(&equator_observer(), Some(fixture_epoch()))
        .unwrap();

    assert_eq!(report.objects[0].name, "Jupiter");
    assert_eq!(report.objects[0].kind, ObjectKind::Planet);
    assert_eq!(report.objects[0].raw_identifier, "jupiter barycenter");
    assert_eq!(report.objects[1].name, "Ceres");
    assert_eq!(report.objects[1].kind, ObjectKind::Other("Ceres".to_string()));
}

#[test]
fn magnitude_filter_is_strict() {
    let epoch = fixture_epoch();
    let ra = zenith_ra_hours(&epoch);
    // Both stars culminate near the zenith; only the bright one passes the
    // default 2.0 threshold.
    let catalog = FixtureCatalog::new(vec![
        star(1, ra, 0.0, 2.5, None),
        star(2, ra, 0.0, 1.5, None),
    ]);

    let report = VisibilityEngine::new(FixtureEphemeris::new(), catalog)
        .compute_visible(&equator_observer(), Some(epoch))
        .unwrap();

    assert_eq!(report.objects.len(), 1);
    assert_eq!(report.objects[0].raw_identifier, "HIP 2");
    assert!(report.objects[0].altitude > 80.0);
}

#[test]
fn magnitude_limit_is_configuration() {
    let epoch = fixture_epoch();
    let ra = zenith_ra_hours(&epoch);
    let catalog = FixtureCatalog::new(vec![
        star(1, ra, 0.0, 2.5, None),
        star(2, ra, 0.0, 1.5, None),
    ]);

    let report = VisibilityEngine::new(FixtureEphemeris::new(), catalog)
        .with_magnitude_limit(3.0)
        .compute_visible(&equator_observer(), Some(epoch))
        .unwrap();

    assert_eq!(report.objects.len(), 2);
}

#[test]
fn stars_below_horizon_are_dropped() {
    let epoch = fixture_epoch();
    let ra = zenith_ra_hours(&epoch);
    // Twelve hours away in right ascension puts the star under the feet of
    // the equatorial observer.
    let antipode = (ra + 12.0) % 24.0;
    let catalog = FixtureCatalog::new(vec![star(7, antipode, 0.0, 0.5, None)]);

    let report = VisibilityEngine::new(FixtureEphemeris::new(), catalog)
        .compute_visible(&equator_observer(), Some(epoch))
        .unwrap();

    assert!(report.is_empty());
}

#[test]
fn duplicate_name_kind_pairs_collapse_to_the_highest() {
    let epoch = fixture_epoch();
    let ra = zenith_ra_hours(&epoch);
    // Two catalog rows with the same HIP number resolve to the same
    // composite name; only the first after sorting survives.
    let catalog = FixtureCatalog::new(vec![
        star(99, ra, 0.0, 1.0, None),
        star(99, ra, 5.0, 1.2, None),
    ]);

    let report = VisibilityEngine::new(FixtureEphemeris::new(), catalog)
        .compute_visible(&equator_observer(), Some(epoch))
        .unwrap();

    assert_eq!(report.objects.len(), 1);
    assert_eq!(report.objects[0].name, "Common Name: None | Name: HIP 99");
    assert_eq!(report.objects[0].kind, ObjectKind::Star);
}

#[test]
fn dedup_is_idempotent() {
    let ephemeris = FixtureEphemeris::new()
        .with_body("mars", 40.0, 10.0)
        .with_body("moon", 20.0, 30.0);
    let engine = VisibilityEngine::new(ephemeris, empty_catalog());

    let first = engine
        .compute_visible(&equator_observer(), Some(fixture_epoch()))
        .unwrap();

    // Re-running the whole computation must not change the already
    // deduplicated, sorted output.
    let second = engine
        .compute_visible(&equator_observer(), Some(fixture_epoch()))
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn identical_inputs_give_identical_ordered_output() {
    let epoch = fixture_epoch();
    let ra = zenith_ra_hours(&epoch);
    let ephemeris = FixtureEphemeris::new()
        .with_body("mars", 40.0, 10.0)
        .with_body("venus", 65.0, 200.0);
    let catalog = FixtureCatalog::new(vec![
        star(10, ra, 0.0, 0.1, Some("Alpha")),
        star(11, ra + 1.0, 10.0, 1.0, Some("Beta")),
    ]);

    let engine = VisibilityEngine::new(ephemeris, catalog);
    let first = engine.compute_visible(&equator_observer(), Some(epoch)).unwrap();
    let second = engine.compute_visible(&equator_observer(), Some(epoch)).unwrap();

    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn catalog_failure_propagates_by_default() {
    let ephemeris = FixtureEphemeris::new().with_body("mars", 40.0, 10.0);
    let engine = VisibilityEngine::new(ephemeris, FixtureCatalog::failing("connection refused"));

    let err = engine
        .compute_visible(&equator_observer(), Some(fixture_epoch()))
        .unwrap_err();

    assert!(matches!(err, SkywatchError::CatalogUnavailable(_)));
}

#[test]
fn catalog_failure_can_degrade_to_bodies_only() {
    let ephemeris = FixtureEphemeris::new().with_body("mars", 40.0, 10.0);
    let engine = VisibilityEngine::new(ephemeris, FixtureCatalog::failing("connection refused"))
        .degraded_stars();

    let report = engine
        .compute_visible(&equator_observer(), Some(fixture_epoch()))
        .unwrap();

    assert_eq!(report.objects.len(), 1);
    assert_eq!(report.objects[0].name, "Mars");
    let reason = report.star_catalog_degraded.unwrap();
    assert!(reason.contains("connection refused"));
}

#[test]
fn catalog_proper_name_wins_over_the_resolver() {
    let epoch = fixture_epoch();
    let ra = zenith_ra_hours(&epoch);
    let catalog = FixtureCatalog::new(vec![star(32349, ra, 0.0, -1.44, Some("  Sirius  "))]);
    let resolver =
        FixtureResolver::new().with_description("HIP 32349", "SomethingElse is a star.");

    let report = VisibilityEngine::new(FixtureEphemeris::new(), catalog)
        .with_resolver(resolver)
        .compute_visible(&equator_observer(), Some(epoch))
        .unwrap();

    // The padded catalog name is trimmed and preferred.
    assert_eq!(
        report.objects[0].name,
        "Common Name: Sirius | Name: HIP 32349"
    );
}

#[test]
fn resolver_fallback_extracts_the_leading_capitalized_word() {
    let epoch = fixture_epoch();
    let ra = zenith_ra_hours(&epoch);
    let catalog = FixtureCatalog::new(vec![star(65378, ra, 0.0, 1.9, None)]);
    let resolver = FixtureResolver::new().with_description(
        "HIP 65378",
        "Mizar is a second-magnitude star in the handle of the Big Dipper.",
    );

    let report = VisibilityEngine::new(FixtureEphemeris::new(), catalog)
        .with_resolver(resolver)
        .compute_visible(&equator_observer(), Some(epoch))
        .unwrap();

    assert_eq!(
        report.objects[0].name,
        "Common Name: Mizar | Name: HIP 65378"
    );
}

#[test]
fn unresolvable_star_keeps_the_explicit_none_marker() {
    let epoch = fixture_epoch();
    let ra = zenith_ra_hours(&epoch);
    let catalog = FixtureCatalog::new(vec![star(424242, ra, 0.0, 1.0, None)]);

    let report = VisibilityEngine::new(FixtureEphemeris::new(), catalog)
        .compute_visible(&equator_observer(), Some(epoch))
        .unwrap();

    let object = &report.objects[0];
    assert_eq!(object.name, "Common Name: None | Name: HIP 424242");
    // The raw identifier stays recoverable either way.
    assert_eq!(object.raw_identifier, "HIP 424242");
}

#[test]
fn bodies_and_stars_merge_into_one_ranking() {
    let epoch = fixture_epoch();
    let ra = zenith_ra_hours(&epoch);
    let ephemeris = FixtureEphemeris::new().with_body("moon", 30.0, 100.0);
    let catalog = FixtureCatalog::new(vec![star(91262, ra, 0.0, 0.03, Some("Vega"))]);

    let report = VisibilityEngine::new(ephemeris, catalog)
        .compute_visible(&equator_observer(), Some(epoch))
        .unwrap();

    assert_eq!(report.objects.len(), 2);
    // The near-zenith star outranks the Moon at 30°.
    assert_eq!(report.objects[0].kind, ObjectKind::Star);
    assert_eq!(report.objects[1].kind, ObjectKind::Moon);
}
