//! Integration tests for compliance evaluation and max-ppm limits

use naa_clearance::{
    compliance, max_ppm, ElementSpec, Impurity, LimitKind, MaxPpmSettings,
};
use naa_data::{ActivationRecord, DecayRecord, LimitRecord, Store};
use naa_nuclide::Nuclide;
use naa_solver::Irradiation;
use rstest::{fixture, rstest};

const FLUX: f64 = 2.2e14;

const CO60_LAMBDA: f64 = 4.1666e-9;
const FE59_LAMBDA: f64 = 1.8030e-7;
const FE55_LAMBDA: f64 = 8.0040e-9;

fn capture(
    symbol: &str,
    mass: u32,
    daughter: &str,
    sigma: f64,
    lambda: f64,
    abundance: f64,
) -> ActivationRecord {
    ActivationRecord {
        symbol: symbol.to_string(),
        mass,
        daughter: daughter.to_string(),
        reaction: "ng".to_string(),
        sigma: Some(sigma),
        daughter_lambda: Some(lambda),
        abundance: Some(abundance),
    }
}

fn decay(parent: &str, daughter: &str, lambda: f64) -> DecayRecord {
    DecayRecord {
        parent: parent.to_string(),
        daughter: daughter.to_string(),
        branching: Some(1.0),
        parent_lambda: Some(lambda),
        daughter_lambda: None,
    }
}

fn limit(nuclide: &str, clearance: f64, exemption: f64) -> LimitRecord {
    LimitRecord {
        nuclide: nuclide.to_string(),
        clearance: Some(clearance),
        exemption: Some(exemption),
    }
}

#[fixture]
fn store() -> Store {
    Store::from_records(
        &[
            capture("Co", 59, "Co-60", 37.18, CO60_LAMBDA, 1.0),
            capture("Fe", 58, "Fe-59", 1.28, FE59_LAMBDA, 0.00282),
            capture("Fe", 54, "Fe-55", 2.25, FE55_LAMBDA, 0.05845),
        ],
        &[
            decay("Co-60", "Ni-60", CO60_LAMBDA),
            decay("Fe-59", "Co-59", FE59_LAMBDA),
            decay("Fe-55", "Mn-55", FE55_LAMBDA),
        ],
        &[
            limit("Co-60", 0.1, 10.0),
            limit("Fe-59", 1.0, 100.0),
            limit("Fe-55", 1000.0, 1.0e4),
        ],
    )
    .unwrap()
}

fn assert_close(a: f64, b: f64, rel: f64) {
    assert!(
        (a - b).abs() <= rel * a.abs().max(b.abs()),
        "{a} and {b} differ by more than {rel} relative"
    );
}

/// An iron impurity gives a finite index consistent with the verdict
#[rstest]
fn iron_impurity_index(store: Store) {
    let report = compliance(
        &store,
        &[Impurity::new("Fe", 100.0)],
        None,
        10.0,
        &Irradiation::days(FLUX, 10.0, 365.0),
        35_000.0,
        LimitKind::Clearance,
    );

    assert!(report.summary.sum_index.is_finite());
    assert!(report.summary.sum_index > 0.0);
    assert_eq!(
        report.summary.is_compliant,
        report.summary.sum_index <= 1.0
    );
    assert!(!report.rows.is_empty());
    // rows are ranked by limit fraction
    for pair in report.rows.windows(2) {
        assert!(pair[0].fraction >= pair[1].fraction);
    }
}

/// The sum index only ever grows with impurity concentration
#[rstest]
fn index_monotone_in_ppm(store: Store) {
    let scenario = Irradiation::days(FLUX, 10.0, 30.0);
    let index = |ppm: f64| {
        compliance(
            &store,
            &[Impurity::new("Fe", ppm)],
            None,
            10.0,
            &scenario,
            35_000.0,
            LimitKind::Clearance,
        )
        .summary
        .sum_index
    };

    let mut last = 0.0;
    for ppm in [10.0, 100.0, 1000.0, 10_000.0] {
        let next = index(ppm);
        assert!(next >= last);
        last = next;
    }
}

/// A single-nuclide inventory decays by exactly exp(−λt)
#[rstest]
fn single_nuclide_decay_law(store: Store) {
    let evaluate = |cool_days: f64| {
        compliance(
            &store,
            &[Impurity::new("Co", 1.0)],
            None,
            10.0,
            &Irradiation::days(FLUX, 10.0, cool_days),
            35_000.0,
            LimitKind::Clearance,
        )
        .summary
    };

    let hot = evaluate(0.0);
    let cooled = evaluate(30.0);
    let factor = (-CO60_LAMBDA * 30.0 * 86_400.0).exp();
    assert_close(cooled.sum_index, hot.sum_index * factor, 1.0e-9);
}

/// The cooling estimate solves the single-nuclide case exactly
#[rstest]
fn time_to_clear_round_trip(store: Store) {
    let evaluate = |cool_time: f64| {
        compliance(
            &store,
            &[Impurity::new("Co", 1.0)],
            None,
            10.0,
            &Irradiation::new(FLUX, 10.0 * 86_400.0, cool_time),
            35_000.0,
            LimitKind::Clearance,
        )
        .summary
    };

    let hot = evaluate(0.0);
    assert!(!hot.is_compliant);
    assert_eq!(hot.dominant, Some(Nuclide::new("Co", 60)));

    let days = hot.days_to_clear.unwrap();
    let cleared = evaluate(days * 86_400.0);
    assert_close(cleared.sum_index, 1.0, 1.0e-6);
}

/// Estimates past the hundred-year horizon read as never
#[rstest]
fn hopeless_inventory_never_clears(store: Store) {
    let report = compliance(
        &store,
        &[Impurity::new("Co", 10_000.0)],
        None,
        10.0,
        &Irradiation::days(FLUX, 10.0, 0.0),
        35_000.0,
        LimitKind::Clearance,
    );

    assert!(!report.summary.is_compliant);
    assert_eq!(report.summary.days_to_clear, None);
}

/// Already compliant samples need no cooling
#[rstest]
fn compliant_sample_clears_immediately(store: Store) {
    let report = compliance(
        &store,
        &[Impurity::new("Fe", 1.0e-6)],
        None,
        10.0,
        &Irradiation::days(FLUX, 10.0, 365.0),
        35_000.0,
        LimitKind::Clearance,
    );

    assert!(report.summary.is_compliant);
    assert_eq!(report.summary.days_to_clear, Some(0.0));
}

/// Unknown elements contribute nothing rather than failing the evaluation
#[rstest]
fn unknown_impurity_is_ignored(store: Store) {
    let report = compliance(
        &store,
        &[Impurity::new("Zz", 100.0), Impurity::new("Co", 1.0)],
        None,
        10.0,
        &Irradiation::days(FLUX, 10.0, 0.0),
        35_000.0,
        LimitKind::Clearance,
    );

    // only the cobalt shows up
    assert!(report
        .rows
        .iter()
        .all(|row| row.nuclide == Nuclide::new("Co", 60)));
}

/// The main element is just a 10⁶ ppm impurity
#[rstest]
fn main_element_is_full_mass(store: Store) {
    let scenario = Irradiation::days(FLUX, 10.0, 0.0);
    let as_main = compliance(
        &store,
        &[],
        Some("Co"),
        10.0,
        &scenario,
        35_000.0,
        LimitKind::Clearance,
    );
    let as_impurity = compliance(
        &store,
        &[Impurity::new("Co", 1.0e6)],
        None,
        10.0,
        &scenario,
        35_000.0,
        LimitKind::Clearance,
    );

    assert_close(
        as_main.summary.sum_index,
        as_impurity.summary.sum_index,
        1.0e-12,
    );
}

/// The two limit kinds are evaluated independently
#[rstest]
fn limit_kinds_are_independent(store: Store) {
    let scenario = Irradiation::days(FLUX, 10.0, 0.0);
    let run = |kind| {
        compliance(
            &store,
            &[Impurity::new("Co", 1.0)],
            None,
            10.0,
            &scenario,
            35_000.0,
            kind,
        )
        .summary
        .sum_index
    };

    // same inventory, limits 0.1 vs 10 Bq/g
    assert_close(
        run(LimitKind::Exemption),
        run(LimitKind::Clearance) * 0.1 / 10.0,
        1.0e-12,
    );
}

/// Feeding an element ceiling back through compliance lands on the limit
#[rstest]
fn max_ppm_round_trip(store: Store) {
    let scenario = Irradiation::days(FLUX, 14.0, 365.0);
    let settings = MaxPpmSettings {
        waste_mass_g: 35_000.0,
        sample_mass_g: 7.5,
        kind: LimitKind::Clearance,
    };

    let rows = max_ppm(&store, &[ElementSpec::new("Fe")], &scenario, &settings);
    assert!(!rows.is_empty());
    let ceiling = rows[0].element_max_ppm;

    let report = compliance(
        &store,
        &[Impurity::new("Fe", ceiling)],
        None,
        7.5,
        &scenario,
        35_000.0,
        LimitKind::Clearance,
    );
    assert_close(report.summary.sum_index, 1.0, 1.0e-6);
}

/// Shares within an element account for the whole index
#[rstest]
fn shares_sum_to_one_hundred(store: Store) {
    let scenario = Irradiation::days(FLUX, 14.0, 365.0);
    let settings = MaxPpmSettings {
        waste_mass_g: 35_000.0,
        sample_mass_g: 7.5,
        kind: LimitKind::Clearance,
    };

    let rows = max_ppm(&store, &[ElementSpec::new("Fe")], &scenario, &settings);
    let total: f64 = rows.iter().map(|row| row.share_pct).sum();
    assert_close(total, 100.0, 1.0e-6);

    // every row agrees on the limiting product and the element ceiling
    for row in &rows {
        assert_eq!(row.limiting, rows[0].limiting);
        assert_eq!(row.element_max_ppm, rows[0].element_max_ppm);
    }
    // shares are sorted within the element
    for pair in rows.windows(2) {
        assert!(pair[0].share_pct >= pair[1].share_pct);
    }
}

/// Halving the waste-stream fraction doubles the ceiling
#[rstest]
fn waste_fraction_scales_ceiling(store: Store) {
    let scenario = Irradiation::days(FLUX, 14.0, 365.0);
    let settings = MaxPpmSettings {
        waste_mass_g: 35_000.0,
        sample_mass_g: 7.5,
        kind: LimitKind::Clearance,
    };

    let full = max_ppm(&store, &[ElementSpec::new("Fe")], &scenario, &settings);
    let half = max_ppm(
        &store,
        &[ElementSpec::with_fractions("Fe", 1.0, 0.5)],
        &scenario,
        &settings,
    );

    assert_close(
        half[0].element_max_ppm,
        2.0 * full[0].element_max_ppm,
        1.0e-12,
    );
}

/// Inert elements are skipped rather than reported as unbounded
#[rstest]
fn inert_element_skipped(store: Store) {
    let scenario = Irradiation::days(FLUX, 14.0, 0.0);
    let settings = MaxPpmSettings {
        waste_mass_g: 35_000.0,
        sample_mass_g: 7.5,
        kind: LimitKind::Clearance,
    };

    let rows = max_ppm(&store, &[ElementSpec::new("Zz")], &scenario, &settings);
    assert!(rows.is_empty());
}
