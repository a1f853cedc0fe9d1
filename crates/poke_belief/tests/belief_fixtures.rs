//! Data-driven belief tests.
//!
//! Uses `libtest-mimic` to generate one test per fixture case, so a single
//! case can be run with `cargo test --test belief_fixtures -- ferrothorn`.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

use libtest_mimic::{Arguments, Failed, Trial};
use serde::Deserialize;

use poke_belief::belief::{BeliefModel, Observation};
use poke_belief::catalogue::BuildCatalogue;

const FIXTURE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/belief/observations.json");

// ============================================================================
// Fixture Data Structures
// ============================================================================

#[derive(Deserialize)]
struct BeliefFixture {
    meta: FixtureMeta,
    catalogue: serde_json::Value,
    cases: Vec<BeliefCase>,
}

#[derive(Deserialize)]
struct FixtureMeta {
    #[allow(dead_code)]
    description: Option<String>,
    tolerance: f64,
}

#[derive(Deserialize, Debug, Clone)]
struct BeliefCase {
    id: String,
    species: String,
    observations: Vec<Observation>,
    expected: Expected,
}

#[derive(Deserialize, Debug, Clone, Default)]
struct Expected {
    #[serde(default)]
    conflict: bool,
    most_likely_role: Option<String>,
    roles: Option<BTreeMap<String, f64>>,
    items: Option<BTreeMap<String, f64>>,
    entropy: Option<f64>,
    #[serde(default)]
    absent_moves: Vec<String>,
    #[serde(default)]
    move_usage: BTreeMap<String, u32>,
}

// ============================================================================
// Test Runner
// ============================================================================

fn check_close(what: &str, actual: f64, expected: f64, tolerance: f64) -> Result<(), String> {
    if (actual - expected).abs() > tolerance {
        return Err(format!("{}: expected {}, got {}", what, expected, actual));
    }
    Ok(())
}

fn run_belief_case(catalogue: Arc<BuildCatalogue>, case: &BeliefCase, tolerance: f64) -> Result<(), String> {
    let mut model = BeliefModel::new(catalogue);
    let result = model.update_many(&case.species, case.observations.iter().cloned());

    match (&result, case.expected.conflict) {
        (Err(err), false) => return Err(format!("unexpected error: {}", err)),
        (Ok(()), true) => return Err("expected a reveal conflict".to_string()),
        _ => {}
    }

    let belief = model.get_or_create_belief(&case.species);
    let expected = &case.expected;

    if let Some(role) = &expected.most_likely_role {
        let (actual, _) = belief
            .most_likely_role()
            .ok_or_else(|| "belief has no roles".to_string())?;
        if actual != role {
            return Err(format!("most likely role: expected {}, got {}", role, actual));
        }
    }

    if let Some(roles) = &expected.roles {
        let actual = belief.role_distribution();
        if roles.is_empty() && !actual.is_empty() {
            return Err(format!("expected no roles, got {:?}", actual));
        }
        for (role, p) in roles {
            let got = actual.get(role).copied().ok_or_else(|| format!("missing role {}", role))?;
            check_close(&format!("role {}", role), got, *p, tolerance)?;
        }
    }

    for (mv, count) in &expected.move_usage {
        let got = belief.move_usage(mv);
        if got != *count {
            return Err(format!("usage of {}: expected {}, got {}", mv, count, got));
        }
    }

    if let Some(entropy) = expected.entropy {
        check_close("entropy", belief.role_entropy(), entropy, tolerance)?;
    }

    if let Some(items) = &expected.items {
        let actual = belief.item_probs();
        for (item, p) in items {
            let got = actual.get(item).copied().unwrap_or(0.0);
            check_close(&format!("item {}", item), got, *p, tolerance)?;
        }
    }

    let moves = belief.unrevealed_move_probs();
    for mv in &expected.absent_moves {
        if moves.contains_key(mv) {
            return Err(format!("observed move {} still in the unrevealed distribution", mv));
        }
    }
    if !moves.is_empty() {
        check_close("unrevealed move mass", moves.values().sum(), 1.0, tolerance)?;
    }

    Ok(())
}

// ============================================================================
// Harness
// ============================================================================

fn main() {
    let args = Arguments::from_args();

    let file = File::open(FIXTURE_PATH).unwrap_or_else(|e| panic!("failed to open {}: {}", FIXTURE_PATH, e));
    let fixture: BeliefFixture =
        serde_json::from_reader(BufReader::new(file)).expect("failed to parse observations.json");
    let catalogue = Arc::new(
        BuildCatalogue::from_json_str(&fixture.catalogue.to_string()).expect("fixture catalogue is valid"),
    );
    let tolerance = fixture.meta.tolerance;

    let tests: Vec<Trial> = fixture
        .cases
        .into_iter()
        .map(|case| {
            let test_name = format!("belief::{}", sanitize_name(&case.id));
            let catalogue = Arc::clone(&catalogue);
            Trial::test(test_name, move || {
                run_belief_case(catalogue, &case, tolerance).map_err(Failed::from)
            })
        })
        .collect();

    libtest_mimic::run(&args, tests).exit();
}

/// Sanitize test name for use as a filterable test identifier
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}
