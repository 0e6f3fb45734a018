#[macro_use]
extern crate assert_float_eq;

use rand::SeedableRng;
use rand::rngs::StdRng;

use stewpot::models::{OutcomeTier, Participant, Role};
use stewpot::ritual::factors::seating_offset;
use stewpot::ritual::{
    MemoryLedger, OutcomeTable, RitualInputs, RitualProps, apply_outcome, award_xp, evaluate,
};

const EPS: f64 = 1e-9;

fn classroom() -> Vec<Participant> {
    vec![
        Participant::new("Ada", Role::Teacher)
            .with_skill("Cooking", 10)
            .with_skill("Social", 10),
        Participant::new("Bo", Role::Student).with_skill("Cooking", 2),
        Participant::new("Cy", Role::Student).with_skill("Cooking", 14),
        Participant::new("Di", Role::Student).with_skill("Cooking", 10),
    ]
}

#[test]
fn test_seating_bounds() {
    assert_float_absolute_eq!(seating_offset(0, 10), -0.4, EPS);
    assert_float_absolute_eq!(seating_offset(10, 10), 0.1, EPS);
}

#[test]
fn test_inversion_guard_across_tiers() {
    let props = RitualProps::default();
    let roster = classroom();
    let inputs = RitualInputs::from_roster(50.0, 4, 0, &roster, &props);

    for tier in OutcomeTier::ALL {
        let deltas = apply_outcome(tier, &roster, inputs.teacher.as_ref(), &props);
        let cy = deltas.iter().find(|d| d.participant == "Cy").unwrap();
        assert_eq!(cy.amount, 0.0, "tier {}", tier.label());

        let di = deltas.iter().find(|d| d.participant == "Di").unwrap();
        assert!(di.skipped.is_none());
    }
}

#[test]
fn test_breakdown_for_classroom() {
    let props = RitualProps::default();
    let roster = classroom();
    let inputs = RitualInputs::from_roster(70.0, 2, 1, &roster, &props);
    let breakdown = evaluate(&inputs, &props);

    let offset = |label: &str| {
        breakdown
            .factors
            .iter()
            .find(|f| f.label == label)
            .unwrap()
            .quality_offset
    };
    assert_float_absolute_eq!(offset("Impressiveness"), 0.2, EPS);
    assert_float_absolute_eq!(offset("Course theme"), 0.14, EPS);
    assert_float_absolute_eq!(offset("Lecturer social"), 0.1, EPS);
    assert_float_absolute_eq!(offset("Attendance"), -0.075, EPS);
    assert_float_absolute_eq!(offset("Seated attendees"), -0.15, EPS);
    assert_float_absolute_eq!(offset("Blackboards"), 0.1, EPS);
    assert_float_absolute_eq!(breakdown.quality, 0.315, EPS);
    assert!(!breakdown.exceeds_bounds());
}

#[test]
fn test_unbounded_sum_is_flagged_not_fixed() {
    let props = RitualProps::default();
    let roster = vec![
        Participant::new("Ada", Role::Teacher)
            .with_skill("Cooking", 20)
            .with_skill("Social", 20),
        Participant::new("Bo", Role::Student),
    ];
    let inputs = RitualInputs::from_roster(200.0, 2, 3, &roster, &props);
    let breakdown = evaluate(&inputs, &props);

    assert!(breakdown.exceeds_bounds());
    assert!(breakdown.raw_quality > 2.0);
    assert_eq!(breakdown.quality, 1.0);
}

#[test]
fn test_roll_award_end_to_end() {
    let props = RitualProps::default();
    let roster = classroom();
    let inputs = RitualInputs::from_roster(120.0, 4, 3, &roster, &props);
    let breakdown = evaluate(&inputs, &props);

    let mut rng = StdRng::seed_from_u64(11);
    let tier = OutcomeTable::default()
        .select(breakdown.quality, &mut rng)
        .unwrap();
    // Quality is clamped to 1, so only positive tiers carry weight.
    assert!(tier.is_positive());

    let deltas = apply_outcome(tier, &roster, inputs.teacher.as_ref(), &props);
    let mut ledger = MemoryLedger::default();
    assert_eq!(award_xp(&deltas, &mut ledger), 3);
    assert!(ledger.total("Ada", "Cooking") > ledger.total("Bo", "Cooking"));
    assert_eq!(ledger.total("Cy", "Cooking"), 0.0);
}
