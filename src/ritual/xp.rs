use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::models::{OutcomeTier, Participant, XpDelta};
use crate::ritual::aggregate::TeacherSnapshot;
use crate::ritual::props::RitualProps;

pub const SKIP_ABOVE_TEACHER: &str = "skill above teacher";
pub const SKIP_TEACHER_NEGATIVE: &str = "teachers lose nothing";

/// Receives the XP changes of a finished ritual.
pub trait SkillLedger {
    fn learn(&mut self, actor: &str, skill: &str, delta: f64);
}

/// Ledger that just accumulates totals per actor and skill.
#[derive(Debug, Default, Clone)]
pub struct MemoryLedger {
    totals: BTreeMap<(String, String), f64>,
}

impl MemoryLedger {
    pub fn total(&self, actor: &str, skill: &str) -> f64 {
        self.totals
            .get(&(actor.to_string(), skill.to_string()))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

impl SkillLedger for MemoryLedger {
    fn learn(&mut self, actor: &str, skill: &str, delta: f64) {
        *self
            .totals
            .entry((actor.to_string(), skill.to_string()))
            .or_insert(0.0) += delta;
    }
}

fn tier_amount(tier: OutcomeTier, base: f64, props: &RitualProps) -> f64 {
    let xp = &props.xp;
    match tier {
        OutcomeTier::Terrible => -(base * xp.terrible_loss_fraction).abs(),
        OutcomeTier::Boring => -(base * xp.boring_loss_fraction).abs(),
        OutcomeTier::Fun => base * xp.fun_multiplier,
        OutcomeTier::Unforgettable => base * xp.unforgettable_multiplier,
    }
}

/// XP change for every participant after an outcome.
///
/// Deterministic in its inputs. The taught skill and reference level come from
/// the teacher snapshot; without a teacher the fallback skill is taught at level 0.
/// Students whose level is strictly above the teacher's get nothing, whatever
/// the tier.
pub fn apply_outcome(
    tier: OutcomeTier,
    participants: &[Participant],
    teacher: Option<&TeacherSnapshot>,
    props: &RitualProps,
) -> Vec<XpDelta> {
    let (skill, teacher_level) = match teacher {
        Some(t) => (t.theme_skill.as_str(), t.theme_level),
        None => (props.skill.as_str(), 0),
    };

    participants
        .iter()
        .map(|p| {
            let is_teacher = p.role.is_teacher();
            let multiplier = if is_teacher {
                props.xp.teacher_multiplier
            } else {
                props.xp.student_multiplier
            };
            let base = props.xp.base_xp * multiplier;

            let skipped = if is_teacher && !tier.is_positive() {
                Some(SKIP_TEACHER_NEGATIVE)
            } else if !is_teacher && p.skill_level(skill) > teacher_level {
                Some(SKIP_ABOVE_TEACHER)
            } else {
                None
            };

            XpDelta {
                participant: p.name.clone(),
                skill: skill.to_string(),
                amount: if skipped.is_some() {
                    0.0
                } else {
                    tier_amount(tier, base, props)
                },
                skipped,
            }
        })
        .collect()
}

/// Write non-skipped deltas to the ledger. Returns how many were written.
pub fn award_xp(deltas: &[XpDelta], ledger: &mut dyn SkillLedger) -> usize {
    let mut written = 0;
    for delta in deltas {
        if let Some(reason) = delta.skipped {
            if reason == SKIP_ABOVE_TEACHER {
                warn!(participant = %delta.participant, skill = %delta.skill, "no XP: {}", reason);
            }
            continue;
        }
        ledger.learn(&delta.participant, &delta.skill, delta.amount);
        info!(participant = %delta.participant, skill = %delta.skill, amount = delta.amount, "awarded XP");
        written += 1;
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn teacher() -> TeacherSnapshot {
        TeacherSnapshot {
            name: "Ada".to_string(),
            theme_skill: "Cooking".to_string(),
            theme_level: 10,
            social_level: 6,
            theme_known: true,
        }
    }

    fn roster() -> Vec<Participant> {
        vec![
            Participant::new("Ada", Role::Teacher).with_skill("Cooking", 10),
            Participant::new("Bo", Role::Student).with_skill("Cooking", 3),
            Participant::new("Cy", Role::Student).with_skill("Cooking", 12),
        ]
    }

    fn amount_of(deltas: &[XpDelta], name: &str) -> f64 {
        deltas.iter().find(|d| d.participant == name).unwrap().amount
    }

    #[test]
    fn test_fun_amounts() {
        let props = RitualProps::default();
        let deltas = apply_outcome(OutcomeTier::Fun, &roster(), Some(&teacher()), &props);
        assert!((amount_of(&deltas, "Ada") - 2400.0).abs() < 1e-9);
        assert!((amount_of(&deltas, "Bo") - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_unforgettable_doubles() {
        let props = RitualProps::default();
        let deltas =
            apply_outcome(OutcomeTier::Unforgettable, &roster(), Some(&teacher()), &props);
        assert!((amount_of(&deltas, "Bo") - 4000.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_tiers_spare_teacher() {
        let props = RitualProps::default();
        let deltas = apply_outcome(OutcomeTier::Terrible, &roster(), Some(&teacher()), &props);
        assert_eq!(amount_of(&deltas, "Ada"), 0.0);
        assert!((amount_of(&deltas, "Bo") - (-1000.0)).abs() < 1e-9);

        let deltas = apply_outcome(OutcomeTier::Boring, &roster(), Some(&teacher()), &props);
        assert!((amount_of(&deltas, "Bo") - (-400.0)).abs() < 1e-9);
    }

    #[test]
    fn test_inversion_guard_every_tier() {
        let props = RitualProps::default();
        for tier in OutcomeTier::ALL {
            let deltas = apply_outcome(tier, &roster(), Some(&teacher()), &props);
            let cy = deltas.iter().find(|d| d.participant == "Cy").unwrap();
            assert_eq!(cy.amount, 0.0);
            assert_eq!(cy.skipped, Some(SKIP_ABOVE_TEACHER));
        }
    }

    #[test]
    fn test_equal_skill_still_learns() {
        let props = RitualProps::default();
        let roster = vec![Participant::new("Di", Role::Student).with_skill("Cooking", 10)];
        let deltas = apply_outcome(OutcomeTier::Fun, &roster, Some(&teacher()), &props);
        assert!(deltas[0].skipped.is_none());
        assert!(deltas[0].amount > 0.0);
    }

    #[test]
    fn test_award_skips_guarded() {
        let props = RitualProps::default();
        let deltas = apply_outcome(OutcomeTier::Fun, &roster(), Some(&teacher()), &props);
        let mut ledger = MemoryLedger::default();
        assert_eq!(award_xp(&deltas, &mut ledger), 2);
        assert!((ledger.total("Bo", "Cooking") - 2000.0).abs() < 1e-9);
        assert_eq!(ledger.total("Cy", "Cooking"), 0.0);
    }
}
