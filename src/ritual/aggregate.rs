use serde::{Deserialize, Serialize};

use crate::models::{Participant, QualityFactor};
use crate::ritual::factors;
use crate::ritual::props::{BASELINE_QUALITY, MAX_QUALITY, MIN_QUALITY, RitualProps};

/// What the quality factors need to know about the ritual's teacher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherSnapshot {
    pub name: String,
    pub theme_skill: String,
    pub theme_level: i32,
    pub social_level: i32,
    /// False when the teacher has no skill besides Social; the course theme
    /// factor is then left out and the theme falls back to the default skill.
    #[serde(default = "theme_known_default")]
    pub theme_known: bool,
}

fn theme_known_default() -> bool {
    true
}

impl TeacherSnapshot {
    /// Pick the teacher from a roster: first Teacher, then Leader, then Speaker.
    ///
    /// The theme is the teacher's best non-Social skill, falling back to the
    /// configured default skill.
    pub fn from_roster(roster: &[Participant], props: &RitualProps) -> Option<Self> {
        let teacher = roster
            .iter()
            .filter_map(|p| p.role.teacher_priority().map(|prio| (prio, p)))
            .min_by_key(|(prio, _)| *prio)
            .map(|(_, p)| p)?;

        let (theme_skill, theme_level, theme_known) = match teacher.best_theme_skill() {
            Some((skill, level)) => (skill.to_string(), level, true),
            None => (props.skill.clone(), teacher.skill_level(&props.skill), false),
        };

        Some(Self {
            name: teacher.name.clone(),
            theme_skill,
            theme_level,
            social_level: teacher.skill_level(crate::models::SOCIAL_SKILL),
            theme_known,
        })
    }
}

/// Host-side measurements a ritual is scored from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RitualInputs {
    pub room_impressiveness: f64,
    pub participant_count: u32,
    pub seated_count: u32,
    #[serde(default)]
    pub decorative_prop_count: u32,
    #[serde(default)]
    pub teacher: Option<TeacherSnapshot>,
}

impl RitualInputs {
    /// Derive inputs from a full roster. Seated count is limited by the seats
    /// available near the lectern.
    pub fn from_roster(
        room_impressiveness: f64,
        seats_available: u32,
        decorative_prop_count: u32,
        roster: &[Participant],
        props: &RitualProps,
    ) -> Self {
        let participant_count = roster.len() as u32;
        Self {
            room_impressiveness,
            participant_count,
            seated_count: seats_available.min(participant_count),
            decorative_prop_count,
            teacher: TeacherSnapshot::from_roster(roster, props),
        }
    }
}

/// Every factor plus the summed and clamped totals.
#[derive(Debug, Clone)]
pub struct QualityBreakdown {
    pub factors: Vec<QualityFactor>,
    /// Baseline plus the plain sum of offsets, before clamping.
    pub raw_quality: f64,
    pub quality: f64,
}

impl QualityBreakdown {
    /// The unclamped sum left the valid quality range.
    pub fn exceeds_bounds(&self) -> bool {
        !(MIN_QUALITY..=MAX_QUALITY).contains(&self.raw_quality)
    }
}

/// Build the breakdown lines. Skill factors are only present with a teacher,
/// and the course theme only when the teacher has a non-Social skill.
pub fn quality_factors(inputs: &RitualInputs, props: &RitualProps) -> Vec<QualityFactor> {
    let mut out = vec![factors::impressiveness_factor(inputs.room_impressiveness, props)];
    if let Some(teacher) = &inputs.teacher {
        if teacher.theme_known {
            out.push(factors::theme_factor(
                &teacher.theme_skill,
                teacher.theme_level,
                props,
            ));
        }
        out.push(factors::social_factor(teacher.social_level, props));
    }
    out.push(factors::attendance_factor(inputs.participant_count, props));
    out.push(factors::seating_factor(
        inputs.seated_count,
        inputs.participant_count,
    ));
    out.push(factors::prop_factor(inputs.decorative_prop_count, props));
    out
}

/// Sum of offsets. No normalization; order does not matter.
pub fn aggregate(offsets: &[f64]) -> f64 {
    offsets.iter().sum()
}

/// Baseline plus summed offsets, clamped to the valid quality range.
pub fn outcome_quality(offsets: &[f64]) -> f64 {
    (BASELINE_QUALITY + aggregate(offsets)).clamp(MIN_QUALITY, MAX_QUALITY)
}

pub fn evaluate(inputs: &RitualInputs, props: &RitualProps) -> QualityBreakdown {
    let factors = quality_factors(inputs, props);
    let offsets: Vec<f64> = factors.iter().map(|f| f.quality_offset).collect();
    let raw_quality = BASELINE_QUALITY + aggregate(&offsets);
    QualityBreakdown {
        factors,
        raw_quality,
        quality: outcome_quality(&offsets),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn roster() -> Vec<Participant> {
        vec![
            Participant::new("Bo", Role::Student).with_skill("Cooking", 4),
            Participant::new("Lin", Role::Speaker)
                .with_skill("Cooking", 11)
                .with_skill("Social", 10),
            Participant::new("Ada", Role::Teacher)
                .with_skill("Plants", 12)
                .with_skill("Social", 9),
        ]
    }

    #[test]
    fn test_teacher_priority() {
        let teacher = TeacherSnapshot::from_roster(&roster(), &RitualProps::default()).unwrap();
        assert_eq!(teacher.name, "Ada");
        assert_eq!(teacher.theme_skill, "Plants");
        assert_eq!(teacher.theme_level, 12);
        assert_eq!(teacher.social_level, 9);
    }

    #[test]
    fn test_teacher_without_theme_uses_default_skill() {
        let props = RitualProps::default();
        let roster = vec![Participant::new("Ada", Role::Leader).with_skill("Social", 12)];
        let teacher = TeacherSnapshot::from_roster(&roster, &props).unwrap();
        assert_eq!(teacher.theme_skill, props.skill);
        assert_eq!(teacher.theme_level, 0);
        assert!(!teacher.theme_known);
    }

    #[test]
    fn test_social_only_teacher_has_no_theme_factor() {
        let props = RitualProps::default();
        let roster = vec![
            Participant::new("Ada", Role::Teacher).with_skill("Social", 12),
            Participant::new("Bo", Role::Student),
        ];
        let inputs = RitualInputs::from_roster(50.0, 2, 0, &roster, &props);
        let factors = quality_factors(&inputs, &props);
        assert!(factors.iter().all(|f| f.label != "Course theme"));
        assert!(factors.iter().any(|f| f.label == "Lecturer social"));
        assert_eq!(factors.len(), 5);
    }

    #[test]
    fn test_no_teacher_no_skill_factors() {
        let inputs = RitualInputs {
            room_impressiveness: 50.0,
            participant_count: 2,
            seated_count: 2,
            decorative_prop_count: 0,
            teacher: None,
        };
        let factors = quality_factors(&inputs, &RitualProps::default());
        assert_eq!(factors.len(), 4);
        assert!(factors.iter().all(|f| f.label != "Course theme"));
    }

    #[test]
    fn test_aggregate_is_order_insensitive() {
        let a = aggregate(&[0.1, -0.4, 0.25]);
        let b = aggregate(&[0.25, 0.1, -0.4]);
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn test_outcome_quality_clamps() {
        assert_eq!(outcome_quality(&[0.5, 0.5, 0.5]), MAX_QUALITY);
        assert_eq!(outcome_quality(&[-0.4, -0.2]), MIN_QUALITY);
    }

    #[test]
    fn test_from_roster_limits_seats() {
        let inputs = RitualInputs::from_roster(60.0, 10, 1, &roster(), &RitualProps::default());
        assert_eq!(inputs.participant_count, 3);
        assert_eq!(inputs.seated_count, 3);
    }
}
