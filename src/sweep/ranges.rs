use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ritual::{RitualInputs, RitualProps, TeacherSnapshot};

/// One random combination of ritual measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSample {
    pub impressiveness: f64,
    pub participants: u32,
    pub seated: u32,
    pub blackboards: u32,
    pub theme_level: i32,
    pub social_level: i32,
}

impl SweepSample {
    /// Draw a sample within the given ranges. Seated never exceeds participants.
    pub fn random(rng: &mut impl Rng, ranges: &SweepRanges) -> Self {
        let participants = rng.gen_range(ranges.participants.0..=ranges.participants.1);
        Self {
            impressiveness: rng.gen_range(ranges.impressiveness.0..=ranges.impressiveness.1),
            participants,
            seated: rng.gen_range(0..=participants),
            blackboards: rng.gen_range(ranges.blackboards.0..=ranges.blackboards.1),
            theme_level: rng.gen_range(ranges.theme_level.0..=ranges.theme_level.1),
            social_level: rng.gen_range(ranges.social_level.0..=ranges.social_level.1),
        }
    }

    /// Every factor at its most favourable end of the ranges.
    pub fn best_case(ranges: &SweepRanges) -> Self {
        // Crowding only hurts, so the smallest audience scores best.
        let participants = ranges.participants.0.max(1);
        Self {
            impressiveness: ranges.impressiveness.1,
            participants,
            seated: participants,
            blackboards: ranges.blackboards.1,
            theme_level: ranges.theme_level.1,
            social_level: ranges.social_level.1,
        }
    }

    pub fn to_inputs(&self, props: &RitualProps) -> RitualInputs {
        RitualInputs {
            room_impressiveness: self.impressiveness,
            participant_count: self.participants,
            seated_count: self.seated,
            decorative_prop_count: self.blackboards,
            teacher: Some(TeacherSnapshot {
                name: "teacher".to_string(),
                theme_skill: props.skill.clone(),
                theme_level: self.theme_level,
                social_level: self.social_level,
                theme_known: true,
            }),
        }
    }

    /// Compact one-line form for display.
    pub fn display(&self) -> String {
        format!(
            "imp={:.0} att={} seat={} bb={} theme={} social={}",
            self.impressiveness,
            self.participants,
            self.seated,
            self.blackboards,
            self.theme_level,
            self.social_level
        )
    }
}

/// Inclusive min/max ranges of each sampled measurement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepRanges {
    pub impressiveness: (f64, f64),
    pub participants: (u32, u32),
    pub blackboards: (u32, u32),
    pub theme_level: (i32, i32),
    pub social_level: (i32, i32),
}

impl Default for SweepRanges {
    fn default() -> Self {
        Self {
            impressiveness: (0.0, 150.0),
            participants: (1, 20),
            blackboards: (0, 5),
            theme_level: (0, 20),
            social_level: (0, 20),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_within_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        let ranges = SweepRanges::default();
        for _ in 0..100 {
            let s = SweepSample::random(&mut rng, &ranges);
            assert!((0.0..=150.0).contains(&s.impressiveness));
            assert!((1..=20).contains(&s.participants));
            assert!(s.seated <= s.participants);
            assert!(s.blackboards <= 5);
            assert!((0..=20).contains(&s.theme_level));
        }
    }

    #[test]
    fn test_best_case_everyone_seated() {
        let s = SweepSample::best_case(&SweepRanges::default());
        assert_eq!(s.participants, 1);
        assert_eq!(s.seated, 1);
        assert_eq!(s.theme_level, 20);
    }
}
