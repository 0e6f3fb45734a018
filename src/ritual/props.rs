use serde::{Deserialize, Serialize};

use crate::error::{PotError, Result};

/// Baseline outcome quality before any factor is applied.
pub const BASELINE_QUALITY: f64 = 0.0;

/// Valid range of the final outcome quality.
pub const MIN_QUALITY: f64 = 0.0;
pub const MAX_QUALITY: f64 = 1.0;

/// Seating offset when nobody can sit and when everybody can.
pub const SEATING_OFFSET_MIN: f64 = -0.4;
pub const SEATING_OFFSET_MAX: f64 = 0.1;

/// Piecewise-linear curve, clamped at its first and last points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<(f64, f64)>", into = "Vec<(f64, f64)>")]
pub struct SimpleCurve {
    points: Vec<(f64, f64)>,
}

impl From<Vec<(f64, f64)>> for SimpleCurve {
    fn from(points: Vec<(f64, f64)>) -> Self {
        Self::new(points)
    }
}

impl From<SimpleCurve> for Vec<(f64, f64)> {
    fn from(curve: SimpleCurve) -> Self {
        curve.points
    }
}

impl SimpleCurve {
    /// Points are sorted by x; order of input does not matter.
    pub fn new(mut points: Vec<(f64, f64)>) -> Self {
        points.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        Self { points }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return 0.0;
        };
        if x <= first.0 {
            return first.1;
        }
        if x >= last.0 {
            return last.1;
        }
        for pair in self.points.windows(2) {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            if x <= x1 {
                if x1 == x0 {
                    return y1;
                }
                let t = (x - x0) / (x1 - x0);
                return y0 + (y1 - y0) * t;
            }
        }
        last.1
    }
}

/// XP tuning per outcome tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct XpProps {
    pub base_xp: f64,
    pub teacher_multiplier: f64,
    pub student_multiplier: f64,
    /// Fraction of base XP students lose on a terrible outcome.
    pub terrible_loss_fraction: f64,
    /// Fraction of base XP students lose on a boring outcome.
    pub boring_loss_fraction: f64,
    pub fun_multiplier: f64,
    pub unforgettable_multiplier: f64,
}

impl Default for XpProps {
    fn default() -> Self {
        Self {
            base_xp: 2000.0,
            teacher_multiplier: 1.2,
            student_multiplier: 1.0,
            terrible_loss_fraction: 0.5,
            boring_loss_fraction: 0.2,
            fun_multiplier: 1.0,
            unforgettable_multiplier: 2.0,
        }
    }
}

/// Tuning for the teaching ritual: quality factors and XP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RitualProps {
    /// Skill taught when the teacher has no usable theme skill.
    pub skill: String,

    pub impressiveness_threshold: f64,
    /// Offset per impressiveness point above the threshold.
    pub impressiveness_per_point: f64,
    pub impressiveness_min_clamp: f64,
    pub impressiveness_max_clamp: f64,

    pub theme_skill_threshold: i32,
    pub theme_per_level: f64,
    pub social_skill_threshold: i32,
    pub social_per_level: f64,

    /// Decorative props (blackboards) counted at most this many times.
    pub prop_max_count: u32,
    pub prop_per_count: f64,

    pub attendance_required: u32,
    /// Offset by participant count; crowding hurts.
    pub attendance_curve: SimpleCurve,

    pub xp: XpProps,
}

impl Default for RitualProps {
    fn default() -> Self {
        Self {
            skill: "Intellectual".to_string(),
            impressiveness_threshold: 50.0,
            impressiveness_per_point: 0.01,
            impressiveness_min_clamp: -0.2,
            impressiveness_max_clamp: 0.5,
            theme_skill_threshold: 8,
            theme_per_level: 0.07,
            social_skill_threshold: 8,
            social_per_level: 0.05,
            prop_max_count: 3,
            prop_per_count: 0.1,
            attendance_required: 3,
            attendance_curve: SimpleCurve::new(vec![
                (0.0, 0.0),
                (2.0, 0.0),
                (3.0, -0.05),
                (5.0, -0.1),
                (10.0, -0.3),
                (15.0, -0.4),
                (20.0, -0.5),
            ]),
            xp: XpProps::default(),
        }
    }
}

impl RitualProps {
    pub fn validate(&self) -> Result<()> {
        if self.impressiveness_min_clamp > self.impressiveness_max_clamp {
            return Err(PotError::InvalidConfig(format!(
                "impressiveness clamp is inverted: {} > {}",
                self.impressiveness_min_clamp, self.impressiveness_max_clamp
            )));
        }
        if self.xp.base_xp < 0.0 {
            return Err(PotError::InvalidConfig(
                "base_xp must be non-negative".to_string(),
            ));
        }
        if self.attendance_curve.points().is_empty() {
            return Err(PotError::InvalidConfig(
                "attendance curve needs at least one point".to_string(),
            ));
        }
        Ok(())
    }
}
