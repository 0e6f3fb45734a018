//! Independent quality contributions of a teaching ritual.
//!
//! Each offset function is pure; the `*_factor` builders wrap an offset with
//! the label and count shown in the quality breakdown.

use crate::models::QualityFactor;
use crate::ritual::props::{RitualProps, SEATING_OFFSET_MAX, SEATING_OFFSET_MIN};

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Room impressiveness above (or below) the threshold, clamped.
pub fn impressiveness_offset(impressiveness: f64, props: &RitualProps) -> f64 {
    ((impressiveness - props.impressiveness_threshold) * props.impressiveness_per_point)
        .clamp(props.impressiveness_min_clamp, props.impressiveness_max_clamp)
}

/// Bonus per skill level above the required level; never negative.
pub fn skill_offset(level: i32, required: i32, per_level: f64) -> f64 {
    (level - required).max(0) as f64 * per_level
}

/// Crowding penalty from the attendance curve. An empty ritual counts as one attendee.
pub fn attendance_offset(participants: u32, props: &RitualProps) -> f64 {
    let participants = participants.max(1);
    props.attendance_curve.evaluate(participants as f64)
}

/// From -0.4 with nobody seated to +0.1 with everybody seated.
pub fn seating_offset(seated: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let ratio = (seated as f64 / total as f64).clamp(0.0, 1.0);
    lerp(SEATING_OFFSET_MIN, SEATING_OFFSET_MAX, ratio)
}

/// Flat bonus per decorative prop, up to the configured count.
pub fn prop_offset(found: u32, props: &RitualProps) -> f64 {
    found.min(props.prop_max_count) as f64 * props.prop_per_count
}

pub fn impressiveness_factor(impressiveness: f64, props: &RitualProps) -> QualityFactor {
    let offset = impressiveness_offset(impressiveness, props);
    QualityFactor::new(
        "Impressiveness",
        format!("{:.0}/{:.0}", impressiveness, props.impressiveness_threshold),
        offset,
        impressiveness >= props.impressiveness_threshold,
    )
}

pub fn theme_factor(skill: &str, level: i32, props: &RitualProps) -> QualityFactor {
    let required = props.theme_skill_threshold;
    QualityFactor::new(
        "Course theme",
        format!("{} {}/{}", skill, level, required),
        skill_offset(level, required, props.theme_per_level),
        level >= required,
    )
}

pub fn social_factor(level: i32, props: &RitualProps) -> QualityFactor {
    let required = props.social_skill_threshold;
    QualityFactor::new(
        "Lecturer social",
        format!("{}/{}", level, required),
        skill_offset(level, required, props.social_per_level),
        level >= required,
    )
}

pub fn attendance_factor(participants: u32, props: &RitualProps) -> QualityFactor {
    QualityFactor::new(
        "Attendance",
        format!("{}/{}", participants.max(1), props.attendance_required),
        attendance_offset(participants, props),
        participants >= props.attendance_required,
    )
}

/// Present once at least half the attendees (rounded down) are seated.
pub fn seating_factor(seated: u32, total: u32) -> QualityFactor {
    let seated = seated.min(total);
    QualityFactor::new(
        "Seated attendees",
        format!("{}/{}", seated, total),
        seating_offset(seated, total),
        seated >= total / 2,
    )
}

/// The count shows every prop found, even past the cap; present only at the cap.
pub fn prop_factor(found: u32, props: &RitualProps) -> QualityFactor {
    QualityFactor::new(
        "Blackboards",
        format!("{}/{}", found, props.prop_max_count),
        prop_offset(found, props),
        found >= props.prop_max_count,
    )
}
