use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Name of the skill that never counts as a teaching theme.
pub const SOCIAL_SKILL: &str = "Social";

/// One line of the ritual quality breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityFactor {
    pub label: String,
    /// Human-readable count column, e.g. "9/8".
    pub count: String,
    pub quality_offset: f64,
    pub present: bool,
}

impl QualityFactor {
    pub fn new(label: &str, count: String, quality_offset: f64, present: bool) -> Self {
        Self {
            label: label.to_string(),
            count,
            quality_offset,
            present,
        }
    }

    /// Change column: "+14 %", "-20 %" or "-" when the factor contributes nothing.
    pub fn change_string(&self) -> String {
        let pct = (self.quality_offset * 100.0).round();
        if pct > 0.0 {
            format!("+{:.0} %", pct)
        } else if pct < 0.0 {
            format!("{:.0} %", pct)
        } else {
            "-".to_string()
        }
    }
}

/// Discrete ritual outcome bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeTier {
    Terrible,
    Boring,
    Fun,
    Unforgettable,
}

impl OutcomeTier {
    pub const ALL: [OutcomeTier; 4] = [
        OutcomeTier::Terrible,
        OutcomeTier::Boring,
        OutcomeTier::Fun,
        OutcomeTier::Unforgettable,
    ];

    pub fn is_positive(self) -> bool {
        matches!(self, OutcomeTier::Fun | OutcomeTier::Unforgettable)
    }

    pub fn label(self) -> &'static str {
        match self {
            OutcomeTier::Terrible => "terrible",
            OutcomeTier::Boring => "boring",
            OutcomeTier::Fun => "fun",
            OutcomeTier::Unforgettable => "unforgettable",
        }
    }

    /// Player-facing summary of what the outcome did to the audience.
    pub fn description(self) -> &'static str {
        match self {
            OutcomeTier::Terrible => {
                "Audience members were discouraged by the lesson; it damaged learning for many."
            }
            OutcomeTier::Boring => {
                "The lesson was boring; participants gained little and some felt worse."
            }
            OutcomeTier::Fun => "Participants enjoyed the lesson and picked up useful knowledge.",
            OutcomeTier::Unforgettable => {
                "The class was unforgettable: participants learned a lot."
            }
        }
    }
}

impl std::str::FromStr for OutcomeTier {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        OutcomeTier::ALL
            .into_iter()
            .find(|t| t.label() == lower)
            .ok_or_else(|| format!("unknown outcome tier '{}'", s))
    }
}

/// Role a participant was assigned in the ritual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    Teacher,
    Leader,
    Speaker,
    #[default]
    Student,
}

impl Role {
    /// Leaders and speakers are treated as the teacher for XP purposes.
    pub fn is_teacher(self) -> bool {
        !matches!(self, Role::Student)
    }

    /// Lookup order when picking the teacher among several candidates.
    pub fn teacher_priority(self) -> Option<u8> {
        match self {
            Role::Teacher => Some(0),
            Role::Leader => Some(1),
            Role::Speaker => Some(2),
            Role::Student => None,
        }
    }
}

/// A ritual attendee with a snapshot of their skill levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub skills: BTreeMap<String, i32>,
}

impl Participant {
    pub fn new(name: &str, role: Role) -> Self {
        Self {
            name: name.to_string(),
            role,
            skills: BTreeMap::new(),
        }
    }

    pub fn with_skill(mut self, skill: &str, level: i32) -> Self {
        self.skills.insert(skill.to_string(), level);
        self
    }

    pub fn skill_level(&self, skill: &str) -> i32 {
        self.skills.get(skill).copied().unwrap_or(0)
    }

    /// Highest skill other than Social, ties broken by name for determinism.
    pub fn best_theme_skill(&self) -> Option<(&str, i32)> {
        self.skills
            .iter()
            .filter(|(name, _)| name.as_str() != SOCIAL_SKILL)
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(name, level)| (name.as_str(), *level))
    }
}

/// XP change computed for one participant.
#[derive(Debug, Clone, PartialEq)]
pub struct XpDelta {
    pub participant: String,
    pub skill: String,
    pub amount: f64,
    /// Why the participant was left out, if they were.
    pub skipped: Option<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_string() {
        let f = QualityFactor::new("Course theme", "9/8".to_string(), 0.14, true);
        assert_eq!(f.change_string(), "+14 %");
        let f = QualityFactor::new("Seated attendees", "0/10".to_string(), -0.4, false);
        assert_eq!(f.change_string(), "-40 %");
        let f = QualityFactor::new("Blackboards", "0/3".to_string(), 0.0, false);
        assert_eq!(f.change_string(), "-");
    }

    #[test]
    fn test_tier_parse() {
        assert_eq!("Fun".parse::<OutcomeTier>(), Ok(OutcomeTier::Fun));
        assert_eq!(" terrible ".parse::<OutcomeTier>(), Ok(OutcomeTier::Terrible));
        assert!("great".parse::<OutcomeTier>().is_err());
    }

    #[test]
    fn test_best_theme_skill_skips_social() {
        let p = Participant::new("Ada", Role::Teacher)
            .with_skill("Social", 15)
            .with_skill("Cooking", 9)
            .with_skill("Art", 4);
        assert_eq!(p.best_theme_skill(), Some(("Cooking", 9)));
    }

    #[test]
    fn test_roles() {
        assert!(Role::Teacher.is_teacher());
        assert!(Role::Leader.is_teacher());
        assert!(Role::Speaker.is_teacher());
        assert!(!Role::Student.is_teacher());
    }
}
