pub mod aggregate;
pub mod factors;
pub mod outcome;
pub mod props;
pub mod xp;

pub use aggregate::{
    QualityBreakdown, RitualInputs, TeacherSnapshot, aggregate, evaluate, outcome_quality,
    quality_factors,
};
pub use outcome::{FixedOutcome, OutcomeEntry, OutcomeSelector, OutcomeTable, TableSelector};
pub use props::{RitualProps, SimpleCurve, XpProps};
pub use xp::{MemoryLedger, SkillLedger, apply_outcome, award_xp};
