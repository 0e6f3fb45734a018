use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Participant;
use crate::ritual::{OutcomeTable, RitualInputs, RitualProps};

/// A ritual described on disk: the room, the roster and optional tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RitualSession {
    pub room_impressiveness: f64,
    /// Seats facing the lectern.
    #[serde(default)]
    pub seats: u32,
    #[serde(default)]
    pub blackboards: u32,
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub props: RitualProps,
    #[serde(default)]
    pub outcomes: OutcomeTable,
}

impl RitualSession {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let session: RitualSession = serde_json::from_str(&content)?;
        session.props.validate()?;
        session.outcomes.validate()?;
        Ok(session)
    }

    pub fn inputs(&self) -> RitualInputs {
        RitualInputs::from_roster(
            self.room_impressiveness,
            self.seats,
            self.blackboards,
            &self.participants,
            &self.props,
        )
    }
}
