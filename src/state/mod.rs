mod persistence;
mod scenario;
mod session;

pub use persistence::{PotState, load_catalog, load_pot, save_catalog, save_pot};
pub use scenario::{Scenario, ScenarioRunner, Step, StepReport};
pub use session::RitualSession;
