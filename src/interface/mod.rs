pub mod prompts;
pub mod render;

pub use prompts::{
    collect_ritual_inputs, match_skill, prompt_participants, prompt_props,
    prompt_room_impressiveness, prompt_seats, prompt_tier, prompt_yes_no,
};
pub use render::{display_pot, display_quality_breakdown, display_step_reports, display_xp_deltas};
