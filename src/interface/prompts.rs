use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::{PotError, Result};
use crate::models::{OutcomeTier, Participant, Role};
use crate::ritual::{RitualInputs, RitualProps};

/// Skill names offered when entering a participant's skills.
pub const KNOWN_SKILLS: &[&str] = &[
    "Shooting",
    "Melee",
    "Construction",
    "Mining",
    "Cooking",
    "Plants",
    "Animals",
    "Crafting",
    "Artistic",
    "Medicine",
    "Social",
    "Intellectual",
];

fn prompt_parsed<T: std::str::FromStr>(prompt: &str, default: &str) -> Result<T> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    input
        .trim()
        .parse()
        .map_err(|_| PotError::InvalidInput(format!("Invalid number: {}", input)))
}

/// Prompt for the room's impressiveness score.
pub fn prompt_room_impressiveness() -> Result<f64> {
    let value: f64 = prompt_parsed("How impressive is the classroom?", "50")?;
    if !value.is_finite() {
        return Err(PotError::InvalidInput("Impressiveness must be a number".to_string()));
    }
    Ok(value)
}

/// Prompt for seats near the lectern.
pub fn prompt_seats() -> Result<u32> {
    prompt_parsed("How many seats face the lectern?", "0")
}

/// Prompt for blackboards in the room.
pub fn prompt_props(max: u32) -> Result<u32> {
    prompt_parsed(&format!("How many blackboards are nearby? (max {})", max), "0")
}

/// Resolve a typed skill name, exact first, then fuzzy with confirmation.
pub fn match_skill(input: &str) -> Result<Option<&'static str>> {
    let needle = input.trim().to_lowercase();
    if let Some(skill) = KNOWN_SKILLS.iter().copied().find(|s| s.to_lowercase() == needle) {
        return Ok(Some(skill));
    }

    let best = KNOWN_SKILLS
        .iter()
        .map(|s| (*s, jaro_winkler(&s.to_lowercase(), &needle)))
        .filter(|(_, score)| *score > 0.7)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    match best {
        Some((skill, _)) => {
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", skill))
                .default(true)
                .interact()?;
            Ok(confirm.then_some(skill))
        }
        None => {
            println!("No matching skill found for '{}'", input.trim());
            Ok(None)
        }
    }
}

fn prompt_skills(mut participant: Participant) -> Result<Participant> {
    loop {
        let input: String = Input::new()
            .with_prompt(format!(
                "Skill for {} (or press Enter to finish)",
                participant.name
            ))
            .allow_empty(true)
            .interact_text()?;
        if input.trim().is_empty() {
            return Ok(participant);
        }
        let Some(skill) = match_skill(&input)? else {
            continue;
        };
        let level: i32 = prompt_parsed(&format!("{} level", skill), "0")?;
        participant = participant.with_skill(skill, level.clamp(0, 20));
    }
}

/// Prompt for the roster: names, roles and skill levels.
pub fn prompt_participants() -> Result<Vec<Participant>> {
    let roles = [Role::Teacher, Role::Leader, Role::Speaker, Role::Student];
    let role_names: Vec<String> = roles.iter().map(|r| format!("{:?}", r)).collect();
    let mut roster = Vec::new();

    loop {
        let name: String = Input::new()
            .with_prompt("Participant name (or press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;
        let name = name.trim();
        if name.is_empty() {
            break;
        }

        let default_role = if roster.is_empty() { 0 } else { 3 };
        let selection = Select::new()
            .with_prompt(format!("Role of {}", name))
            .items(&role_names)
            .default(default_role)
            .interact()?;

        let participant = prompt_skills(Participant::new(name, roles[selection]))?;
        println!("Added: {}", participant.name);
        roster.push(participant);
    }

    Ok(roster)
}

/// Prompt for the outcome tier; None means roll it from quality.
pub fn prompt_tier() -> Result<Option<OutcomeTier>> {
    let mut options = vec!["Roll from quality".to_string()];
    options.extend(OutcomeTier::ALL.iter().map(|t| t.label().to_string()));

    let selection = Select::new()
        .with_prompt("Outcome")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(selection
        .checked_sub(1)
        .and_then(|i| OutcomeTier::ALL.get(i).copied()))
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Collect everything needed to score a ritual.
pub fn collect_ritual_inputs(props: &RitualProps) -> Result<(RitualInputs, Vec<Participant>)> {
    let impressiveness = prompt_room_impressiveness()?;
    let seats = prompt_seats()?;
    let blackboards = prompt_props(props.prop_max_count)?;
    let roster = prompt_participants()?;

    let inputs = RitualInputs::from_roster(impressiveness, seats, blackboards, &roster, props);
    Ok((inputs, roster))
}
