/// Nutrition each pool (vegetable, protein) can hold.
pub const DEFAULT_CAPACITY: f64 = 15.0;

/// Fueled ticks needed to fully cook a pot (about two in-game hours).
pub const DEFAULT_TICKS_TO_COMPLETE: f64 = 5000.0;

/// Cooking is "done enough" to dispense at 90%.
pub const DISPENSE_READY_FRACTION: f64 = 0.9;

/// Progress lost per tick while the pot has no fuel.
pub const UNFUELED_PROGRESS_DECAY: f64 = 1.0;

/// Progress gained per fueled tick.
pub const PROGRESS_PER_TICK: f64 = 1.0;

/// Nutrition cost of one serving when no stew definition says otherwise.
pub const FALLBACK_NUTRITION_PER_UNIT: f64 = 0.5;

/// Pools at or below this level are ignored by the display classification.
pub const DISPLAY_EPSILON: f64 = 0.01;

// ─────────────────────────────────────────────────────────────────────────────
// Fuel
// ─────────────────────────────────────────────────────────────────────────────

/// Wood a pot burns per fueled tick while cooking.
pub const DEFAULT_FUEL_PER_TICK: f64 = 0.0008;

/// Fuel a pot can hold.
pub const DEFAULT_FUEL_CAPACITY: f64 = 30.0;
