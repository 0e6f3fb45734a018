use crate::kitchen::{FuelTank, NutritionPool, StewPot};
use crate::models::{OutcomeTier, XpDelta};
use crate::ritual::QualityBreakdown;
use crate::state::StepReport;

/// Display the pot's inspect pane plus fuel level.
pub fn display_pot(pot: &StewPot<FuelTank>, title: &str) {
    println!();
    println!("=== {} ===", title);
    println!();
    for line in pot.inspect_string().lines() {
        println!("  {}", line);
    }
    println!();
    for line in pool_bars(pot.pool()) {
        println!("  {}", line);
    }
    println!(
        "  Fuel: {:.2} / {:.0} ({:.0}%)",
        pot.fuel().fuel,
        pot.fuel().capacity,
        pot.fuel().fuel_percent() * 100.0
    );
    println!();
}

const BAR_WIDTH: usize = 20;

fn fill_bar(fraction: f64) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

/// Fill bars for both pools plus the drawn contents. Trace amounts are not drawn.
fn pool_bars(pool: &NutritionPool) -> Vec<String> {
    vec![
        format!("Veg     {} {:>3.0}%", fill_bar(pool.veg_pct()), pool.veg_pct() * 100.0),
        format!(
            "Protein {} {:>3.0}%",
            fill_bar(pool.protein_pct()),
            pool.protein_pct() * 100.0
        ),
        format!("Looks like: {}", pool.display_stew_type()),
    ]
}

/// One line per scenario step.
pub fn display_step_reports(reports: &[StepReport]) {
    if reports.is_empty() {
        println!("Scenario has no steps.");
        return;
    }

    for (i, report) in reports.iter().enumerate() {
        let line = match report {
            StepReport::Added {
                ingredient,
                absorbed,
                used,
                left,
            } => format!(
                "add {} x{} -> +{:.2} nutrition ({} left)",
                ingredient, used, absorbed, left
            ),
            StepReport::Batched {
                requested,
                absorbed,
            } => format!("batch {:.2} -> +{:.2} nutrition", requested, absorbed),
            StepReport::Ticked {
                ticks,
                progress_pct,
                cooking,
            } => format!(
                "tick x{} -> {} at {:.0}%",
                ticks,
                cooking,
                progress_pct * 100.0
            ),
            StepReport::Consumed { requested, drawn } => {
                let what = match requested {
                    Some(n) => format!("{:.2}", n),
                    None => "one serving".to_string(),
                };
                if *drawn > 0.0 {
                    format!("consume {} -> -{:.2} nutrition", what, drawn)
                } else {
                    format!("consume {} -> refused", what)
                }
            }
            StepReport::TargetSet { level } => format!("target level -> {:.2}", level),
            StepReport::Refueled { accepted } => format!("refuel +{:.2}", accepted),
            StepReport::Drained => "drain fuel".to_string(),
            StepReport::Dispensed(Some(meal)) => format!(
                "dispense -> {} ({:.2} nutrition, {})",
                meal.name,
                meal.nutrition,
                if meal.ingredients.is_empty() {
                    "no ingredients".to_string()
                } else {
                    meal.ingredients.join(", ")
                }
            ),
            StepReport::Dispensed(None) => "dispense -> not ready".to_string(),
            StepReport::Cleared => "clear pot".to_string(),
            StepReport::Inspected(text) => {
                format!("inspect\n      {}", text.replace('\n', "\n      "))
            }
        };
        println!("{:>3}. {}", i + 1, line);
    }
    println!();
}

/// Quality breakdown table in the style of the ritual dialog.
pub fn display_quality_breakdown(breakdown: &QualityBreakdown) {
    let width = breakdown
        .factors
        .iter()
        .map(|f| f.label.len())
        .max()
        .unwrap_or(10);

    println!();
    println!("=== Ritual quality ===");
    println!();
    for factor in &breakdown.factors {
        let marker = if factor.present { "x" } else { " " };
        println!(
            "  [{}] {:<width$}  {:>14}  {:>6}",
            marker,
            factor.label,
            factor.count,
            factor.change_string(),
            width = width
        );
    }
    println!();
    println!("Expected quality: {:.0}%", breakdown.quality * 100.0);
    if breakdown.exceeds_bounds() {
        println!(
            "Note: factors sum to {:.0}% before clamping",
            breakdown.raw_quality * 100.0
        );
    }
    println!();
}

/// Outcome description and the XP each participant receives.
pub fn display_xp_deltas(tier: OutcomeTier, deltas: &[XpDelta]) {
    println!("=== Outcome: {} ===", tier.label());
    println!("{}", tier.description());
    println!();

    if deltas.is_empty() {
        println!("No participants.");
        return;
    }

    let width = deltas.iter().map(|d| d.participant.len()).max().unwrap_or(10);
    for delta in deltas {
        let sign = if delta.amount > 0.0 { "+" } else { "" };
        let note = delta
            .skipped
            .map(|reason| format!("  ({})", reason))
            .unwrap_or_default();
        println!(
            "  {:<width$}  {:<12} {}{:.0} XP{}",
            delta.participant,
            delta.skill,
            sign,
            delta.amount,
            note,
            width = width
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kitchen::{NutritionStore, PotConfig};

    #[test]
    fn test_fill_bar_bounds() {
        assert_eq!(fill_bar(0.0), format!("[{}]", ".".repeat(BAR_WIDTH)));
        assert_eq!(fill_bar(1.5), format!("[{}]", "#".repeat(BAR_WIDTH)));
        assert_eq!(fill_bar(0.5).matches('#').count(), BAR_WIDTH / 2);
    }

    #[test]
    fn test_pool_bars_hide_trace_amounts() {
        let mut pool = NutritionPool::new(PotConfig::default());
        pool.add_nutrition(7.5, false);
        pool.add_nutrition(0.005, true);
        assert_eq!(pool.classify_available(), crate::models::StewType::Mixed);

        let lines = pool_bars(&pool);
        assert!(lines[0].ends_with(" 50%"));
        assert!(lines[1].ends_with("  0%"));
        assert_eq!(lines[2], "Looks like: vegetable stew");
    }
}
