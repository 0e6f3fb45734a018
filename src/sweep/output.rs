use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::sweep::search::{SampleResult, SweepResults};

/// Truncate a float to n decimal places.
fn truncate(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Write every sample to a CSV file, one column per factor offset.
pub fn write_csv(results: &[SampleResult], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let factor_labels: Vec<String> = results
        .first()
        .map(|r| r.breakdown.factors.iter().map(|f| f.label.clone()).collect())
        .unwrap_or_default();

    let mut header = vec![
        "rank".to_string(),
        "impressiveness".to_string(),
        "participants".to_string(),
        "seated".to_string(),
        "blackboards".to_string(),
        "theme_level".to_string(),
        "social_level".to_string(),
    ];
    header.extend(factor_labels.iter().map(|l| l.to_lowercase().replace(' ', "_")));
    header.push("raw_quality".to_string());
    header.push("quality".to_string());
    header.push("out_of_bounds".to_string());
    wtr.write_record(&header)?;

    for (i, result) in results.iter().enumerate() {
        let s = &result.sample;
        let mut row = vec![
            (i + 1).to_string(),
            format!("{:.1}", s.impressiveness),
            s.participants.to_string(),
            s.seated.to_string(),
            s.blackboards.to_string(),
            s.theme_level.to_string(),
            s.social_level.to_string(),
        ];
        row.extend(
            result
                .breakdown
                .factors
                .iter()
                .map(|f| format!("{:.3}", f.quality_offset)),
        );
        row.push(format!("{:.3}", result.breakdown.raw_quality));
        row.push(format!("{:.3}", result.breakdown.quality));
        row.push(result.breakdown.exceeds_bounds().to_string());
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the sweep summary to a JSON file with truncated floats.
pub fn write_summary_json(sweep: &SweepResults, path: &Path, topk: usize) -> Result<()> {
    let describe = |r: &SampleResult| {
        serde_json::json!({
            "sample": r.sample,
            "factors": r.breakdown.factors.iter().map(|f| {
                serde_json::json!({
                    "label": f.label,
                    "count": f.count,
                    "offset": truncate(f.quality_offset, 3),
                })
            }).collect::<Vec<_>>(),
            "raw_quality": truncate(r.breakdown.raw_quality, 3),
            "quality": truncate(r.breakdown.quality, 3),
        })
    };

    let json = serde_json::json!({
        "samples": sweep.results.len(),
        "above_max": sweep.above_max,
        "below_min": sweep.below_min,
        "out_of_bounds_fraction": truncate(sweep.out_of_bounds_fraction(), 4),
        "best_case": describe(&sweep.best_case),
        "top": sweep.results.iter().take(topk).map(describe).collect::<Vec<_>>(),
    });

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(&json)?.as_bytes())?;
    Ok(())
}

/// Print the highest raw sums to stdout.
pub fn print_topk(results: &[SampleResult], k: usize) {
    println!("\n=== Top {} raw quality sums ===\n", k.min(results.len()));

    for (i, result) in results.iter().take(k).enumerate() {
        println!(
            "#{}: raw={:.3} clamped={:.3}{}",
            i + 1,
            result.breakdown.raw_quality,
            result.breakdown.quality,
            if result.breakdown.exceeds_bounds() {
                "  [out of range]"
            } else {
                ""
            }
        );
        println!("    {}", result.sample.display());
        println!();
    }
}
