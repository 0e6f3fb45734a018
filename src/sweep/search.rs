use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::ritual::{QualityBreakdown, RitualProps, evaluate};
use crate::sweep::ranges::{SweepRanges, SweepSample};

/// Configuration for a quality sweep.
pub struct SweepConfig {
    pub samples: usize,
    pub seed: u64,
    pub ranges: SweepRanges,
    pub props: RitualProps,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            samples: 1000,
            seed: 123,
            ranges: SweepRanges::default(),
            props: RitualProps::default(),
        }
    }
}

/// Quality of one sample, before and after the final clamp.
#[derive(Debug, Clone)]
pub struct SampleResult {
    pub sample: SweepSample,
    pub breakdown: QualityBreakdown,
}

impl SampleResult {
    pub fn evaluate(sample: SweepSample, props: &RitualProps) -> Self {
        let breakdown = evaluate(&sample.to_inputs(props), props);
        Self { sample, breakdown }
    }

    pub fn raw_quality(&self) -> f64 {
        self.breakdown.raw_quality
    }
}

/// Results of a sweep run.
pub struct SweepResults {
    /// All samples, highest raw quality first.
    pub results: Vec<SampleResult>,
    /// Every factor at its favourable extreme.
    pub best_case: SampleResult,
    pub above_max: usize,
    pub below_min: usize,
}

impl SweepResults {
    /// Share of samples whose unclamped sum left the quality range.
    pub fn out_of_bounds_fraction(&self) -> f64 {
        if self.results.is_empty() {
            return 0.0;
        }
        (self.above_max + self.below_min) as f64 / self.results.len() as f64
    }
}

/// Random search over ritual measurements, counting sums that escape [0, 1].
pub fn run_sweep(config: &SweepConfig) -> SweepResults {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let props = &config.props;

    let best_case = SampleResult::evaluate(SweepSample::best_case(&config.ranges), props);
    info!(
        raw = best_case.raw_quality(),
        sample = %best_case.sample.display(),
        "best case"
    );

    let mut results = Vec::with_capacity(config.samples);
    let mut above_max = 0;
    let mut below_min = 0;
    let mut highest = f64::NEG_INFINITY;

    for i in 0..config.samples {
        let result = SampleResult::evaluate(SweepSample::random(&mut rng, &config.ranges), props);
        let raw = result.raw_quality();
        if result.breakdown.exceeds_bounds() {
            if raw > result.breakdown.quality {
                above_max += 1;
            } else {
                below_min += 1;
            }
        }
        if raw > highest {
            highest = raw;
            info!(
                sample = i + 1,
                raw,
                detail = %result.sample.display(),
                "new highest raw quality"
            );
        }
        results.push(result);
    }

    results.sort_by(|a, b| {
        b.raw_quality()
            .partial_cmp(&a.raw_quality())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    SweepResults {
        results,
        best_case,
        above_max,
        below_min,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_is_sorted_and_counted() {
        let config = SweepConfig {
            samples: 200,
            ..Default::default()
        };
        let out = run_sweep(&config);
        assert_eq!(out.results.len(), 200);
        assert!(
            out.results
                .windows(2)
                .all(|w| w[0].raw_quality() >= w[1].raw_quality())
        );
        let flagged = out
            .results
            .iter()
            .filter(|r| r.breakdown.exceeds_bounds())
            .count();
        assert_eq!(flagged, out.above_max + out.below_min);
    }

    #[test]
    fn test_default_best_case_exceeds_max() {
        let out = run_sweep(&SweepConfig {
            samples: 0,
            ..Default::default()
        });
        // 0.5 + 0.84 + 0.6 + 0 + 0.1 + 0.3
        assert!((out.best_case.raw_quality() - 2.34).abs() < 1e-9);
        assert_eq!(out.best_case.breakdown.quality, 1.0);
        assert_eq!(out.out_of_bounds_fraction(), 0.0);
    }

    #[test]
    fn test_same_seed_same_samples() {
        let config = SweepConfig {
            samples: 50,
            seed: 9,
            ..Default::default()
        };
        let a = run_sweep(&config);
        let b = run_sweep(&config);
        let sa: Vec<_> = a.results.iter().map(|r| r.sample.clone()).collect();
        let sb: Vec<_> = b.results.iter().map(|r| r.sample.clone()).collect();
        assert_eq!(sa, sb);
    }
}
