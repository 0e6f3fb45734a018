pub mod output;
pub mod ranges;
pub mod search;

pub use output::{print_topk, write_csv, write_summary_json};
pub use ranges::{SweepRanges, SweepSample};
pub use search::{SampleResult, SweepConfig, SweepResults, run_sweep};
