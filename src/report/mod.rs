pub mod aggregate;
pub mod exec;
pub mod output;

pub use aggregate::{build_report, group_weeks, total, window};
pub use exec::{exec, fetch_report, RunOptions};
pub use output::{output_json, output_summary, output_swift, render, OutputFormat};
