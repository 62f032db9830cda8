use crate::aggregate::build_per_problem_timing_map;
use crate::format::{basic_format, format_size_title};
use crate::loader::BenchmarkData;
use anyhow::Result;
use std::fmt::Write;

/// One candidate's time on a problem, with its ratio to the leftmost entry
#[derive(Debug, Clone, PartialEq)]
pub struct TimingRow {
    pub candidate_id: String,
    pub name: String,
    pub time_seconds: f64,
    pub ratio: Option<f64>,
}

/// Timing rows of one problem
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemTimings {
    pub index: usize,
    pub size: f64,
    pub rows: Vec<TimingRow>,
}

/// Per-problem rows following the bar-chart rules: keys without data are
/// skipped and the first remaining key is the baseline.
pub fn timing_rows<S: AsRef<str>>(
    data: &BenchmarkData,
    keys: &[S],
) -> Result<Vec<ProblemTimings>> {
    data.candidates.require_all(keys)?;
    let timings = build_per_problem_timing_map(&data.results, &data.problems)?;

    Ok(data
        .problems
        .iter()
        .map(|problem| {
            let mut rows: Vec<TimingRow> = Vec::new();
            if let Some(by_candidate) = timings.get(&problem.index) {
                for key in keys {
                    let key = key.as_ref();
                    if let Some(&time_seconds) = by_candidate.get(key) {
                        rows.push(TimingRow {
                            candidate_id: key.to_string(),
                            name: data.candidates.name(key).to_string(),
                            time_seconds,
                            ratio: None,
                        });
                    }
                }
            }

            if let Some(baseline) = rows.first().map(|r| r.time_seconds).filter(|&t| t > 0.0) {
                for row in &mut rows {
                    row.ratio = Some(row.time_seconds / baseline);
                }
            }
            ProblemTimings {
                index: problem.index,
                size: problem.size,
                rows,
            }
        })
        .collect())
}

/// Render the timing table as text
pub fn format_timing_table<S: AsRef<str>>(
    data: &BenchmarkData,
    keys: &[S],
    size_format: &str,
) -> Result<String> {
    let mut out = String::new();

    writeln!(out, "{:=<60}", "")?;
    writeln!(out, "Benchmark Timings")?;
    writeln!(out, "{:=<60}", "")?;

    for problem in timing_rows(data, keys)? {
        writeln!(
            out,
            "\nProblem {:04}: {}",
            problem.index,
            format_size_title(size_format, problem.size)
        )?;
        writeln!(out, "  {:<16} {:>12} {:>10}", "Candidate", "Time (s)", "Ratio")?;
        writeln!(out, "  {:-<40}", "")?;

        if problem.rows.is_empty() {
            writeln!(out, "  (no results)")?;
        }
        for row in problem.rows {
            let ratio = row
                .ratio
                .map(|r| format!("{}×", basic_format(r)))
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                out,
                "  {:<16} {:>12} {:>10}",
                row.name,
                basic_format(row.time_seconds),
                ratio
            )?;
        }
    }

    Ok(out)
}

/// Print timing results to console
pub fn print_timing_table<S: AsRef<str>>(
    data: &BenchmarkData,
    keys: &[S],
    size_format: &str,
) -> Result<()> {
    print!("{}", format_timing_table(data, keys, size_format)?);
    Ok(())
}
