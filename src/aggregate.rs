use crate::model::{BenchmarkResult, DataError, Problem};
use anyhow::Result;
use std::collections::{BTreeMap, HashMap};

/// problem index -> (candidate id -> seconds)
pub type PerProblemTimingMap = BTreeMap<usize, HashMap<String, f64>>;

/// `(size, seconds)` pairs for one candidate, ascending by size
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SizeTimeSeries {
    pub points: Vec<(f64, f64)>,
}

impl SizeTimeSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn sizes(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|&(size, _)| size)
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|&(_, time)| time)
    }
}

fn resolve<'a>(problems: &'a [Problem], result: &BenchmarkResult) -> Result<&'a Problem> {
    problems.get(result.problem_index).ok_or_else(|| {
        DataError::ProblemIndexOutOfRange {
            index: result.problem_index,
            count: problems.len(),
        }
        .into()
    })
}

/// Group timings by problem. A later result for the same (problem, candidate)
/// pair replaces an earlier one.
pub fn build_per_problem_timing_map(
    results: &[BenchmarkResult],
    problems: &[Problem],
) -> Result<PerProblemTimingMap> {
    let mut map = PerProblemTimingMap::new();
    for result in results {
        let problem = resolve(problems, result)?;
        map.entry(problem.index)
            .or_default()
            .insert(result.candidate_id.clone(), result.time_seconds);
    }
    Ok(map)
}

/// Every result of `candidate_id` as `(problem size, seconds)`, stable-sorted by size.
///
/// Every result's problem is resolved, including other candidates' results,
/// so an out-of-range index anywhere in the file is fatal.
pub fn series_for_candidate(
    results: &[BenchmarkResult],
    problems: &[Problem],
    candidate_id: &str,
) -> Result<SizeTimeSeries> {
    let mut points = Vec::new();
    for result in results {
        let problem = resolve(problems, result)?;
        if result.candidate_id == candidate_id {
            points.push((problem.size, result.time_seconds));
        }
    }
    points.sort_by(|(a, _), (b, _)| a.total_cmp(b));
    Ok(SizeTimeSeries { points })
}
