use crate::model::{BenchmarkResult, Candidate, CandidateRegistry, Problem};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Deserialize)]
struct CandidateEntry {
    name: String,
}

#[derive(Deserialize)]
struct ProblemInfo {
    count: usize,
}

#[derive(Deserialize)]
struct ProblemEntry {
    size: f64,
}

/// Everything loaded from one benchmark root
#[derive(Debug, Clone)]
pub struct BenchmarkData {
    pub candidates: CandidateRegistry,
    pub results: Vec<BenchmarkResult>,
    pub problems: Vec<Problem>,
}

impl BenchmarkData {
    pub fn load(root: &Path) -> Result<Self> {
        Ok(Self {
            candidates: load_candidates(root)?,
            results: load_results(root)?,
            problems: load_problems(root)?,
        })
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load `candidates.json` (candidate id -> `{"name": ...}`)
pub fn load_candidates(root: &Path) -> Result<CandidateRegistry> {
    let entries: BTreeMap<String, CandidateEntry> = load_json(&root.join("candidates.json"))?;
    Ok(CandidateRegistry::new(entries.into_iter().map(
        |(id, entry)| Candidate {
            id,
            name: entry.name,
        },
    )))
}

/// Load `results.json` in file order
pub fn load_results(root: &Path) -> Result<Vec<BenchmarkResult>> {
    load_json(&root.join("results.json"))
}

pub fn problem_path(root: &Path, index: usize) -> std::path::PathBuf {
    root.join(format!("problem{:04}.json", index))
}

/// Load `probleminfo.json` and then every `problemNNNN.json` it declares
pub fn load_problems(root: &Path) -> Result<Vec<Problem>> {
    let info: ProblemInfo = load_json(&root.join("probleminfo.json"))?;

    (0..info.count)
        .map(|index| {
            let entry: ProblemEntry = load_json(&problem_path(root, index))?;
            Ok(Problem {
                index,
                size: entry.size,
            })
        })
        .collect()
}
