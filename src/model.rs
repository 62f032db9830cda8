use anyhow::Result;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// One benchmarked implementation (a language or library variant)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: String,
    /// Display name used for tick labels and legends
    pub name: String,
}

/// One workload instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Problem {
    /// Position in the dense `0..count` problem sequence
    pub index: usize,
    /// Scalar size used for titles and line-plot x placement
    pub size: f64,
}

/// One measured run of a candidate on a problem
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BenchmarkResult {
    #[serde(rename = "problem-index")]
    pub problem_index: usize,
    #[serde(rename = "cand-key")]
    pub candidate_id: String,
    #[serde(rename = "time-seconds")]
    pub time_seconds: f64,
}

/// Fatal data conditions detected after the JSON itself parsed fine
#[derive(Debug, Clone, PartialEq)]
pub enum DataError {
    /// A requested key is not in `candidates.json`
    UnknownCandidate(String),
    /// A result points past the last problem declared in `probleminfo.json`
    ProblemIndexOutOfRange { index: usize, count: usize },
    /// No result at all was recorded for this problem
    NoResultsForProblem(usize),
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::UnknownCandidate(id) => {
                write!(f, "Unknown candidate '{}' (not in candidates.json)", id)
            }
            DataError::ProblemIndexOutOfRange { index, count } => write!(
                f,
                "Result refers to problem {} but only {} problems are declared",
                index, count
            ),
            DataError::NoResultsForProblem(index) => {
                write!(f, "No results recorded for problem {}", index)
            }
        }
    }
}

impl std::error::Error for DataError {}

/// Candidates keyed by id
#[derive(Debug, Clone, Default)]
pub struct CandidateRegistry {
    candidates: BTreeMap<String, Candidate>,
}

impl CandidateRegistry {
    pub fn new(candidates: impl IntoIterator<Item = Candidate>) -> Self {
        Self {
            candidates: candidates
                .into_iter()
                .map(|c| (c.id.clone(), c))
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Candidate> {
        self.candidates.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.candidates.contains_key(id)
    }

    /// Display name for `id`, falling back to the id itself
    pub fn name<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map(|c| c.name.as_str()).unwrap_or(id)
    }

    /// Fail on the first key that is not registered
    pub fn require_all<S: AsRef<str>>(&self, keys: &[S]) -> Result<()> {
        for key in keys {
            let key = key.as_ref();
            if !self.contains(key) {
                return Err(DataError::UnknownCandidate(key.to_string()).into());
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> CandidateRegistry {
        CandidateRegistry::new(vec![
            Candidate {
                id: "cpp".to_string(),
                name: "C++".to_string(),
            },
            Candidate {
                id: "java".to_string(),
                name: "Java".to_string(),
            },
        ])
    }

    #[test]
    fn test_require_all_accepts_known_keys() {
        let reg = registry();
        assert!(reg.require_all(&["java", "cpp"]).is_ok());
        assert!(reg.require_all::<&str>(&[]).is_ok());
    }

    #[test]
    fn test_require_all_reports_first_unknown_key() {
        let reg = registry();
        let err = reg.require_all(&["cpp", "rust", "go"]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DataError>(),
            Some(&DataError::UnknownCandidate("rust".to_string()))
        );
    }

    #[test]
    fn test_name_lookup() {
        let reg = registry();
        assert_eq!(reg.name("cpp"), "C++");
        assert_eq!(reg.name("missing"), "missing");
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_result_deserializes_hyphenated_fields() {
        let json = r#"{"problem-index": 3, "cand-key": "java", "time-seconds": 1.25}"#;
        let result: BenchmarkResult = serde_json::from_str(json).unwrap();
        assert_eq!(
            result,
            BenchmarkResult {
                problem_index: 3,
                candidate_id: "java".to_string(),
                time_seconds: 1.25,
            }
        );
    }

    #[test]
    fn test_result_rejects_negative_index() {
        let json = r#"{"problem-index": -1, "cand-key": "java", "time-seconds": 1.0}"#;
        assert!(serde_json::from_str::<BenchmarkResult>(json).is_err());
    }
}
