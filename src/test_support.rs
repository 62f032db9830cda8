use serde_json::json;
use std::path::Path;

/// `(problem index, candidate id, seconds)`
pub struct FixtureResult(pub usize, pub &'static str, pub f64);

/// Write a complete benchmark root into `dir`
pub fn write_root(
    dir: &Path,
    candidates: &[(&str, &str)],
    sizes: &[f64],
    results: &[FixtureResult],
) {
    let candidates: serde_json::Map<String, serde_json::Value> = candidates
        .iter()
        .map(|(id, name)| (id.to_string(), json!({ "name": name })))
        .collect();
    std::fs::write(
        dir.join("candidates.json"),
        serde_json::to_string_pretty(&candidates).unwrap(),
    )
    .unwrap();

    std::fs::write(
        dir.join("probleminfo.json"),
        json!({ "count": sizes.len() }).to_string(),
    )
    .unwrap();
    for (index, size) in sizes.iter().enumerate() {
        std::fs::write(
            dir.join(format!("problem{:04}.json", index)),
            json!({ "size": size }).to_string(),
        )
        .unwrap();
    }

    let results: Vec<serde_json::Value> = results
        .iter()
        .map(|FixtureResult(index, key, time)| {
            json!({ "problem-index": index, "cand-key": key, "time-seconds": time })
        })
        .collect();
    std::fs::write(
        dir.join("results.json"),
        serde_json::to_string_pretty(&results).unwrap(),
    )
    .unwrap();
}
