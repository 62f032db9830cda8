use crate::settings::Settings;

/// Fixed figure sets produced for the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// n-body simulation, linear axes
    Nbody,
    /// Temporary-expression elimination, log/log axes
    Tempexpr,
    /// Circle fitting optimization
    Circle,
}

const KEYS: &[&str] = &["cpp", "geex", "java", "clojure"];

impl Preset {
    pub fn all() -> &'static [Preset] {
        &[Preset::Nbody, Preset::Tempexpr, Preset::Circle]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Nbody => "nbody",
            Preset::Tempexpr => "tempexpr",
            Preset::Circle => "circle",
        }
    }

    pub fn from_name(name: &str) -> Option<Preset> {
        Preset::all().iter().copied().find(|p| p.name() == name)
    }

    /// Candidate ids, leftmost bar first
    pub fn keys(&self) -> Vec<String> {
        KEYS.iter().map(|k| k.to_string()).collect()
    }

    pub fn default_root(&self) -> String {
        format!("../benchmarks/{}", self.name())
    }

    pub fn settings(&self) -> Settings {
        let output_prefix = format!("../latex/images/benchmarks/{}", self.name());
        match self {
            Preset::Nbody => Settings {
                output_prefix,
                size_format: "{:d} iterations".to_string(),
                xlabel: "Number of iterations".to_string(),
                logx: false,
                logy: false,
                ..Settings::default()
            },
            Preset::Tempexpr => Settings {
                output_prefix,
                size_format: "{:d} points".to_string(),
                xlabel: "Number of vectors".to_string(),
                logx: true,
                logy: true,
                ..Settings::default()
            },
            Preset::Circle => Settings {
                output_prefix,
                size_format: "{:d} points".to_string(),
                xlabel: "Number of points".to_string(),
                ylabel: "Computation time (seconds)".to_string(),
                ..Settings::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_roundtrip() {
        for &preset in Preset::all() {
            assert_eq!(Preset::from_name(preset.name()), Some(preset));
        }
        assert_eq!(Preset::from_name("square"), None);
    }

    #[test]
    fn test_nbody_uses_linear_axes() {
        let settings = Preset::Nbody.settings();
        assert!(!settings.logx);
        assert!(!settings.logy);
        assert_eq!(settings.output_prefix, "../latex/images/benchmarks/nbody");
        assert_eq!(settings.ylabel, "Duration (s)");
        assert_eq!(Preset::Nbody.default_root(), "../benchmarks/nbody");
    }

    #[test]
    fn test_circle_overrides_ylabel_only() {
        let settings = Preset::Circle.settings();
        assert!(settings.logx && settings.logy);
        assert_eq!(settings.ylabel, "Computation time (seconds)");
        assert_eq!(settings.xlabel, "Number of points");
    }

    #[test]
    fn test_keys_order() {
        assert_eq!(Preset::Tempexpr.keys(), vec!["cpp", "geex", "java", "clojure"]);
    }
}
