use anyhow::{Context, Result};
use bench_figures::chart::{render_barplots, render_lineplot};
use bench_figures::loader::BenchmarkData;
use bench_figures::presets::Preset;
use bench_figures::report::print_timing_table;
use bench_figures::settings::Settings;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "bench-figures")]
#[command(about = "Render benchmark timing results as bar charts and line plots")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render charts for an arbitrary benchmark root
    Plot {
        /// Benchmark root containing candidates.json, results.json, ...
        #[arg(short, long)]
        root: PathBuf,

        /// Candidate ids, leftmost bar first
        #[arg(short, long, value_delimiter = ',', required = true)]
        keys: Vec<String>,

        /// JSON settings file applied before the flags below
        #[arg(short, long)]
        settings: Option<PathBuf>,

        #[command(flatten)]
        overrides: SettingsOverrides,

        /// Only render the per-problem bar charts
        #[arg(long, conflicts_with = "lines_only")]
        bars_only: bool,

        /// Only render the line plot
        #[arg(long)]
        lines_only: bool,

        /// Print the timing table before rendering
        #[arg(short, long, default_value = "false")]
        verbose: bool,
    },

    /// Render one of the fixed report figure sets (nbody, tempexpr, circle)
    Preset {
        /// Preset name
        name: String,

        /// Override the preset's benchmark root
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Override the preset's output prefix
        #[arg(short, long)]
        output_prefix: Option<String>,

        /// Print the timing table before rendering
        #[arg(short, long, default_value = "false")]
        verbose: bool,
    },

    /// Print per-problem timings and ratios without rendering
    Summary {
        #[arg(short, long)]
        root: PathBuf,

        #[arg(short, long, value_delimiter = ',', required = true)]
        keys: Vec<String>,

        /// Title template used for each problem heading
        #[arg(long, default_value = "Data size {:d}")]
        size_format: String,
    },
}

#[derive(Args)]
struct SettingsOverrides {
    /// Path prefix for the output files
    #[arg(short, long)]
    output_prefix: Option<String>,

    /// Log-scale the x axis of the line plot
    #[arg(long)]
    logx: Option<bool>,

    /// Log-scale the y axis
    #[arg(long)]
    logy: Option<bool>,

    #[arg(long)]
    xlabel: Option<String>,

    #[arg(long)]
    ylabel: Option<String>,

    /// Bar chart title template, e.g. "{:d} points"
    #[arg(long)]
    size_format: Option<String>,

    /// Font size in points
    #[arg(long)]
    font_size: Option<f64>,

    /// Ask for the figures to be shown after saving
    #[arg(long)]
    interactive: bool,
}

impl SettingsOverrides {
    fn apply(self, base: Settings) -> Settings {
        Settings {
            output_prefix: self.output_prefix.unwrap_or(base.output_prefix),
            logx: self.logx.unwrap_or(base.logx),
            logy: self.logy.unwrap_or(base.logy),
            xlabel: self.xlabel.unwrap_or(base.xlabel),
            ylabel: self.ylabel.unwrap_or(base.ylabel),
            size_format: self.size_format.unwrap_or(base.size_format),
            font_size: self.font_size.unwrap_or(base.font_size),
            interactive: self.interactive || base.interactive,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Plot {
            root,
            keys,
            settings,
            overrides,
            bars_only,
            lines_only,
            verbose,
        } => {
            let base = match settings {
                Some(path) => Settings::from_json_file(&path)?,
                None => Settings::default(),
            };
            let settings = overrides.apply(base);
            render(&root, &keys, &settings, !lines_only, !bars_only, verbose)?;
        }
        Commands::Preset {
            name,
            root,
            output_prefix,
            verbose,
        } => {
            let preset = Preset::from_name(&name).with_context(|| {
                let known: Vec<&str> = Preset::all().iter().map(|p| p.name()).collect();
                format!("Unknown preset '{}' (expected one of: {})", name, known.join(", "))
            })?;

            let root = root.unwrap_or_else(|| PathBuf::from(preset.default_root()));
            let mut settings = preset.settings();
            if let Some(prefix) = output_prefix {
                settings.output_prefix = prefix;
            }

            println!("Rendering preset '{}'...", preset.name());
            render(&root, &preset.keys(), &settings, true, true, verbose)?;
        }
        Commands::Summary {
            root,
            keys,
            size_format,
        } => {
            let data = BenchmarkData::load(&root)
                .with_context(|| format!("Failed to load benchmark root {}", root.display()))?;
            print_timing_table(&data, &keys, &size_format)?;
        }
    }

    Ok(())
}

fn render(
    root: &Path,
    keys: &[String],
    settings: &Settings,
    bars: bool,
    lines: bool,
    verbose: bool,
) -> Result<()> {
    println!("\nBenchmark root: {}", root.display());
    println!("  Candidates: {}", keys.join(", "));
    println!("  Output prefix: {}", settings.output_prefix);

    if verbose {
        let data = BenchmarkData::load(root)
            .with_context(|| format!("Failed to load benchmark root {}", root.display()))?;
        print_timing_table(&data, keys, &settings.size_format)?;
    }

    if bars {
        println!("\nGenerating bar charts...");
        let written = render_barplots(keys, root, settings)?;
        println!("  {} bar charts", written.len());
    }

    if lines {
        println!("\nGenerating line plot...");
        render_lineplot(keys, root, settings)?;
    }

    println!("\nDone!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plot_overrides(args: &[&str]) -> SettingsOverrides {
        let argv = ["bench-figures", "plot", "--root", "bench", "--keys", "a,b"]
            .iter()
            .chain(args.iter())
            .copied();
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Plot { overrides, keys, .. } => {
                assert_eq!(keys, vec!["a", "b"]);
                overrides
            }
            _ => panic!("expected plot command"),
        }
    }

    #[test]
    fn test_interactive_flag() {
        let settings = plot_overrides(&["--interactive"]).apply(Settings::default());
        assert!(settings.interactive);

        let settings = plot_overrides(&[]).apply(Settings::default());
        assert!(!settings.interactive);
    }

    #[test]
    fn test_overrides_keep_unset_fields() {
        let base = Settings {
            interactive: true,
            xlabel: "Number of points".to_string(),
            ..Settings::default()
        };
        let settings = plot_overrides(&["--logy", "false", "--output-prefix", "figs/x"]).apply(base);

        assert!(!settings.logy);
        assert!(settings.logx);
        assert!(settings.interactive);
        assert_eq!(settings.output_prefix, "figs/x");
        assert_eq!(settings.xlabel, "Number of points");
    }
}
