pub mod aggregate;
pub mod chart;
pub mod format;
pub mod loader;
pub mod model;
pub mod presets;
pub mod report;
pub mod settings;

#[cfg(test)]
mod test_support;

pub use chart::{render_barplots, render_lineplot};
pub use loader::BenchmarkData;
pub use settings::Settings;
