use crate::aggregate::{build_per_problem_timing_map, series_for_candidate, SizeTimeSeries};
use crate::format::{annotation, format_size_title};
use crate::loader::BenchmarkData;
use crate::model::DataError;
use crate::settings::Settings;
use anyhow::{Context, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};

const CHART_SIZE: (u32, u32) = (1000, 600);

// Room below the plot for candidate names and the x-axis title
const DEFAULT_MARGIN_BOTTOM: u32 = 55;
const DEFAULT_X_LABEL_AREA_SIZE: u32 = 60;
const DEFAULT_Y_LABEL_AREA_SIZE: u32 = 90;

// Settings carry font sizes in points; SVG text is sized in pixels.
const FONT_SCALE: f64 = 1.6;
const TITLE_FONT_EXTRA: u32 = 8;

const BAR_WIDTH: f64 = 0.8;
/// Annotations hang below `3 * height` of their own bar
const ANNOTATION_HEIGHT_FACTOR: f64 = 3.0;

const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);

/// Line colors, picked by the candidate's position in the caller's key list
const COLORS: &[RGBColor] = &[
    RGBColor(31, 119, 180),  // Blue
    RGBColor(255, 127, 14),  // Orange
    RGBColor(44, 160, 44),   // Green
    RGBColor(214, 39, 40),   // Red
    RGBColor(148, 103, 189), // Purple
    RGBColor(140, 86, 75),   // Brown
    RGBColor(227, 119, 194), // Pink
    RGBColor(127, 127, 127), // Gray
];

fn font_px(settings: &Settings) -> u32 {
    (settings.font_size * FONT_SCALE).round().max(1.0) as u32
}

/// One bar of a per-problem chart
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// 1-based, dense over the candidates that have data
    pub x: usize,
    pub candidate_id: String,
    /// Tick label (candidate display name)
    pub label: String,
    pub time_seconds: f64,
    /// Ratio and absolute time, one per line
    pub annotation: Option<String>,
}

/// Everything needed to draw the bar chart of one problem
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartPlan {
    pub problem_index: usize,
    pub problem_size: f64,
    pub title: String,
    pub bars: Vec<Bar>,
    /// Time of the leftmost bar
    pub baseline: Option<f64>,
    pub path: PathBuf,
}

/// One curve of the line plot
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeriesPlan {
    pub candidate_id: String,
    pub label: String,
    pub color_index: usize,
    pub series: SizeTimeSeries,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinePlotPlan {
    /// In draw order (reverse of the caller's key order)
    pub lines: Vec<LineSeriesPlan>,
    pub path: PathBuf,
}

/// Lay out one bar chart per problem, in problem order.
///
/// Fails before anything is drawn if a key is unknown, a result points to a
/// missing problem, or a problem has no results at all.
pub fn plan_barplots<S: AsRef<str>>(
    keys: &[S],
    data: &BenchmarkData,
    settings: &Settings,
) -> Result<Vec<BarChartPlan>> {
    data.candidates.require_all(keys)?;
    let timings = build_per_problem_timing_map(&data.results, &data.problems)?;

    data.problems
        .iter()
        .map(|problem| -> Result<BarChartPlan> {
            let by_candidate = timings
                .get(&problem.index)
                .ok_or(DataError::NoResultsForProblem(problem.index))?;

            let mut bars: Vec<Bar> = Vec::with_capacity(keys.len());
            for key in keys {
                let key = key.as_ref();
                if let Some(&time_seconds) = by_candidate.get(key) {
                    bars.push(Bar {
                        x: bars.len() + 1,
                        candidate_id: key.to_string(),
                        label: data.candidates.name(key).to_string(),
                        time_seconds,
                        annotation: None,
                    });
                }
            }

            let baseline = bars.first().map(|b| b.time_seconds);
            if let Some(leftmost) = baseline.filter(|&t| t > 0.0) {
                for bar in &mut bars {
                    bar.annotation = Some(annotation(bar.time_seconds, leftmost));
                }
            }

            Ok(BarChartPlan {
                problem_index: problem.index,
                problem_size: problem.size,
                title: format_size_title(&settings.size_format, problem.size),
                bars,
                baseline,
                path: settings.bars_path(problem.index),
            })
        })
        .collect()
}

/// Lay out the size/time curves, last key first so the first key ends up on top
pub fn plan_lineplot<S: AsRef<str>>(
    keys: &[S],
    data: &BenchmarkData,
    settings: &Settings,
) -> Result<LinePlotPlan> {
    data.candidates.require_all(keys)?;

    let lines = keys
        .iter()
        .enumerate()
        .rev()
        .map(|(color_index, key)| -> Result<LineSeriesPlan> {
            let key = key.as_ref();
            Ok(LineSeriesPlan {
                candidate_id: key.to_string(),
                label: data.candidates.name(key).to_string(),
                color_index,
                series: series_for_candidate(&data.results, &data.problems, key)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(LinePlotPlan {
        lines,
        path: settings.lineplot_path(),
    })
}

/// Write `{outputprefix}barsNNNN.svg` for every problem under `root`.
///
/// Returns the written paths in problem order.
pub fn render_barplots<S: AsRef<str>>(
    keys: &[S],
    root: &Path,
    settings: &Settings,
) -> Result<Vec<PathBuf>> {
    let data = BenchmarkData::load(root)?;
    let plans = plan_barplots(keys, &data, settings)?;

    let mut written = Vec::with_capacity(plans.len());
    for plan in &plans {
        draw_barplot(plan, settings)
            .with_context(|| format!("Failed to draw {}", plan.path.display()))?;
        finish_plot(&plan.path, settings);
        written.push(plan.path.clone());
    }
    Ok(written)
}

/// Write `{outputprefix}lineplot.svg` for the candidates in `keys`
pub fn render_lineplot<S: AsRef<str>>(
    keys: &[S],
    root: &Path,
    settings: &Settings,
) -> Result<PathBuf> {
    let data = BenchmarkData::load(root)?;
    let plan = plan_lineplot(keys, &data, settings)?;

    draw_lineplot(&plan, settings)
        .with_context(|| format!("Failed to draw {}", plan.path.display()))?;
    finish_plot(&plan.path, settings);
    Ok(plan.path)
}

fn finish_plot(path: &Path, settings: &Settings) {
    if settings.interactive {
        println!(
            "Interactive display is not available, figure saved to {}",
            path.display()
        );
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {}", parent.display())),
        _ => Ok(()),
    }
}

fn tick_label(labels: &[&str], x: f64) -> String {
    let idx = x.round();
    if idx >= 1.0 && (x - idx).abs() < 0.3 {
        labels
            .get(idx as usize - 1)
            .map(|s| s.to_string())
            .unwrap_or_default()
    } else {
        String::new()
    }
}

/// y range of a bar chart; the top leaves room for the annotations
fn bar_y_bounds(bars: &[Bar], logy: bool) -> (f64, f64) {
    let top = bars
        .iter()
        .map(|b| b.time_seconds * ANNOTATION_HEIGHT_FACTOR)
        .fold(0.0_f64, f64::max);

    if logy {
        let min_positive = bars
            .iter()
            .map(|b| b.time_seconds)
            .filter(|&t| t > 0.0)
            .fold(f64::MAX, f64::min);
        if min_positive == f64::MAX {
            return (1.0, 10.0);
        }
        let lo = min_positive / 2.0;
        (lo, (top * 1.5).max(lo * 10.0))
    } else {
        let bottom = bars
            .iter()
            .map(|b| b.time_seconds)
            .fold(0.0_f64, f64::min);
        let hi = if top > 0.0 { top * 1.1 } else { 1.0 };
        (bottom * 1.1, hi)
    }
}

/// Padded bounds of `values`; on a log axis only positive values count
fn axis_bounds(values: impl Iterator<Item = f64>, log: bool) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite() && (!log || *v > 0.0))
        .fold((f64::MAX, f64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if lo > hi {
        return if log { (1.0, 10.0) } else { (0.0, 1.0) };
    }
    if log {
        (lo / 1.5, hi * 1.5)
    } else {
        let pad = if hi > lo {
            (hi - lo) * 0.05
        } else {
            (hi.abs() * 0.05).max(1.0)
        };
        (lo - pad, hi + pad)
    }
}

macro_rules! draw_bars {
    ($area:expr, $y_range:expr, $y_floor:expr, $plan:expr, $settings:expr) => {{
        let plan: &BarChartPlan = $plan;
        let settings: &Settings = $settings;
        let font = font_px(settings);
        let n = plan.bars.len().max(1);
        let labels: Vec<&str> = plan.bars.iter().map(|b| b.label.as_str()).collect();

        let mut chart = ChartBuilder::on($area)
            .caption(&plan.title, ("sans-serif", font + TITLE_FONT_EXTRA))
            .margin(20)
            .margin_bottom(DEFAULT_MARGIN_BOTTOM)
            .x_label_area_size(DEFAULT_X_LABEL_AREA_SIZE)
            .y_label_area_size(DEFAULT_Y_LABEL_AREA_SIZE)
            .build_cartesian_2d(0.5..(n as f64 + 0.5), $y_range)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&|x| tick_label(&labels, *x))
            .y_desc(settings.ylabel.as_str())
            .label_style(("sans-serif", font))
            .axis_desc_style(("sans-serif", font))
            .draw()?;

        let y_floor: f64 = $y_floor;
        let line_height = font as i32 + 2;
        let text_style = ("sans-serif", font)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));

        for bar in &plan.bars {
            if settings.logy && bar.time_seconds <= 0.0 {
                continue;
            }
            let x = bar.x as f64;

            chart.draw_series(std::iter::once(Rectangle::new(
                [
                    (x - BAR_WIDTH / 2.0, y_floor),
                    (x + BAR_WIDTH / 2.0, bar.time_seconds),
                ],
                BAR_COLOR.filled(),
            )))?;

            if let Some(text) = &bar.annotation {
                let anchor = (x, bar.time_seconds * ANNOTATION_HEIGHT_FACTOR);
                for (line_no, line) in text.lines().enumerate() {
                    chart.draw_series(std::iter::once(
                        EmptyElement::at(anchor)
                            + Text::new(
                                line.to_string(),
                                (0, line_no as i32 * line_height),
                                text_style.clone(),
                            ),
                    ))?;
                }
            }
        }
    }};
}

fn draw_barplot(plan: &BarChartPlan, settings: &Settings) -> Result<()> {
    ensure_parent_dir(&plan.path)?;
    let root = SVGBackend::new(&plan.path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let (lo, hi) = bar_y_bounds(&plan.bars, settings.logy);
    if settings.logy {
        draw_bars!(&root, (lo..hi).log_scale(), lo, plan, settings);
    } else {
        draw_bars!(&root, lo..hi, 0.0, plan, settings);
    }

    root.present()?;
    println!("Generated: {}", plan.path.display());
    Ok(())
}

macro_rules! draw_lines {
    ($area:expr, $x_range:expr, $y_range:expr, $plan:expr, $visible:expr, $settings:expr) => {{
        let plan: &LinePlotPlan = $plan;
        let settings: &Settings = $settings;
        let font = font_px(settings);

        let mut chart = ChartBuilder::on($area)
            .margin(20)
            .margin_bottom(DEFAULT_MARGIN_BOTTOM)
            .x_label_area_size(DEFAULT_X_LABEL_AREA_SIZE)
            .y_label_area_size(DEFAULT_Y_LABEL_AREA_SIZE)
            .build_cartesian_2d($x_range, $y_range)?;

        chart
            .configure_mesh()
            .x_desc(settings.xlabel.as_str())
            .y_desc(settings.ylabel.as_str())
            .label_style(("sans-serif", font))
            .axis_desc_style(("sans-serif", font))
            .draw()?;

        for (line, points) in plan.lines.iter().zip($visible) {
            let color = COLORS[line.color_index % COLORS.len()];
            chart
                .draw_series(LineSeries::new(
                    points.iter().copied(),
                    color.stroke_width(3),
                ))?
                .label(line.label.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3))
                });
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", font))
            .draw()?;
    }};
}

fn draw_lineplot(plan: &LinePlotPlan, settings: &Settings) -> Result<()> {
    ensure_parent_dir(&plan.path)?;
    let root = SVGBackend::new(&plan.path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let (logx, logy) = (settings.logx, settings.logy);
    // Non-positive points have no place on a log axis
    let visible: Vec<Vec<(f64, f64)>> = plan
        .lines
        .iter()
        .map(|line| {
            line.series
                .points
                .iter()
                .copied()
                .filter(|&(x, y)| (!logx || x > 0.0) && (!logy || y > 0.0))
                .collect()
        })
        .collect();

    let (x_lo, x_hi) = axis_bounds(visible.iter().flatten().map(|&(x, _)| x), logx);
    let (y_lo, y_hi) = axis_bounds(visible.iter().flatten().map(|&(_, y)| y), logy);

    match (logx, logy) {
        (true, true) => draw_lines!(
            &root,
            (x_lo..x_hi).log_scale(),
            (y_lo..y_hi).log_scale(),
            plan,
            &visible,
            settings
        ),
        (true, false) => draw_lines!(
            &root,
            (x_lo..x_hi).log_scale(),
            y_lo..y_hi,
            plan,
            &visible,
            settings
        ),
        (false, true) => draw_lines!(
            &root,
            x_lo..x_hi,
            (y_lo..y_hi).log_scale(),
            plan,
            &visible,
            settings
        ),
        (false, false) => draw_lines!(&root, x_lo..x_hi, y_lo..y_hi, plan, &visible, settings),
    }

    root.present()?;
    println!("Generated: {}", plan.path.display());
    Ok(())
}
