//! PNG charts at 300 DPI.
//!
//! Figure sizes are given in inches and font sizes in points, so the
//! output matches print resolution regardless of chart layout. Text is
//! rendered with a bundled DejaVu Sans face.

use std::fmt::Display;
use std::path::Path;
use std::sync::OnceLock;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::register_font;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::tables::load_percentage;
use crate::error::{Error, Result};
use crate::model::WorkloadProblem;
use crate::sa::acceptance_probability;
use crate::search::Outcome;

/// Output resolution in dots per inch.
pub const DPI: f64 = 300.0;

const FIGURE: (f64, f64) = (10.0, 6.0);
const GRID_FIGURE: (f64, f64) = (12.0, 9.0);
const PANEL_HEIGHT: f64 = 3.5;

const TITLE_PT: f64 = 14.0;
const PANEL_TITLE_PT: f64 = 12.0;
const AXIS_PT: f64 = 11.0;
const TICK_PT: f64 = 9.0;
const LEGEND_PT: f64 = 10.0;
const LINE_PT: f64 = 1.5;

const HISTOGRAM_BIN_HOURS: f64 = 2.0;
const ACCEPTANCE_WINDOWS: usize = 100;
const PALETTE: [RGBColor; 6] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
];

static FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// One named line of `(x, y)` points.
type Series<'a> = (&'a str, Vec<(f64, f64)>);

fn plot_error<E: Display>(err: E) -> Error {
    Error::Plot(err.to_string())
}

fn ensure_font() -> Result<()> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    let ok = *REGISTERED
        .get_or_init(|| register_font("sans-serif", FontStyle::Normal, FONT).is_ok());
    if ok {
        Ok(())
    } else {
        Err(Error::Plot("bundled font could not be loaded".into()))
    }
}

/// Pixel size of a figure given in inches.
fn pixels((width, height): (f64, f64)) -> (u32, u32) {
    ((width * DPI).round() as u32, (height * DPI).round() as u32)
}

/// Points to pixels.
fn pt(points: f64) -> f64 {
    points * DPI / 72.0
}

fn font(points: f64) -> (&'static str, f64) {
    ("sans-serif", pt(points))
}

fn color(i: usize) -> RGBColor {
    PALETTE[i % PALETTE.len()]
}

fn canvas(path: &Path, inches: (f64, f64)) -> Result<Area<'_>> {
    ensure_font()?;
    let root = BitMapBackend::new(path, pixels(inches)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;
    Ok(root)
}

/// `(lo, hi)` padded by 5% so flat series stay visible.
fn padded_range<'a>(values: impl Iterator<Item = &'a f64>) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return (0.0, 1.0);
    }
    let pad = ((hi - lo) * 0.05).max(1e-3);
    (lo - pad, hi + pad)
}

fn indexed(values: &[f64]) -> Vec<(f64, f64)> {
    values.iter().enumerate().map(|(x, &y)| (x as f64, y)).collect()
}

/// Share of accepted moves per window, keyed by the step that closes it.
fn acceptance_rate(accepted: &[bool], windows: usize) -> Vec<(f64, f64)> {
    let size = accepted.len().div_ceil(windows.max(1)).max(1);
    accepted
        .chunks(size)
        .enumerate()
        .map(|(i, chunk)| {
            let hits = chunk.iter().filter(|&&a| a).count();
            ((i * size + chunk.len()) as f64, hits as f64 / chunk.len() as f64)
        })
        .collect()
}

/// Largest single-step drop in a fitness trace, or 1 when it never drops.
fn largest_drop(values: &[f64]) -> f64 {
    let drop = values
        .windows(2)
        .map(|w| w[0] - w[1])
        .filter(|d| d.is_finite())
        .fold(0.0, f64::max);
    if drop > 0.0 {
        drop
    } else {
        1.0
    }
}

fn draw_lines(
    area: &Area<'_>,
    title: &str,
    title_pt: f64,
    x_desc: &str,
    y_desc: &str,
    series: &[Series<'_>],
) -> Result<()> {
    let (x_min, x_max) = series
        .iter()
        .flat_map(|(_, points)| points.iter().map(|&(x, _)| x))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
            (lo.min(x), hi.max(x))
        });
    let (x_min, x_max) = if x_min < x_max {
        (x_min, x_max)
    } else if x_min.is_finite() {
        (x_min, x_min + 1.0)
    } else {
        (0.0, 1.0)
    };
    let ys: Vec<f64> = series
        .iter()
        .flat_map(|(_, points)| points.iter().map(|&(_, y)| y))
        .collect();
    let (y_min, y_max) = padded_range(ys.iter());

    let mut chart = ChartBuilder::on(area)
        .caption(title, font(title_pt))
        .margin(pt(8.0))
        .x_label_area_size(pt(36.0))
        .y_label_area_size(pt(54.0))
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(plot_error)?;
    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .label_style(font(TICK_PT))
        .axis_desc_style(font(AXIS_PT))
        .draw()
        .map_err(plot_error)?;

    let legend = pt(18.0) as i32;
    for (i, (label, points)) in series.iter().enumerate() {
        let c = color(i);
        chart
            .draw_series(LineSeries::new(
                points.iter().copied(),
                c.stroke_width(pt(LINE_PT) as u32),
            ))
            .map_err(plot_error)?
            .label(*label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + legend, y)], c.stroke_width(pt(LINE_PT) as u32))
            });
    }

    if series.len() > 1 {
        chart
            .configure_series_labels()
            .label_font(font(LEGEND_PT))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(plot_error)?;
    }
    Ok(())
}

fn draw_bars(
    area: &Area<'_>,
    title: &str,
    title_pt: f64,
    y_desc: &str,
    labels: &[&str],
    values: &[f64],
    precision: usize,
) -> Result<()> {
    let n = values.len();
    let (lo, hi) = padded_range(values.iter());
    let y_min = lo.min(0.0);
    let y_max = hi.max(0.0) + (hi - y_min).abs() * 0.1;

    let mut chart = ChartBuilder::on(area)
        .caption(title, font(title_pt))
        .margin(pt(8.0))
        .x_label_area_size(pt(30.0))
        .y_label_area_size(pt(54.0))
        .build_cartesian_2d((0..n).into_segmented(), y_min..y_max)
        .map_err(plot_error)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&|v: &SegmentValue<usize>| match v {
            SegmentValue::CenterOf(i) => labels.get(*i).map(|l| l.to_string()).unwrap_or_default(),
            _ => String::new(),
        })
        .y_desc(y_desc)
        .label_style(font(TICK_PT))
        .axis_desc_style(font(AXIS_PT))
        .draw()
        .map_err(plot_error)?;

    let gap = pt(12.0) as u32;
    chart
        .draw_series(values.iter().enumerate().map(|(i, &v)| {
            let mut bar = Rectangle::new(
                [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), v)],
                color(i).filled(),
            );
            bar.set_margin(0, 0, gap, gap);
            bar
        }))
        .map_err(plot_error)?;
    chart
        .draw_series(values.iter().enumerate().map(|(i, &v)| {
            Text::new(
                format!("{v:.precision$}"),
                (SegmentValue::CenterOf(i), v.max(0.0)),
                font(TICK_PT)
                    .into_font()
                    .color(&BLACK)
                    .pos(Pos::new(HPos::Center, VPos::Bottom)),
            )
        }))
        .map_err(plot_error)?;
    Ok(())
}

/// Best fitness per step, with the GA population mean or the SA current
/// fitness when recorded.
pub fn convergence(path: &Path, outcome: &Outcome) -> Result<()> {
    let trace = &outcome.trace;
    let mut series: Vec<Series<'_>> = vec![("best", indexed(&trace.best))];
    if let Some(mean) = &trace.mean {
        series.push(("population mean", indexed(mean)));
    }
    if let Some(current) = &trace.current {
        series.push(("current", indexed(current)));
    }

    let root = canvas(path, FIGURE)?;
    draw_lines(
        &root,
        &format!("{} convergence", outcome.algorithm.label()),
        TITLE_PT,
        "Step",
        "Fitness",
        &series,
    )?;
    root.present().map_err(plot_error)?;
    Ok(())
}

/// Annealing run in four panels: temperature per step, acceptance
/// probability against fitness change at the start, middle and end
/// temperatures, current and best fitness, and the accepted share of
/// moves over the run.
///
/// # Errors
/// Fails with [`Error::Plot`] when the outcome carries no temperature
/// trace.
pub fn cooling_process(path: &Path, outcome: &Outcome) -> Result<()> {
    let trace = &outcome.trace;
    let (Some(temperature), Some(current)) = (&trace.temperature, &trace.current) else {
        return Err(Error::Plot(format!(
            "{} recorded no temperature trace",
            outcome.algorithm.label()
        )));
    };
    let accepted = trace.accepted.as_deref().unwrap_or(&[]);

    let root = canvas(path, GRID_FIGURE)?;
    let root = root
        .titled(
            &format!("{} cooling process", outcome.algorithm.label()),
            font(TITLE_PT),
        )
        .map_err(plot_error)?;
    let panels = root.split_evenly((2, 2));

    draw_lines(
        &panels[0],
        "Temperature",
        PANEL_TITLE_PT,
        "Step",
        "Temperature",
        &[("temperature", indexed(temperature))],
    )?;

    let spread = largest_drop(current);
    let samples = 100;
    let picks = [0, temperature.len() / 2, temperature.len().saturating_sub(1)];
    let labels: Vec<String> = picks
        .iter()
        .filter_map(|&i| temperature.get(i))
        .map(|t| format!("T = {t:.3}"))
        .collect();
    let curves: Vec<Series<'_>> = picks
        .iter()
        .filter_map(|&i| temperature.get(i).copied())
        .zip(&labels)
        .map(|(t, label)| {
            let points = (0..=samples)
                .map(|k| {
                    let delta = -spread * k as f64 / samples as f64;
                    (delta, acceptance_probability(delta, t))
                })
                .collect();
            (label.as_str(), points)
        })
        .collect();
    draw_lines(
        &panels[1],
        "Acceptance probability",
        PANEL_TITLE_PT,
        "Fitness change",
        "Probability",
        &curves,
    )?;

    draw_lines(
        &panels[2],
        "Current and best fitness",
        PANEL_TITLE_PT,
        "Step",
        "Fitness",
        &[("best", indexed(&trace.best)), ("current", indexed(current))],
    )?;

    draw_lines(
        &panels[3],
        "Acceptance rate",
        PANEL_TITLE_PT,
        "Step",
        "Accepted share of moves",
        &[("accepted", acceptance_rate(accepted, ACCEPTANCE_WINDOWS))],
    )?;

    root.present().map_err(plot_error)?;
    Ok(())
}

/// One teaching-hour histogram panel per algorithm.
pub fn workload_distribution(path: &Path, outcomes: &[Outcome]) -> Result<()> {
    if outcomes.is_empty() {
        return Ok(());
    }
    let max_hours = outcomes
        .iter()
        .flat_map(|o| o.evaluation.teaching_hours.iter().copied())
        .fold(0.0, f64::max);
    let bins = ((max_hours / HISTOGRAM_BIN_HOURS).floor() as usize + 1).max(1);

    let histograms: Vec<Vec<usize>> = outcomes
        .iter()
        .map(|o| {
            let mut counts = vec![0usize; bins];
            for &h in &o.evaluation.teaching_hours {
                let bin = ((h.max(0.0) / HISTOGRAM_BIN_HOURS) as usize).min(bins - 1);
                counts[bin] += 1;
            }
            counts
        })
        .collect();
    let y_max = histograms.iter().flatten().copied().max().unwrap_or(1).max(1) as f64 * 1.1;
    let x_max = bins as f64 * HISTOGRAM_BIN_HOURS;

    let root = canvas(path, (FIGURE.0, PANEL_HEIGHT * outcomes.len() as f64))?;
    let panels = root.split_evenly((outcomes.len(), 1));

    for (i, (outcome, counts)) in outcomes.iter().zip(&histograms).enumerate() {
        let mut chart = ChartBuilder::on(&panels[i])
            .caption(
                format!("{} teaching hours", outcome.algorithm.label()),
                font(PANEL_TITLE_PT),
            )
            .margin(pt(8.0))
            .x_label_area_size(pt(30.0))
            .y_label_area_size(pt(44.0))
            .build_cartesian_2d(0f64..x_max, 0f64..y_max)
            .map_err(plot_error)?;
        chart
            .configure_mesh()
            .x_desc("Teaching hours per week")
            .y_desc("Professors")
            .label_style(font(TICK_PT))
            .axis_desc_style(font(AXIS_PT))
            .draw()
            .map_err(plot_error)?;
        let c = color(i);
        chart
            .draw_series(counts.iter().enumerate().map(|(b, &n)| {
                let x0 = b as f64 * HISTOGRAM_BIN_HOURS;
                Rectangle::new(
                    [(x0, 0.0), (x0 + HISTOGRAM_BIN_HOURS, n as f64)],
                    c.mix(0.7).filled(),
                )
            }))
            .map_err(plot_error)?;
    }

    root.present().map_err(plot_error)?;
    Ok(())
}

/// Final fitness per algorithm as a bar chart.
pub fn fitness_comparison(path: &Path, outcomes: &[Outcome]) -> Result<()> {
    if outcomes.is_empty() {
        return Ok(());
    }
    let labels: Vec<&str> = outcomes.iter().map(|o| o.algorithm.label()).collect();
    let values: Vec<f64> = outcomes.iter().map(|o| o.evaluation.fitness).collect();

    let root = canvas(path, FIGURE)?;
    draw_bars(&root, "Final fitness by algorithm", TITLE_PT, "Fitness", &labels, &values, 4)?;
    root.present().map_err(plot_error)?;
    Ok(())
}

/// Wall-clock run time per algorithm as a bar chart.
pub fn execution_time_comparison(path: &Path, outcomes: &[Outcome]) -> Result<()> {
    if outcomes.is_empty() {
        return Ok(());
    }
    let labels: Vec<&str> = outcomes.iter().map(|o| o.algorithm.label()).collect();
    let values: Vec<f64> = outcomes.iter().map(|o| o.elapsed.as_secs_f64()).collect();

    let root = canvas(path, FIGURE)?;
    draw_bars(
        &root,
        "Algorithm execution time",
        TITLE_PT,
        "Execution time (s)",
        &labels,
        &values,
        3,
    )?;
    root.present().map_err(plot_error)?;
    Ok(())
}

/// Fitness, run time, fairness and expertise scores side by side.
pub fn performance_comparison(path: &Path, outcomes: &[Outcome]) -> Result<()> {
    if outcomes.is_empty() {
        return Ok(());
    }
    let labels: Vec<&str> = outcomes.iter().map(|o| o.algorithm.label()).collect();
    let metric = |f: fn(&Outcome) -> f64| outcomes.iter().map(f).collect::<Vec<f64>>();
    let panels_data = [
        ("Fitness", "Fitness", metric(|o: &Outcome| o.evaluation.fitness), 4),
        (
            "Execution time",
            "Time (s)",
            metric(|o: &Outcome| o.elapsed.as_secs_f64()),
            3,
        ),
        (
            "Fairness",
            "Fairness score",
            metric(|o: &Outcome| o.evaluation.components.fairness),
            3,
        ),
        (
            "Expertise match",
            "Expertise score",
            metric(|o: &Outcome| o.evaluation.components.expertise),
            3,
        ),
    ];

    let root = canvas(path, GRID_FIGURE)?;
    let root = root
        .titled("Algorithm performance comparison", font(TITLE_PT))
        .map_err(plot_error)?;
    let panels = root.split_evenly((2, 2));
    for (panel, (title, y_desc, values, precision)) in panels.iter().zip(&panels_data) {
        draw_bars(panel, title, PANEL_TITLE_PT, y_desc, &labels, values, *precision)?;
    }

    root.present().map_err(plot_error)?;
    Ok(())
}

/// Load percentages sorted ascending, one curve per algorithm, with the
/// 100% line for reference.
pub fn fairness_analysis(path: &Path, problem: &WorkloadProblem, outcomes: &[Outcome]) -> Result<()> {
    if outcomes.is_empty() {
        return Ok(());
    }
    let curves: Vec<Vec<f64>> = outcomes
        .iter()
        .map(|o| {
            let mut loads: Vec<f64> = problem
                .professors()
                .iter()
                .zip(&o.evaluation.teaching_hours)
                .map(|(p, &h)| load_percentage(h, p.max_teaching_load))
                .collect();
            loads.sort_by(f64::total_cmp);
            loads
        })
        .collect();
    let x_max = problem.professor_count().max(2) as f64 - 1.0;
    let (_, hi) = padded_range(curves.iter().flatten());
    let y_max = hi.max(110.0);

    let root = canvas(path, FIGURE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Teaching load distribution", font(TITLE_PT))
        .margin(pt(8.0))
        .x_label_area_size(pt(36.0))
        .y_label_area_size(pt(54.0))
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)
        .map_err(plot_error)?;
    chart
        .configure_mesh()
        .x_desc("Professor (sorted by load)")
        .y_desc("Load % of maximum teaching hours")
        .label_style(font(TICK_PT))
        .axis_desc_style(font(AXIS_PT))
        .draw()
        .map_err(plot_error)?;

    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(0.0, 100.0), (x_max, 100.0)],
            BLACK.mix(0.5).stroke_width(pt(0.75) as u32),
        )))
        .map_err(plot_error)?;

    let legend = pt(18.0) as i32;
    for (i, (outcome, loads)) in outcomes.iter().zip(&curves).enumerate() {
        let c = color(i);
        chart
            .draw_series(LineSeries::new(indexed(loads), c.stroke_width(pt(LINE_PT) as u32)))
            .map_err(plot_error)?
            .label(outcome.algorithm.label())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + legend, y)], c.stroke_width(pt(LINE_PT) as u32))
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font(font(LEGEND_PT))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_error)?;
    root.present().map_err(plot_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_range() {
        let (lo, hi) = padded_range([1.0, 3.0].iter());
        assert!((lo - 0.9).abs() < 1e-12);
        assert!((hi - 3.1).abs() < 1e-12);

        let (lo, hi) = padded_range([f64::NAN].iter());
        assert_eq!((lo, hi), (0.0, 1.0));

        let (lo, hi) = padded_range([2.0, 2.0].iter());
        assert!(lo < 2.0 && hi > 2.0);
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(color(0).rgb(), color(PALETTE.len()).rgb());
    }

    #[test]
    fn test_print_resolution() {
        assert_eq!(pixels(FIGURE), (3000, 1800));
        assert!((pt(72.0) - DPI).abs() < 1e-12);
    }

    #[test]
    fn test_bundled_font_registers() {
        assert!(ensure_font().is_ok());
    }

    #[test]
    fn test_acceptance_rate_windows() {
        let accepted = [true, false, true, true, false, false, true];
        let rates = acceptance_rate(&accepted, 3);
        // windows of 3, 3, 1 moves
        assert_eq!(rates.len(), 3);
        assert_eq!(rates[0], (3.0, 2.0 / 3.0));
        assert_eq!(rates[1], (6.0, 1.0 / 3.0));
        assert_eq!(rates[2], (7.0, 1.0));
        assert!(acceptance_rate(&[], 10).is_empty());
    }

    #[test]
    fn test_largest_drop() {
        assert!((largest_drop(&[1.0, 0.4, 0.9, 0.7]) - 0.6).abs() < 1e-12);
        assert_eq!(largest_drop(&[1.0, 2.0, 3.0]), 1.0);
        assert_eq!(largest_drop(&[]), 1.0);
    }
}
