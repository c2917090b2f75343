//! Plain-text line charts for the temperature windows.
//!
//! Each chart is a fixed-height grid with a temperature Y-axis, a curve
//! drawn with box characters, and a per-point listing underneath that
//! reports every temperature to one decimal place.

use skycast_core::WeatherReading;

/// Fixed per-chart color scheme: an ANSI escape applied to the curve rows.
#[derive(Debug, Clone, Copy)]
pub struct ChartTheme {
    line: &'static str,
}

impl ChartTheme {
    /// Blue, for the recent-trend chart.
    pub const RECENT: ChartTheme = ChartTheme { line: "\x1b[34m" };

    /// Red, for the forecast chart.
    pub const FUTURE: ChartTheme = ChartTheme { line: "\x1b[31m" };

    #[cfg(test)]
    pub const PLAIN: ChartTheme = ChartTheme { line: "" };
}

const RESET: &str = "\x1b[0m";

/// Grid height in rows.
const ROWS: usize = 8;

/// Columns between successive data points.
const STEP: usize = 4;

/// Width of the Y-axis gutter, label included.
const GUTTER: usize = 7;

/// Render one chart as a multi-line string.
pub fn render(title: &str, readings: &[WeatherReading], theme: ChartTheme) -> String {
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');

    if readings.is_empty() {
        out.push_str("  (no data)\n");
        return out;
    }

    let values: Vec<f64> = readings.iter().map(|r| r.temperature_c).collect();
    for row in grid_rows(&values) {
        if theme.line.is_empty() {
            out.push_str(&row);
        } else {
            // Color only the plotted part, not the axis gutter.
            let (gutter, curve) = split_gutter(&row);
            out.push_str(gutter);
            out.push_str(theme.line);
            out.push_str(curve);
            out.push_str(RESET);
        }
        out.push('\n');
    }

    for reading in readings {
        out.push_str(&format!(
            "  {}  {:.1}°C\n",
            reading.observed_at.format("%b %-d %H:%M"),
            reading.temperature_c,
        ));
    }

    out
}

/// Split a rendered row at the axis column so only the curve gets colored.
fn split_gutter(row: &str) -> (&str, &str) {
    let boundary = row
        .char_indices()
        .nth(GUTTER + 1)
        .map_or(row.len(), |(i, _)| i);
    row.split_at(boundary)
}

/// Build the grid rows plus the X-axis line, gutter included.
fn grid_rows(values: &[f64]) -> Vec<String> {
    let width = (values.len() - 1) * STEP + 1;
    let dense = interpolate(values, width);

    let (min, max) = bounds(values);
    let row_of = |v: f64| -> usize {
        let normalized = (v - min) / (max - min);
        let row = ((1.0 - normalized) * (ROWS - 1) as f64).round() as usize;
        row.min(ROWS - 1)
    };

    let mut grid = vec![vec![' '; width]; ROWS];
    let mut prev_row = None;
    for (col, value) in dense.iter().enumerate() {
        let row = row_of(*value);

        // Fill the vertical gap to the previous column.
        if let Some(prev) = prev_row {
            let (lo, hi) = if prev < row { (prev, row) } else { (row, prev) };
            for cell in grid.iter_mut().take(hi).skip(lo + 1) {
                cell[col] = '│';
            }
        }

        grid[row][col] = if col % STEP == 0 { '•' } else { '─' };
        prev_row = Some(row);
    }

    let mid = (min + max) / 2.0;
    let mut rows = Vec::with_capacity(ROWS + 1);
    for (i, cells) in grid.into_iter().enumerate() {
        let label = if i == 0 {
            format!("{max:>GUTTER$.1}")
        } else if i == ROWS / 2 {
            format!("{mid:>GUTTER$.1}")
        } else if i == ROWS - 1 {
            format!("{min:>GUTTER$.1}")
        } else {
            " ".repeat(GUTTER)
        };
        let line: String = cells.into_iter().collect();
        rows.push(format!("{label}┤{line}"));
    }
    rows.push(format!("{}└{}", " ".repeat(GUTTER), "─".repeat(width)));
    rows
}

/// Min/max of the series, padded when flat so normalization never
/// divides by zero.
fn bounds(values: &[f64]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(*v);
        max = max.max(*v);
    }
    if max - min < 0.1 {
        min -= 0.5;
        max += 0.5;
    }
    (min, max)
}

/// Linear interpolation of the series onto `target_width` columns.
fn interpolate(values: &[f64], target_width: usize) -> Vec<f64> {
    if values.len() == 1 || target_width <= values.len() {
        return values.iter().take(target_width.max(1)).copied().collect();
    }

    let source_len = values.len();
    let mut result = Vec::with_capacity(target_width);
    for i in 0..target_width {
        let source_pos = (i as f64 * (source_len - 1) as f64) / (target_width - 1) as f64;
        let lower = source_pos.floor() as usize;
        let upper = (lower + 1).min(source_len - 1);
        let fraction = source_pos - lower as f64;
        result.push(values[lower] * (1.0 - fraction) + values[upper] * fraction);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn reading(temp: f64, hour: u32) -> WeatherReading {
        WeatherReading {
            temperature_c: temp,
            temp_min_c: temp - 1.0,
            temp_max_c: temp + 1.0,
            humidity_pct: 60,
            description: "light rain".to_string(),
            icon: "10d".to_string(),
            observed_at: Utc.with_ymd_and_hms(2025, 6, 1, hour, 30, 0).unwrap(),
        }
    }

    #[test]
    fn point_temperatures_have_exactly_one_decimal() {
        let readings = vec![reading(14.666, 12), reading(15.0, 15)];
        let chart = render("Recent Temperature Trend", &readings, ChartTheme::PLAIN);

        assert!(chart.contains("14.7°C"));
        assert!(chart.contains("15.0°C"));
        assert!(!chart.contains("14.666"));
    }

    #[test]
    fn labels_use_month_day_and_time_of_day() {
        let readings = vec![reading(14.7, 12)];
        let chart = render("Temperature Forecast", &readings, ChartTheme::PLAIN);

        assert!(chart.contains("Jun 1 12:30"));
    }

    #[test]
    fn chart_has_grid_axis_and_one_line_per_point() {
        let readings: Vec<_> = (0..8).map(|i| reading(10.0 + i as f64, i)).collect();
        let chart = render("Recent Temperature Trend", &readings, ChartTheme::PLAIN);

        let lines: Vec<&str> = chart.lines().collect();
        // Title + grid rows + X axis + one listing line per point.
        assert_eq!(lines.len(), 1 + ROWS + 1 + 8);
        assert_eq!(lines[0], "Recent Temperature Trend");
        assert!(lines[1].contains('┤'));
        assert!(lines[1 + ROWS].contains('└'));
    }

    #[test]
    fn extremes_appear_on_first_and_last_grid_rows() {
        let readings = vec![reading(10.0, 0), reading(20.0, 3), reading(10.0, 6)];
        let chart = render("t", &readings, ChartTheme::PLAIN);

        let lines: Vec<&str> = chart.lines().collect();
        assert!(lines[1].starts_with("   20.0"));
        assert!(lines[ROWS].starts_with("   10.0"));
        // The peak is plotted on the top row.
        assert!(lines[1].contains('•'));
    }

    #[test]
    fn flat_series_does_not_panic() {
        let readings: Vec<_> = (0..5).map(|i| reading(12.0, i)).collect();
        let chart = render("t", &readings, ChartTheme::PLAIN);
        assert!(chart.contains("12.0°C"));
    }

    #[test]
    fn single_point_renders() {
        let readings = vec![reading(3.2, 9)];
        let chart = render("t", &readings, ChartTheme::PLAIN);
        assert!(chart.contains("3.2°C"));
        assert!(chart.contains('•'));
    }

    #[test]
    fn empty_window_shows_placeholder() {
        let chart = render("Temperature Forecast", &[], ChartTheme::PLAIN);
        assert!(chart.contains("(no data)"));
    }

    #[test]
    fn colored_rows_reset_after_the_curve() {
        let readings = vec![reading(14.7, 12), reading(15.2, 15)];
        let chart = render("t", &readings, ChartTheme::RECENT);

        assert!(chart.contains("\x1b[34m"));
        assert!(chart.contains(RESET));
    }
}
