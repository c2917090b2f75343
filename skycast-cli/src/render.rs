//! Human-friendly output: the current-conditions summary, inline errors,
//! and the two temperature charts.

use skycast_core::WeatherBundle;

use crate::chart::{self, ChartTheme};

pub fn loading(query: &str) {
    println!("Fetching weather for {query}...");
}

/// Errors render inline in place of results; the prompt stays usable.
pub fn error(message: &str) {
    eprintln!("{message}");
}

pub fn weather(bundle: &WeatherBundle) {
    for line in summary_lines(bundle) {
        println!("{line}");
    }
    println!();
    print!(
        "{}",
        chart::render(
            "Recent Temperature Trend",
            &bundle.recent_window(),
            ChartTheme::RECENT,
        )
    );
    println!();
    print!(
        "{}",
        chart::render(
            "Temperature Forecast",
            &bundle.future_window(),
            ChartTheme::FUTURE,
        )
    );
}

/// Summary block. Displayed temperatures are rounded to the nearest
/// whole degree.
fn summary_lines(bundle: &WeatherBundle) -> Vec<String> {
    let current = &bundle.current;
    vec![
        String::new(),
        format!("Current Weather in {}", bundle.query),
        format!(
            "  {}  {}°C  {}",
            condition_glyph(&current.icon),
            round_c(current.temperature_c),
            current.description,
        ),
        format!(
            "  H: {}°C  L: {}°C  Humidity: {}%",
            round_c(current.temp_max_c),
            round_c(current.temp_min_c),
            current.humidity_pct,
        ),
    ]
}

fn round_c(value: f64) -> i64 {
    value.round() as i64
}

/// Map an OpenWeather icon id (e.g. "10d") to a terminal glyph.
fn condition_glyph(icon: &str) -> &'static str {
    match icon.get(..2).unwrap_or("") {
        "01" => "\u{2600}",         // ☀
        "02" => "\u{26C5}",         // ⛅
        "03" | "04" => "\u{2601}",  // ☁
        "09" => "\u{1F326}",        // 🌦
        "10" => "\u{1F327}",        // 🌧
        "11" => "\u{26C8}",         // ⛈
        "13" => "\u{2744}",         // ❄
        "50" => "\u{1F32B}",        // 🌫
        _ => "\u{00B7}",            // ·
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use skycast_core::WeatherReading;

    fn bundle() -> WeatherBundle {
        WeatherBundle {
            query: "Paris".to_string(),
            current: WeatherReading {
                temperature_c: 14.7,
                temp_min_c: 12.6,
                temp_max_c: 16.4,
                humidity_pct: 82,
                description: "light rain".to_string(),
                icon: "10d".to_string(),
                observed_at: Utc::now(),
            },
            forecast: vec![],
        }
    }

    #[test]
    fn summary_rounds_to_whole_degrees() {
        let lines = summary_lines(&bundle()).join("\n");

        assert!(lines.contains("Current Weather in Paris"));
        assert!(lines.contains("15°C"));
        assert!(lines.contains("light rain"));
        assert!(lines.contains("H: 16°C"));
        assert!(lines.contains("L: 13°C"));
        assert!(lines.contains("Humidity: 82%"));
    }

    #[test]
    fn rounding_is_to_nearest_not_truncation() {
        assert_eq!(round_c(14.7), 15);
        assert_eq!(round_c(14.4), 14);
        assert_eq!(round_c(-0.4), 0);
        assert_eq!(round_c(-2.6), -3);
    }

    #[test]
    fn glyphs_cover_openweather_icon_families() {
        assert_eq!(condition_glyph("01d"), "\u{2600}");
        assert_eq!(condition_glyph("10n"), "\u{1F327}");
        assert_eq!(condition_glyph("13d"), "\u{2744}");
        // Unknown or missing icons fall back to a neutral dot.
        assert_eq!(condition_glyph(""), "\u{00B7}");
        assert_eq!(condition_glyph("99x"), "\u{00B7}");
    }
}
