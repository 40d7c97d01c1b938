//! Rendering adapters for [`DashboardView`].

use skycast_core::DashboardView;

pub fn to_json(view: &DashboardView) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(view)?)
}

pub fn to_text(view: &DashboardView) -> String {
    let current = &view.current;

    let mut out = format!(
        "{}\n{}\n\n{}  {}  {}\nFeels like {}   Humidity {}   Wind {}   Precipitation {}\n",
        current.location,
        current.date,
        current.emoji,
        current.temperature,
        current.description,
        current.feels_like,
        current.humidity,
        current.wind,
        current.precipitation,
    );

    out.push_str(&format!("\n{}-day forecast\n", view.daily.len()));
    for row in &view.daily {
        out.push_str(&format!(
            "  {:<6} {}  {:>4} / {:<4}\n",
            row.label, row.emoji, row.high, row.low
        ));
    }

    let day_label = view
        .days
        .iter()
        .find(|d| d.value == view.selected_day)
        .map(|d| d.label.as_str())
        .unwrap_or("Today");
    out.push_str(&format!("\nHourly forecast: {day_label}\n"));
    for row in &view.hourly {
        out.push_str(&format!("  {:>5}  {}  {}\n", row.time, row.emoji, row.temperature));
    }

    out
}

pub fn history_to_text(entries: &[String]) -> String {
    if entries.is_empty() {
        return "No recent searches.\n".to_string();
    }

    entries
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{}. {e}\n", i + 1))
        .collect()
}
