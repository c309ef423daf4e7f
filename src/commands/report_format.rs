use crate::domain::forecast::ForecastResult;

/// Plain-text rate table for one scenario, printed after a run.
pub fn format_forecast_report(result: &ForecastResult) -> String {
    let method = result
        .assumptions
        .get("method")
        .and_then(|value| value.as_str())
        .unwrap_or("n/a")
        .to_string();

    let rate_names: Vec<&str> = result
        .rates
        .values()
        .next()
        .map(|row| row.keys().map(String::as_str).collect())
        .unwrap_or_default();

    let mut lines = Vec::new();
    lines.push("Forecast Report".to_string());
    lines.push(format!("Scenario: {}", result.scenario));
    lines.push(format!("Method: {method}"));
    lines.push(format!("Periods: {}", result.periods.len()));
    lines.push(format!("Warnings: {}", result.warnings.len()));
    lines.push(String::new());
    lines.push("Rates:".to_string());
    lines.push(format!("Period | {}", rate_names.join(" | ")));
    lines.push(format!(
        "-------|{}",
        rate_names
            .iter()
            .map(|name| "-".repeat(name.len() + 2))
            .collect::<Vec<_>>()
            .join("|")
    ));
    for (period, rates) in &result.rates {
        let cells: Vec<String> = rate_names
            .iter()
            .map(|name| {
                let rate = rates.get(*name).copied().unwrap_or(0.0);
                format!("{:.2}%", rate * 100.0)
            })
            .collect();
        lines.push(format!("{period} | {}", cells.join(" | ")));
    }

    lines.join("\n")
}
