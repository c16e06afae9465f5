use crate::settings::Settings;

/// Format a distance with a fixed number of decimal places.
///
/// No thousands grouping is applied.
///
/// # Examples
///
/// ```
/// use runner_core::formatting::format_miles;
///
/// assert_eq!(format_miles(4.0, 2), "4.00");
/// assert_eq!(format_miles(3.14159, 2), "3.14");
/// assert_eq!(format_miles(12.7, 0), "13");
/// ```
pub fn format_miles(value: f64, decimals: u32) -> String {
    format!("{:.prec$}", value, prec = decimals as usize)
}

/// Format a distance followed by its unit, e.g. `"4.00 miles"`.
///
/// ```
/// use runner_core::formatting::format_miles_with_unit;
///
/// assert_eq!(format_miles_with_unit(4.0, 2), "4.00 miles");
/// ```
pub fn format_miles_with_unit(value: f64, decimals: u32) -> String {
    format!("{} miles", format_miles(value, decimals))
}

/// Format a distance using the configured [`Settings::display_decimals`].
pub fn format_miles_for(value: f64, settings: &Settings) -> String {
    format_miles(value, settings.display_decimals)
}

/// [`format_miles_for`] followed by the unit, e.g. `"4.0 miles"` at one decimal.
pub fn format_miles_with_unit_for(value: f64, settings: &Settings) -> String {
    format_miles_with_unit(value, settings.display_decimals)
}

/// Human-readable run count: `"1 run"`, `"3 runs"`.
pub fn format_run_count(count: usize) -> String {
    if count == 1 {
        "1 run".to_string()
    } else {
        format!("{} runs", count)
    }
}
