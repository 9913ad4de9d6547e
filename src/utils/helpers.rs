//! Small shared helpers.

use regex::Regex;

/// Extract the first numeric reading from a temperature label such as
/// `"12°C"`, `"-3.5 °F"` or `"Temp: 281.2K"`. Returns `None` when the text
/// carries no number at all.
pub fn parse_temperature(text: &str) -> Option<f64> {
    let re = Regex::new(r"-?\d+(?:\.\d+)?").ok()?;
    re.find(text)?.as_str().parse().ok()
}

/// Truncate long text for log output.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

/// Turn a check name into a filesystem-friendly artifact stem.
pub fn artifact_stem(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
