//! Terminal visualization for statistics.

const FULL_BLOCK: char = '█';
const LIGHT_SHADE: char = '░';

/// Render a horizontal bar chart.
///
/// # Arguments
///
/// * `data` - (label, value) pairs
/// * `max_label_width` - Maximum width for labels
/// * `bar_width` - Width of the bar portion
///
/// # Returns
///
/// A multi-line string with the chart.
#[must_use]
pub fn render_bar_chart(data: &[(String, usize)], max_label_width: usize, bar_width: usize) -> String {
    if data.is_empty() {
        return String::new();
    }

    let max_value = data.iter().map(|(_, v)| *v).max().unwrap_or(1).max(1);
    let mut lines = Vec::new();

    for (label, value) in data {
        let label = if label.chars().count() > max_label_width && max_label_width > 3 {
            let kept: String = label.chars().take(max_label_width - 3).collect();
            format!("{kept}...")
        } else {
            format!("{label:max_label_width$}")
        };

        let bar_length = (value * bar_width / max_value).min(bar_width);
        let bar = FULL_BLOCK.to_string().repeat(bar_length);
        let padding = " ".repeat(bar_width - bar_length);

        lines.push(format!("{label} |{bar}{padding} {value}"));
    }

    lines.join("\n")
}

/// Render a progress bar for a 0-100 percentage.
#[must_use]
pub fn render_progress_bar(percent: u8, width: usize) -> String {
    let filled = (usize::from(percent.min(100)) * width) / 100;
    format!(
        "{}{}",
        FULL_BLOCK.to_string().repeat(filled),
        LIGHT_SHADE.to_string().repeat(width - filled)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_chart_empty() {
        assert_eq!(render_bar_chart(&[], 10, 20), "");
    }

    #[test]
    fn test_bar_chart_scales_to_max() {
        let data = vec![("high".to_string(), 4), ("low".to_string(), 2)];
        let chart = render_bar_chart(&data, 6, 8);
        let lines: Vec<_> = chart.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "high   |████████ 4");
        assert_eq!(lines[1], "low    |████     2");
    }

    #[test]
    fn test_bar_chart_truncates_labels() {
        let data = vec![("a-very-long-tag".to_string(), 1)];
        let chart = render_bar_chart(&data, 8, 2);
        assert!(chart.starts_with("a-ver... |"));
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(render_progress_bar(0, 4), "░░░░");
        assert_eq!(render_progress_bar(50, 4), "██░░");
        assert_eq!(render_progress_bar(100, 4), "████");
        assert_eq!(render_progress_bar(250, 4), "████");
    }
}
