//! Horizontal bar charts for terminal output

const BAR: char = '█';

/// Render labelled bars scaled so the largest value spans `width` cells.
pub fn bar_chart(title: &str, bars: &[(String, usize)], width: usize) -> String {
    let mut output = String::new();
    output.push_str(title);
    output.push('\n');

    if bars.is_empty() {
        output.push_str("  (no data)\n");
        return output;
    }

    let label_width = bars.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
    let max_value = bars.iter().map(|(_, value)| *value).max().unwrap_or(0);

    for (label, value) in bars {
        let length = bar_length(*value, max_value, width);
        output.push_str(&format!(
            "  {:<label_width$} │{} {}\n",
            label,
            BAR.to_string().repeat(length),
            value,
            label_width = label_width
        ));
    }

    output
}

/// Any non-zero value gets at least one cell.
fn bar_length(value: usize, max_value: usize, width: usize) -> usize {
    if value == 0 || max_value == 0 {
        return 0;
    }
    ((value * width + max_value / 2) / max_value).clamp(1, width)
}
