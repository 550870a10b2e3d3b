use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ContentArrangement, Table, TableComponent,
    modifiers::UTF8_SOLID_INNER_BORDERS, presets::UTF8_FULL,
};

pub(super) const WEEKDAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
pub(super) const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const BAR_WIDTH: usize = 20;

/// "31%" style percentage of a 0..1 ratio, halves rounded away from zero
pub(super) fn format_percent(ratio: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    let percent = (ratio * 100.0 * scale).round() / scale;
    format!("{percent:.decimals$}%")
}

/// Fixed-width bar for a 0..1 ratio; values above 1 are clamped
pub(super) fn bar(ratio: f64) -> String {
    let filled = (ratio.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Calm below half capacity, busy up to three quarters, crowded above
pub(super) fn occupancy_color(ratio: f64) -> Color {
    if ratio < 0.5 {
        Color::Green
    } else if ratio < 0.75 {
        Color::Yellow
    } else {
        Color::Red
    }
}

pub(super) fn header_cell(text: &str, use_color: bool) -> Cell {
    let mut cell = Cell::new(text).add_attribute(Attribute::Bold);
    if use_color {
        cell = cell.fg(Color::Cyan);
    }
    cell
}

pub(super) fn right_cell(text: &str, color: Option<Color>, bold: bool) -> Cell {
    let mut cell = Cell::new(text).set_alignment(CellAlignment::Right);
    if let Some(c) = color {
        cell = cell.fg(c);
    }
    if bold {
        cell = cell.add_attribute(Attribute::Bold);
    }
    cell
}

pub(super) fn styled_cell(text: &str, color: Option<Color>) -> Cell {
    let mut cell = Cell::new(text);
    if let Some(c) = color {
        cell = cell.fg(c);
    }
    cell
}

/// Replace the double-line header separator (╞═╪═╡) with single-line (├─┼─┤)
fn normalize_header_separator(table: &mut Table) {
    table.set_style(TableComponent::HeaderLines, '─');
    table.set_style(TableComponent::LeftHeaderIntersection, '├');
    table.set_style(TableComponent::MiddleHeaderIntersections, '┼');
    table.set_style(TableComponent::RightHeaderIntersection, '┤');
}

/// Create a table with the standard preset, inner borders, and normalized header separator.
pub(super) fn create_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    normalize_header_separator(&mut table);
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounding() {
        assert_eq!(format_percent(0.3125, 1), "31.3%");
        assert_eq!(format_percent(0.3125, 0), "31%");
        assert_eq!(format_percent(0.0, 0), "0%");
        assert_eq!(format_percent(0.125, 0), "13%");
        assert_eq!(format_percent(0.5, 2), "50.00%");
    }

    #[test]
    fn bar_is_fixed_width() {
        assert_eq!(bar(0.0).chars().count(), BAR_WIDTH);
        assert_eq!(bar(0.5).chars().filter(|c| *c == '█').count(), 10);
        assert_eq!(bar(1.7).chars().filter(|c| *c == '█').count(), BAR_WIDTH);
        assert_eq!(bar(-0.2).chars().filter(|c| *c == '█').count(), 0);
    }

    #[test]
    fn color_thresholds() {
        assert_eq!(occupancy_color(0.2), Color::Green);
        assert_eq!(occupancy_color(0.5), Color::Yellow);
        assert_eq!(occupancy_color(0.74), Color::Yellow);
        assert_eq!(occupancy_color(0.75), Color::Red);
    }
}
