use crate::core::record::RecordKind;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Formats an `Option<T>` into a `Cell`. `None` is displayed as "N/A".
pub fn format_optional_cell<T>(value: Option<T>, format_fn: impl Fn(T) -> String) -> Cell {
    value.map_or(
        Cell::new("N/A")
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right),
        |v| Cell::new(format_fn(v)).set_alignment(CellAlignment::Right),
    )
}

/// Display mapping for a record kind: arrow glyph plus color token.
///
/// Lives here so records themselves never carry rendering data.
pub fn kind_glyph(kind: RecordKind) -> (&'static str, Color) {
    match kind {
        RecordKind::Income => ("↑", Color::Green),
        RecordKind::Expense => ("↓", Color::Red),
    }
}

/// Creates a cell naming the record kind with its glyph and color.
pub fn kind_cell(kind: RecordKind) -> Cell {
    let (glyph, color) = kind_glyph(kind);
    Cell::new(format!("{glyph} {kind}")).fg(color)
}

/// Creates a signed, colored amount cell for the merged feed.
pub fn signed_amount_cell(kind: RecordKind, amount: f64, currency_symbol: &str) -> Cell {
    let (_, color) = kind_glyph(kind);
    let sign = match kind {
        RecordKind::Income => "+",
        RecordKind::Expense => "-",
    };
    Cell::new(format!("{sign}{currency_symbol}{amount:.2}"))
        .fg(color)
        .set_alignment(CellAlignment::Right)
}

/// Creates a plain right-aligned amount cell.
pub fn amount_cell(amount: f64, currency_symbol: &str) -> Cell {
    Cell::new(format!("{currency_symbol}{amount:.2}")).set_alignment(CellAlignment::Right)
}

/// Creates a right-aligned percentage cell with chart precision.
pub fn share_cell(share_pct: f64) -> Cell {
    Cell::new(format!("{share_pct:.1}%")).set_alignment(CellAlignment::Right)
}

/// Renders a horizontal chart bar scaled against the series maximum.
///
/// Zero and negative values get no bar; anything positive gets at least one
/// block so small days stay visible.
pub fn bar_string(value: f64, max_value: f64, width: usize) -> String {
    if value <= 0.0 || max_value <= 0.0 || width == 0 {
        return String::new();
    }
    let ratio = (value / max_value).clamp(0.0, 1.0);
    let blocks = ((ratio * width as f64).round() as usize).max(1);
    "█".repeat(blocks.min(width))
}

/// Creates a new `indicatif::ProgressBar` with standard styling.
pub fn new_progress_bar(len: u64, with_message: bool) -> ProgressBar {
    let template = if with_message {
        "{spinner:.green} {msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})"
    } else {
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})"
    };

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(template)
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}

/// Prints a separator line matching the terminal width.
pub fn print_separator() {
    let term_width = console::Term::stdout()
        .size_checked()
        .map(|(_, w)| w as usize)
        .unwrap_or(80);
    println!("\n{}", "─".repeat(term_width));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_string_scales_to_width() {
        assert_eq!(bar_string(100.0, 100.0, 10), "██████████");
        assert_eq!(bar_string(50.0, 100.0, 10), "█████");
        assert_eq!(bar_string(0.0, 100.0, 10), "");
    }

    #[test]
    fn test_bar_string_keeps_small_values_visible() {
        assert_eq!(bar_string(0.1, 1000.0, 10), "█");
    }

    #[test]
    fn test_bar_string_handles_empty_series() {
        assert_eq!(bar_string(10.0, 0.0, 10), "");
        assert_eq!(bar_string(10.0, 100.0, 0), "");
    }

    #[test]
    fn test_kind_glyph_mapping() {
        assert_eq!(kind_glyph(RecordKind::Income), ("↑", Color::Green));
        assert_eq!(kind_glyph(RecordKind::Expense), ("↓", Color::Red));
    }
}
