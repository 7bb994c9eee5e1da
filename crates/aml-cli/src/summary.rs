//! Terminal rendering of mapping errors.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

/// Prints the error list of a mapping run to stderr. Prints nothing when empty.
pub fn print_errors(errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    eprintln!("Errors:");
    eprintln!("{}", error_table(errors));
}

/// One numbered row per error, in the order the engine recorded them.
pub fn error_table(errors: &[String]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Error")]);
    apply_table_style(&mut table);
    for (index, message) in errors.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1).set_alignment(CellAlignment::Right),
            Cell::new(message).fg(Color::Red),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
