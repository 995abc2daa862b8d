//! Table rendering for rows and links.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use jsonmap_map::{Link, RenderedTree, Row, RowKind, RowStatus};

pub fn rows_table(tree: &RenderedTree) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Path"),
        header_cell("Value"),
        header_cell("Mapped to"),
    ]);
    apply_table_style(&mut table);
    for row in tree.flatten() {
        table.add_row(vec![
            path_cell(row),
            value_cell(row),
            status_cell(&row.status, row.cancellable),
        ]);
    }
    table
}

pub fn links_table(links: &[Link]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Source"),
        header_cell("Target"),
        header_cell("Color"),
        header_cell("From"),
        header_cell("To"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for link in links {
        table.add_row(vec![
            Cell::new(link.index),
            Cell::new(&link.source),
            Cell::new(&link.target),
            Cell::new(link.color).fg(Color::Rgb {
                r: link.color.r,
                g: link.color.g,
                b: link.color.b,
            }),
            Cell::new(format!("({}, {})", link.from.x, link.from.y)),
            Cell::new(format!("({}, {})", link.to.x, link.to.y)),
        ]);
    }
    table
}

fn apply_table_style(table: &mut Table) {
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

fn path_cell(row: &Row) -> Cell {
    let marker = match (&row.kind, row.collapsed) {
        (RowKind::Branch { .. }, true) => "+ ",
        (RowKind::Branch { .. }, false) => "- ",
        (RowKind::Leaf, _) => "",
    };
    let indent = "  ".repeat(row.depth);
    Cell::new(format!("{indent}{marker}{}", row.path))
}

fn value_cell(row: &Row) -> Cell {
    if row.is_branch() {
        dim_cell("{…}")
    } else {
        Cell::new(&row.display)
    }
}

fn status_cell(status: &RowStatus, cancellable: bool) -> Cell {
    if !status.is_mapped() {
        return dim_cell("-");
    }
    let joined = status
        .counterparts()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let text = if cancellable {
        format!("{joined} [x]")
    } else {
        joined
    };
    Cell::new(text).fg(Color::Green)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
