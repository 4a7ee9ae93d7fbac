/// Table projection of a page of records.
///
/// Pure output: a `PageView` in, aligned text columns out. No pipeline
/// logic lives here.
use std::io::{self, Write};

use crate::pipeline::PageView;
use crate::record::{RawValue, Record};

/// Displayed columns, in order: header label plus how to extract the cell.
const COLUMNS: [(&str, Cell); 15] = [
    ("image", Cell::Image),
    ("name", Cell::Path("name")),
    ("full name", Cell::Path("biography.fullName")),
    ("int", Cell::Path("powerstats.intelligence")),
    ("str", Cell::Path("powerstats.strength")),
    ("spd", Cell::Path("powerstats.speed")),
    ("dur", Cell::Path("powerstats.durability")),
    ("pow", Cell::Path("powerstats.power")),
    ("cmb", Cell::Path("powerstats.combat")),
    ("race", Cell::Path("appearance.race")),
    ("gender", Cell::Path("appearance.gender")),
    ("height", Cell::Path("appearance.height")),
    ("weight", Cell::Path("appearance.weight")),
    ("place of birth", Cell::Path("biography.placeOfBirth")),
    ("alignment", Cell::Path("biography.alignment")),
];

enum Cell {
    Image,
    Path(&'static str),
}

fn cell_value(record: &Record, cell: &Cell) -> String {
    match cell {
        Cell::Image => record.image("xs").unwrap_or("N/A").to_string(),
        Cell::Path(path) => match record.resolve(path) {
            RawValue::Text(s) => s.to_string(),
            RawValue::Number(n) => format_number(n),
            RawValue::Missing => "N/A".to_string(),
        },
    }
}

/// Integral values print without a fractional part.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Render one page as an aligned text table with a pagination footer.
/// An empty page renders "no data" instead.
pub fn render_page(out: &mut impl Write, page: &PageView<'_>) -> io::Result<()> {
    if page.records.is_empty() {
        writeln!(out, "no data")?;
        writeln!(out, "page {} of {} (0 records)", page.page_index, page.total_pages)?;
        return Ok(());
    }

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(page.records.len() + 1);
    rows.push(COLUMNS.iter().map(|(label, _)| label.to_string()).collect());
    for record in &page.records {
        rows.push(COLUMNS.iter().map(|(_, cell)| cell_value(record, cell)).collect());
    }

    let mut widths = vec![0usize; COLUMNS.len()];
    for row in &rows {
        for (w, value) in widths.iter_mut().zip(row) {
            *w = (*w).max(value.chars().count());
        }
    }

    for row in &rows {
        let mut line = String::new();
        for (i, (value, width)) in row.iter().zip(&widths).enumerate() {
            if i > 0 {
                line.push_str("  ");
            }
            line.push_str(value);
            // No trailing padding on the last column.
            if i + 1 < row.len() {
                line.extend(std::iter::repeat_n(' ', width - value.chars().count()));
            }
        }
        writeln!(out, "{}", line.trim_end())?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "page {} of {} ({} records)",
        page.page_index, page.total_pages, page.total_records
    )
}
