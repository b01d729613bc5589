//! Table rendering for the visible user rows.
//!
//! # Responsibility
//! - Render the filtered sequence as an aligned text table.
//! - Color each row by its age band.
//!
//! # Invariants
//! - The `#` column shows 1-based positions in the unfiltered sequence, so
//!   `editar`/`remover` numbers stay valid while a search is active.

use cadastro_core::{AgeBand, NameMatch};

const COLOR_MINOR: &str = "\x1b[33m";
const COLOR_ADULT: &str = "\x1b[32m";
const COLOR_SENIOR: &str = "\x1b[31m";
const COLOR_RESET: &str = "\x1b[0m";

const HEADERS: [&str; 5] = ["#", "Nome", "Sobrenome", "Idade", "Pedidos"];

/// Renders the visible rows, or a placeholder line when nothing matches.
pub fn render_table(rows: &[NameMatch<'_>]) -> String {
    if rows.is_empty() {
        return String::from("nenhum usuário encontrado.");
    }

    let cells: Vec<[String; 5]> = rows
        .iter()
        .map(|row| {
            [
                (row.position + 1).to_string(),
                row.record.first_name.clone(),
                row.record.last_name.clone(),
                row.record.age.to_string(),
                row.record
                    .order_count
                    .map_or_else(|| String::from("-"), |count| count.to_string()),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&format_row(&HEADERS.map(String::from), &widths, None));
    for (row, row_cells) in rows.iter().zip(cells.iter()) {
        out.push('\n');
        out.push_str(&format_row(
            row_cells,
            &widths,
            Some(band_color(row.record.age_band())),
        ));
    }
    out
}

fn format_row(cells: &[String; 5], widths: &[usize; 5], color: Option<&str>) -> String {
    let body = cells
        .iter()
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");

    match color {
        Some(color) => format!("{color}{body}{COLOR_RESET}"),
        None => body,
    }
}

fn band_color(band: AgeBand) -> &'static str {
    match band {
        AgeBand::Minor => COLOR_MINOR,
        AgeBand::Adult => COLOR_ADULT,
        AgeBand::Senior => COLOR_SENIOR,
    }
}

#[cfg(test)]
mod tests {
    use super::{render_table, COLOR_ADULT, COLOR_MINOR, COLOR_SENIOR};
    use cadastro_core::{filter_by_first_name, UserRecord};

    #[test]
    fn empty_rows_render_placeholder() {
        assert_eq!(render_table(&[]), "nenhum usuário encontrado.");
    }

    #[test]
    fn rows_are_colored_by_age_band() {
        let records = vec![
            UserRecord::with_orders("Ana", "Silva", 10, 0),
            UserRecord::with_orders("Bia", "Souza", 30, 2),
            UserRecord::with_orders("Caio", "Dias", 70, 5),
        ];
        let rows = filter_by_first_name(&records, "");
        let table = render_table(&rows);

        assert!(table.contains(COLOR_MINOR));
        assert!(table.contains(COLOR_ADULT));
        assert!(table.contains(COLOR_SENIOR));
    }

    #[test]
    fn positions_are_one_based_and_unfiltered() {
        let records = vec![
            UserRecord::with_orders("Ana", "Silva", 30, 1),
            UserRecord::with_orders("Bruno", "Souza", 30, 1),
            UserRecord::with_orders("Mariana", "Dias", 30, 1),
        ];
        let rows = filter_by_first_name(&records, "an");
        let table = render_table(&rows);

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("1 "));
        assert!(lines[2].contains("3 "));
        assert!(!table.contains("Bruno"));
    }

    #[test]
    fn missing_order_count_renders_dash() {
        let records = vec![UserRecord::new("Ana", "Silva", 30)];
        let rows = filter_by_first_name(&records, "");
        let table = render_table(&rows);

        assert!(table.contains('-'));
    }
}
