use crate::analysis::ScoreComparison;
use crate::models::{BoundingBox, Srid};
use comfy_table::{Attribute, Cell, CellAlignment, Table};

fn header(names: &[&str]) -> Vec<Cell> {
    names
        .iter()
        .map(|name| {
            Cell::new(name)
                .add_attribute(Attribute::Bold)
                .set_alignment(CellAlignment::Center)
        })
        .collect()
}

pub fn comparison_table(comparison: &ScoreComparison, tolerance: i64) -> Table {
    let mut table = Table::new();
    table
        .set_header(header(&["", "Score", "Modular", "Original", "Delta"]))
        .load_preset(comfy_table::presets::ASCII_BORDERS_ONLY_CONDENSED);

    for row in &comparison.rows {
        let status = if row.is_within(tolerance) { "✅" } else { "⚠️" };
        table.add_row(vec![
            Cell::new(status).set_alignment(CellAlignment::Center),
            Cell::new(&row.score_id),
            Cell::new(format!("{:.4}", row.modular)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.4}", row.original)).set_alignment(CellAlignment::Right),
            Cell::new(row.delta).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn print_comparison_summary(comparison: &ScoreComparison, tolerance: i64) {
    println!(
        "\nScore comparison:\n{}",
        comparison_table(comparison, tolerance)
    );

    let outliers = comparison.outliers(tolerance);
    if !outliers.is_empty() {
        println!("\nWarnings:");
        for row in outliers {
            println!(
                "  ⚠️{}: delta {} is outside ±{} (modular {:.4}, original {:.4})",
                row.score_id, row.delta, tolerance, row.modular, row.original
            );
        }
    }

    println!("\nTips:");
    println!(
        "  Deltas are in hundredths of a percent: ±{} = ±{:.2}%",
        tolerance,
        tolerance as f64 / 100.0
    );
    println!();
}

pub fn print_srid_summary(bbox: &BoundingBox, srid: &Srid, projected: Option<&BoundingBox>) {
    let mut table = Table::new();
    table
        .set_header(header(&["", "Min", "Max", "Span"]))
        .load_preset(comfy_table::presets::ASCII_BORDERS_ONLY_CONDENSED);
    table.add_row(vec![
        Cell::new("Longitude"),
        Cell::new(format!("{:.6}", bbox.min_x)),
        Cell::new(format!("{:.6}", bbox.max_x)),
        Cell::new(format!("{:.4}°", bbox.width())),
    ]);
    table.add_row(vec![
        Cell::new("Latitude"),
        Cell::new(format!("{:.6}", bbox.min_y)),
        Cell::new(format!("{:.6}", bbox.max_y)),
        Cell::new(format!("{:.4}°", bbox.height())),
    ]);
    if let Some(p) = projected {
        table.add_row(vec![
            Cell::new("Easting"),
            Cell::new(format!("{:.1}", p.min_x)),
            Cell::new(format!("{:.1}", p.max_x)),
            Cell::new(format!("{:.2} km", p.width() / 1000.0)),
        ]);
        table.add_row(vec![
            Cell::new("Northing"),
            Cell::new(format!("{:.1}", p.min_y)),
            Cell::new(format!("{:.1}", p.max_y)),
            Cell::new(format!("{:.2} km", p.height() / 1000.0)),
        ]);
    }

    println!(
        "\n🧭 UTM zone {} ({:?}) → SRID {}\n{}\n",
        srid.zone, srid.hemisphere, srid, table
    );
}
