//! Pipeline-to-SVG integration: feed raw rows through the pipeline and
//! check the rendered deck.

use chrono::NaiveDate;
use chronogram_core::{DeckRenderer, RawRecord, SquadPalette};
use chronogram_pipeline::Pipeline;
use chronogram_render::SlideRenderer;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 23).unwrap()
}

fn row(product: &str, quarter: &str) -> RawRecord {
    RawRecord::new(product, "SOL")
        .tribe("Payments")
        .squad("Squad Alpha")
        .quarter(quarter)
        .subtask("reconstruction")
        .realization("non")
}

#[test]
fn full_deck_contains_boxes_legend_and_stats() {
    let rows = vec![
        row("A", "T1/2025").realization("oui"),
        row("B", "T3/2025").squad("Squad Beta"),
        row("B", "T3/2025").squad("Squad Beta").subtask("resynchronisation"),
    ];

    let chronogram = Pipeline::new().run("Payments", &rows, today());
    assert_eq!(chronogram.entries.len(), 2);

    let mut palette = SquadPalette::new();
    let svg = SlideRenderer::new().render(&chronogram, &mut palette).unwrap();

    // Boxes and header
    assert!(svg.contains("A-SOL"));
    assert!(svg.contains("B-SOL"));
    assert!(svg.contains("T1/2025"));
    assert!(svg.contains("T4/2026"));

    // Legend lists both squads
    assert!(svg.contains("Squad Alpha"));
    assert!(svg.contains("Squad Beta"));

    // Stats over merged entries
    assert!(svg.contains("Realized: 1/2"));

    // Both squads got a cached color
    assert_eq!(palette.len(), 2);
}

#[test]
fn configured_squad_colors_show_up_in_the_deck() {
    let chronogram = Pipeline::new().run("Payments", &[row("A", "T1/2025")], today());

    let mut palette = SquadPalette::from_hex_table([("Squad Alpha", "#123456")]);
    let svg = SlideRenderer::new().render(&chronogram, &mut palette).unwrap();
    assert!(svg.contains("#123456"));
}

#[test]
fn unplaceable_rows_reach_the_unplaced_panel() {
    let rows = vec![row("A", "T1/2025"), row("Z", "next spring")];
    let chronogram = Pipeline::new().run("Payments", &rows, today());
    assert_eq!(chronogram.unplaced, 1);

    let mut palette = SquadPalette::new();
    let svg = SlideRenderer::new().render(&chronogram, &mut palette).unwrap();
    assert!(svg.contains("Unknown placement (1)"));
    assert!(svg.contains("Z-SOL [next spring]"));
}
