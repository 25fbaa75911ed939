//! # chronogram-render
//!
//! SVG deck rendering for chronogram delivery timelines.
//!
//! This crate provides:
//! - [`SlideRenderer`]: one SVG slide per tribe with quarter columns,
//!   timeline boxes colored by squad, status badges, a squad legend and
//!   a statistics block
//! - [`QuarterAxis`]: the fixed quarter columns of a deck
//!
//! Rendering is mechanical: every aggregation decision was made by the
//! pipeline, this crate only assigns coordinates and colors.
//!
//! ## Example
//!
//! ```rust,ignore
//! use chronogram_core::{DeckRenderer, SquadPalette};
//! use chronogram_render::SlideRenderer;
//!
//! let renderer = SlideRenderer::new();
//! let mut palette = SquadPalette::new();
//! let svg = renderer.render(&chronogram, &mut palette)?;
//! std::fs::write("payments.svg", svg)?;
//! ```

pub mod axis;

pub use axis::QuarterAxis;

use chronogram_core::{
    DeckRenderer, MergedEntry, RenderError, Rgb, SquadPalette, TribeChronogram, TribeStats,
};
use svg::node::element::{Circle, Group, Line, Rectangle, Text};
use svg::Document;

/// Sub-task types with a dedicated pending marker on the deck.
///
/// Letter, type label, horizontal slot under the box.
const PENDING_MARKERS: [(&str, &str, Slot); 3] = [
    ("R", "reconstruction", Slot::Left),
    ("B", "restauration bdd", Slot::Middle),
    ("S", "resynchronisation", Slot::Right),
];

#[derive(Clone, Copy, Debug)]
enum Slot {
    Left,
    Middle,
    Right,
}

/// SVG slide renderer configuration.
#[derive(Clone, Debug)]
pub struct SlideRenderer {
    /// Quarter columns of the deck
    pub axis: QuarterAxis,
    /// Width per quarter column in pixels
    pub column_width: u32,
    /// Vertical space per stacked entry in pixels
    pub row_height: u32,
    /// Timeline box width in pixels
    pub box_width: u32,
    /// Timeline box height in pixels
    pub box_height: u32,
    /// Title band height in pixels
    pub title_height: u32,
    /// Quarter header height in pixels
    pub header_height: u32,
    /// Padding around the slide
    pub padding: u32,
    /// Render the statistics block
    pub show_stats: bool,
    /// Background color
    pub background_color: String,
    /// Grid line color
    pub grid_color: String,
    /// Text color
    pub text_color: String,
    /// Default box outline color
    pub outline_color: String,
    /// Box outline for mosart-managed entries
    pub mosart_outline: String,
    /// Box outline for decommissioned entries
    pub decom_outline: String,
    /// Badge color for validated entries
    pub validated_color: String,
    /// Badge color for fully realized entries
    pub realized_color: String,
    /// Badge color for critical entries
    pub critical_color: String,
    /// Badge color for pending sub-task markers
    pub pending_color: String,
    /// Font family
    pub font_family: String,
    /// Font size in pixels
    pub font_size: u32,
}

impl Default for SlideRenderer {
    fn default() -> Self {
        Self {
            axis: QuarterAxis::default_axis(),
            column_width: 150,
            row_height: 36,
            box_width: 120,
            box_height: 22,
            title_height: 36,
            header_height: 40,
            padding: 20,
            show_stats: true,
            background_color: "#ffffff".into(),
            grid_color: "#ecf0f1".into(),
            text_color: "#2c3e50".into(),
            outline_color: "#000000".into(),
            mosart_outline: "#ff6600".into(),
            decom_outline: "#505050".into(),
            validated_color: "#1f6fd6".into(),
            realized_color: "#2e9e44".into(),
            critical_color: "#d0342c".into(),
            pending_color: "#7f8c8d".into(),
            font_family: "system-ui, -apple-system, sans-serif".into(),
            font_size: 11,
        }
    }
}

impl SlideRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the quarter axis
    pub fn axis(mut self, axis: QuarterAxis) -> Self {
        self.axis = axis;
        self
    }

    /// Configure column width
    pub fn column_width(mut self, width: u32) -> Self {
        self.column_width = width;
        self
    }

    /// Enable or disable the statistics block
    pub fn show_stats(mut self, show: bool) -> Self {
        self.show_stats = show;
        self
    }

    fn total_width(&self) -> u32 {
        self.padding * 2 + self.axis.len() as u32 * self.column_width
    }

    fn chart_top(&self) -> u32 {
        self.padding + self.title_height + self.header_height
    }

    /// X coordinate of a box in the given column.
    fn box_x(&self, column: usize) -> u32 {
        self.padding
            + column as u32 * self.column_width
            + self.column_width.saturating_sub(self.box_width) / 2
    }

    fn render_title(&self, tribe: &str) -> Text {
        Text::new(tribe)
            .set("x", self.total_width() / 2)
            .set("y", self.padding + self.title_height / 2)
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size + 7)
            .set("font-weight", "bold")
            .set("fill", self.text_color.as_str())
            .set("text-anchor", "middle")
    }

    /// Header band: one label per quarter column plus separator lines.
    fn render_header(&self, chart_bottom: u32) -> Group {
        let mut group = Group::new().set("class", "header");
        let header_top = self.padding + self.title_height;

        let header_bg = Rectangle::new()
            .set("x", self.padding)
            .set("y", header_top)
            .set("width", self.axis.len() as u32 * self.column_width)
            .set("height", self.header_height)
            .set("fill", "#f8f9fa");
        group = group.add(header_bg);

        for (column, label) in self.axis.labels().enumerate() {
            let x = self.padding + column as u32 * self.column_width;

            // Column separator, down through the chart area
            let line = Line::new()
                .set("x1", x)
                .set("y1", header_top)
                .set("x2", x)
                .set("y2", chart_bottom)
                .set("stroke", self.grid_color.as_str())
                .set("stroke-width", 1);
            group = group.add(line);

            let text = Text::new(label)
                .set("x", x + self.column_width / 2)
                .set("y", header_top + self.header_height / 2 + self.font_size / 2)
                .set("font-family", self.font_family.as_str())
                .set("font-size", self.font_size + 1)
                .set("font-weight", "bold")
                .set("fill", self.text_color.as_str())
                .set("text-anchor", "middle");
            group = group.add(text);
        }

        group
    }

    /// One timeline box with its badges.
    fn render_entry(&self, entry: &MergedEntry, x: u32, y: u32, color: Rgb, title: &str) -> Group {
        let mut group = Group::new().set("class", "entry");

        let (outline, stroke_width) = if entry.mosart {
            (self.mosart_outline.as_str(), 3)
        } else if entry.decommissioned {
            (self.decom_outline.as_str(), 3)
        } else {
            (self.outline_color.as_str(), 1)
        };

        let rect = Rectangle::new()
            .set("x", x)
            .set("y", y)
            .set("width", self.box_width)
            .set("height", self.box_height)
            .set("rx", 3)
            .set("fill", color.to_hex())
            .set("stroke", outline)
            .set("stroke-width", stroke_width);
        group = group.add(rect);

        let text = Text::new(title)
            .set("x", x + self.box_width / 2)
            .set("y", y + self.box_height / 2 + self.font_size / 2 - 1)
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size - 2)
            .set("font-weight", "bold")
            .set("fill", "#ffffff")
            .set("text-anchor", "middle");
        group = group.add(text);

        // Platform badges on the left edge
        if entry.full_kube {
            group = group.add(self.badge(x, y, "K", "#326ce5"));
        }
        if entry.full_z {
            group = group.add(self.badge(x, y + self.box_height, "Z", "#444444"));
        }
        if entry.critical {
            group = group.add(self.badge(x + self.box_width, y, "!", &self.critical_color));
        }

        // Completion checks under the box
        let below = y + self.box_height + 6;
        if entry.validated {
            group = group.add(self.badge(x + self.box_width / 2 - 8, below, "\u{2713}", &self.validated_color));
        }
        if entry.fully_realized_by_type() {
            group = group.add(self.badge(x + self.box_width / 2 + 8, below, "\u{2713}", &self.realized_color));
        }

        // Hollow markers for known sub-task types still pending
        for (letter, kind, slot) in PENDING_MARKERS {
            if entry.has_pending_subtask(kind) {
                let marker_x = match slot {
                    Slot::Left => x,
                    Slot::Middle => x + self.box_width / 2,
                    Slot::Right => x + self.box_width,
                };
                group = group.add(self.hollow_badge(marker_x, below, letter));
            }
        }

        group
    }

    /// Filled circular badge with a single glyph.
    fn badge(&self, cx: u32, cy: u32, glyph: &str, fill: &str) -> Group {
        Group::new()
            .add(
                Circle::new()
                    .set("cx", cx)
                    .set("cy", cy)
                    .set("r", 7)
                    .set("fill", fill),
            )
            .add(
                Text::new(glyph)
                    .set("x", cx)
                    .set("y", cy + 3)
                    .set("font-family", self.font_family.as_str())
                    .set("font-size", self.font_size - 3)
                    .set("font-weight", "bold")
                    .set("fill", "#ffffff")
                    .set("text-anchor", "middle"),
            )
    }

    /// Outlined badge for pending sub-task markers.
    fn hollow_badge(&self, cx: u32, cy: u32, glyph: &str) -> Group {
        Group::new()
            .add(
                Circle::new()
                    .set("cx", cx)
                    .set("cy", cy)
                    .set("r", 7)
                    .set("fill", "none")
                    .set("stroke", self.pending_color.as_str())
                    .set("stroke-width", 1),
            )
            .add(
                Text::new(glyph)
                    .set("x", cx)
                    .set("y", cy + 3)
                    .set("font-family", self.font_family.as_str())
                    .set("font-size", self.font_size - 3)
                    .set("fill", self.pending_color.as_str())
                    .set("text-anchor", "middle"),
            )
    }

    /// Squad legend: one swatch per distinct squad, sorted by name.
    fn render_legend(
        &self,
        entries: &[MergedEntry],
        palette: &mut SquadPalette,
        top: u32,
    ) -> (Group, u32) {
        let mut squads: Vec<&str> = entries
            .iter()
            .map(|e| e.squad.as_str())
            .filter(|s| !s.is_empty())
            .collect();
        squads.sort_unstable();
        squads.dedup();

        let mut group = Group::new().set("class", "legend");
        let row = self.font_size + 10;

        for (i, squad) in squads.iter().enumerate() {
            let y = top + i as u32 * row;
            let color = palette.color_for(squad);

            group = group.add(
                Rectangle::new()
                    .set("x", self.padding)
                    .set("y", y)
                    .set("width", 14)
                    .set("height", 14)
                    .set("fill", color.to_hex())
                    .set("stroke", self.outline_color.as_str())
                    .set("stroke-width", 1),
            );
            group = group.add(
                Text::new(*squad)
                    .set("x", self.padding + 20)
                    .set("y", y + 11)
                    .set("font-family", self.font_family.as_str())
                    .set("font-size", self.font_size)
                    .set("fill", self.text_color.as_str()),
            );
        }

        (group, squads.len() as u32 * row)
    }

    /// Statistics block, one line per criterion.
    fn render_stats(&self, stats: &TribeStats, x: u32, top: u32) -> Group {
        let lines = [
            format!("Realized: {}/{}", stats.realized, stats.total),
            format!("Validated: {}/{}", stats.validated, stats.total),
            format!("Full Kube: {}/{}", stats.full_kube, stats.total),
            format!("Full Z: {}/{}", stats.full_z, stats.total),
            format!("Mosart: {}/{}", stats.mosart, stats.total),
            format!("Late: {}/{}", stats.late, stats.total),
        ];

        let mut group = Group::new().set("class", "stats");
        for (i, line) in lines.iter().enumerate() {
            group = group.add(
                Text::new(line.as_str())
                    .set("x", x)
                    .set("y", top + i as u32 * (self.font_size + 5))
                    .set("font-family", self.font_family.as_str())
                    .set("font-size", self.font_size)
                    .set("fill", self.text_color.as_str()),
            );
        }
        group
    }
}

impl DeckRenderer for SlideRenderer {
    type Output = String;

    fn render(
        &self,
        chronogram: &TribeChronogram,
        palette: &mut SquadPalette,
    ) -> Result<String, RenderError> {
        if self.axis.is_empty() {
            return Err(RenderError::InvalidData("empty quarter axis".into()));
        }

        // Split entries into on-axis boxes and the unplaced panel.
        let mut placed: Vec<(usize, &MergedEntry)> = Vec::new();
        let mut unplaced: Vec<&MergedEntry> = Vec::new();
        for entry in &chronogram.entries {
            match self.axis.column_for_key(entry.sort_key) {
                Some(column) => placed.push((column, entry)),
                None => unplaced.push(entry),
            }
        }

        let mut stack = vec![0u32; self.axis.len()];
        let mut boxes = Group::new().set("class", "boxes");
        let mut max_rows = 1u32;

        for (column, entry) in placed {
            let row = stack[column];
            stack[column] += 1;
            max_rows = max_rows.max(stack[column]);

            let x = self.box_x(column);
            let y = self.chart_top() + row * self.row_height;
            let color = palette.color_for(entry.squad.as_str());
            boxes = boxes.add(self.render_entry(entry, x, y, color, &entry.title()));
        }

        let chart_bottom = self.chart_top() + max_rows * self.row_height + 10;

        let (legend, legend_height) =
            self.render_legend(&chronogram.entries, palette, chart_bottom + 20);
        let mut below_height = legend_height;

        // Unplaced panel: entries whose label is off-axis keep their raw
        // label next to the box title.
        let mut unplaced_group = Group::new().set("class", "unplaced");
        if !unplaced.is_empty() {
            let panel_x = self.total_width() / 2;
            unplaced_group = unplaced_group.add(
                Text::new(format!("Unknown placement ({})", unplaced.len()))
                    .set("x", panel_x)
                    .set("y", chart_bottom + 20 + self.font_size)
                    .set("font-family", self.font_family.as_str())
                    .set("font-size", self.font_size + 1)
                    .set("font-weight", "bold")
                    .set("fill", self.critical_color.as_str()),
            );
            for (i, entry) in unplaced.iter().enumerate() {
                let y = chart_bottom + 30 + self.font_size + i as u32 * self.row_height;
                let color = palette.color_for(entry.squad.as_str());
                let title = if entry.quarter.is_empty() {
                    entry.title()
                } else {
                    format!("{} [{}]", entry.title(), entry.quarter)
                };
                unplaced_group =
                    unplaced_group.add(self.render_entry(entry, panel_x, y, color, &title));
            }
            below_height =
                below_height.max(10 + self.font_size + unplaced.len() as u32 * self.row_height);
        }

        let total_height = chart_bottom + 20 + below_height + 6 * (self.font_size + 5) + self.padding;
        let total_width = self.total_width();

        let background = Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", total_width)
            .set("height", total_height)
            .set("fill", self.background_color.as_str());

        let mut document = Document::new()
            .set("viewBox", (0, 0, total_width, total_height))
            .set("width", total_width)
            .set("height", total_height)
            .add(background)
            .add(self.render_title(&chronogram.tribe))
            .add(self.render_header(chart_bottom))
            .add(boxes)
            .add(legend)
            .add(unplaced_group);

        if self.show_stats {
            let stats_x = total_width.saturating_sub(self.padding + 3 * self.column_width / 2);
            document = document.add(self.render_stats(
                &chronogram.stats,
                stats_x,
                chart_bottom + 20 + self.font_size,
            ));
        }

        Ok(document.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronogram_core::{Quarter, SubtaskStatus};

    fn entry(product: &str, quarter: &str) -> MergedEntry {
        MergedEntry {
            product: product.into(),
            solution: "SOL".into(),
            quarter: quarter.into(),
            tribe: "Payments".into(),
            squad: "Squad Alpha".into(),
            sort_key: chronogram_core::placement_key(quarter),
            full_kube: false,
            full_z: false,
            mosart: false,
            critical: false,
            decommissioned: false,
            validated: false,
            realized: false,
            subtasks: vec![SubtaskStatus::new("reconstruction", "non")],
        }
    }

    fn chronogram(entries: Vec<MergedEntry>) -> TribeChronogram {
        let unplaced = entries.iter().filter(|e| !e.is_placed()).count();
        TribeChronogram {
            tribe: "Payments".into(),
            stats: TribeStats { total: entries.len(), ..TribeStats::default() },
            observed_quarters: entries.iter().map(|e| e.quarter.clone()).collect(),
            excluded_rows: 0,
            unplaced,
            entries,
        }
    }

    #[test]
    fn renders_boxes_on_quarter_columns() {
        let renderer = SlideRenderer::new();
        let mut palette = SquadPalette::new();
        let svg = renderer
            .render(&chronogram(vec![entry("A", "T1/2025"), entry("B", "T3/2025")]), &mut palette)
            .unwrap();

        assert!(svg.contains("Payments"));
        assert!(svg.contains("T1/2025"));
        assert!(svg.contains("A-SOL"));
        assert!(svg.contains("B-SOL"));
    }

    #[test]
    fn off_axis_entries_land_on_unplaced_panel() {
        let renderer = SlideRenderer::new();
        let mut palette = SquadPalette::new();
        let svg = renderer
            .render(&chronogram(vec![entry("A", "sometime soon")]), &mut palette)
            .unwrap();

        assert!(svg.contains("Unknown placement (1)"));
        assert!(svg.contains("A-SOL [sometime soon]"));
    }

    #[test]
    fn stats_block_is_optional() {
        let deck = chronogram(vec![entry("A", "T1/2025")]);
        let mut palette = SquadPalette::new();

        let with_stats = SlideRenderer::new().render(&deck, &mut palette).unwrap();
        assert!(with_stats.contains("Realized: 0/1"));
        assert!(with_stats.contains("Late: 0/1"));

        let without = SlideRenderer::new().show_stats(false).render(&deck, &mut palette).unwrap();
        assert!(!without.contains("Realized: 0/1"));
    }

    #[test]
    fn mosart_outline_overrides_default() {
        let mut marked = entry("A", "T1/2025");
        marked.mosart = true;

        let mut palette = SquadPalette::new();
        let svg = SlideRenderer::new().render(&chronogram(vec![marked]), &mut palette).unwrap();
        assert!(svg.contains("#ff6600"));
    }

    #[test]
    fn palette_is_extended_for_unseen_squads() {
        let mut palette = SquadPalette::new();
        let _ = SlideRenderer::new()
            .render(&chronogram(vec![entry("A", "T1/2025")]), &mut palette)
            .unwrap();
        assert!(palette.get("Squad Alpha").is_some());
    }

    #[test]
    fn columns_narrower_than_boxes_still_render() {
        let renderer = SlideRenderer::new().column_width(80);
        let mut palette = SquadPalette::new();
        let svg = renderer
            .render(&chronogram(vec![entry("A", "T1/2025")]), &mut palette)
            .unwrap();
        assert!(svg.contains("A-SOL"));
    }

    #[test]
    fn single_column_axis_keeps_stats_on_the_deck() {
        let renderer = SlideRenderer::new().axis(QuarterAxis::new(Quarter::new(2025, 1), 1));
        let mut palette = SquadPalette::new();
        let svg = renderer
            .render(&chronogram(vec![entry("A", "T1/2025")]), &mut palette)
            .unwrap();
        assert!(svg.contains("Realized: 0/1"));
    }

    #[test]
    fn empty_axis_is_invalid() {
        let renderer = SlideRenderer::new().axis(QuarterAxis::new(Quarter::new(2025, 1), 0));
        let mut palette = SquadPalette::new();
        let result = renderer.render(&chronogram(vec![]), &mut palette);
        assert!(matches!(result, Err(RenderError::InvalidData(_))));
    }
}
