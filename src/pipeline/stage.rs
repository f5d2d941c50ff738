//! Typed invalidation over the stage dependency graph.
//!
//! The stage graph is a DAG, not a chain:
//!
//! ```text
//! edges ──────────────┐
//!                     ├──> cells ──> colors ──> document
//! frame (geometry) ───┘                            ^
//! frame (appearance) ──────────────────────────────┘
//! ```
//!
//! Edge settings feed the seed stage (edge-weighted placement); frame
//! geometry determines the inner artwork rectangle that cells clip to,
//! so style/width changes rebuild the tessellation, while frame
//! appearance changes only recolor the frame and re-emit. Lighting and
//! stroke settings touch nothing but the document.

use crate::settings::Settings;

/// Cached pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Edge magnitude map.
    Edges,
    /// Frame layer and inner artwork rectangle.
    Frame,
    /// Seed points and Voronoi cells.
    Cells,
    /// Colored cells.
    Colors,
    /// Lighting and the emitted document.
    Document,
}

/// The set of stages a settings change forces to recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Invalidation {
    edges: bool,
    frame: bool,
    cells: bool,
    colors: bool,
    document: bool,
}

impl Invalidation {
    /// Everything recomputes (new image or first run).
    pub fn all() -> Self {
        Self {
            edges: true,
            frame: true,
            cells: true,
            colors: true,
            document: true,
        }
    }

    pub fn includes(&self, stage: Stage) -> bool {
        match stage {
            Stage::Edges => self.edges,
            Stage::Frame => self.frame,
            Stage::Cells => self.cells,
            Stage::Colors => self.colors,
            Stage::Document => self.document,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.edges || self.frame || self.cells || self.colors || self.document)
    }

    fn mark_edges(&mut self) {
        self.edges = true;
        self.mark_cells();
    }

    fn mark_frame_geometry(&mut self) {
        self.frame = true;
        self.mark_cells();
    }

    fn mark_frame_appearance(&mut self) {
        self.frame = true;
        self.document = true;
    }

    fn mark_cells(&mut self) {
        self.cells = true;
        self.mark_colors();
    }

    fn mark_colors(&mut self) {
        self.colors = true;
        self.document = true;
    }

    fn mark_document(&mut self) {
        self.document = true;
    }

    /// Diff two (normalized) settings records into the stage set that
    /// must recompute.
    pub fn between(old: &Settings, new: &Settings) -> Self {
        let mut inv = Self::default();

        if old.pre_blur != new.pre_blur
            || old.contrast != new.contrast
            || old.edge_method != new.edge_method
            || old.edge_sensitivity != new.edge_sensitivity
        {
            inv.mark_edges();
        }

        if old.frame_style != new.frame_style || old.frame_width != new.frame_width {
            inv.mark_frame_geometry();
        }
        if old.frame_cell_size != new.frame_cell_size
            || old.frame_color_palette != new.frame_color_palette
            || old.frame_hue_shift != new.frame_hue_shift
            || old.frame_saturation != new.frame_saturation
            || old.frame_brightness != new.frame_brightness
        {
            inv.mark_frame_appearance();
        }

        if old.cell_count != new.cell_count
            || old.point_distribution != new.point_distribution
            || old.edge_influence != new.edge_influence
            || old.relaxation_iterations != new.relaxation_iterations
            || old.seed != new.seed
        {
            inv.mark_cells();
        }

        if old.color_mode != new.color_mode
            || old.palette_size != new.palette_size
            || old.saturation != new.saturation
            || old.brightness != new.brightness
            || old.color_palette != new.color_palette
        {
            inv.mark_colors();
        }

        if old.line_width != new.line_width
            || old.line_color != new.line_color
            || old.lighting != new.lighting
        {
            inv.mark_document();
        }

        inv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameStyle;
    use crate::sample::ColorMode;

    fn diff(mutate: impl FnOnce(&mut Settings)) -> Invalidation {
        let old = Settings::default();
        let mut new = old.clone();
        mutate(&mut new);
        Invalidation::between(&old, &new)
    }

    #[test]
    fn identical_settings_invalidate_nothing() {
        let settings = Settings::default();
        assert!(Invalidation::between(&settings, &settings).is_empty());
    }

    #[test]
    fn edge_changes_recompute_from_edges_but_not_the_frame() {
        let inv = diff(|s| s.edge_sensitivity = 80.0);
        assert!(inv.includes(Stage::Edges));
        assert!(inv.includes(Stage::Cells));
        assert!(inv.includes(Stage::Colors));
        assert!(inv.includes(Stage::Document));
        assert!(!inv.includes(Stage::Frame));
    }

    #[test]
    fn cell_changes_keep_the_edge_map() {
        let inv = diff(|s| s.cell_count = 900);
        assert!(!inv.includes(Stage::Edges));
        assert!(!inv.includes(Stage::Frame));
        assert!(inv.includes(Stage::Cells));
        assert!(inv.includes(Stage::Document));
    }

    #[test]
    fn frame_geometry_rebuilds_the_tessellation() {
        let inv = diff(|s| s.frame_style = FrameStyle::Simple);
        assert!(inv.includes(Stage::Frame));
        assert!(inv.includes(Stage::Cells), "inner rect changed");
        assert!(!inv.includes(Stage::Edges));
    }

    #[test]
    fn frame_appearance_only_recolors_and_reemits() {
        let inv = diff(|s| s.frame_hue_shift = 90.0);
        assert!(inv.includes(Stage::Frame));
        assert!(!inv.includes(Stage::Cells));
        assert!(!inv.includes(Stage::Colors));
        assert!(inv.includes(Stage::Document));
    }

    #[test]
    fn color_changes_keep_cells() {
        let inv = diff(|s| s.color_mode = ColorMode::Palette);
        assert!(!inv.includes(Stage::Cells));
        assert!(inv.includes(Stage::Colors));
        assert!(inv.includes(Stage::Document));
    }

    #[test]
    fn lighting_and_stroke_changes_only_reemit() {
        for inv in [
            diff(|s| s.lighting.enabled = true),
            diff(|s| s.line_width = 4.0),
            diff(|s| s.line_color = crate::color::Rgb::new(9, 9, 9)),
        ] {
            assert!(!inv.includes(Stage::Edges));
            assert!(!inv.includes(Stage::Frame));
            assert!(!inv.includes(Stage::Cells));
            assert!(!inv.includes(Stage::Colors));
            assert!(inv.includes(Stage::Document));
        }
    }

    #[test]
    fn seed_changes_rebuild_cells() {
        let inv = diff(|s| s.seed = 1234);
        assert!(inv.includes(Stage::Cells));
        assert!(!inv.includes(Stage::Edges));
    }
}
