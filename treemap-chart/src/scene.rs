use tracing::debug;
use treemap_core::{
    CategoryColorMap, Hierarchy, LegendLayout, NodeId, Rect, Result, TreemapLayout,
};

use crate::config::{ChartConfig, LabelConfig};

/// Label shown iff the tile is wider than `min_width` and taller than `min_height`.
pub fn label_visible(cfg: &LabelConfig, width: f64, height: f64) -> bool {
    width > cfg.min_width && height > cfg.min_height
}

/// `max(min_font_size, min(width, height) / font_divisor)`.
pub fn font_size(cfg: &LabelConfig, width: f64, height: f64) -> f64 {
    cfg.min_font_size.max(width.min(height) / cfg.font_divisor)
}

/// Display form of a leaf value, used in tooltips and `data-value` tags.
pub fn format_value(v: f64) -> String {
    format!("{v}")
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelView {
    /// Offset from the tile's top-left corner.
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub visible: bool,
}

/// One drawable leaf: geometry in chart viewbox units plus the data it is
/// tagged with.
#[derive(Clone, Debug, PartialEq)]
pub struct TileView {
    pub id: NodeId,
    pub name: String,
    pub category: String,
    pub value: f64,
    pub rect: Rect,
    pub fill: &'static str,
    pub label: LabelView,
}

impl TileView {
    pub fn tooltip_text(&self) -> String {
        format!(
            "Name: {} | Category: {} | Value: {}",
            self.name,
            self.category,
            format_value(self.value)
        )
    }
}

/// Everything needed to draw one dataset: tiles, colours and legend.
#[derive(Clone, Debug)]
pub struct ChartScene {
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub tiles: Vec<TileView>,
    pub colors: CategoryColorMap,
    pub categories: Vec<String>,
    pub legend: LegendLayout,
}

impl ChartScene {
    pub fn build(hierarchy: &Hierarchy, cfg: &ChartConfig) -> ChartScene {
        let layout =
            TreemapLayout::compute(hierarchy, cfg.plot_width(), cfg.plot_height(), cfg.padding);
        let categories = hierarchy.categories();
        let colors = CategoryColorMap::assign(&categories);

        let tiles: Vec<TileView> = layout
            .tiles()
            .map(|(id, rect)| {
                let node = hierarchy.node(id);
                let category = node.category().unwrap_or_default().to_string();
                let (w, h) = (rect.width(), rect.height());
                TileView {
                    id,
                    name: node.name.clone(),
                    fill: colors.color_or_default(&category),
                    category,
                    value: node.value().unwrap_or(0.0),
                    rect: rect.translate(cfg.margin.left, cfg.margin.top),
                    label: LabelView {
                        x: cfg.label.inset_x,
                        y: cfg.label.inset_y,
                        font_size: font_size(&cfg.label, w, h),
                        visible: label_visible(&cfg.label, w, h),
                    },
                }
            })
            .collect();

        let legend = LegendLayout::build(&categories, &colors, &cfg.legend);
        debug!(
            tiles = tiles.len(),
            labelled = tiles.iter().filter(|t| t.label.visible).count(),
            categories = categories.len(),
            "built chart scene"
        );
        ChartScene {
            title: hierarchy.node(hierarchy.root()).name.clone(),
            width: cfg.width,
            height: cfg.height,
            tiles,
            colors,
            categories,
            legend,
        }
    }

    /// Parse, validate and lay out a dataset in one go.
    pub fn from_json(text: &str, cfg: &ChartConfig) -> Result<ChartScene> {
        let hierarchy = Hierarchy::from_json(text)?;
        Ok(ChartScene::build(&hierarchy, cfg))
    }

    pub fn tile(&self, id: NodeId) -> Option<&TileView> {
        self.tiles.iter().find(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use treemap_core::RawNode;

    #[test]
    fn font_size_examples() {
        let cfg = LabelConfig::default();
        assert_eq!(font_size(&cfg, 100.0, 30.0), 10.0);
        assert_eq!(font_size(&cfg, 200.0, 150.0), 30.0);
        assert_eq!(font_size(&cfg, 0.0, 0.0), 10.0);
    }

    #[test]
    fn label_visibility_thresholds() {
        let cfg = LabelConfig::default();
        assert!(label_visible(&cfg, 51.0, 21.0));
        assert!(!label_visible(&cfg, 50.0, 100.0));
        assert!(!label_visible(&cfg, 100.0, 20.0));
        assert!(!label_visible(&cfg, 0.0, 0.0));
    }

    #[test]
    fn scene_tags_tiles_and_colors() {
        let h = Hierarchy::build(&RawNode::group(
            "root",
            vec![RawNode::leaf("A", "c1", 10.0), RawNode::leaf("B", "c2", 30.0)],
        ))
        .unwrap();
        let scene = ChartScene::build(&h, &ChartConfig::default());
        assert_eq!(scene.title, "root");
        assert_eq!(scene.tiles.len(), 2);
        let a = &scene.tiles[0];
        assert_eq!(a.name, "A");
        assert_eq!(a.category, "c1");
        assert_eq!(a.value, 10.0);
        assert_eq!(a.fill, scene.colors.get("c1").unwrap());
        assert_ne!(a.fill, scene.tiles[1].fill);
        // Tiles start inside the margin.
        assert_eq!(a.rect.x0, 20.0);
        assert_eq!(a.rect.y0, 20.0);
        assert_eq!(a.tooltip_text(), "Name: A | Category: c1 | Value: 10");
        assert_eq!(scene.legend.items.len(), 2);
    }

    #[test]
    fn empty_dataset_gives_empty_scene() {
        let scene =
            ChartScene::from_json(r#"{"name":"none","children":[]}"#, &ChartConfig::default())
                .unwrap();
        assert!(scene.tiles.is_empty());
        assert!(scene.categories.is_empty());
        assert_eq!(scene.legend.columns, 0);
    }

    #[test]
    fn value_formatting() {
        assert_eq!(format_value(79457.0), "79457");
        assert_eq!(format_value(1.25), "1.25");
        assert_eq!(format_value(0.0), "0");
    }
}
