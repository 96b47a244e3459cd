use serde::{Deserialize, Serialize};

use crate::color::CategoryColorMap;
use crate::layout::Rect;

/// Grid settings for the category legend. Values are in legend viewbox units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    pub width: f64,
    pub max_rows: usize,
    pub row_pitch: f64,
    pub swatch_height: f64,
    pub swatch_inset: f64,
    /// Horizontal space a swatch gives up inside its column.
    pub swatch_gap: f64,
    pub font_size: f64,
}

impl Default for LegendConfig {
    fn default() -> Self {
        LegendConfig {
            width: 250.0,
            max_rows: 3,
            row_pitch: 30.0,
            swatch_height: 20.0,
            swatch_inset: 7.0,
            swatch_gap: 10.0,
            font_size: 9.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    pub category: String,
    pub color: &'static str,
    pub row: usize,
    pub col: usize,
    /// Top-left of the item's cell.
    pub x: f64,
    pub y: f64,
    /// Swatch relative to the cell origin.
    pub swatch: Rect,
    /// Centre-anchored label position relative to the cell origin.
    pub label_x: f64,
    pub label_y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendLayout {
    pub width: f64,
    pub height: f64,
    pub columns: usize,
    pub column_width: f64,
    pub font_size: f64,
    pub items: Vec<LegendItem>,
}

impl LegendLayout {
    /// Row-major grid with at most `max_rows` rows; the column count grows
    /// with the number of categories.
    pub fn build(categories: &[String], colors: &CategoryColorMap, cfg: &LegendConfig) -> Self {
        let height = cfg.max_rows as f64 * cfg.row_pitch;
        let columns = column_count(categories.len(), cfg.max_rows);
        if columns == 0 {
            return LegendLayout {
                width: cfg.width,
                height,
                columns: 0,
                column_width: 0.0,
                font_size: cfg.font_size,
                items: Vec::new(),
            };
        }
        let column_width = cfg.width / columns as f64;
        let swatch_w = (column_width - cfg.swatch_gap).max(0.0);
        let items = categories
            .iter()
            .enumerate()
            .map(|(i, category)| {
                let row = i / columns;
                let col = i % columns;
                LegendItem {
                    category: category.clone(),
                    color: colors.color_or_default(category),
                    row,
                    col,
                    x: col as f64 * column_width,
                    y: row as f64 * cfg.row_pitch,
                    swatch: Rect::new(
                        cfg.swatch_inset,
                        0.0,
                        cfg.swatch_inset + swatch_w,
                        cfg.swatch_height,
                    ),
                    label_x: column_width / 2.0,
                    label_y: cfg.swatch_height / 1.5,
                }
            })
            .collect();
        LegendLayout {
            width: cfg.width,
            height,
            columns,
            column_width,
            font_size: cfg.font_size,
            items,
        }
    }
}

/// `ceil(count / max_rows)`; zero when there is nothing to show.
pub fn column_count(count: usize, max_rows: usize) -> usize {
    if max_rows == 0 {
        return count;
    }
    count.div_ceil(max_rows)
}
