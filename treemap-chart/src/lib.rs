//! Turns a treemap dataset into drawable tiles, a legend and SVG markup, and
//! defines how pointer events drive the shared tooltip.

pub mod config;
pub mod page;
pub mod scene;
pub mod svg;
pub mod tooltip;

pub use config::{ChartConfig, LabelConfig, Margin};
pub use page::{DATASETS, DEFAULT_CHART, Dataset, PageText, dataset, page_text};
pub use scene::{ChartScene, LabelView, TileView, font_size, format_value, label_visible};
pub use svg::{chart_svg, document_svg, legend_svg, svg_escape};
pub use tooltip::{TileInteraction, TooltipSink, TooltipState};
