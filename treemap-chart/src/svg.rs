use std::fmt::Write as _;

use treemap_core::LegendLayout;

use crate::scene::{ChartScene, TileView, format_value};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
/// Legend magnification inside a standalone document.
const DOC_LEGEND_SCALE: f64 = 2.0;
const DOC_TITLE_BAND: f64 = 40.0;
const DOC_GAP: f64 = 10.0;

pub fn svg_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// The chart surface: one `<g>` per tile holding a tagged `rect.tile` and its
/// label. Scales to its container through the viewbox.
pub fn chart_svg(scene: &ChartScene) -> String {
    let mut s = String::new();
    let _ = writeln!(
        s,
        "<svg xmlns=\"{SVG_NS}\" class=\"treemap\" viewBox=\"0 0 {} {}\" preserveAspectRatio=\"xMidYMid meet\">",
        scene.width, scene.height
    );
    for t in &scene.tiles {
        push_tile(&mut s, t, false);
    }
    s.push_str("</svg>\n");
    s
}

// Live pages draw their own tooltip; `<title>` only goes into static documents.
fn push_tile(s: &mut String, t: &TileView, with_title: bool) {
    let _ = writeln!(
        s,
        "<g transform=\"translate({:.2}, {:.2})\">",
        t.rect.x0, t.rect.y0
    );
    if with_title {
        let _ = writeln!(s, "<title>{}</title>", svg_escape(&t.tooltip_text()));
    }
    let _ = writeln!(
        s,
        "<rect class=\"tile\" data-name=\"{}\" data-category=\"{}\" data-value=\"{}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>",
        svg_escape(&t.name),
        svg_escape(&t.category),
        format_value(t.value),
        t.rect.width(),
        t.rect.height(),
        t.fill
    );
    let display = if t.label.visible { "" } else { " display=\"none\"" };
    let _ = writeln!(
        s,
        "<text x=\"{}\" y=\"{}\" fill=\"black\" font-size=\"{:.2}px\"{}>{}</text>",
        t.label.x,
        t.label.y,
        t.label.font_size,
        display,
        svg_escape(&t.name)
    );
    s.push_str("</g>\n");
}

/// The legend surface: a `g.legend-box` per category in grid order.
pub fn legend_svg(legend: &LegendLayout) -> String {
    let mut s = String::new();
    let _ = writeln!(
        s,
        "<svg xmlns=\"{SVG_NS}\" id=\"legend\" viewBox=\"0 0 {} {}\" preserveAspectRatio=\"xMidYMid meet\" overflow=\"hidden\">",
        legend.width, legend.height
    );
    push_legend_items(&mut s, legend);
    s.push_str("</svg>\n");
    s
}

fn push_legend_items(s: &mut String, legend: &LegendLayout) {
    for item in &legend.items {
        let _ = writeln!(
            s,
            "<g class=\"legend-box\" transform=\"translate({:.2}, {:.2})\">",
            item.x, item.y
        );
        let _ = writeln!(
            s,
            "<rect class=\"legend-item\" x=\"{}\" y=\"{}\" width=\"{:.2}\" height=\"{}\" fill=\"{}\"/>",
            item.swatch.x0,
            item.swatch.y0,
            item.swatch.width(),
            item.swatch.height(),
            item.color
        );
        let _ = writeln!(
            s,
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-size=\"{}px\" fill=\"black\">{}</text>",
            item.label_x,
            item.label_y,
            legend.font_size,
            svg_escape(&item.category)
        );
        s.push_str("</g>\n");
    }
}

/// Standalone document: optional title, the chart, and the legend centred
/// underneath. Returns the markup with its pixel size.
pub fn document_svg(scene: &ChartScene, title: Option<&str>) -> (String, u32, u32) {
    let title_h = if title.is_some() { DOC_TITLE_BAND } else { 0.0 };
    let legend_w = scene.legend.width * DOC_LEGEND_SCALE;
    let legend_h = scene.legend.height * DOC_LEGEND_SCALE;
    let total_w = scene.width.max(legend_w);
    let total_h = title_h + scene.height + DOC_GAP + legend_h + DOC_GAP;
    let w_px = total_w.ceil() as u32;
    let h_px = total_h.ceil() as u32;

    let mut s = String::new();
    s.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(
        s,
        "<svg xmlns=\"{SVG_NS}\" width=\"{w_px}\" height=\"{h_px}\" viewBox=\"0 0 {w_px} {h_px}\" font-family=\"sans-serif\">"
    );
    s.push_str("<rect x=\"0\" y=\"0\" width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n");
    if let Some(t) = title {
        let _ = writeln!(
            s,
            "<text id=\"title\" x=\"{:.2}\" y=\"28\" text-anchor=\"middle\" font-size=\"24\" fill=\"#333\">{}</text>",
            total_w / 2.0,
            svg_escape(t)
        );
    }
    let _ = writeln!(
        s,
        "<svg class=\"treemap\" x=\"{:.2}\" y=\"{title_h}\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">",
        (total_w - scene.width) / 2.0,
        scene.width,
        scene.height,
        scene.width,
        scene.height
    );
    for t in &scene.tiles {
        push_tile(&mut s, t, true);
    }
    s.push_str("</svg>\n");
    let _ = writeln!(
        s,
        "<svg id=\"legend\" x=\"{:.2}\" y=\"{:.2}\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">",
        (total_w - legend_w) / 2.0,
        title_h + scene.height + DOC_GAP,
        legend_w,
        legend_h,
        scene.legend.width,
        scene.legend.height
    );
    push_legend_items(&mut s, &scene.legend);
    s.push_str("</svg>\n");
    s.push_str("</svg>\n");
    (s, w_px, h_px)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;
    use treemap_core::{Hierarchy, RawNode};

    fn scene() -> ChartScene {
        let h = Hierarchy::build(&RawNode::group(
            "Sales",
            vec![
                RawNode::leaf("Big <One>", "A&B", 300.0),
                RawNode::leaf("tiny", "C", 0.5),
            ],
        ))
        .unwrap();
        ChartScene::build(&h, &ChartConfig::default())
    }

    #[test]
    fn chart_tags_every_tile() {
        let svg = chart_svg(&scene());
        assert!(svg.contains("viewBox=\"0 0 960 600\""));
        assert!(svg.contains("preserveAspectRatio=\"xMidYMid meet\""));
        assert_eq!(svg.matches("class=\"tile\"").count(), 2);
        assert!(svg.contains("data-name=\"Big &lt;One&gt;\""));
        assert!(svg.contains("data-category=\"A&amp;B\""));
        assert!(svg.contains("data-value=\"300\""));
        assert!(svg.contains("data-value=\"0.5\""));
        assert!(!svg.contains("<title>"));
    }

    #[test]
    fn small_tile_label_is_hidden() {
        let svg = chart_svg(&scene());
        assert_eq!(svg.matches("display=\"none\"").count(), 1);
        assert!(svg.contains("display=\"none\">tiny</text>"));
    }

    #[test]
    fn legend_markup() {
        let svg = legend_svg(&scene().legend);
        assert!(svg.contains("id=\"legend\""));
        assert!(svg.contains("viewBox=\"0 0 250 90\""));
        assert_eq!(svg.matches("class=\"legend-box\"").count(), 2);
        assert_eq!(svg.matches("class=\"legend-item\"").count(), 2);
        assert!(svg.contains(">A&amp;B</text>"));
    }

    #[test]
    fn document_stacks_title_chart_legend() {
        let (svg, w, h) = document_svg(&scene(), Some("Sales"));
        assert!(svg.starts_with("<?xml"));
        assert_eq!(w, 960);
        assert_eq!(h, 40 + 600 + 10 + 180 + 10);
        assert!(svg.contains("id=\"title\""));
        assert!(svg.contains("class=\"treemap\""));
        assert!(svg.contains("id=\"legend\""));
        assert_eq!(svg.matches("<title>").count(), 2);

        let (plain, _, h2) = document_svg(&scene(), None);
        assert!(!plain.contains("id=\"title\""));
        assert_eq!(h2, 800);
    }
}
