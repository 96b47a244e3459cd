use crate::scene::TileView;

/// The one tooltip shared by every chart on a page.
///
/// Each call overwrites whatever the previous hover left behind, so a single
/// sink can serve any number of charts.
pub trait TooltipSink {
    /// Make the tooltip visible with `text`, recording `value` as a
    /// queryable attribute.
    fn show(&mut self, text: &str, value: f64);
    /// Place the tooltip's top-left corner at page coordinates.
    fn move_to(&mut self, x: f64, y: f64);
    fn hide(&mut self);
}

/// In-memory tooltip, handy wherever there is no DOM.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TooltipState {
    pub visible: bool,
    pub text: String,
    pub value: Option<f64>,
    pub x: f64,
    pub y: f64,
}

impl TooltipSink for TooltipState {
    fn show(&mut self, text: &str, value: f64) {
        self.visible = true;
        self.text = text.to_string();
        self.value = Some(value);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    fn hide(&mut self) {
        self.visible = false;
    }
}

/// Maps pointer events over a tile onto a tooltip sink.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileInteraction {
    pub offset: f64,
}

impl TileInteraction {
    pub fn new(offset: f64) -> Self {
        TileInteraction { offset }
    }

    pub fn pointer_enter(&self, tile: &TileView, sink: &mut dyn TooltipSink) {
        sink.show(&tile.tooltip_text(), tile.value);
    }

    pub fn pointer_move(&self, page_x: f64, page_y: f64, sink: &mut dyn TooltipSink) {
        sink.move_to(page_x + self.offset, page_y + self.offset);
    }

    pub fn pointer_leave(&self, sink: &mut dyn TooltipSink) {
        sink.hide();
    }
}
