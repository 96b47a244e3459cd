use std::cell::RefCell;
use std::rc::Rc;

use treemap_chart::{TooltipSink, format_value};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

/// Handle to the page's tooltip, cloned into every chart's event handlers.
pub type SharedTooltip = Rc<RefCell<DomTooltip>>;

/// `#tooltip` element driven through [`TooltipSink`].
pub struct DomTooltip {
    el: HtmlElement,
}

impl DomTooltip {
    /// Use the page's `#tooltip`, or append one to `<body>` when missing.
    pub fn find_or_create(document: &Document) -> Result<SharedTooltip, JsValue> {
        let el = match document.get_element_by_id("tooltip") {
            Some(el) => el,
            None => {
                let el = document.create_element("div")?;
                el.set_id("tooltip");
                document
                    .body()
                    .ok_or_else(|| JsValue::from_str("document has no body"))?
                    .append_child(&el)?;
                el
            }
        };
        let el: HtmlElement = el.dyn_into()?;
        let style = el.style();
        let _ = style.set_property("position", "absolute");
        let _ = style.set_property("visibility", "hidden");
        let _ = style.set_property("pointer-events", "none");
        Ok(Rc::new(RefCell::new(DomTooltip { el })))
    }
}

impl TooltipSink for DomTooltip {
    fn show(&mut self, text: &str, value: f64) {
        let _ = self.el.style().set_property("visibility", "visible");
        self.el.set_text_content(Some(text));
        let _ = self.el.set_attribute("data-value", &format_value(value));
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let style = self.el.style();
        let _ = style.set_property("top", &format!("{}px", y));
        let _ = style.set_property("left", &format!("{}px", x));
    }

    fn hide(&mut self) {
        let _ = self.el.style().set_property("visibility", "hidden");
    }
}
