use treemap_chart::page_text;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

fn set_display(el: &Element, value: &str) {
    if let Some(el) = el.dyn_ref::<HtmlElement>() {
        let _ = el.style().set_property("display", value);
    }
}

/// Show exactly one `.chart-container` and retitle the page for it.
pub fn show_chart(document: &Document, chart_id: &str) {
    if let Ok(all) = document.query_selector_all(".chart-container") {
        for i in 0..all.length() {
            if let Some(el) = all.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                set_display(&el, "none");
            }
        }
    }
    if let Some(el) = document.get_element_by_id(chart_id) {
        set_display(&el, "block");
    }
    update_page(document, chart_id);
}

/// Swap `#title` / `#description` for the selected chart.
pub fn update_page(document: &Document, chart_id: &str) {
    let text = page_text(chart_id);
    if let Some(el) = document.get_element_by_id("title") {
        el.set_text_content(Some(text.title));
    }
    if let Some(el) = document.get_element_by_id("description") {
        el.set_text_content(Some(text.description));
    }
}

/// `#menu` opens `#menu-content`; each entry's `data-chart` picks the chart.
pub fn attach_menu(document: &Document) -> Result<(), JsValue> {
    if let Some(menu) = document.get_element_by_id("menu") {
        let doc = document.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            if let Some(content) = doc.get_element_by_id("menu-content") {
                set_display(&content, "block");
            }
        }));
        menu.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    let entries = document.query_selector_all("#menu-content div")?;
    for i in 0..entries.length() {
        let Some(entry) = entries.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let doc = document.clone();
        let entry_for_closure = entry.clone();
        let onclick = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(
            move |e: web_sys::Event| {
                // Keep the click from reaching #menu and reopening the list.
                e.stop_propagation();
                let chart_id = entry_for_closure
                    .get_attribute("data-chart")
                    .unwrap_or_default();
                show_chart(&doc, &chart_id);
                if let Some(content) = doc.get_element_by_id("menu-content") {
                    set_display(&content, "none");
                }
            },
        ));
        entry.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }
    Ok(())
}
