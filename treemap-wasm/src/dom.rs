use std::rc::Rc;

use treemap_chart::{ChartScene, TileInteraction, TileView, chart_svg, legend_svg};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, MouseEvent};

use crate::tooltip::SharedTooltip;

/// Append the chart and its legend to `container`, then hook every tile up
/// to the shared tooltip.
pub fn render_chart(
    container: &Element,
    scene: &ChartScene,
    tooltip: &SharedTooltip,
    interaction: TileInteraction,
) -> Result<(), JsValue> {
    container.insert_adjacent_html("beforeend", &chart_svg(scene))?;
    let rects = container.query_selector_all("svg.treemap rect.tile")?;
    if rects.length() as usize != scene.tiles.len() {
        return Err(JsValue::from_str(&format!(
            "expected {} tiles in the DOM, found {}",
            scene.tiles.len(),
            rects.length()
        )));
    }
    for (i, tile) in scene.tiles.iter().enumerate() {
        let Some(node) = rects.item(i as u32) else {
            continue;
        };
        let el: Element = node.dyn_into()?;
        attach_tile_events(&el, Rc::new(tile.clone()), tooltip, interaction)?;
    }
    container.insert_adjacent_html("beforeend", &legend_svg(&scene.legend))?;
    Ok(())
}

fn attach_tile_events(
    el: &Element,
    tile: Rc<TileView>,
    tooltip: &SharedTooltip,
    interaction: TileInteraction,
) -> Result<(), JsValue> {
    let tip = tooltip.clone();
    let onover = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |_e: MouseEvent| {
        interaction.pointer_enter(&tile, &mut *tip.borrow_mut());
    }));
    el.add_event_listener_with_callback("mouseover", onover.as_ref().unchecked_ref())?;
    onover.forget();

    let tip = tooltip.clone();
    let onmove = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
        interaction.pointer_move(e.page_x() as f64, e.page_y() as f64, &mut *tip.borrow_mut());
    }));
    el.add_event_listener_with_callback("mousemove", onmove.as_ref().unchecked_ref())?;
    onmove.forget();

    let tip = tooltip.clone();
    let onout = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |_e: MouseEvent| {
        interaction.pointer_leave(&mut *tip.borrow_mut());
    }));
    el.add_event_listener_with_callback("mouseout", onout.as_ref().unchecked_ref())?;
    onout.forget();
    Ok(())
}

/// Replace the container's content with a visible error message.
pub fn show_error(document: &Document, container: &Element, message: &str) -> Result<(), JsValue> {
    container.set_inner_html("");
    let el = document.create_element("div")?;
    el.set_class_name("chart-error");
    el.set_text_content(Some(message));
    container.append_child(&el)?;
    Ok(())
}
