use std::rc::Rc;

use treemap_chart::{ChartConfig, ChartScene, DATASETS, DEFAULT_CHART, Dataset, TileInteraction};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

mod dom;
mod menu;
mod tooltip;
mod utils;

use tooltip::{DomTooltip, SharedTooltip};
use utils::{asset_url, fetch_text_with_fallbacks, get_query_param, global_string, js_error_text, log};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    // The host page may override geometry through `window.__TREEMAP_CONFIG`.
    let config = match global_string("__TREEMAP_CONFIG") {
        Some(json) => ChartConfig::from_json(&json).unwrap_or_else(|err| {
            log(&format!("ignoring __TREEMAP_CONFIG: {err}"));
            ChartConfig::default()
        }),
        None => ChartConfig::default(),
    };
    let config = Rc::new(config);
    let tooltip = DomTooltip::find_or_create(&document)?;

    for ds in DATASETS.iter() {
        let win = window.clone();
        let doc = document.clone();
        let cfg = config.clone();
        let tip = tooltip.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = load_chart(&win, &doc, ds, &cfg, &tip).await {
                let msg = js_error_text(&err);
                log(&format!("Failed to load chart '{}': {}", ds.chart_id, msg));
                if let Some(container) = doc.get_element_by_id(ds.chart_id) {
                    let _ = dom::show_error(
                        &doc,
                        &container,
                        &format!("Could not load {}: {}", ds.title, msg),
                    );
                }
            }
        });
    }

    menu::attach_menu(&document)?;
    menu::show_chart(&document, &initial_chart(&window, &document));
    Ok(())
}

/// `?chart=<id>` when it names an element on the page, the default otherwise.
fn initial_chart(window: &Window, document: &Document) -> String {
    if let Ok(search) = window.location().search()
        && let Some(id) = get_query_param(&search, "chart")
        && document.get_element_by_id(&id).is_some()
    {
        return id;
    }
    DEFAULT_CHART.to_string()
}

async fn load_chart(
    window: &Window,
    document: &Document,
    ds: &'static Dataset,
    cfg: &ChartConfig,
    tooltip: &SharedTooltip,
) -> Result<(), JsValue> {
    let container = document
        .get_element_by_id(ds.chart_id)
        .ok_or_else(|| JsValue::from_str(&format!("no #{} container", ds.chart_id)))?;
    let fallback = asset_url(ds.fallback);
    let text = fetch_text_with_fallbacks(window, &[ds.url, fallback.as_str()]).await?;
    let scene =
        ChartScene::from_json(&text, cfg).map_err(|e| JsValue::from_str(&e.to_string()))?;
    dom::render_chart(
        &container,
        &scene,
        tooltip,
        TileInteraction::new(cfg.tooltip_offset),
    )?;
    log(&format!(
        "Rendered {} with {} tiles",
        ds.chart_id,
        scene.tiles.len()
    ));
    Ok(())
}
