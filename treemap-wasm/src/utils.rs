use wasm_bindgen::{JsCast, JsValue};
use web_sys::Window;

/// Log a message to the browser console.
pub fn log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

/// Readable text for an error that crossed the JS boundary.
pub fn js_error_text(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// Resolve a page-relative asset path against `global_string("__BASE_URL")`,
/// defaulting to `/`. Absolute and `data:` URLs pass through unchanged.
pub fn asset_url(path: &str) -> String {
    let p = path.trim();
    if p.starts_with("http://") || p.starts_with("https://") || p.starts_with("data:") {
        return p.to_string();
    }
    let base = global_string("__BASE_URL").unwrap_or_else(|| "/".to_string());
    let base = if base.ends_with('/') {
        base
    } else {
        format!("{}/", base)
    };
    let p = p.trim_start_matches('/');
    format!("{}{}", base, p)
}

/// String-valued property on `window`, if the host page set one.
pub fn global_string(key: &str) -> Option<String> {
    web_sys::window().and_then(|w| {
        let v = js_sys::Reflect::get(&w, &JsValue::from_str(key)).ok()?;
        v.as_string()
    })
}

/// Fetch a text resource trying a list of fallback URLs in order. The error of
/// the last attempt is returned when none succeed.
pub async fn fetch_text_with_fallbacks(window: &Window, urls: &[&str]) -> Result<String, JsValue> {
    let mut last_err = JsValue::from_str("no URL to fetch");
    for url in urls {
        let resp_value =
            match wasm_bindgen_futures::JsFuture::from(window.fetch_with_str(url)).await {
                Ok(v) => v,
                Err(e) => {
                    log(&format!("fetch {} failed: {}", url, js_error_text(&e)));
                    last_err = e;
                    continue;
                }
            };
        let resp: web_sys::Response = match resp_value.dyn_into() {
            Ok(r) => r,
            Err(e) => {
                last_err = e;
                continue;
            }
        };
        if !resp.ok() {
            last_err = JsValue::from_str(&format!("HTTP {} from {}", resp.status(), url));
            continue;
        }
        let text_promise = match resp.text() {
            Ok(p) => p,
            Err(e) => {
                last_err = e;
                continue;
            }
        };
        match wasm_bindgen_futures::JsFuture::from(text_promise).await {
            Ok(text_js) => {
                if let Some(s) = text_js.as_string() {
                    return Ok(s);
                }
            }
            Err(e) => last_err = e,
        }
    }
    Err(last_err)
}

/// Simple query string parser used at start-up.
pub fn get_query_param(search: &str, key: &str) -> Option<String> {
    let s = search.trim_start_matches('?');
    for pair in s.split('&') {
        let mut it = pair.splitn(2, '=');
        let k = it.next()?;
        let v = it.next().unwrap_or("");
        if k == key {
            return Some(url_decode(v));
        }
    }
    None
}

fn url_decode(s: &str) -> String {
    percent_encoding::percent_decode_str(s)
        .decode_utf8()
        .unwrap_or_else(|_| s.into())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_param_lookup() {
        assert_eq!(
            get_query_param("?chart=movie-chart&x=1", "chart").as_deref(),
            Some("movie-chart")
        );
        assert_eq!(get_query_param("?x=1", "chart"), None);
        assert_eq!(get_query_param("", "chart"), None);
    }

    #[test]
    fn query_param_is_decoded() {
        assert_eq!(
            get_query_param("?chart=video%20games", "chart").as_deref(),
            Some("video games")
        );
    }
}
