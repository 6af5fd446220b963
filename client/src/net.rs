use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Headers, Request, RequestInit, Response, Window};

use inkcalc_shared::{decode_calculate_response, CalculateRequest, ExprResult};

use crate::dom::set_status;
use crate::geometry::{anchor_point, ink_bounds};
use crate::overlay;
use crate::render;
use crate::session::ResultEntry;
use crate::state::State;

/// Every entry in a batch reveals after the same fixed delay from response
/// arrival (not delay x index).
pub const REVEAL_DELAY_MS: i32 = 1000;

/// Solver base address: host-injected `window.CALC_API_URL`, else the page
/// origin.
pub fn calculate_url(window: &Window) -> Result<String, JsValue> {
    let configured = Reflect::get(window.as_ref(), &JsValue::from_str("CALC_API_URL"))
        .ok()
        .and_then(|value| value.as_string())
        .filter(|value| !value.is_empty());
    let base = match configured {
        Some(base) => base,
        None => window.location().origin()?,
    };
    Ok(format!("{}/calculate", base.trim_end_matches('/')))
}

/// Export the surface, POST it with the current variable table, and apply
/// the response when it arrives. Overlapping calls are allowed; each
/// response merges independently in network order.
pub fn request_solve(
    window: &Window,
    document: &Document,
    state: &Rc<RefCell<State>>,
    status_el: &Element,
    status_text: &Element,
) -> Result<(), JsValue> {
    let url = calculate_url(window)?;
    let body = {
        let state = state.borrow();
        let request = CalculateRequest {
            image: render::export_png(&state.canvas)?,
            variables: state.session.variables.clone(),
        };
        serde_json::to_string(&request)
            .map_err(|error| JsValue::from_str(&format!("Request encode error: {error}")))?
    };

    let headers = Headers::new()?;
    headers.set("Content-Type", "application/json")?;
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers.into());
    init.set_body(&JsValue::from_str(&body));
    let request = Request::new_with_str_and_init(&url, &init)?;

    web_sys::console::log_1(&format!("Solve request url={url}").into());
    set_status(status_el, status_text, "solving", "Solving...");

    let promise = window.fetch_with_request(&request);

    let on_response = {
        let window = window.clone();
        let document = document.clone();
        let state = state.clone();
        let status_el = status_el.clone();
        let status_text = status_text.clone();
        let url = url.clone();
        Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
            let Ok(response) = value.dyn_into::<Response>() else {
                web_sys::console::error_1(&"Solve response is not a Response".into());
                set_status(&status_el, &status_text, "error", "Solver error");
                return;
            };
            if !response.ok() {
                web_sys::console::error_1(
                    &format!("Solve failed url={url} status={}", response.status()).into(),
                );
                set_status(&status_el, &status_text, "error", "Solver error");
                return;
            }
            let Ok(text_promise) = response.text() else {
                set_status(&status_el, &status_text, "error", "Solver error");
                return;
            };
            let on_text = {
                let window = window.clone();
                let document = document.clone();
                let state = state.clone();
                let status_el = status_el.clone();
                let status_text = status_text.clone();
                Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
                    let Some(text) = value.as_string() else {
                        set_status(&status_el, &status_text, "error", "Solver error");
                        return;
                    };
                    apply_response(
                        &window,
                        &document,
                        &state,
                        &status_el,
                        &status_text,
                        &text,
                    );
                })
            };
            let on_text_err = {
                let status_el = status_el.clone();
                let status_text = status_text.clone();
                Closure::<dyn FnMut(JsValue)>::new(move |_err: JsValue| {
                    web_sys::console::error_1(&"Solve response body read error".into());
                    set_status(&status_el, &status_text, "error", "Solver error");
                })
            };
            let _ = text_promise.then2(&on_text, &on_text_err);
            on_text.forget();
            on_text_err.forget();
        })
    };

    let on_err = {
        let status_el = status_el.clone();
        let status_text = status_text.clone();
        let url = url.clone();
        Closure::<dyn FnMut(JsValue)>::new(move |_err: JsValue| {
            web_sys::console::error_1(&format!("Solve request failed url={url}").into());
            set_status(&status_el, &status_text, "error", "Solver unreachable");
        })
    };

    let _ = promise.then2(&on_response, &on_err);
    on_response.forget();
    on_err.forget();
    Ok(())
}

/// Apply one solver response: merge assignments, recompute the anchor from
/// the ink present now (after the round-trip), and schedule the reveals.
fn apply_response(
    window: &Window,
    document: &Document,
    state: &Rc<RefCell<State>>,
    status_el: &Element,
    status_text: &Element,
    text: &str,
) {
    let (triples, skipped) = match decode_calculate_response(text) {
        Ok(decoded) => decoded,
        Err(error) => {
            web_sys::console::error_1(&format!("Solve response decode error: {error:?}").into());
            set_status(status_el, status_text, "error", "Solver error");
            return;
        }
    };
    if skipped > 0 {
        web_sys::console::warn_1(&format!("Solve response: skipped {skipped} malformed entries").into());
    }

    let generation = {
        let mut state = state.borrow_mut();
        state.session.merge_assignments(&triples);
        match render::read_pixels(&state.ctx, state.board_width, state.board_height) {
            Ok(rgba) => {
                let bounds = ink_bounds(
                    &rgba,
                    state.board_width as u32,
                    state.board_height as u32,
                );
                state.anchor = anchor_point(bounds, state.board_width, state.board_height);
            }
            Err(_) => {
                web_sys::console::warn_1(&"Ink scan failed; keeping previous anchor".into());
            }
        }
        state.session.generation()
    };

    web_sys::console::log_1(&format!("Solve response: {} entries", triples.len()).into());
    set_status(status_el, status_text, "ready", "Ready");

    for triple in triples {
        schedule_reveal(window, document, state, triple, generation);
    }
}

/// One fire-once timer per entry, all with the same fixed delay. The
/// callback re-checks the session generation so a reveal scheduled before a
/// reset cannot resurrect entries into the cleared overlay set.
fn schedule_reveal(
    window: &Window,
    document: &Document,
    state: &Rc<RefCell<State>>,
    triple: ExprResult,
    generation: u32,
) {
    let cb = {
        let window = window.clone();
        let document = document.clone();
        let state = state.clone();
        Closure::once_into_js(move || {
            let entry = ResultEntry {
                expression: triple.expr,
                answer: triple.result,
            };
            let (results_el, text, anchor) = {
                let mut state = state.borrow_mut();
                if !state.session.is_live(generation) {
                    web_sys::console::log_1(&"Skipping reveal scheduled before reset".into());
                    return;
                }
                let text = entry.display_text();
                state.session.push_result(entry);
                // The drawn expression is replaced by its floating result.
                render::clear_surface(&state.ctx, state.board_width, state.board_height);
                (state.results_el.clone(), text, state.anchor)
            };
            if let Err(error) = overlay::spawn_result(&document, &results_el, &text, anchor) {
                web_sys::console::error_1(&error);
                return;
            }
            overlay::typeset(&window);
        })
    };
    let _ = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), REVEAL_DELAY_MS);
}
