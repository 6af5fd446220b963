use wasm_bindgen::JsValue;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement, PointerEvent, Window};

use inkcalc_shared::Point;

use crate::state::State;

/// Horizontal margin the page layout reserves around the canvas.
pub const CANVAS_MARGIN_X: f64 = 32.0;
/// Vertical space reserved for the toolbar above the canvas.
pub const CANVAS_RESERVED_Y: f64 = 200.0;

pub fn get_element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element: {id}")))?;
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Invalid element type: {id}")))
}

pub fn set_status(status_el: &Element, status_text: &Element, state: &str, text: &str) {
    let _ = status_el.set_attribute("data-state", state);
    status_text.set_text_content(Some(text));
}

/// Recompute the surface size from the viewport. Resizing the canvas wipes
/// both the pixels (documented contract) and the context config, so the
/// round caps are re-applied here.
pub fn resize_canvas(window: &Window, state: &mut State) {
    let inner_width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(800.0);
    let inner_height = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(600.0);
    let width = (inner_width - CANVAS_MARGIN_X).max(1.0).floor();
    let height = (inner_height - CANVAS_RESERVED_Y).max(1.0).floor();
    web_sys::console::log_1(
        &format!(
            "Resizing canvas from {}x{} to {width}x{height}",
            state.board_width, state.board_height
        )
        .into(),
    );
    state.canvas.set_width(width as u32);
    state.canvas.set_height(height as u32);
    state.board_width = width;
    state.board_height = height;
    state.ctx.set_line_cap("round");
    state.ctx.set_line_join("round");
}

pub fn event_to_point(canvas: &HtmlCanvasElement, event: &PointerEvent) -> Option<Point> {
    let rect = canvas.get_bounding_client_rect();
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return None;
    }
    let x = event.client_x() as f64 - rect.left();
    let y = event.client_y() as f64 - rect.top();
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some(Point::new(x, y))
}
