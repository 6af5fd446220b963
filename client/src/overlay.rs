use std::cell::Cell;
use std::rc::Rc;

use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, PointerEvent, Window};

use inkcalc_shared::Point;

/// Spawn one draggable result annotation in the results layer, positioned at
/// the shared anchor current at reveal time. Dragging moves only this node.
pub fn spawn_result(
    document: &Document,
    layer: &HtmlElement,
    text: &str,
    position: Point,
) -> Result<(), JsValue> {
    let element: HtmlElement = document.create_element("div")?.dyn_into()?;
    element.set_attribute("class", "result-box")?;
    element.set_text_content(Some(text));
    let style = element.style();
    style.set_property("left", &format!("{}px", position.x))?;
    style.set_property("top", &format!("{}px", position.y))?;
    attach_drag(&element)?;
    layer.append_child(&element)?;
    Ok(())
}

pub fn clear_results(layer: &HtmlElement) {
    layer.set_inner_html("");
}

/// Per-overlay drag via pointer capture. The grab offset is latched at
/// pointer-down and applied to this element only.
fn attach_drag(element: &HtmlElement) -> Result<(), JsValue> {
    let grab: Rc<Cell<Option<(f64, f64)>>> = Rc::new(Cell::new(None));

    {
        let grab = grab.clone();
        let target = element.clone();
        let ondown = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            grab.set(Some((
                event.client_x() as f64 - target.offset_left() as f64,
                event.client_y() as f64 - target.offset_top() as f64,
            )));
            let _ = target.set_pointer_capture(event.pointer_id());
            event.prevent_default();
        });
        element.add_event_listener_with_callback("pointerdown", ondown.as_ref().unchecked_ref())?;
        ondown.forget();
    }

    {
        let grab = grab.clone();
        let target = element.clone();
        let onmove = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let Some((grab_x, grab_y)) = grab.get() else {
                return;
            };
            let style = target.style();
            let _ = style.set_property(
                "left",
                &format!("{}px", event.client_x() as f64 - grab_x),
            );
            let _ = style.set_property(
                "top",
                &format!("{}px", event.client_y() as f64 - grab_y),
            );
        });
        element.add_event_listener_with_callback("pointermove", onmove.as_ref().unchecked_ref())?;
        onmove.forget();
    }

    for kind in ["pointerup", "pointercancel"] {
        let grab = grab.clone();
        let target = element.clone();
        let onup = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            grab.set(None);
            let _ = target.release_pointer_capture(event.pointer_id());
        });
        element.add_event_listener_with_callback(kind, onup.as_ref().unchecked_ref())?;
        onup.forget();
    }

    Ok(())
}

/// Ask MathJax to re-layout every visible display string. Fire-and-forget
/// and idempotent; silently a no-op until the CDN script has loaded.
pub fn typeset(window: &Window) {
    let Ok(mathjax) = Reflect::get(window.as_ref(), &JsValue::from_str("MathJax")) else {
        return;
    };
    if mathjax.is_undefined() || mathjax.is_null() {
        return;
    }
    let Ok(hub) = Reflect::get(&mathjax, &JsValue::from_str("Hub")) else {
        return;
    };
    let Ok(queue) = Reflect::get(&hub, &JsValue::from_str("Queue")) else {
        return;
    };
    let Ok(queue) = queue.dyn_into::<Function>() else {
        return;
    };
    let args = js_sys::Array::of2(&JsValue::from_str("Typeset"), &hub);
    let _ = queue.call1(&hub, &args);
}
