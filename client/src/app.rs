use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Event, HtmlButtonElement, HtmlCanvasElement, HtmlElement,
    PointerEvent,
};

use crate::actions::{
    handle_pointer_down, handle_pointer_move, handle_pointer_up, reset_session,
};
use crate::dom::{event_to_point, get_element, resize_canvas, set_status};
use crate::net::request_solve;
use crate::palette::{
    color_from_event, render_sizes, render_swatches, render_tools, size_from_event,
    tool_from_event,
};
use crate::state::{State, BRUSH_SIZES, SWATCHES};

fn document_ready_state(document: &web_sys::Document) -> Option<String> {
    Reflect::get(document.as_ref(), &JsValue::from_str("readyState"))
        .ok()?
        .as_string()
}

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    let started = Rc::new(Cell::new(false));

    if document_ready_state(&document).as_deref() == Some("complete") {
        started.set(true);
        return start_app();
    }

    let onload_started = started.clone();
    let onload = Closure::<dyn FnMut(Event)>::new(move |_| {
        if onload_started.replace(true) {
            return;
        }
        if let Err(err) = start_app() {
            web_sys::console::error_1(&err);
        }
    });
    window.add_event_listener_with_callback("load", onload.as_ref().unchecked_ref())?;
    onload.forget();

    Ok(())
}

fn start_app() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;

    let canvas: HtmlCanvasElement = get_element(&document, "board")?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("Missing canvas context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    ctx.set_line_cap("round");
    ctx.set_line_join("round");

    let tools_el: HtmlElement = get_element(&document, "tools")?;
    let palette_el: HtmlElement = get_element(&document, "palette")?;
    let sizes_el: HtmlElement = get_element(&document, "sizes")?;
    let clear_button: HtmlButtonElement = get_element(&document, "clear")?;
    let calculate_button: HtmlButtonElement = get_element(&document, "calculate")?;
    let results_el: HtmlElement = get_element(&document, "results")?;
    let status_el = document
        .get_element_by_id("status")
        .ok_or_else(|| JsValue::from_str("Missing status element"))?;
    let status_text = document
        .get_element_by_id("statusText")
        .ok_or_else(|| JsValue::from_str("Missing status text"))?;

    let state = Rc::new(RefCell::new(State::new(
        canvas.clone(),
        ctx,
        results_el,
    )));

    {
        let mut state = state.borrow_mut();
        resize_canvas(&window, &mut state);
        render_tools(&document, &tools_el, state.tool);
        render_swatches(&document, &palette_el, &SWATCHES, &state.color);
        render_sizes(&document, &sizes_el, &BRUSH_SIZES, state.brush_size);
    }
    set_status(&status_el, &status_text, "ready", "Ready");

    {
        let resize_state = state.clone();
        let window_cb = window.clone();
        let onresize = Closure::<dyn FnMut()>::new(move || {
            let mut state = resize_state.borrow_mut();
            resize_canvas(&window_cb, &mut state);
        });
        window.add_event_listener_with_callback("resize", onresize.as_ref().unchecked_ref())?;
        onresize.forget();
    }

    {
        let down_state = state.clone();
        let down_canvas = canvas.clone();
        let ondown = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let mut state = down_state.borrow_mut();
            let Some(point) = event_to_point(&down_canvas, &event) else {
                return;
            };
            handle_pointer_down(&mut state, point);
            if state.gesture.is_active() {
                let _ = down_canvas.set_pointer_capture(event.pointer_id());
            }
        });
        canvas.add_event_listener_with_callback("pointerdown", ondown.as_ref().unchecked_ref())?;
        ondown.forget();
    }

    {
        let move_state = state.clone();
        let move_canvas = canvas.clone();
        let onmove = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let mut state = move_state.borrow_mut();
            if !state.gesture.is_active() {
                return;
            }
            let Some(point) = event_to_point(&move_canvas, &event) else {
                return;
            };
            handle_pointer_move(&mut state, point);
        });
        canvas.add_event_listener_with_callback("pointermove", onmove.as_ref().unchecked_ref())?;
        onmove.forget();
    }

    {
        let up_state = state.clone();
        let up_canvas = canvas.clone();
        let onup = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let mut state = up_state.borrow_mut();
            if !state.gesture.is_active() {
                return;
            }
            let Some(point) = event_to_point(&up_canvas, &event) else {
                state.gesture.cancel();
                return;
            };
            handle_pointer_up(&mut state, point);
            let _ = up_canvas.release_pointer_capture(event.pointer_id());
        });
        canvas.add_event_listener_with_callback("pointerup", onup.as_ref().unchecked_ref())?;
        onup.forget();
    }

    {
        let cancel_state = state.clone();
        let cancel_canvas = canvas.clone();
        let oncancel = Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
            let mut state = cancel_state.borrow_mut();
            state.gesture.cancel();
            let _ = cancel_canvas.release_pointer_capture(event.pointer_id());
        });
        canvas
            .add_event_listener_with_callback("pointercancel", oncancel.as_ref().unchecked_ref())?;
        oncancel.forget();
    }

    {
        let tool_state = state.clone();
        let tools_el_cb = tools_el.clone();
        let document_cb = document.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(tool) = tool_from_event(&event) else {
                return;
            };
            let mut state = tool_state.borrow_mut();
            state.tool = tool;
            render_tools(&document_cb, &tools_el_cb, tool);
        });
        tools_el.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let color_state = state.clone();
        let palette_el_cb = palette_el.clone();
        let document_cb = document.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(color) = color_from_event(&event) else {
                return;
            };
            let mut state = color_state.borrow_mut();
            state.color = color;
            render_swatches(&document_cb, &palette_el_cb, &SWATCHES, &state.color);
        });
        palette_el.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let size_state = state.clone();
        let sizes_el_cb = sizes_el.clone();
        let document_cb = document.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(size) = size_from_event(&event) else {
                return;
            };
            let mut state = size_state.borrow_mut();
            state.brush_size = size;
            render_sizes(&document_cb, &sizes_el_cb, &BRUSH_SIZES, size);
        });
        sizes_el.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let clear_state = state.clone();
        let status_el_cb = status_el.clone();
        let status_text_cb = status_text.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state = clear_state.borrow_mut();
            reset_session(&mut state);
            set_status(&status_el_cb, &status_text_cb, "ready", "Ready");
        });
        clear_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let solve_state = state.clone();
        let window_cb = window.clone();
        let document_cb = document.clone();
        let status_el_cb = status_el.clone();
        let status_text_cb = status_text.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            if let Err(error) = request_solve(
                &window_cb,
                &document_cb,
                &solve_state,
                &status_el_cb,
                &status_text_cb,
            ) {
                web_sys::console::error_1(&error);
                set_status(&status_el_cb, &status_text_cb, "error", "Solver error");
            }
        });
        calculate_button
            .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    web_sys::console::log_1(&"inkcalc ready".into());
    Ok(())
}
