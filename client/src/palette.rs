use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlElement};

use crate::tools::Tool;

pub fn render_tools(document: &Document, tools_el: &HtmlElement, active: Tool) {
    tools_el.set_inner_html("");
    for tool in Tool::ALL {
        let Ok(element) = document.create_element("button") else {
            continue;
        };
        let Ok(button) = element.dyn_into::<HtmlButtonElement>() else {
            continue;
        };
        let _ = button.set_attribute("type", "button");
        let _ = button.set_attribute("data-tool", tool.id());
        let _ = button.set_attribute("title", tool.label());
        let class_name = if tool == active {
            "tool-btn active"
        } else {
            "tool-btn"
        };
        let _ = button.set_attribute("class", class_name);
        button.set_text_content(Some(&tool.label()[..1]));
        let _ = tools_el.append_child(&button);
    }
}

pub fn render_swatches(document: &Document, palette_el: &HtmlElement, colors: &[&str], selected: &str) {
    palette_el.set_inner_html("");
    for color in colors {
        let Ok(element) = document.create_element("button") else {
            continue;
        };
        let Ok(button) = element.dyn_into::<HtmlButtonElement>() else {
            continue;
        };
        let _ = button.set_attribute("type", "button");
        let _ = button.set_attribute("data-color", color);
        let _ = button.set_attribute("aria-label", &format!("Use color {color}"));
        let class_name = if *color == selected {
            "swatch active"
        } else {
            "swatch"
        };
        let _ = button.set_attribute("class", class_name);
        let _ = button.style().set_property("background", color);
        let _ = palette_el.append_child(&button);
    }
}

pub fn render_sizes(document: &Document, sizes_el: &HtmlElement, sizes: &[f64], selected: f64) {
    sizes_el.set_inner_html("");
    for size in sizes {
        let Ok(element) = document.create_element("button") else {
            continue;
        };
        let Ok(button) = element.dyn_into::<HtmlButtonElement>() else {
            continue;
        };
        let _ = button.set_attribute("type", "button");
        let _ = button.set_attribute("data-size", &size.to_string());
        let _ = button.set_attribute("title", &format!("{size}px"));
        let class_name = if *size == selected {
            "size-btn active"
        } else {
            "size-btn"
        };
        let _ = button.set_attribute("class", class_name);
        if let Ok(dot) = document.create_element("div") {
            let _ = dot.set_attribute("class", "size-dot");
            if let Ok(dot) = dot.dyn_into::<HtmlElement>() {
                let px = size.min(16.0);
                let _ = dot.style().set_property("width", &format!("{px}px"));
                let _ = dot.style().set_property("height", &format!("{px}px"));
                let _ = button.append_child(&dot);
            }
        }
        let _ = sizes_el.append_child(&button);
    }
}

pub fn tool_from_event(event: &Event) -> Option<Tool> {
    attr_from_event(event, "data-tool").and_then(|id| Tool::from_id(&id))
}

pub fn color_from_event(event: &Event) -> Option<String> {
    attr_from_event(event, "data-color")
}

pub fn size_from_event(event: &Event) -> Option<f64> {
    let size = attr_from_event(event, "data-size")?.parse::<f64>().ok()?;
    if size.is_finite() && size > 0.0 {
        Some(size)
    } else {
        None
    }
}

fn attr_from_event(event: &Event, name: &str) -> Option<String> {
    let mut current = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok());
    while let Some(element) = current {
        if let Some(value) = element.get_attribute(name) {
            return Some(value);
        }
        current = element.parent_element();
    }
    None
}
