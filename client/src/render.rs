use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::geometry::normalized_rect;
use crate::tools::DrawCmd;

/// Commit one draw command to the pixel buffer. Erase segments composite
/// with `destination-out`, so they only remove alpha.
pub fn apply(ctx: &CanvasRenderingContext2d, cmd: &DrawCmd) {
    match cmd {
        DrawCmd::Segment {
            from,
            to,
            color,
            width,
            erase,
        } => {
            let mode = if *erase {
                "destination-out"
            } else {
                "source-over"
            };
            let _ = ctx.set_global_composite_operation(mode);
            ctx.set_stroke_style_str(color);
            ctx.set_line_width(*width);
            ctx.begin_path();
            ctx.move_to(from.x, from.y);
            ctx.line_to(to.x, to.y);
            ctx.stroke();
            let _ = ctx.set_global_composite_operation("source-over");
        }
        DrawCmd::Rect {
            origin,
            width,
            height,
            color,
            line_width,
        } => {
            let (origin, width, height) = normalized_rect(*origin, *width, *height);
            let _ = ctx.set_global_composite_operation("source-over");
            ctx.set_stroke_style_str(color);
            ctx.set_line_width(*line_width);
            ctx.begin_path();
            ctx.rect(origin.x, origin.y, width, height);
            ctx.stroke();
        }
        DrawCmd::Circle {
            center,
            radius,
            color,
            line_width,
        } => {
            let _ = ctx.set_global_composite_operation("source-over");
            ctx.set_stroke_style_str(color);
            ctx.set_line_width(*line_width);
            ctx.begin_path();
            let _ = ctx.arc(center.x, center.y, *radius, 0.0, std::f64::consts::PI * 2.0);
            ctx.stroke();
        }
    }
}

pub fn clear_surface(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
    ctx.clear_rect(0.0, 0.0, width, height);
}

/// Lossless bitmap encoding of the current surface contents.
pub fn export_png(canvas: &HtmlCanvasElement) -> Result<String, JsValue> {
    canvas.to_data_url_with_type("image/png")
}

/// RGBA readback of the whole surface for the ink bounding-box scan.
pub fn read_pixels(
    ctx: &CanvasRenderingContext2d,
    width: f64,
    height: f64,
) -> Result<Vec<u8>, JsValue> {
    let image_data = ctx.get_image_data(0.0, 0.0, width, height)?;
    Ok(image_data.data().0)
}
