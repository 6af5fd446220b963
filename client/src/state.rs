use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement};

use inkcalc_shared::Point;

use crate::session::Session;
use crate::tools::{Gesture, Tool};

pub const SWATCHES: [&str; 12] = [
    "#000000", "#dc3545", "#198754", "#0d6efd", "#fd7e14", "#6f42c1", "#d63384", "#20c997",
    "#ffc107", "#6c757d", "#495057", "#ffffff",
];

pub const BRUSH_SIZES: [f64; 6] = [2.0, 4.0, 6.0, 8.0, 12.0, 16.0];

pub const DEFAULT_COLOR: &str = "#000000";
pub const DEFAULT_BRUSH_SIZE: f64 = 4.0;

/// Overlay position used before any solve has computed an ink anchor.
pub const DEFAULT_ANCHOR: Point = Point { x: 50.0, y: 100.0 };

pub struct State {
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub results_el: HtmlElement,
    pub board_width: f64,
    pub board_height: f64,
    pub tool: Tool,
    pub color: String,
    pub brush_size: f64,
    pub gesture: Gesture,
    pub session: Session,
    pub anchor: Point,
}

impl State {
    pub fn new(
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        results_el: HtmlElement,
    ) -> Self {
        Self {
            canvas,
            ctx,
            results_el,
            board_width: 0.0,
            board_height: 0.0,
            tool: Tool::Pen,
            color: DEFAULT_COLOR.to_string(),
            brush_size: DEFAULT_BRUSH_SIZE,
            gesture: Gesture::Idle,
            session: Session::new(),
            anchor: DEFAULT_ANCHOR,
        }
    }
}
