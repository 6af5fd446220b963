use inkcalc_shared::Point;

use crate::overlay;
use crate::render;
use crate::state::{State, DEFAULT_ANCHOR};

pub fn handle_pointer_down(state: &mut State, point: Point) {
    if state.gesture.is_active() {
        return;
    }
    let tool = state.tool;
    let color = state.color.clone();
    let size = state.brush_size;
    state.gesture.pointer_down(tool, &color, size, point);
}

pub fn handle_pointer_move(state: &mut State, point: Point) {
    if let Some(cmd) = state.gesture.pointer_move(point) {
        render::apply(&state.ctx, &cmd);
    }
}

pub fn handle_pointer_up(state: &mut State, point: Point) {
    if let Some(cmd) = state.gesture.pointer_up(point) {
        render::apply(&state.ctx, &cmd);
    }
}

/// Full reset: surface, overlays, variable table, gesture machine. Bumping
/// the session generation strands reveal timers from before the reset.
pub fn reset_session(state: &mut State) {
    render::clear_surface(&state.ctx, state.board_width, state.board_height);
    overlay::clear_results(&state.results_el);
    state.session.reset();
    state.gesture.cancel();
    state.anchor = DEFAULT_ANCHOR;
}
