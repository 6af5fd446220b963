use inkcalc_shared::Point;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tool {
    Pen,
    Line,
    Rectangle,
    Circle,
    Text,
    Eraser,
}

impl Tool {
    pub const ALL: [Tool; 6] = [
        Tool::Pen,
        Tool::Line,
        Tool::Rectangle,
        Tool::Circle,
        Tool::Text,
        Tool::Eraser,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Tool::Pen => "pen",
            Tool::Line => "line",
            Tool::Rectangle => "rectangle",
            Tool::Circle => "circle",
            Tool::Text => "text",
            Tool::Eraser => "eraser",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tool::Pen => "Pen",
            Tool::Line => "Line",
            Tool::Rectangle => "Rectangle",
            Tool::Circle => "Circle",
            Tool::Text => "Text",
            Tool::Eraser => "Eraser",
        }
    }

    pub fn from_id(id: &str) -> Option<Tool> {
        Tool::ALL.into_iter().find(|tool| tool.id() == id)
    }
}

/// One committed raster mutation. Rect extents are signed (corners as
/// dragged); the raster primitive normalizes them.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    Segment {
        from: Point,
        to: Point,
        color: String,
        width: f64,
        erase: bool,
    },
    Rect {
        origin: Point,
        width: f64,
        height: f64,
        color: String,
        line_width: f64,
    },
    Circle {
        center: Point,
        radius: f64,
        color: String,
        line_width: f64,
    },
}

/// Gesture machine: Idle -> Dragging -> Idle, reset on every pointer-up.
/// The tool config is latched at pointer-down, so toolbar changes made
/// mid-gesture only apply to the next gesture.
pub enum Gesture {
    Idle,
    Dragging {
        tool: Tool,
        color: String,
        size: f64,
        anchor: Point,
        last: Point,
    },
}

impl Gesture {
    pub fn is_active(&self) -> bool {
        matches!(self, Gesture::Dragging { .. })
    }

    pub fn pointer_down(&mut self, tool: Tool, color: &str, size: f64, point: Point) {
        *self = Gesture::Dragging {
            tool,
            color: color.to_string(),
            size,
            anchor: point,
            last: point,
        };
    }

    pub fn pointer_move(&mut self, point: Point) -> Option<DrawCmd> {
        let Gesture::Dragging {
            tool,
            color,
            size,
            last,
            ..
        } = self
        else {
            return None;
        };
        let from = *last;
        *last = point;
        match tool {
            Tool::Pen => Some(DrawCmd::Segment {
                from,
                to: point,
                color: color.clone(),
                width: *size,
                erase: false,
            }),
            Tool::Eraser => Some(DrawCmd::Segment {
                from,
                to: point,
                color: color.clone(),
                width: *size * 2.0,
                erase: true,
            }),
            _ => None,
        }
    }

    pub fn pointer_up(&mut self, point: Point) -> Option<DrawCmd> {
        let Gesture::Dragging {
            tool,
            color,
            size,
            anchor,
            ..
        } = std::mem::replace(self, Gesture::Idle)
        else {
            return None;
        };
        match tool {
            Tool::Line => Some(DrawCmd::Segment {
                from: anchor,
                to: point,
                color,
                width: size,
                erase: false,
            }),
            Tool::Rectangle => Some(DrawCmd::Rect {
                origin: anchor,
                width: point.x - anchor.x,
                height: point.y - anchor.y,
                color,
                line_width: size,
            }),
            Tool::Circle => Some(DrawCmd::Circle {
                center: anchor,
                radius: anchor.distance_to(point),
                color,
                line_width: size,
            }),
            Tool::Pen | Tool::Eraser | Tool::Text => None,
        }
    }

    pub fn cancel(&mut self) {
        *self = Gesture::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn pen_emits_union_of_moved_segments() {
        let mut gesture = Gesture::Idle;
        gesture.pointer_down(Tool::Pen, "#000000", 4.0, p(0.0, 0.0));
        let first = gesture.pointer_move(p(5.0, 0.0));
        let second = gesture.pointer_move(p(5.0, 5.0));
        let up = gesture.pointer_up(p(5.0, 5.0));
        assert_eq!(
            first,
            Some(DrawCmd::Segment {
                from: p(0.0, 0.0),
                to: p(5.0, 0.0),
                color: "#000000".into(),
                width: 4.0,
                erase: false,
            })
        );
        assert_eq!(
            second,
            Some(DrawCmd::Segment {
                from: p(5.0, 0.0),
                to: p(5.0, 5.0),
                color: "#000000".into(),
                width: 4.0,
                erase: false,
            })
        );
        assert_eq!(up, None);
        assert!(!gesture.is_active());
    }

    #[test]
    fn eraser_doubles_width_and_marks_erase() {
        let mut gesture = Gesture::Idle;
        gesture.pointer_down(Tool::Eraser, "#dc3545", 6.0, p(1.0, 1.0));
        let cmd = gesture.pointer_move(p(2.0, 2.0));
        match cmd {
            Some(DrawCmd::Segment { width, erase, .. }) => {
                assert_eq!(width, 12.0);
                assert!(erase);
            }
            other => panic!("expected erase segment, got {other:?}"),
        }
        assert_eq!(gesture.pointer_up(p(2.0, 2.0)), None);
    }

    #[test]
    fn shape_tools_commit_only_at_release() {
        let mut gesture = Gesture::Idle;
        gesture.pointer_down(Tool::Line, "#000000", 2.0, p(10.0, 10.0));
        assert_eq!(gesture.pointer_move(p(30.0, 20.0)), None);
        let cmd = gesture.pointer_up(p(40.0, 25.0));
        assert_eq!(
            cmd,
            Some(DrawCmd::Segment {
                from: p(10.0, 10.0),
                to: p(40.0, 25.0),
                color: "#000000".into(),
                width: 2.0,
                erase: false,
            })
        );
    }

    #[test]
    fn rectangle_carries_signed_extents() {
        let mut gesture = Gesture::Idle;
        gesture.pointer_down(Tool::Rectangle, "#000000", 2.0, p(10.0, 10.0));
        let cmd = gesture.pointer_up(p(5.0, 5.0));
        assert_eq!(
            cmd,
            Some(DrawCmd::Rect {
                origin: p(10.0, 10.0),
                width: -5.0,
                height: -5.0,
                color: "#000000".into(),
                line_width: 2.0,
            })
        );
    }

    #[test]
    fn circle_radius_is_euclidean() {
        let mut gesture = Gesture::Idle;
        gesture.pointer_down(Tool::Circle, "#000000", 2.0, p(0.0, 0.0));
        match gesture.pointer_up(p(3.0, 4.0)) {
            Some(DrawCmd::Circle { radius, center, .. }) => {
                assert_eq!(radius, 5.0);
                assert_eq!(center, p(0.0, 0.0));
            }
            other => panic!("expected circle, got {other:?}"),
        }
    }

    #[test]
    fn config_is_latched_at_pointer_down() {
        let mut gesture = Gesture::Idle;
        gesture.pointer_down(Tool::Pen, "#000000", 4.0, p(0.0, 0.0));
        // A toolbar change mid-gesture would mutate State, not the latch.
        let cmd = gesture.pointer_move(p(1.0, 0.0));
        match cmd {
            Some(DrawCmd::Segment { color, width, .. }) => {
                assert_eq!(color, "#000000");
                assert_eq!(width, 4.0);
            }
            other => panic!("expected segment, got {other:?}"),
        }
    }

    #[test]
    fn text_tool_commits_nothing() {
        let mut gesture = Gesture::Idle;
        gesture.pointer_down(Tool::Text, "#000000", 4.0, p(0.0, 0.0));
        assert_eq!(gesture.pointer_move(p(10.0, 10.0)), None);
        assert_eq!(gesture.pointer_up(p(10.0, 10.0)), None);
        assert!(!gesture.is_active());
    }

    #[test]
    fn tool_ids_round_trip() {
        for tool in Tool::ALL {
            assert_eq!(Tool::from_id(tool.id()), Some(tool));
        }
        assert_eq!(Tool::from_id("marquee"), None);
    }
}
