use tiny_skia::{Paint, PathBuilder, PixmapMut, Rect, Transform};

use crate::shapes::draw::{rect_path, stroke, text};
use crate::shapes::{Color, Shape};

const GUIDE: Color = Color::rgba(0, 120, 255, 110);
const OUTLINE: Color = Color::rgba(255, 0, 160, 230);
const PANEL: Color = Color::rgba(255, 255, 255, 220);
const INK: Color = Color::rgba(20, 20, 20, 255);
const GLYPH: i32 = 8;
const PADDING: i32 = 4;
const LINE_GAP: i32 = 2;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct InspectorStatus {
    pub paused: bool,
    pub stopped: bool,
}

/// Debugging overlay showing the pointer position and the shape under it.
#[derive(Debug, Default)]
pub struct Inspector {
    pointer: Option<(f32, f32)>,
}

impl Inspector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Some((x, y));
    }

    pub fn pointer(&self) -> Option<(f32, f32)> {
        self.pointer
    }

    pub fn draw(
        &self,
        pixmap: &mut PixmapMut,
        root: &Shape,
        status: InspectorStatus,
    ) {
        let width = pixmap.width() as f32;
        let height = pixmap.height() as f32;

        let mut lines = Vec::new();
        if status.stopped {
            lines.push("STOPPED".to_string());
        } else if status.paused {
            lines.push("PAUSED".to_string());
        }

        if let Some((x, y)) = self.pointer {
            guide(pixmap, (x, 0.0), (x, height));
            guide(pixmap, (0.0, y), (width, y));
            lines.push(format!("x: {:.0} y: {:.0}", x, y));

            if let Some(hovered) = root.hit(x as f64, y as f64) {
                let b = hovered.bounds();
                if let Some(path) =
                    rect_path(b.left, b.top, b.width().max(1.0), b.height().max(1.0))
                {
                    stroke(pixmap, &path, OUTLINE, 1.0);
                }
                lines.push(hovered.kind().to_string());
                lines.push(format!(
                    "left {:.0} top {:.0}",
                    b.left, b.top
                ));
                lines.push(format!(
                    "w {:.0} h {:.0}",
                    b.width(),
                    b.height()
                ));
            }
        }

        if !lines.is_empty() {
            panel(pixmap, &lines);
        }
    }
}

fn guide(pixmap: &mut PixmapMut, from: (f32, f32), to: (f32, f32)) {
    let mut pb = PathBuilder::new();
    pb.move_to(from.0, from.1);
    pb.line_to(to.0, to.1);
    if let Some(path) = pb.finish() {
        stroke(pixmap, &path, GUIDE, 1.0);
    }
}

// Bottom-left corner, sized to its widest line.
fn panel(pixmap: &mut PixmapMut, lines: &[String]) {
    let columns = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let panel_w = columns as i32 * GLYPH + PADDING * 2;
    let panel_h =
        lines.len() as i32 * (GLYPH + LINE_GAP) - LINE_GAP + PADDING * 2;
    let top = pixmap.height() as i32 - panel_h;

    fill(pixmap, 0, top, panel_w, panel_h, PANEL);

    let mut y = top + PADDING;
    for line in lines {
        text(pixmap, PADDING as f64, y as f64, line, 1.0, INK);
        y += GLYPH + LINE_GAP;
    }
}

fn fill(pixmap: &mut PixmapMut, x: i32, y: i32, w: i32, h: i32, color: Color) {
    let Some(rect) = Rect::from_xywh(x as f32, y as f32, w as f32, h as f32)
    else {
        return;
    };
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    pixmap.fill_rect(rect, &paint, Transform::identity(), None);
}
