use std::f64::consts::PI;

use font8x8::{BASIC_FONTS, UnicodeFonts};
use tiny_skia::{
    FillRule, Paint, Path, PathBuilder, PixmapMut, Rect, Stroke, Transform,
};

use super::{Color, Geometry, Shape};

/// Cell size of the built-in bitmap font, in font pixels.
pub(crate) const GLYPH_SIZE: f64 = 8.0;

impl Shape {
    /// Fills, then strokes the border. Group opacity multiplies into its
    /// children.
    pub fn draw(&self, pixmap: &mut PixmapMut) {
        self.draw_with_opacity(pixmap, 100.0);
    }

    fn draw_with_opacity(&self, pixmap: &mut PixmapMut, inherited: f64) {
        let node = self.node();
        if !node.style.visible {
            return;
        }
        let opacity = inherited * node.style.opacity / 100.0;

        if let Geometry::Group { children } = &node.geometry {
            for child in children {
                child.draw_with_opacity(pixmap, opacity);
            }
            return;
        }

        let style = &node.style;
        if let Geometry::Label { value, size, .. } = &node.geometry {
            if let Some(fill) = style.fill {
                let b = node.geometry.bounds();
                let scale = size / GLYPH_SIZE;
                text(pixmap, b.left, b.top, value, scale, fill.with_opacity(opacity));
            }
            return;
        }

        let Some(path) = build_path(&node.geometry) else {
            return;
        };

        if let Geometry::Line { line_width, .. } = &node.geometry {
            if let Some(fill) = style.fill {
                stroke(pixmap, &path, fill.with_opacity(opacity), *line_width);
            }
            return;
        }

        if let Some(fill) = style.fill {
            pixmap.fill_path(
                &path,
                &paint(fill.with_opacity(opacity)),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
        if let Some(border) = style.border {
            if style.border_width > 0.0 {
                stroke(
                    pixmap,
                    &path,
                    border.with_opacity(opacity),
                    style.border_width,
                );
            }
        }
    }
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = true;
    paint
}

pub(crate) fn stroke(
    pixmap: &mut PixmapMut,
    path: &Path,
    color: Color,
    width: f64,
) {
    let stroke = Stroke {
        width: width as f32,
        ..Stroke::default()
    };
    pixmap.stroke_path(
        path,
        &paint(color),
        &stroke,
        Transform::identity(),
        None,
    );
}

/// Draws `line` with its top-left corner at `(left, top)`, each font pixel
/// `scale` window pixels wide. Characters outside basic Latin are skipped
/// but still advance.
pub(crate) fn text(
    pixmap: &mut PixmapMut,
    left: f64,
    top: f64,
    line: &str,
    scale: f64,
    color: Color,
) {
    let ink = paint(color);
    let cell = GLYPH_SIZE * scale;
    for (index, ch) in line.chars().enumerate() {
        let Some(glyph) = BASIC_FONTS.get(ch) else {
            continue;
        };
        let x = left + index as f64 * cell;
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..8 {
                if (bits >> col) & 1 == 0 {
                    continue;
                }
                let dot = Rect::from_xywh(
                    (x + col as f64 * scale) as f32,
                    (top + row as f64 * scale) as f32,
                    scale as f32,
                    scale as f32,
                );
                if let Some(dot) = dot {
                    pixmap.fill_rect(dot, &ink, Transform::identity(), None);
                }
            }
        }
    }
}

pub(crate) fn rect_path(left: f64, top: f64, width: f64, height: f64) -> Option<Path> {
    Rect::from_xywh(left as f32, top as f32, width as f32, height as f32)
        .map(PathBuilder::from_rect)
}

fn build_path(geometry: &Geometry) -> Option<Path> {
    match geometry {
        Geometry::Rect {
            left,
            top,
            width,
            height,
        } => rect_path(*left, *top, *width, *height),
        Geometry::Oval {
            center_x,
            center_y,
            width,
            height,
        } => Rect::from_xywh(
            (center_x - width / 2.0) as f32,
            (center_y - height / 2.0) as f32,
            *width as f32,
            *height as f32,
        )
        .and_then(PathBuilder::from_oval),
        Geometry::Circle {
            center_x,
            center_y,
            radius,
        } => PathBuilder::from_circle(
            *center_x as f32,
            *center_y as f32,
            *radius as f32,
        ),
        Geometry::Line { x1, y1, x2, y2, .. } => {
            polyline(&[(*x1, *y1), (*x2, *y2)], false)
        }
        Geometry::Polygon { points } => polyline(points, true),
        Geometry::RegularPolygon {
            center_x,
            center_y,
            radius,
            points,
        } => {
            let n = usize::try_from(*points).ok()?;
            let vertices = (0..n)
                .map(|i| vertex(*center_x, *center_y, *radius, i, n))
                .collect::<Vec<_>>();
            polyline(&vertices, true)
        }
        Geometry::Star {
            center_x,
            center_y,
            radius,
            points,
            roundness,
        } => {
            let inner = radius * roundness / 100.0;
            let n = usize::try_from(*points).ok()?.checked_mul(2)?;
            let vertices = (0..n)
                .map(|i| {
                    let r = if i % 2 == 0 { *radius } else { inner };
                    vertex(*center_x, *center_y, r, i, n)
                })
                .collect::<Vec<_>>();
            polyline(&vertices, true)
        }
        Geometry::Arc {
            center_x,
            center_y,
            width,
            height,
            start_angle,
            sweep_angle,
        } => arc_path(
            (*center_x, *center_y),
            (width / 2.0, height / 2.0),
            *start_angle,
            *sweep_angle,
        ),
        Geometry::Label { .. } | Geometry::Group { .. } => None,
    }
}

// Vertex `i` of `n`, starting straight up and going clockwise.
fn vertex(cx: f64, cy: f64, r: f64, i: usize, n: usize) -> (f64, f64) {
    let angle = -PI / 2.0 + 2.0 * PI * i as f64 / n as f64;
    (cx + r * angle.cos(), cy + r * angle.sin())
}

const ARC_STEP_DEGREES: f64 = 4.0;

// A closed wedge from the center. A full sweep is the whole ellipse.
fn arc_path(
    (cx, cy): (f64, f64),
    (rx, ry): (f64, f64),
    start: f64,
    sweep: f64,
) -> Option<Path> {
    if sweep <= 0.0 {
        return None;
    }
    if sweep >= 360.0 {
        return Rect::from_xywh(
            (cx - rx) as f32,
            (cy - ry) as f32,
            (rx * 2.0) as f32,
            (ry * 2.0) as f32,
        )
        .and_then(PathBuilder::from_oval);
    }

    let steps = (sweep / ARC_STEP_DEGREES).ceil().max(1.0) as usize;
    let mut outline = Vec::with_capacity(steps + 2);
    outline.push((cx, cy));
    outline.extend((0..=steps).map(|i| {
        let angle = (start + sweep * i as f64 / steps as f64).to_radians();
        (cx + rx * angle.sin(), cy - ry * angle.cos())
    }));
    polyline(&outline, true)
}

fn polyline(points: &[(f64, f64)], close: bool) -> Option<Path> {
    let ((x, y), rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(*x as f32, *y as f32);
    for (x, y) in rest {
        pb.line_to(*x as f32, *y as f32);
    }
    if close {
        pb.close();
    }
    pb.finish()
}

#[cfg(test)]
mod tests {
    use tiny_skia::Pixmap;

    use super::*;

    fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let p = pixmap.pixel(x, y).unwrap().demultiply();
        (p.red(), p.green(), p.blue(), p.alpha())
    }

    #[test]
    fn fills_inside_and_leaves_outside() {
        let mut pixmap = Pixmap::new(20, 20).unwrap();
        Shape::rect(5.0, 5.0, 10.0, 10.0)
            .with("fill", "red")
            .unwrap()
            .draw(&mut pixmap.as_mut());

        assert_eq!(pixel(&pixmap, 10, 10), (255, 0, 0, 255));
        assert_eq!(pixel(&pixmap, 1, 1).3, 0);
    }

    #[test]
    fn hidden_and_unfilled_shapes_draw_nothing() {
        let mut pixmap = Pixmap::new(10, 10).unwrap();
        Shape::rect(0.0, 0.0, 10.0, 10.0)
            .with("visible", false)
            .unwrap()
            .draw(&mut pixmap.as_mut());
        Shape::circle(5.0, 5.0, 4.0)
            .with("fill", super::super::Value::None)
            .unwrap()
            .draw(&mut pixmap.as_mut());

        assert!(pixmap.data().iter().all(|b| *b == 0));
    }

    #[test]
    fn group_opacity_reaches_children() {
        let mut pixmap = Pixmap::new(10, 10).unwrap();
        let group = Shape::group([Shape::rect(0.0, 0.0, 10.0, 10.0)]);
        group.set("opacity", 50).unwrap();
        group.draw(&mut pixmap.as_mut());

        assert_eq!(pixel(&pixmap, 5, 5).3, 128);
    }

    #[test]
    fn star_and_polygon_paths_build() {
        let star = Geometry::Star {
            center_x: 50.0,
            center_y: 50.0,
            radius: 20.0,
            points: 5,
            roundness: 40.0,
        };
        assert!(build_path(&star).is_some());
        assert!(polyline(&[], true).is_none());
    }

    #[test]
    fn oversized_star_counts_do_not_overflow() {
        let mut pixmap = Pixmap::new(10, 10).unwrap();
        let shape = Shape::star(5.0, 5.0, 4.0, 5).unwrap();
        assert!(shape.set("points", 1.0e12).is_err());
        shape.draw(&mut pixmap.as_mut());
        assert!(pixel(&pixmap, 5, 5).3 > 0);

        let densest = Shape::star(5.0, 5.0, 4.0, super::super::MAX_POINTS).unwrap();
        assert!(build_path(&densest.node().geometry).is_some());
    }

    #[test]
    fn arc_fills_only_its_wedge() {
        let mut pixmap = Pixmap::new(20, 20).unwrap();
        // Quarter from 12 o'clock to 3 o'clock.
        Shape::arc(10.0, 10.0, 20.0, 20.0, 0.0, 90.0)
            .unwrap()
            .draw(&mut pixmap.as_mut());

        assert_eq!(pixel(&pixmap, 14, 6).3, 255);
        assert_eq!(pixel(&pixmap, 6, 6).3, 0);
        assert_eq!(pixel(&pixmap, 14, 14).3, 0);
    }

    #[test]
    fn empty_sweep_draws_nothing_and_full_sweep_is_an_ellipse() {
        let mut pixmap = Pixmap::new(20, 20).unwrap();
        Shape::arc(10.0, 10.0, 20.0, 20.0, 0.0, 0.0)
            .unwrap()
            .draw(&mut pixmap.as_mut());
        assert!(pixmap.data().iter().all(|b| *b == 0));

        Shape::arc(10.0, 10.0, 20.0, 20.0, 30.0, 360.0)
            .unwrap()
            .draw(&mut pixmap.as_mut());
        assert_eq!(pixel(&pixmap, 6, 14).3, 255);
    }

    #[test]
    fn labels_draw_inside_their_bounds() {
        let mut pixmap = Pixmap::new(40, 20).unwrap();
        let label = Shape::label("HI", 20.0, 10.0)
            .with("fill", "blue")
            .unwrap()
            .with("size", 16)
            .unwrap();
        label.draw(&mut pixmap.as_mut());

        let b = label.bounds();
        let mut inside = 0;
        for y in 0..20 {
            for x in 0..40 {
                let alpha = pixel(&pixmap, x, y).3;
                let (fx, fy) = (x as f64 + 0.5, y as f64 + 0.5);
                if alpha > 0 {
                    assert!(b.contains(fx, fy), "ink at {} {}", x, y);
                    inside += 1;
                }
            }
        }
        assert!(inside > 0);
    }
}
