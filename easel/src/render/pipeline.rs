use tiny_skia::Color as SkiaColor;

use super::canvas::Canvas;
use super::inspector::{Inspector, InspectorStatus};
use super::present::{self, PixelLayout};
use crate::shapes::{Color, Shape};

/// Everything one redraw reads from the application.
pub struct Scene<'a> {
    pub background: Option<Color>,
    pub root: &'a Shape,
    pub inspector: &'a Inspector,
    pub show_inspector: bool,
    pub status: InspectorStatus,
}

/// Paints background, shape tree and (optionally) the inspector onto the
/// surface, then converts the surface into the canvas frame.
///
/// The caller must hold the drawing lock.
pub fn redraw_all(canvas: &mut Canvas, scene: &Scene) {
    let (width, height) = (canvas.width(), canvas.height());
    canvas.fill(SkiaColor::TRANSPARENT);
    let mut surface = canvas.surface_mut();

    // Detached, so it never shows up in the group or in hit tests.
    let background = Shape::rect(0.0, 0.0, width as f64, height as f64);
    background.node_mut().style.fill = scene.background;
    background.draw(&mut surface);

    scene.root.draw(&mut surface);

    if scene.show_inspector {
        scene.inspector.draw(&mut surface, scene.root, scene.status);
    }

    convert_frame(canvas);
}

fn convert_frame(canvas: &mut Canvas) {
    let mut frame = std::mem::take(canvas.frame_mut());
    present::convert(canvas.surface_bytes(), PixelLayout::Rgba, &mut frame);
    *canvas.frame_mut() = frame;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene<'a>(
        root: &'a Shape,
        inspector: &'a Inspector,
        show_inspector: bool,
    ) -> Scene<'a> {
        Scene {
            background: Some(Color::WHITE),
            root,
            inspector,
            show_inspector,
            status: InspectorStatus::default(),
        }
    }

    #[test]
    fn background_then_shapes_in_insertion_order() {
        let mut canvas = Canvas::new(20, 20).unwrap();
        let root = Shape::group([
            Shape::rect(0.0, 0.0, 10.0, 10.0).with("fill", "red").unwrap(),
            Shape::rect(5.0, 5.0, 10.0, 10.0).with("fill", "blue").unwrap(),
        ]);
        let inspector = Inspector::new();
        redraw_all(&mut canvas, &scene(&root, &inspector, false));

        assert_eq!(canvas.pixel(2, 2), Color::named("red"));
        assert_eq!(canvas.pixel(7, 7), Color::named("blue"));
        assert_eq!(canvas.pixel(18, 18), Some(Color::WHITE));
        assert_eq!(canvas.frame()[18 * 20 + 18], 0x00FF_FFFF);
        assert_eq!(canvas.frame()[2 * 20 + 2], 0x00FF_0000);
    }

    #[test]
    fn inspector_only_when_requested() {
        let mut canvas = Canvas::new(40, 40).unwrap();
        let root = Shape::group([]);
        let mut inspector = Inspector::new();
        inspector.set_pointer(20.0, 10.0);

        redraw_all(&mut canvas, &scene(&root, &inspector, false));
        assert_eq!(canvas.pixel(20, 2), Some(Color::WHITE));

        redraw_all(&mut canvas, &scene(&root, &inspector, true));
        assert_ne!(canvas.pixel(20, 2), Some(Color::WHITE));
    }
}
