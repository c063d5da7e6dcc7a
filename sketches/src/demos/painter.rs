use std::collections::VecDeque;

use easel::prelude::*;

pub static SKETCH_CONFIG: SketchConfig = SketchConfig {
    name: "painter",
    display_name: "Painter",
    steps_per_second: 30.0,
    w: 500,
    h: 400,
};

const PALETTE: [&str; 5] = ["crimson", "orange", "seagreen", "royalblue", "purple"];
const MAX_SHAPES: u32 = 600;

#[derive(Default)]
pub struct Painter {
    color: usize,
    cursor: Option<Shape>,
    swatch: Option<Shape>,
    dabs: VecDeque<Shape>,
}

pub fn init() -> Painter {
    Painter::default()
}

impl Painter {
    // The oldest dab makes room once the shape limit is reached.
    fn dab(&mut self, app: &App, x: f32, y: f32) -> Result<()> {
        if app.shape_count() >= app.max_shape_count() {
            if let Some(oldest) = self.dabs.pop_front() {
                app.remove(&oldest);
            }
        }
        let dab = Shape::circle(x as f64, y as f64, 6.0)
            .with("fill", PALETTE[self.color])?
            .with("opacity", 70)?;
        app.add(&dab)?;
        self.dabs.push_back(dab);
        Ok(())
    }

    fn pick(&mut self, color: usize) -> Result<()> {
        self.color = color % PALETTE.len();
        if let Some(swatch) = &self.swatch {
            swatch.set("value", PALETTE[self.color])?;
            swatch.set("fill", PALETTE[self.color])?;
            swatch.set("left", 8)?;
        }
        Ok(())
    }

    fn add_tools(&self, app: &App) -> Result<()> {
        for shape in self.swatch.iter().chain(&self.cursor) {
            app.add(shape)?;
        }
        Ok(())
    }
}

impl Sketch for Painter {
    fn setup(&mut self, app: &mut App) -> Result<()> {
        app.set("maxShapeCount", MAX_SHAPES)?;
        self.swatch = Some(Shape::label("", 0.0, app.bottom() - 12.0));
        self.cursor = Some(
            Shape::circle(0.0, 0.0, 8.0)
                .with("fill", Value::None)?
                .with("border", "black")?
                .with("borderWidth", 1)?,
        );
        self.pick(0)?;
        self.add_tools(app)
    }

    fn on_mouse_press(&mut self, app: &mut App, x: f32, y: f32) -> Result<()> {
        if app.is_key_held("e") {
            if let Some(hit) = app.group().hit(x as f64, y as f64) {
                if self.dabs.iter().any(|dab| dab.ptr_eq(&hit)) {
                    app.remove(&hit);
                    self.dabs.retain(|dab| !dab.ptr_eq(&hit));
                }
            }
            return Ok(());
        }
        self.dab(app, x, y)
    }

    fn on_mouse_drag(&mut self, app: &mut App, x: f32, y: f32) -> Result<()> {
        self.on_mouse_move(app, x, y)?;
        self.dab(app, x, y)
    }

    fn on_mouse_move(&mut self, _app: &mut App, x: f32, y: f32) -> Result<()> {
        if let Some(cursor) = &self.cursor {
            cursor.set("centerX", x)?;
            cursor.set("centerY", y)?;
        }
        Ok(())
    }

    fn on_key_press(&mut self, app: &mut App, key: &str) -> Result<()> {
        match key {
            "c" => {
                app.group().clear();
                self.dabs.clear();
                self.add_tools(app)?;
            }
            "right" => self.pick(self.color + 1)?,
            "left" => self.pick(self.color + PALETTE.len() - 1)?,
            _ => {}
        }
        Ok(())
    }
}
