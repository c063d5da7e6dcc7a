use easel::prelude::*;
use easel::shapes::MAX_POINTS;

pub static SKETCH_CONFIG: SketchConfig = SketchConfig {
    name: "stars",
    display_name: "Stars",
    steps_per_second: 20.0,
    w: 400,
    h: 400,
};

const STEP: f64 = 4.0;

#[derive(Default)]
pub struct Stars {
    star: Option<Shape>,
    dial: Option<Shape>,
    caption: Option<Shape>,
}

pub fn init() -> Stars {
    Stars::default()
}

impl Stars {
    fn replace_star(&mut self, app: &App, points: u32) -> Result<()> {
        if let Some(old) = self.star.take() {
            app.remove(&old);
        }
        let star = Shape::star(app.center_x(), app.center_y(), 80.0, points)?
            .with("fill", "gold")?
            .with("border", "darkorange")?;
        app.add(&star)?;
        self.star = Some(star);
        if let Some(caption) = &self.caption {
            caption.set("value", format!("{} points", points))?;
        }
        Ok(())
    }
}

impl Sketch for Stars {
    fn setup(&mut self, app: &mut App) -> Result<()> {
        // Behind the star, sweeping with its roundness.
        let dial = Shape::arc(app.center_x(), app.center_y(), 200.0, 200.0, 0.0, 0.0)?
            .with("fill", "lightgray")?;
        app.add(&dial)?;
        self.dial = Some(dial);

        let caption = Shape::label("", app.center_x(), app.bottom() - 20.0);
        app.add(&caption)?;
        self.caption = Some(caption);

        self.replace_star(app, 5)
    }

    fn on_step(&mut self, _app: &mut App) -> Result<()> {
        if let Some(star) = &self.star {
            let roundness = star.get("roundness")?.as_number("roundness")?;
            let roundness = (roundness + 1.0) % 100.0;
            star.set("roundness", roundness)?;
            if let Some(dial) = &self.dial {
                dial.set("sweepAngle", roundness * 3.6)?;
            }
        }
        Ok(())
    }

    /// Click to choose how many points the star has.
    fn on_mouse_press(&mut self, app: &mut App, _x: f32, _y: f32) -> Result<()> {
        let answer = app.get_text_input("How many points?")?;
        match answer.trim().parse::<u32>() {
            Ok(points) if (3..=MAX_POINTS).contains(&points) => {
                self.replace_star(app, points)
            }
            _ => {
                app.set_title(format!(
                    "Stars: '{}' is not between 3 and {}",
                    answer.trim(),
                    MAX_POINTS
                ));
                Ok(())
            }
        }
    }

    fn on_key_hold(&mut self, _app: &mut App, keys: &[String]) -> Result<()> {
        let Some(star) = &self.star else {
            return Ok(());
        };
        for key in keys {
            match key.as_str() {
                "left" => star.translate(-STEP, 0.0),
                "right" => star.translate(STEP, 0.0),
                "up" => star.translate(0.0, -STEP),
                "down" => star.translate(0.0, STEP),
                _ => {}
            }
        }
        Ok(())
    }
}
