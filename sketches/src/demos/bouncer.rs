use easel::prelude::*;

pub static SKETCH_CONFIG: SketchConfig = SketchConfig {
    name: "bouncer",
    display_name: "Bouncer",
    steps_per_second: 30.0,
    w: 400,
    h: 400,
};

const RADIUS: f64 = 20.0;

pub struct Bouncer {
    ball: Shape,
    dx: f64,
    dy: f64,
}

pub fn init() -> Bouncer {
    Bouncer {
        ball: Shape::circle(200.0, 200.0, RADIUS),
        dx: 5.0,
        dy: 3.0,
    }
}

impl Sketch for Bouncer {
    fn setup(&mut self, app: &mut App) -> Result<()> {
        app.set_background(Some(rgb(20, 24, 40)));
        self.ball.set("fill", "gold")?;
        self.ball.set("border", "white")?;
        app.add(&self.ball)
    }

    fn on_step(&mut self, app: &mut App) -> Result<()> {
        self.ball.translate(self.dx, self.dy);
        let b = self.ball.bounds();

        if b.left <= app.left() || b.right >= app.right() {
            self.dx = -self.dx;
        }
        if b.top <= app.top() || b.bottom >= app.bottom() {
            self.dy = -self.dy;
        }
        Ok(())
    }

    fn on_key_press(&mut self, app: &mut App, key: &str) -> Result<()> {
        match key {
            "up" => {
                let sps = app.steps_per_second();
                app.set_steps_per_second(sps + 5.0)
            }
            "down" => {
                let sps = app.steps_per_second();
                app.set_steps_per_second((sps - 5.0).max(1.0))
            }
            "s" => {
                let Some(dir) = easel::runtime::storage::screenshot_dir() else {
                    return Ok(());
                };
                std::fs::create_dir_all(&dir)?;
                app.get_screenshot(dir.join("bouncer.png"))
            }
            "q" => {
                app.stop();
                Ok(())
            }
            _ => Ok(()),
        }
    }
}
