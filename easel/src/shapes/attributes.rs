use super::{Geometry, MAX_POINTS, Shape, ShapeKind, Value, check_sweep};
use crate::core::error::{Error, Result};

const POSITION: [&str; 8] = [
    "left", "top", "right", "bottom", "centerX", "centerY", "width", "height",
];

impl Shape {
    /// Reads an attribute by its user-facing name.
    pub fn get(&self, name: &str) -> Result<Value> {
        let kind = self.kind();
        if POSITION.contains(&name) {
            let b = self.bounds();
            return Ok(Value::Number(match name {
                "left" => b.left,
                "top" => b.top,
                "right" => b.right,
                "bottom" => b.bottom,
                "centerX" => b.center_x(),
                "centerY" => b.center_y(),
                "width" => b.width(),
                _ => b.height(),
            }));
        }

        let node = self.node();
        let style = &node.style;
        let value = match (name, &node.geometry) {
            ("fill", _) => Value::from(style.fill),
            ("border", _) => Value::from(style.border),
            ("borderWidth", _) => Value::Number(style.border_width),
            ("opacity", _) => Value::Number(style.opacity),
            ("visible", _) => Value::Bool(style.visible),
            ("radius", Geometry::Circle { radius, .. })
            | ("radius", Geometry::RegularPolygon { radius, .. })
            | ("radius", Geometry::Star { radius, .. }) => {
                Value::Number(*radius)
            }
            ("points", Geometry::RegularPolygon { points, .. })
            | ("points", Geometry::Star { points, .. }) => {
                Value::Number(*points as f64)
            }
            ("roundness", Geometry::Star { roundness, .. }) => {
                Value::Number(*roundness)
            }
            ("x1", Geometry::Line { x1, .. }) => Value::Number(*x1),
            ("y1", Geometry::Line { y1, .. }) => Value::Number(*y1),
            ("x2", Geometry::Line { x2, .. }) => Value::Number(*x2),
            ("y2", Geometry::Line { y2, .. }) => Value::Number(*y2),
            ("lineWidth", Geometry::Line { line_width, .. }) => {
                Value::Number(*line_width)
            }
            ("pointList", Geometry::Polygon { points }) => {
                Value::Points(points.clone())
            }
            ("startAngle", Geometry::Arc { start_angle, .. }) => {
                Value::Number(*start_angle)
            }
            ("sweepAngle", Geometry::Arc { sweep_angle, .. }) => {
                Value::Number(*sweep_angle)
            }
            ("value", Geometry::Label { value, .. }) => Value::Text(value.clone()),
            ("size", Geometry::Label { size, .. }) => Value::Number(*size),
            _ => return Err(unknown(kind, name)),
        };
        Ok(value)
    }

    /// Writes an attribute by its user-facing name. Position attributes move
    /// the shape; `width`/`height` resize the shapes whose geometry stores a
    /// size.
    pub fn set(&self, name: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let kind = self.kind();
        let label = format!("{}.{}", kind, name);

        match name {
            "fill" => {
                let fill = value.as_fill(&label)?;
                self.for_each_leaf(&mut |shape| {
                    shape.node_mut().style.fill = fill;
                });
                return Ok(());
            }
            "border" => {
                let border = value.as_fill(&label)?;
                self.for_each_leaf(&mut |shape| {
                    shape.node_mut().style.border = border;
                });
                return Ok(());
            }
            "borderWidth" => {
                let width = non_negative(value.as_number(&label)?, &label)?;
                self.node_mut().style.border_width = width;
                return Ok(());
            }
            "opacity" => {
                let opacity = value.as_number(&label)?;
                if !(0.0..=100.0).contains(&opacity) {
                    return Err(Error::usage(format!(
                        "{} must be between 0 and 100, got {}",
                        label, opacity
                    )));
                }
                self.node_mut().style.opacity = opacity;
                return Ok(());
            }
            "visible" => {
                self.node_mut().style.visible = value.as_bool(&label)?;
                return Ok(());
            }
            "left" | "top" | "right" | "bottom" | "centerX" | "centerY" => {
                let target = value.as_number(&label)?;
                let b = self.bounds();
                let (dx, dy) = match name {
                    "left" => (target - b.left, 0.0),
                    "right" => (target - b.right, 0.0),
                    "centerX" => (target - b.center_x(), 0.0),
                    "top" => (0.0, target - b.top),
                    "bottom" => (0.0, target - b.bottom),
                    _ => (0.0, target - b.center_y()),
                };
                self.translate(dx, dy);
                return Ok(());
            }
            _ => {}
        }

        let mut node = self.node_mut();
        match (name, &mut node.geometry) {
            ("width", Geometry::Rect { width, .. })
            | ("width", Geometry::Oval { width, .. })
            | ("width", Geometry::Arc { width, .. }) => {
                *width = positive(value.as_number(&label)?, &label)?;
            }
            ("height", Geometry::Rect { height, .. })
            | ("height", Geometry::Oval { height, .. })
            | ("height", Geometry::Arc { height, .. }) => {
                *height = positive(value.as_number(&label)?, &label)?;
            }
            ("radius", Geometry::Circle { radius, .. })
            | ("radius", Geometry::RegularPolygon { radius, .. })
            | ("radius", Geometry::Star { radius, .. }) => {
                *radius = positive(value.as_number(&label)?, &label)?;
            }
            ("points", Geometry::RegularPolygon { points, .. })
            | ("points", Geometry::Star { points, .. }) => {
                *points = point_count(value.as_number(&label)?, &label)?;
            }
            ("roundness", Geometry::Star { roundness, .. }) => {
                let r = value.as_number(&label)?;
                if !(0.0..=100.0).contains(&r) {
                    return Err(Error::usage(format!(
                        "{} must be between 0 and 100, got {}",
                        label, r
                    )));
                }
                *roundness = r;
            }
            ("x1", Geometry::Line { x1, .. }) => *x1 = value.as_number(&label)?,
            ("y1", Geometry::Line { y1, .. }) => *y1 = value.as_number(&label)?,
            ("x2", Geometry::Line { x2, .. }) => *x2 = value.as_number(&label)?,
            ("y2", Geometry::Line { y2, .. }) => *y2 = value.as_number(&label)?,
            ("lineWidth", Geometry::Line { line_width, .. }) => {
                *line_width = positive(value.as_number(&label)?, &label)?;
            }
            ("pointList", Geometry::Polygon { points }) => {
                *points = value.as_points(&label)?;
            }
            ("startAngle", Geometry::Arc { start_angle, .. }) => {
                *start_angle = value.as_number(&label)?;
            }
            ("sweepAngle", Geometry::Arc { sweep_angle, .. }) => {
                let sweep = value.as_number(&label)?;
                check_sweep(kind, sweep)?;
                *sweep_angle = sweep;
            }
            ("value", Geometry::Label { value: text, .. }) => {
                *text = label_text(&value, &label)?;
            }
            ("size", Geometry::Label { size, .. }) => {
                *size = positive(value.as_number(&label)?, &label)?;
            }
            ("width" | "height", _) => {
                return Err(Error::read_only(kind.name(), name));
            }
            _ => return Err(unknown(kind, name)),
        }
        Ok(())
    }

    fn for_each_leaf(&self, f: &mut dyn FnMut(&Shape)) {
        if self.is_group() {
            for child in self.children() {
                child.for_each_leaf(f);
            }
        } else {
            f(self);
        }
    }
}

fn unknown(kind: ShapeKind, name: &str) -> Error {
    Error::usage(format!("{} has no attribute named '{}'", kind, name))
}

fn point_count(count: f64, label: &str) -> Result<u32> {
    let invalid = || {
        Error::usage(format!(
            "{} must be a whole number from 3 to {}, got {}",
            label, MAX_POINTS, count
        ))
    };
    if count.fract() != 0.0 || !(3.0..=MAX_POINTS as f64).contains(&count) {
        return Err(invalid());
    }
    u32::try_from(count as i64).map_err(|_| invalid())
}

// Labels show numbers and booleans the way they print.
fn label_text(value: &Value, label: &str) -> Result<String> {
    match value {
        Value::Text(text) => Ok(text.clone()),
        Value::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
            Ok(format!("{}", *n as i64))
        }
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(if *b { "True" } else { "False" }.to_string()),
        other => other.as_text(label),
    }
}

fn positive(value: f64, label: &str) -> Result<f64> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(Error::usage(format!(
            "{} must be positive, got {}",
            label, value
        )))
    }
}

fn non_negative(value: f64, label: &str) -> Result<f64> {
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::usage(format!(
            "{} must not be negative, got {}",
            label, value
        )))
    }
}
