use super::Shape;
use super::color::Color;
use crate::core::error::{Error, Result};

/// A dynamically typed attribute value exchanged through `get`/`set`.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    None,
    Bool(bool),
    Number(f64),
    Text(String),
    Color(Color),
    Points(Vec<(f64, f64)>),
    List(Vec<Value>),
    /// A handle to a live shape; equal only to the same shape.
    Shape(Shape),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::Text(_) => "string",
            Self::Color(_) => "color",
            Self::Points(_) => "points",
            Self::List(_) => "list",
            Self::Shape(_) => "shape",
        }
    }

    pub fn as_number(&self, name: &str) -> Result<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Ok(*n),
            other => Err(expected(name, "a number", other)),
        }
    }

    pub fn as_bool(&self, name: &str) -> Result<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            other => Err(expected(name, "True or False", other)),
        }
    }

    pub fn as_text(&self, name: &str) -> Result<String> {
        match self {
            Self::Text(s) => Ok(s.clone()),
            other => Err(expected(name, "a string", other)),
        }
    }

    /// Accepts a color, a color name, or `None` (no fill).
    pub fn as_fill(&self, name: &str) -> Result<Option<Color>> {
        match self {
            Self::None => Ok(None),
            Self::Color(color) => Ok(Some(*color)),
            Self::Text(text) => Color::named(text).map(Some).ok_or_else(|| {
                Error::usage(format!("{} got an unknown color {:?}", name, text))
            }),
            other => Err(expected(name, "a color", other)),
        }
    }

    pub fn as_shape(&self, name: &str) -> Result<Shape> {
        match self {
            Self::Shape(shape) => Ok(shape.clone()),
            other => Err(expected(name, "a shape", other)),
        }
    }

    pub fn as_points(&self, name: &str) -> Result<Vec<(f64, f64)>> {
        match self {
            Self::Points(points) => Ok(points.clone()),
            other => Err(expected(name, "a list of points", other)),
        }
    }
}

fn expected(name: &str, what: &str, got: &Value) -> Error {
    Error::usage(format!(
        "{} must be {}, got {} ({:?})",
        name,
        what,
        got.type_name(),
        got
    ))
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(value as f64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Color> for Value {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

impl From<Option<Color>> for Value {
    fn from(value: Option<Color>) -> Self {
        value.map_or(Self::None, Self::Color)
    }
}

impl From<Vec<(f64, f64)>> for Value {
    fn from(value: Vec<(f64, f64)>) -> Self {
        Self::Points(value)
    }
}

impl From<Shape> for Value {
    fn from(value: Shape) -> Self {
        Self::Shape(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}
