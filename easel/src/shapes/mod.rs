//! Retained-mode shapes drawn by the render pipeline.
//!
//! A [`Shape`] is a cheap, cloneable handle. Cloning it does not copy the
//! shape; both handles refer to the same node, and a change made through one
//! is visible through the other. Shapes start detached and are drawn once they
//! belong to the application's top-level group (directly or through nested
//! groups).

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::core::error::{Error, Result};

mod attributes;
pub mod color;
pub(crate) mod draw;
pub mod value;

pub use color::{Color, rgb};
pub use value::Value;

pub const DEFAULT_BORDER_WIDTH: f64 = 2.0;
pub const DEFAULT_LINE_WIDTH: f64 = 2.0;
pub const DEFAULT_STAR_ROUNDNESS: f64 = 38.0;
pub const DEFAULT_LABEL_SIZE: f64 = 12.0;
/// Upper bound on `points` for regular polygons and stars.
pub const MAX_POINTS: u32 = 1000;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ShapeKind {
    Rect,
    Oval,
    Circle,
    Line,
    Polygon,
    RegularPolygon,
    Star,
    Arc,
    Label,
    Group,
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rect => "Rect",
            Self::Oval => "Oval",
            Self::Circle => "Circle",
            Self::Line => "Line",
            Self::Polygon => "Polygon",
            Self::RegularPolygon => "RegularPolygon",
            Self::Star => "Star",
            Self::Arc => "Arc",
            Self::Label => "Label",
            Self::Group => "Group",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Axis-aligned bounding box in window coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    pub fn center_y(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut points = points.into_iter();
        let Some((x, y)) = points.next() else {
            return Self::default();
        };
        points.fold(
            Self {
                left: x,
                top: y,
                right: x,
                bottom: y,
            },
            |b, (x, y)| Self {
                left: b.left.min(x),
                top: b.top.min(y),
                right: b.right.max(x),
                bottom: b.bottom.max(y),
            },
        )
    }

    fn union(self, other: Self) -> Self {
        Self {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) enum Geometry {
    Rect {
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    },
    Oval {
        center_x: f64,
        center_y: f64,
        width: f64,
        height: f64,
    },
    Circle {
        center_x: f64,
        center_y: f64,
        radius: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        line_width: f64,
    },
    Polygon {
        points: Vec<(f64, f64)>,
    },
    RegularPolygon {
        center_x: f64,
        center_y: f64,
        radius: f64,
        points: u32,
    },
    Star {
        center_x: f64,
        center_y: f64,
        radius: f64,
        points: u32,
        roundness: f64,
    },
    /// A pie slice of an ellipse. Angles are degrees clockwise from
    /// straight up.
    Arc {
        center_x: f64,
        center_y: f64,
        width: f64,
        height: f64,
        start_angle: f64,
        sweep_angle: f64,
    },
    /// One line of bitmap text; `size` is the glyph cell in pixels.
    Label {
        value: String,
        center_x: f64,
        center_y: f64,
        size: f64,
    },
    Group {
        children: Vec<Shape>,
    },
}

impl Geometry {
    fn kind(&self) -> ShapeKind {
        match self {
            Self::Rect { .. } => ShapeKind::Rect,
            Self::Oval { .. } => ShapeKind::Oval,
            Self::Circle { .. } => ShapeKind::Circle,
            Self::Line { .. } => ShapeKind::Line,
            Self::Polygon { .. } => ShapeKind::Polygon,
            Self::RegularPolygon { .. } => ShapeKind::RegularPolygon,
            Self::Star { .. } => ShapeKind::Star,
            Self::Arc { .. } => ShapeKind::Arc,
            Self::Label { .. } => ShapeKind::Label,
            Self::Group { .. } => ShapeKind::Group,
        }
    }

    fn bounds(&self) -> Bounds {
        match self {
            Self::Rect {
                left,
                top,
                width,
                height,
            } => Bounds {
                left: *left,
                top: *top,
                right: left + width,
                bottom: top + height,
            },
            Self::Oval {
                center_x,
                center_y,
                width,
                height,
            }
            | Self::Arc {
                center_x,
                center_y,
                width,
                height,
                ..
            } => Bounds {
                left: center_x - width / 2.0,
                top: center_y - height / 2.0,
                right: center_x + width / 2.0,
                bottom: center_y + height / 2.0,
            },
            Self::Circle {
                center_x,
                center_y,
                radius,
            }
            | Self::RegularPolygon {
                center_x,
                center_y,
                radius,
                ..
            }
            | Self::Star {
                center_x,
                center_y,
                radius,
                ..
            } => Bounds {
                left: center_x - radius,
                top: center_y - radius,
                right: center_x + radius,
                bottom: center_y + radius,
            },
            Self::Line { x1, y1, x2, y2, .. } => {
                Bounds::from_points([(*x1, *y1), (*x2, *y2)])
            }
            Self::Polygon { points } => {
                Bounds::from_points(points.iter().copied())
            }
            Self::Label {
                value,
                center_x,
                center_y,
                size,
            } => {
                let width = value.chars().count() as f64 * size;
                Bounds {
                    left: center_x - width / 2.0,
                    top: center_y - size / 2.0,
                    right: center_x + width / 2.0,
                    bottom: center_y + size / 2.0,
                }
            }
            Self::Group { children } => children
                .iter()
                .map(Shape::bounds)
                .reduce(Bounds::union)
                .unwrap_or_default(),
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Self::Rect { left, top, .. } => {
                *left += dx;
                *top += dy;
            }
            Self::Oval {
                center_x, center_y, ..
            }
            | Self::Circle {
                center_x, center_y, ..
            }
            | Self::RegularPolygon {
                center_x, center_y, ..
            }
            | Self::Star {
                center_x, center_y, ..
            }
            | Self::Arc {
                center_x, center_y, ..
            }
            | Self::Label {
                center_x, center_y, ..
            } => {
                *center_x += dx;
                *center_y += dy;
            }
            Self::Line { x1, y1, x2, y2, .. } => {
                *x1 += dx;
                *y1 += dy;
                *x2 += dx;
                *y2 += dy;
            }
            Self::Polygon { points } => {
                for (x, y) in points {
                    *x += dx;
                    *y += dy;
                }
            }
            Self::Group { children } => {
                for child in children {
                    child.translate(dx, dy);
                }
            }
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Style {
    pub fill: Option<Color>,
    pub border: Option<Color>,
    pub border_width: f64,
    /// 0..=100
    pub opacity: f64,
    pub visible: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Some(Color::BLACK),
            border: None,
            border_width: DEFAULT_BORDER_WIDTH,
            opacity: 100.0,
            visible: true,
        }
    }
}

pub(crate) struct ShapeNode {
    pub geometry: Geometry,
    pub style: Style,
    parent: Option<Weak<RefCell<ShapeNode>>>,
}

#[derive(Clone)]
pub struct Shape(Rc<RefCell<ShapeNode>>);

impl Shape {
    fn new(geometry: Geometry) -> Self {
        Self(Rc::new(RefCell::new(ShapeNode {
            geometry,
            style: Style::default(),
            parent: None,
        })))
    }

    pub fn rect(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self::new(Geometry::Rect {
            left,
            top,
            width,
            height,
        })
    }

    pub fn oval(center_x: f64, center_y: f64, width: f64, height: f64) -> Self {
        Self::new(Geometry::Oval {
            center_x,
            center_y,
            width,
            height,
        })
    }

    pub fn circle(center_x: f64, center_y: f64, radius: f64) -> Self {
        Self::new(Geometry::Circle {
            center_x,
            center_y,
            radius,
        })
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(Geometry::Line {
            x1,
            y1,
            x2,
            y2,
            line_width: DEFAULT_LINE_WIDTH,
        })
    }

    pub fn polygon(points: Vec<(f64, f64)>) -> Self {
        Self::new(Geometry::Polygon { points })
    }

    pub fn regular_polygon(
        center_x: f64,
        center_y: f64,
        radius: f64,
        points: u32,
    ) -> Result<Self> {
        check_point_count(ShapeKind::RegularPolygon, points)?;
        Ok(Self::new(Geometry::RegularPolygon {
            center_x,
            center_y,
            radius,
            points,
        }))
    }

    pub fn star(
        center_x: f64,
        center_y: f64,
        radius: f64,
        points: u32,
    ) -> Result<Self> {
        check_point_count(ShapeKind::Star, points)?;
        Ok(Self::new(Geometry::Star {
            center_x,
            center_y,
            radius,
            points,
            roundness: DEFAULT_STAR_ROUNDNESS,
        }))
    }

    /// Sweeps clockwise from `start_angle`; `sweep_angle` is in `0..=360`.
    pub fn arc(
        center_x: f64,
        center_y: f64,
        width: f64,
        height: f64,
        start_angle: f64,
        sweep_angle: f64,
    ) -> Result<Self> {
        check_sweep(ShapeKind::Arc, sweep_angle)?;
        Ok(Self::new(Geometry::Arc {
            center_x,
            center_y,
            width,
            height,
            start_angle,
            sweep_angle,
        }))
    }

    pub fn label(value: impl Into<String>, center_x: f64, center_y: f64) -> Self {
        Self::new(Geometry::Label {
            value: value.into(),
            center_x,
            center_y,
            size: DEFAULT_LABEL_SIZE,
        })
    }

    /// Creates a group, moving each child out of whatever group held it.
    pub fn group(children: impl IntoIterator<Item = Shape>) -> Self {
        let group = Self::new(Geometry::Group {
            children: Vec::new(),
        });
        for child in children {
            group.attach(&child);
        }
        group
    }

    /// Builder form of [`Shape::set`].
    pub fn with(self, name: &str, value: impl Into<Value>) -> Result<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    pub fn kind(&self) -> ShapeKind {
        self.0.borrow().geometry.kind()
    }

    pub fn is_group(&self) -> bool {
        self.kind() == ShapeKind::Group
    }

    pub fn ptr_eq(&self, other: &Shape) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn bounds(&self) -> Bounds {
        self.0.borrow().geometry.bounds()
    }

    pub fn visible(&self) -> bool {
        self.0.borrow().style.visible
    }

    pub fn translate(&self, dx: f64, dy: f64) {
        self.0.borrow_mut().geometry.translate(dx, dy);
    }

    /// Bounding-box hit test. Hidden shapes contain nothing.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.hit(x, y).is_some()
    }

    /// Returns the top-most visible leaf shape under `(x, y)`.
    pub fn hit(&self, x: f64, y: f64) -> Option<Shape> {
        let node = self.0.borrow();
        if !node.style.visible {
            return None;
        }
        match &node.geometry {
            Geometry::Group { children } => {
                children.iter().rev().find_map(|child| child.hit(x, y))
            }
            geometry => {
                geometry.bounds().contains(x, y).then(|| self.clone())
            }
        }
    }

    /// Number of shapes nested under this one, groups included.
    pub fn descendant_count(&self) -> usize {
        match &self.0.borrow().geometry {
            Geometry::Group { children } => children
                .iter()
                .map(|child| 1 + child.descendant_count())
                .sum(),
            _ => 0,
        }
    }

    pub fn parent(&self) -> Option<Shape> {
        self.0
            .borrow()
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(Shape)
    }

    pub fn children(&self) -> Vec<Shape> {
        match &self.0.borrow().geometry {
            Geometry::Group { children } => children.clone(),
            _ => Vec::new(),
        }
    }

    /// Adds `child` on top of this group's draw order.
    pub fn add(&self, child: &Shape) -> Result<()> {
        self.require_group("add")?;
        if self.ptr_eq(child) || self.has_ancestor(child) {
            return Err(Error::usage(
                "Cannot add a group to itself or to one of its descendants",
            ));
        }
        self.attach(child);
        Ok(())
    }

    /// Returns false when `child` was not a member of this group.
    pub fn remove(&self, child: &Shape) -> bool {
        let removed = match &mut self.0.borrow_mut().geometry {
            Geometry::Group { children } => {
                let before = children.len();
                children.retain(|c| !c.ptr_eq(child));
                children.len() != before
            }
            _ => false,
        };
        if removed {
            child.0.borrow_mut().parent = None;
        }
        removed
    }

    pub fn clear(&self) {
        let removed = match &mut self.0.borrow_mut().geometry {
            Geometry::Group { children } => std::mem::take(children),
            _ => Vec::new(),
        };
        for child in removed {
            child.0.borrow_mut().parent = None;
        }
    }

    fn attach(&self, child: &Shape) {
        if let Some(previous) = child.parent() {
            previous.remove(child);
        }
        child.0.borrow_mut().parent = Some(Rc::downgrade(&self.0));
        if let Geometry::Group { children } = &mut self.0.borrow_mut().geometry
        {
            children.push(child.clone());
        }
    }

    pub(crate) fn has_ancestor(&self, candidate: &Shape) -> bool {
        let mut current = self.parent();
        while let Some(shape) = current {
            if shape.ptr_eq(candidate) {
                return true;
            }
            current = shape.parent();
        }
        false
    }

    fn require_group(&self, operation: &str) -> Result<()> {
        if self.is_group() {
            Ok(())
        } else {
            Err(Error::usage(format!(
                "{}.{} is only available on groups",
                self.kind(),
                operation
            )))
        }
    }

    pub(crate) fn node(&self) -> std::cell::Ref<'_, ShapeNode> {
        self.0.borrow()
    }

    pub(crate) fn node_mut(&self) -> std::cell::RefMut<'_, ShapeNode> {
        self.0.borrow_mut()
    }
}

/// Handles compare by identity, not by attributes.
impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bounds = self.bounds();
        write!(
            f,
            "{}(left={}, top={}, width={}, height={})",
            self.kind(),
            bounds.left,
            bounds.top,
            bounds.width(),
            bounds.height()
        )
    }
}

fn check_point_count(kind: ShapeKind, points: u32) -> Result<()> {
    if (3..=MAX_POINTS).contains(&points) {
        Ok(())
    } else {
        Err(Error::usage(format!(
            "{}.points must be between 3 and {}, got {}",
            kind, MAX_POINTS, points
        )))
    }
}

pub(crate) fn check_sweep(kind: ShapeKind, sweep: f64) -> Result<()> {
    if (0.0..=360.0).contains(&sweep) {
        Ok(())
    } else {
        Err(Error::usage(format!(
            "{}.sweepAngle must be between 0 and 360, got {}",
            kind, sweep
        )))
    }
}
