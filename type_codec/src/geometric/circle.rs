use serde::Serialize;
use serde_json::{Map, Value};
use std::f64::consts::PI;
use std::fmt;

use crate::context::{Arg, ParseContext};
use crate::issue::{ArgKind, Issue, SizeKind};
use crate::object::expect_keys;
use crate::traits::{value_object, PgCodec};

use super::parser;
use super::{coord, coord_arg, coord_field, point_arg, same, serialize_coord, Point};

/// `circle`: `<(x,y),r>` with a non-negative radius
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Circle {
    #[serde(serialize_with = "serialize_coord")]
    x: f64,
    #[serde(serialize_with = "serialize_coord")]
    y: f64,
    #[serde(serialize_with = "serialize_coord")]
    radius: f64,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Result<Self, Issue> {
        if radius < 0.0 {
            return Err(Issue::too_small(SizeKind::Number, Some("radius"), 0i64, true, radius));
        }
        Ok(Self {
            x: center.x(),
            y: center.y(),
            radius,
        })
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.center().distance(point) <= self.radius
    }
}

impl PartialEq for Circle {
    fn eq(&self, other: &Self) -> bool {
        same(self.x, other.x) && same(self.y, other.y) && same(self.radius, other.radius)
    }
}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{},{}>", self.center(), coord(self.radius))
    }
}

impl PgCodec for Circle {
    const TYPE_NAME: &'static str = "Circle";
    const ACCEPTS: &'static [ArgKind] = &[ArgKind::String, ArgKind::Object, ArgKind::Instance];
    const POSITIONAL: Option<(usize, usize)> = Some((2, 3));

    fn from_text(_ctx: &mut ParseContext<'_, Self>, text: &str) -> Result<Self, Issue> {
        let (center, radius) = parser::run(parser::circle, text, "circle such as <(x,y),r>")?;
        Circle::new(center.into(), radius)
    }

    fn from_object(ctx: &mut ParseContext<'_, Self>, object: &Map<String, Value>) -> Result<Self, Issue> {
        let fields = expect_keys(ctx, object, &["x", "y", "radius"], &[])?;
        Circle::new(
            Point::new(coord_field(&fields, "x")?, coord_field(&fields, "y")?),
            coord_field(&fields, "radius")?,
        )
    }

    fn from_arguments(_ctx: &mut ParseContext<'_, Self>, args: &[Arg<Self>]) -> Result<Self, Issue> {
        match args {
            [center, radius] => Circle::new(point_arg(center)?, coord_arg(radius)?),
            [x, y, radius] => Circle::new(Point::new(coord_arg(x)?, coord_arg(y)?), coord_arg(radius)?),
            _ => Err(Issue::too_big(SizeKind::Arguments, None, 3usize, true, args.len())),
        }
    }
}

value_object!(Circle);
