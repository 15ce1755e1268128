use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::context::{Arg, ParseContext};
use crate::issue::{ArgKind, Issue};
use crate::object::expect_keys;
use crate::traits::{value_object, PgCodec};

use super::parser::{self, Coords};
use super::{coord, coord_arg, coord_field, same, serialize_coord};

/// `point`: `(x,y)`
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Point {
    #[serde(serialize_with = "serialize_coord")]
    x: f64,
    #[serde(serialize_with = "serialize_coord")]
    y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<Coords> for Point {
    fn from((x, y): Coords) -> Self {
        Self { x, y }
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        same(self.x, other.x) && same(self.y, other.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", coord(self.x), coord(self.y))
    }
}

impl PgCodec for Point {
    const TYPE_NAME: &'static str = "Point";
    const ACCEPTS: &'static [ArgKind] = &[ArgKind::String, ArgKind::Object, ArgKind::Array, ArgKind::Instance];
    const POSITIONAL: Option<(usize, usize)> = Some((2, 2));

    fn from_text(_ctx: &mut ParseContext<'_, Self>, text: &str) -> Result<Self, Issue> {
        parser::run(parser::point, text, "point such as (x,y)").map(Point::from)
    }

    fn from_object(ctx: &mut ParseContext<'_, Self>, object: &Map<String, Value>) -> Result<Self, Issue> {
        let fields = expect_keys(ctx, object, &["x", "y"], &[])?;
        Ok(Point::new(coord_field(&fields, "x")?, coord_field(&fields, "y")?))
    }

    fn from_array(_ctx: &mut ParseContext<'_, Self>, items: &[Value]) -> Result<Self, Issue> {
        match items {
            [x, y] => Ok(Point::new(
                coord_arg::<Point>(&Arg::from(x))?,
                coord_arg::<Point>(&Arg::from(y))?,
            )),
            _ => Err(Issue::invalid_string("[x, y] pair", Value::from(items.to_vec()).to_string())),
        }
    }

    fn from_arguments(_ctx: &mut ParseContext<'_, Self>, args: &[Arg<Self>]) -> Result<Self, Issue> {
        Ok(Point::new(coord_arg(&args[0])?, coord_arg(&args[1])?))
    }
}

value_object!(Point);
