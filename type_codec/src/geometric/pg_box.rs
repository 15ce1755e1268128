use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::context::{Arg, ParseContext};
use crate::issue::{ArgKind, Issue, SizeKind};
use crate::object::expect_keys;
use crate::traits::{value_object, PgCodec};

use super::parser::{self, Enclosure};
use super::{coord_arg, coord_field, point_arg, point_value, same, serialize_coord, Point};

/// `box`: an axis-aligned rectangle, rendered upper-right corner first
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PgBox {
    #[serde(serialize_with = "serialize_coord")]
    x1: f64,
    #[serde(serialize_with = "serialize_coord")]
    y1: f64,
    #[serde(serialize_with = "serialize_coord")]
    x2: f64,
    #[serde(serialize_with = "serialize_coord")]
    y2: f64,
}

impl PgBox {
    /// Box with any two opposite corners; `(x1,y1)` becomes the upper right
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let (x1, x2) = if x2 > x1 { (x2, x1) } else { (x1, x2) };
        let (y1, y2) = if y2 > y1 { (y2, y1) } else { (y1, y2) };
        Self { x1, y1, x2, y2 }
    }

    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(a.x(), a.y(), b.x(), b.y())
    }

    pub fn upper_right(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn lower_left(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x2
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y2
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }
}

impl PartialEq for PgBox {
    fn eq(&self, other: &Self) -> bool {
        same(self.x1, other.x1) && same(self.y1, other.y1) && same(self.x2, other.x2) && same(self.y2, other.y2)
    }
}

impl fmt::Display for PgBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.upper_right(), self.lower_left())
    }
}

impl PgCodec for PgBox {
    const TYPE_NAME: &'static str = "Box";
    const ACCEPTS: &'static [ArgKind] = &[ArgKind::String, ArgKind::Object, ArgKind::Array, ArgKind::Instance];
    const POSITIONAL: Option<(usize, usize)> = Some((2, 4));

    fn from_text(_ctx: &mut ParseContext<'_, Self>, text: &str) -> Result<Self, Issue> {
        let expected = "box such as (x1,y1),(x2,y2)";
        match parser::run(parser::enclosed_points, text, expected)? {
            (Enclosure::Parens | Enclosure::Bare, points) if points.len() == 2 => {
                Ok(PgBox::from_corners(points[0].into(), points[1].into()))
            }
            _ => Err(Issue::invalid_string(expected, text)),
        }
    }

    fn from_object(ctx: &mut ParseContext<'_, Self>, object: &Map<String, Value>) -> Result<Self, Issue> {
        let fields = expect_keys(ctx, object, &["x1", "y1", "x2", "y2"], &[])?;
        Ok(PgBox::new(
            coord_field(&fields, "x1")?,
            coord_field(&fields, "y1")?,
            coord_field(&fields, "x2")?,
            coord_field(&fields, "y2")?,
        ))
    }

    fn from_array(_ctx: &mut ParseContext<'_, Self>, items: &[Value]) -> Result<Self, Issue> {
        match items {
            [a, b] => Ok(PgBox::from_corners(point_value(a)?, point_value(b)?)),
            _ => Err(Issue::invalid_string("pair of corners", Value::from(items.to_vec()).to_string())),
        }
    }

    fn from_arguments(_ctx: &mut ParseContext<'_, Self>, args: &[Arg<Self>]) -> Result<Self, Issue> {
        match args {
            [a, b] => Ok(PgBox::from_corners(point_arg(a)?, point_arg(b)?)),
            [x1, y1, x2, y2] => Ok(PgBox::new(
                coord_arg(x1)?,
                coord_arg(y1)?,
                coord_arg(x2)?,
                coord_arg(y2)?,
            )),
            _ => Err(Issue::too_small(SizeKind::Arguments, None, 4usize, true, args.len())),
        }
    }
}

value_object!(PgBox);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_corners_are_canonicalised() {
        for input in ["(1,1),(3,4)", "((3,1),(1,4))", "3,4,1,1", "(1,4),(3,1)"] {
            assert_eq!(PgBox::expect_from(input).to_string(), "(3,4),(1,1)", "{}", input);
        }
        assert_eq!(PgBox::safe_from("[(1,1),(3,4)]").unwrap_err().code(), "invalid_string");
        assert_eq!(PgBox::safe_from("(1,1)").unwrap_err().code(), "invalid_string");
    }

    #[test]
    fn test_measurements() {
        let value = PgBox::expect_from("(1,1),(3,4)");
        assert_eq!(value.area(), 6.0);
        assert_eq!(value.center(), Point::new(2.0, 2.5));
        assert_eq!(value.upper_right(), Point::new(3.0, 4.0));
    }

    #[test]
    fn test_object_and_positional() {
        let value = PgBox::expect_from(json!({ "x1": 1, "y1": 1, "x2": 3, "y2": 4 }));
        assert_eq!(value.to_json(), json!({ "x1": 3.0, "y1": 4.0, "x2": 1.0, "y2": 1.0 }));
        assert_eq!(PgBox::expect_from((1, 4, 3, 1)), value);
        assert_eq!(PgBox::expect_from(("(1,1)", "(3,4)")), value);
        assert_eq!(PgBox::safe_from((1, 2, 3)).unwrap_err().code(), "too_small");
        assert!(value.equals("(3,4),(1,1)"));
    }
}
