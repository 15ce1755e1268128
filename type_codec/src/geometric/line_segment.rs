use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::context::{Arg, ParseContext};
use crate::issue::{ArgKind, Issue};
use crate::object::expect_keys;
use crate::traits::{value_object, PgCodec};

use super::parser;
use super::{point_arg, point_value, Point};

/// `lseg`: the finite segment between two points, rendered `[(x1,y1),(x2,y2)]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineSegment {
    a: Point,
    b: Point,
}

impl LineSegment {
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    pub fn a(&self) -> Point {
        self.a
    }

    pub fn b(&self) -> Point {
        self.b
    }

    pub fn length(&self) -> f64 {
        self.a.distance(&self.b)
    }

    pub fn midpoint(&self) -> Point {
        Point::new((self.a.x() + self.b.x()) / 2.0, (self.a.y() + self.b.y()) / 2.0)
    }
}

impl fmt::Display for LineSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.a, self.b)
    }
}

impl PgCodec for LineSegment {
    const TYPE_NAME: &'static str = "LineSegment";
    const ACCEPTS: &'static [ArgKind] = &[ArgKind::String, ArgKind::Object, ArgKind::Array, ArgKind::Instance];
    const POSITIONAL: Option<(usize, usize)> = Some((2, 2));

    fn from_text(_ctx: &mut ParseContext<'_, Self>, text: &str) -> Result<Self, Issue> {
        let expected = "line segment such as [(x1,y1),(x2,y2)]";
        match parser::run(parser::enclosed_points, text, expected)? {
            (_, points) if points.len() == 2 => Ok(LineSegment::new(points[0].into(), points[1].into())),
            _ => Err(Issue::invalid_string(expected, text)),
        }
    }

    fn from_object(ctx: &mut ParseContext<'_, Self>, object: &Map<String, Value>) -> Result<Self, Issue> {
        let fields = expect_keys(ctx, object, &["a", "b"], &[])?;
        let kinds = [ArgKind::Object, ArgKind::String, ArgKind::Array];
        Ok(LineSegment::new(
            point_value(fields.one_of("a", &kinds)?)?,
            point_value(fields.one_of("b", &kinds)?)?,
        ))
    }

    fn from_array(_ctx: &mut ParseContext<'_, Self>, items: &[Value]) -> Result<Self, Issue> {
        match items {
            [a, b] => Ok(LineSegment::new(point_value(a)?, point_value(b)?)),
            _ => Err(Issue::invalid_string("pair of points", Value::from(items.to_vec()).to_string())),
        }
    }

    fn from_arguments(_ctx: &mut ParseContext<'_, Self>, args: &[Arg<Self>]) -> Result<Self, Issue> {
        Ok(LineSegment::new(point_arg(&args[0])?, point_arg(&args[1])?))
    }
}

value_object!(LineSegment);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_text_forms() {
        for input in ["[(1,2),(3,4)]", "((1,2),(3,4))", "(1,2),(3,4)", "1,2,3,4"] {
            assert_eq!(LineSegment::expect_from(input).to_string(), "[(1,2),(3,4)]", "{}", input);
        }
        assert_eq!(LineSegment::safe_from("[(1,2)]").unwrap_err().code(), "invalid_string");
    }

    #[test]
    fn test_object_and_positional() {
        let value = LineSegment::expect_from(json!({ "a": { "x": 0, "y": 0 }, "b": "(3,4)" }));
        assert_eq!(value.length(), 5.0);
        assert_eq!(value.midpoint(), Point::new(1.5, 2.0));
        assert_eq!(
            value.to_json(),
            json!({ "a": { "x": 0.0, "y": 0.0 }, "b": { "x": 3.0, "y": 4.0 } })
        );
        assert_eq!(LineSegment::expect_from(value.to_json()), value);
        assert_eq!(LineSegment::expect_from(("(0,0)", json!([3, 4]))), value);
    }
}
