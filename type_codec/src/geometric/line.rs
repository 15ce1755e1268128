use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::context::{Arg, ParseContext};
use crate::issue::{ArgKind, Issue, SizeKind};
use crate::object::expect_keys;
use crate::traits::{value_object, PgCodec};

use super::parser;
use super::{coord, coord_arg, coord_field, point_arg, same, serialize_coord, Point};

/// `line`: the infinite line `ax + by + c = 0`, rendered `{a,b,c}`
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Line {
    #[serde(serialize_with = "serialize_coord")]
    a: f64,
    #[serde(serialize_with = "serialize_coord")]
    b: f64,
    #[serde(serialize_with = "serialize_coord")]
    c: f64,
}

impl Line {
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self, Issue> {
        if a == 0.0 && b == 0.0 {
            return Err(Issue::invalid_string(
                "line with a and b not both zero",
                format!("{{{},{},{}}}", coord(a), coord(b), coord(c)),
            ));
        }
        Ok(Self { a, b, c })
    }

    /// Line through two distinct points
    pub fn through(p: Point, q: Point) -> Result<Self, Issue> {
        if p == q {
            return Err(Issue::invalid_string("two distinct points", format!("{},{}", p, q)));
        }
        if p.x() == q.x() {
            return Line::new(-1.0, 0.0, p.x());
        }
        if p.y() == q.y() {
            return Line::new(0.0, -1.0, p.y());
        }
        let a = (q.y() - p.y()) / (q.x() - p.x());
        Line::new(a, -1.0, p.y() - a * p.x())
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn c(&self) -> f64 {
        self.c
    }

    pub fn is_vertical(&self) -> bool {
        self.b == 0.0
    }

    pub fn is_horizontal(&self) -> bool {
        self.a == 0.0
    }

    fn parse_text(text: &str) -> Result<Self, Issue> {
        if let Ok((a, b, c)) = parser::run(parser::line_coefficients, text, "line") {
            return Line::new(a, b, c);
        }
        match parser::run(parser::enclosed_points, text, "line such as {a,b,c} or [(x1,y1),(x2,y2)]")? {
            (_, points) if points.len() == 2 => {
                Line::through(points[0].into(), points[1].into())
            }
            _ => Err(Issue::invalid_string("line such as {a,b,c} or [(x1,y1),(x2,y2)]", text)),
        }
    }
}

impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        same(self.a, other.a) && same(self.b, other.b) && same(self.c, other.c)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{},{},{}}}", coord(self.a), coord(self.b), coord(self.c))
    }
}

impl PgCodec for Line {
    const TYPE_NAME: &'static str = "Line";
    const ACCEPTS: &'static [ArgKind] = &[ArgKind::String, ArgKind::Object, ArgKind::Instance];
    const POSITIONAL: Option<(usize, usize)> = Some((2, 3));

    fn from_text(_ctx: &mut ParseContext<'_, Self>, text: &str) -> Result<Self, Issue> {
        Line::parse_text(text)
    }

    fn from_object(ctx: &mut ParseContext<'_, Self>, object: &Map<String, Value>) -> Result<Self, Issue> {
        let fields = expect_keys(ctx, object, &["a", "b", "c"], &[])?;
        Line::new(
            coord_field(&fields, "a")?,
            coord_field(&fields, "b")?,
            coord_field(&fields, "c")?,
        )
    }

    fn from_arguments(_ctx: &mut ParseContext<'_, Self>, args: &[Arg<Self>]) -> Result<Self, Issue> {
        match args {
            [p, q] => Line::through(point_arg(p)?, point_arg(q)?),
            [a, b, c] => Line::new(coord_arg(a)?, coord_arg(b)?, coord_arg(c)?),
            _ => Err(Issue::too_big(SizeKind::Arguments, None, 3usize, true, args.len())),
        }
    }
}

value_object!(Line);
