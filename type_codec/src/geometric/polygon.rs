use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::context::ParseContext;
use crate::issue::{ArgKind, Issue, SizeKind};
use crate::object::expect_keys;
use crate::traits::{value_object, PgCodec};

use super::parser::{self, Enclosure};
use super::path::points_from;
use super::{join_points, PgBox, Point};

/// `polygon`: a closed ring of at least one point, rendered `((x,y),...)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Result<Self, Issue> {
        if points.is_empty() {
            return Err(Issue::too_small(SizeKind::Length, Some("points"), 1usize, true, 0usize));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest box containing every vertex
    pub fn bounding_box(&self) -> PgBox {
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in &self.points {
            min_x = min_x.min(p.x());
            min_y = min_y.min(p.y());
            max_x = max_x.max(p.x());
            max_y = max_y.max(p.y());
        }
        PgBox::new(max_x, max_y, min_x, min_y)
    }

    /// Shoelace area
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        let twice: f64 = (0..n)
            .map(|i| {
                let (a, b) = (&self.points[i], &self.points[(i + 1) % n]);
                a.x() * b.y() - b.x() * a.y()
            })
            .sum();
        twice.abs() / 2.0
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", join_points(&self.points))
    }
}

impl PgCodec for Polygon {
    const TYPE_NAME: &'static str = "Polygon";
    const ACCEPTS: &'static [ArgKind] = &[ArgKind::String, ArgKind::Object, ArgKind::Array, ArgKind::Instance];

    fn from_text(_ctx: &mut ParseContext<'_, Self>, text: &str) -> Result<Self, Issue> {
        let expected = "polygon such as ((x1,y1),...)";
        match parser::run(parser::enclosed_points, text, expected)? {
            (Enclosure::Brackets, _) => Err(Issue::invalid_string(expected, text)),
            (_, coords) => Polygon::new(coords.into_iter().map(Point::from).collect()),
        }
    }

    fn from_object(ctx: &mut ParseContext<'_, Self>, object: &Map<String, Value>) -> Result<Self, Issue> {
        let fields = expect_keys(ctx, object, &["points"], &[])?;
        Polygon::new(points_from(fields.array("points")?)?)
    }

    fn from_array(_ctx: &mut ParseContext<'_, Self>, items: &[Value]) -> Result<Self, Issue> {
        Polygon::new(points_from(items)?)
    }
}

value_object!(Polygon);
