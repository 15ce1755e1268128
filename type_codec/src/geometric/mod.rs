//! Geometric codecs
//!
//! Every shape is built from [`Point`] coordinates. Coordinates are `f64`
//! with the server's float semantics: `NaN` compares equal to itself and
//! non-finite values render as `NaN` / `Infinity`.

mod circle;
mod line;
mod line_segment;
mod parser;
mod path;
mod pg_box;
mod point;
mod polygon;

pub use circle::Circle;
pub use line::Line;
pub use line_segment::LineSegment;
pub use path::{Path, PathConnection};
pub use pg_box::PgBox;
pub use point::Point;
pub use polygon::Polygon;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::context::{Arg, Args};
use crate::issue::{ArgKind, Issue};
use crate::object::Fields;
use crate::scalar::Float8;
use crate::traits::PgCodec;

/// Coordinate equality where `NaN == NaN`
pub(crate) fn same(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

pub(crate) fn coord(value: f64) -> String {
    Float8::new(value).to_string()
}

pub(crate) fn serialize_coord<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    Float8::new(*value).serialize(serializer)
}

fn coord_text(text: &str) -> Result<f64, Issue> {
    parser::run(parser::number, text, "coordinate")
}

/// Numeric object field; non-finite values arrive as strings
pub(crate) fn coord_field(fields: &Fields<'_>, key: &str) -> Result<f64, Issue> {
    match fields.one_of(key, &[ArgKind::Number, ArgKind::String])? {
        Value::String(s) => coord_text(s),
        other => Ok(other.as_f64().unwrap_or(f64::NAN)),
    }
}

/// Numeric positional argument
pub(crate) fn coord_arg<T>(arg: &Arg<T>) -> Result<f64, Issue> {
    match arg {
        Arg::Int(v) => Ok(*v as f64),
        Arg::Float(v) => Ok(*v),
        Arg::Text(s) => coord_text(s),
        other => Err(Issue::InvalidType {
            expected: vec![ArgKind::Number, ArgKind::String],
            received: other.kind(),
        }),
    }
}

/// A point given as any input the `Point` codec accepts
pub(crate) fn point_arg<T>(arg: &Arg<T>) -> Result<Point, Issue> {
    match arg.cast::<Point>() {
        Some(arg) => Point::safe_from(Args::one(arg)).map_err(|err| err.issue),
        None => Err(Issue::InvalidType {
            expected: Point::ACCEPTS.to_vec(),
            received: ArgKind::Instance,
        }),
    }
}

pub(crate) fn point_value(value: &Value) -> Result<Point, Issue> {
    Point::safe_from(value).map_err(|err| err.issue)
}

/// Render `(x,y),(x,y),...`
pub(crate) fn join_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
