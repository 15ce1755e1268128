use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::context::ParseContext;
use crate::issue::{ArgKind, Issue, SizeKind};
use crate::object::expect_keys;
use crate::traits::{value_object, PgCodec};

use super::parser::{self, Enclosure};
use super::{join_points, point_value, Point};

/// Whether a path's last point joins back to its first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathConnection {
    Open,
    #[default]
    Closed,
}

impl PathConnection {
    fn parse(text: &str) -> Result<Self, Issue> {
        match text.to_ascii_lowercase().as_str() {
            "open" => Ok(PathConnection::Open),
            "closed" => Ok(PathConnection::Closed),
            _ => Err(Issue::invalid_string("'open' | 'closed'", text)),
        }
    }
}

/// Points of a list input; at least one is required
pub(crate) fn points_from(items: &[Value]) -> Result<Vec<Point>, Issue> {
    if items.is_empty() {
        return Err(Issue::too_small(SizeKind::Length, Some("points"), 1usize, true, 0usize));
    }
    items.iter().map(point_value).collect()
}

/// `path`: open `[(x,y),...]` or closed `((x,y),...)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    points: Vec<Point>,
    connection: PathConnection,
}

impl Path {
    pub fn new(points: Vec<Point>, connection: PathConnection) -> Result<Self, Issue> {
        if points.is_empty() {
            return Err(Issue::too_small(SizeKind::Length, Some("points"), 1usize, true, 0usize));
        }
        Ok(Self { points, connection })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn connection(&self) -> PathConnection {
        self.connection
    }

    pub fn is_closed(&self) -> bool {
        self.connection == PathConnection::Closed
    }

    pub fn is_open(&self) -> bool {
        self.connection == PathConnection::Open
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Same points, joined back to the start
    pub fn close(&self) -> Self {
        Self {
            points: self.points.clone(),
            connection: PathConnection::Closed,
        }
    }

    pub fn open(&self) -> Self {
        Self {
            points: self.points.clone(),
            connection: PathConnection::Open,
        }
    }

    /// Total segment length, including the closing segment of a closed path
    pub fn length(&self) -> f64 {
        let mut total: f64 = self.points.windows(2).map(|w| w[0].distance(&w[1])).sum();
        if let (true, Some(first), Some(last)) = (self.is_closed(), self.points.first(), self.points.last()) {
            total += last.distance(first);
        }
        total
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.connection {
            PathConnection::Open => write!(f, "[{}]", join_points(&self.points)),
            PathConnection::Closed => write!(f, "({})", join_points(&self.points)),
        }
    }
}

impl PgCodec for Path {
    const TYPE_NAME: &'static str = "Path";
    const ACCEPTS: &'static [ArgKind] = &[ArgKind::String, ArgKind::Object, ArgKind::Array, ArgKind::Instance];

    fn from_text(_ctx: &mut ParseContext<'_, Self>, text: &str) -> Result<Self, Issue> {
        let (enclosure, coords) = parser::run(parser::enclosed_points, text, "path such as [(x1,y1),...]")?;
        let connection = match enclosure {
            Enclosure::Brackets => PathConnection::Open,
            Enclosure::Parens | Enclosure::Bare => PathConnection::Closed,
        };
        Path::new(coords.into_iter().map(Point::from).collect(), connection)
    }

    fn from_object(ctx: &mut ParseContext<'_, Self>, object: &Map<String, Value>) -> Result<Self, Issue> {
        let fields = expect_keys(ctx, object, &["points"], &["connection"])?;
        let connection = match fields.get("connection") {
            None | Some(Value::Null) => PathConnection::default(),
            Some(_) => PathConnection::parse(fields.string("connection")?)?,
        };
        Path::new(points_from(fields.array("points")?)?, connection)
    }

    fn from_array(_ctx: &mut ParseContext<'_, Self>, items: &[Value]) -> Result<Self, Issue> {
        Path::new(points_from(items)?, PathConnection::Open)
    }
}

value_object!(Path);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_open_and_closed_text() {
        let open = Path::expect_from("[(1,2),(3,4),(5,6)]");
        assert!(open.is_open());
        assert_eq!(open.to_string(), "[(1,2),(3,4),(5,6)]");

        let closed = Path::expect_from("((1,2),(3,4))");
        assert!(closed.is_closed());
        assert_eq!(closed.to_string(), "((1,2),(3,4))");

        assert_eq!(Path::expect_from("1,2,3,4").to_string(), "((1,2),(3,4))");
        assert_eq!(Path::expect_from("(1,2)").len(), 1);
        assert_eq!(Path::safe_from("[]").unwrap_err().code(), "invalid_string");
    }

    #[test]
    fn test_open_close_and_length() {
        let open = Path::expect_from("[(0,0),(3,4),(3,0)]");
        assert_eq!(open.length(), 9.0);
        let closed = open.close();
        assert_eq!(closed.to_string(), "((0,0),(3,4),(3,0))");
        assert_eq!(closed.length(), 12.0);
        assert_eq!(closed.open(), open);
        assert_ne!(closed, open);
    }

    #[test]
    fn test_object_and_array_input() {
        let value = Path::expect_from(json!({ "points": ["(1,2)", { "x": 3, "y": 4 }], "connection": "open" }));
        assert_eq!(value.to_string(), "[(1,2),(3,4)]");
        assert_eq!(
            value.to_json(),
            json!({ "points": [{ "x": 1.0, "y": 2.0 }, { "x": 3.0, "y": 4.0 }], "connection": "open" })
        );
        assert_eq!(Path::expect_from(value.to_json()), value);
        assert!(Path::expect_from(json!({ "points": ["(1,2)"] })).is_closed());
        assert_eq!(Path::expect_from(json!(["(1,2)", "(3,4)"])), value);

        let err = Path::safe_from(json!({ "points": [] })).unwrap_err();
        assert_eq!(err.code(), "too_small");
        let err = Path::safe_from(json!({ "points": ["(1,2)"], "connection": "loop" })).unwrap_err();
        assert_eq!(err.code(), "invalid_string");
    }
}
