//! Line-oriented text format for scenes.
//!
//! ```text
//! SQUARE    <x> <y> <side>           <COLOR> <selected>
//! RECTANGLE <x> <y> <width> <height> <COLOR> <selected>
//! CIRCLE    <x> <y> <diameter>       <COLOR> <selected>
//! ```
//!
//! Tokens are whitespace separated. The writer emits one record per line with single spaces.
//! The reader only cares about token order, so blank lines and extra spacing are accepted.

use crate::geometry::{Point, checked_span, checked_spread};
use crate::scene::Scene;
use crate::shapes::{Color, Shape, ShapeKind};
use std::str::FromStr;
use thiserror::Error;

/// What is wrong with a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordFault {
    #[error("unrecognized record kind `{0}`")]
    UnknownKind(String),
    #[error("field `{field}` is not an integer: `{token}`")]
    BadInteger { field: &'static str, token: String },
    #[error("unsupported color `{0}`")]
    BadColor(String),
    #[error("selection flag must be `true` or `false`, got `{0}`")]
    BadBoolean(String),
    #[error("record ends before field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` puts the shape outside the coordinate range: `{token}`")]
    OutOfRange { field: &'static str, token: String },
}

/// Scene file parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Malformed record on line {line}: {fault}")]
    MalformedRecord { line: usize, fault: RecordFault },
}

/// Reads typed fields off the token stream, tracking the line of the last token.
struct RecordReader<'a> {
    tokens: Box<dyn Iterator<Item = (usize, &'a str)> + 'a>,
    line: usize,
}

impl<'a> RecordReader<'a> {
    fn new(text: &'a str) -> Self {
        let tokens = text
            .lines()
            .enumerate()
            .flat_map(|(i, line)| line.split_whitespace().map(move |t| (i + 1, t)));
        Self {
            tokens: Box::new(tokens),
            line: 1,
        }
    }

    fn malformed(&self, fault: RecordFault) -> CodecError {
        CodecError::MalformedRecord {
            line: self.line,
            fault,
        }
    }

    /// Next token, or `None` at end of input.
    fn next_token(&mut self) -> Option<&'a str> {
        let (line, token) = self.tokens.next()?;
        self.line = line;
        Some(token)
    }

    fn field(&mut self, field: &'static str) -> Result<&'a str, CodecError> {
        self.next_token()
            .ok_or_else(|| self.malformed(RecordFault::MissingField(field)))
    }

    fn parse_int(&self, field: &'static str, token: &str) -> Result<i32, CodecError> {
        token.parse().map_err(|_| {
            self.malformed(RecordFault::BadInteger {
                field,
                token: token.to_string(),
            })
        })
    }

    fn int(&mut self, field: &'static str) -> Result<i32, CodecError> {
        let token = self.field(field)?;
        self.parse_int(field, token)
    }

    /// Read a size field, rejecting values whose box edges would overflow `i32`.
    fn size(
        &mut self,
        field: &'static str,
        fits: impl Fn(i32) -> bool,
    ) -> Result<i32, CodecError> {
        let token = self.field(field)?;
        let value = self.parse_int(field, token)?;
        if fits(value) {
            Ok(value)
        } else {
            Err(self.malformed(RecordFault::OutOfRange {
                field,
                token: token.to_string(),
            }))
        }
    }

    fn color(&mut self) -> Result<Color, CodecError> {
        let token = self.field("color")?;
        token
            .parse()
            .map_err(|_| self.malformed(RecordFault::BadColor(token.to_string())))
    }

    fn flag(&mut self) -> Result<bool, CodecError> {
        match self.field("selected")? {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(self.malformed(RecordFault::BadBoolean(other.to_string()))),
        }
    }

    /// Read the record body for a given kind.
    fn shape(&mut self, kind: ShapeKind) -> Result<Shape, CodecError> {
        let (x, y) = (self.int("x")?, self.int("y")?);
        let anchor = Point::new(x, y);
        let mut shape = match kind {
            ShapeKind::Square => {
                let side = self.size("side", |side| {
                    checked_span(x, side).and(checked_span(y, side)).is_some()
                })?;
                Shape::square(self.color()?, anchor, side)
            }
            ShapeKind::Circle => {
                let diameter = self.size("diameter", |diameter| {
                    let radius = diameter / 2;
                    checked_spread(x, radius)
                        .and(checked_spread(y, radius))
                        .is_some()
                })?;
                Shape::circle(self.color()?, anchor, diameter)
            }
            ShapeKind::Rectangle => {
                let width = self.size("width", |width| checked_span(x, width).is_some())?;
                let height = self.size("height", |height| checked_span(y, height).is_some())?;
                Shape::rectangle(self.color()?, anchor, width, height)
            }
        };
        shape.set_selected(self.flag()?);
        Ok(shape)
    }
}

/// Parse scene text into shapes, in file order.
///
/// Nothing is returned unless every record parses.
pub fn parse_shapes(text: &str) -> Result<Vec<Shape>, CodecError> {
    let mut reader = RecordReader::new(text);
    let mut shapes = Vec::new();

    while let Some(keyword) = reader.next_token() {
        let kind = ShapeKind::from_keyword(keyword)
            .ok_or_else(|| reader.malformed(RecordFault::UnknownKind(keyword.to_string())))?;
        shapes.push(reader.shape(kind)?);
    }
    Ok(shapes)
}

/// Serialize a scene: one record per line in z-order.
pub fn serialize(scene: &Scene) -> String {
    scene.to_string()
}

impl FromStr for Scene {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_shapes(s).map(Scene::from_shapes)
    }
}
