//! Path building and SVG path-data output

use smallvec::SmallVec;
use std::fmt::Write;

/// A 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f32 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

/// Path command
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
}

/// A 2D path composed of commands
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: SmallVec<[PathCommand; 16]>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Serialize as SVG path data (`M x y C c1x c1y, c2x c2y, x y ...`).
    ///
    /// With `precision` set, every number is written with that many decimals,
    /// otherwise the shortest round-trip representation is used.
    pub fn to_svg_data(&self, precision: Option<usize>) -> String {
        let mut out = String::new();
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            match command {
                PathCommand::MoveTo(p) => {
                    out.push('M');
                    write_point(&mut out, *p, precision);
                }
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    out.push('C');
                    write_point(&mut out, *control1, precision);
                    out.push_str(", ");
                    write_point(&mut out, *control2, precision);
                    out.push_str(", ");
                    write_point(&mut out, *end, precision);
                }
            }
        }
        out
    }
}

fn write_point(out: &mut String, p: Point, precision: Option<usize>) {
    write_number(out, p.x, precision);
    out.push(' ');
    write_number(out, p.y, precision);
}

fn write_number(out: &mut String, value: f32, precision: Option<usize>) {
    // Writing into a String cannot fail
    let _ = match precision {
        Some(digits) => write!(out, "{:.*}", digits, value),
        None => write!(out, "{}", value),
    };
}

/// Builder for constructing paths
#[derive(Default)]
pub struct PathBuilder {
    path: Path,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.path.commands.push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    pub fn cubic_to(mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) -> Self {
        self.path.commands.push(PathCommand::CubicTo {
            control1: Point::new(c1x, c1y),
            control2: Point::new(c2x, c2y),
            end: Point::new(x, y),
        });
        self
    }

    pub fn build(self) -> Path {
        self.path
    }
}
