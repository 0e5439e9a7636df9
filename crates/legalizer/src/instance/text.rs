//! Whitespace-separated integer text format.
//!
//! ```text
//! xmin ymin xmax ymax
//! <cells>      then `width height x_pitch y_pitch` per cell
//! <obstacles>  then `xmin ymin xmax ymax` per obstacle
//! <nets>       then per net: <pins>, then `owner xmin ymin xmax ymax` per pin
//! [x y per cell]   optional baseline
//! ```
//!
//! `owner` is a cell index or `-1` for a pin fixed in the plane. `#` starts a
//! comment that runs to the end of the line.

use std::fmt::Write as _;
use std::iter::{Enumerate, Peekable};

use thiserror::Error;

use crate::geometry::{Cell, Net, Pin, Point, Rect};

use super::Instance;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },
    #[error("token {index} (`{token}`) is not an integer ({expected})")]
    InvalidInteger {
        index: usize,
        token: String,
        expected: &'static str,
    },
    #[error("{what} count is negative ({value})")]
    NegativeCount { what: &'static str, value: i64 },
    #[error("net {net}, pin {pin}: owner {owner} is neither -1 nor a cell index below {cells}")]
    InvalidOwner {
        net: usize,
        pin: usize,
        owner: i64,
        cells: usize,
    },
    #[error("trailing input starting at token {index} (`{token}`)")]
    TrailingInput { index: usize, token: String },
}

struct Tokens<'a> {
    inner: Peekable<Enumerate<std::vec::IntoIter<&'a str>>>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        let words: Vec<&str> = text
            .lines()
            .map(|line| line.split('#').next().unwrap_or(""))
            .flat_map(str::split_whitespace)
            .collect();
        Self {
            inner: words.into_iter().enumerate().peekable(),
        }
    }

    fn is_exhausted(&mut self) -> bool {
        self.inner.peek().is_none()
    }

    fn int(&mut self, expected: &'static str) -> Result<i64, ParseError> {
        let (index, token) = self
            .inner
            .next()
            .ok_or(ParseError::UnexpectedEnd { expected })?;
        token.parse().map_err(|_| ParseError::InvalidInteger {
            index,
            token: token.to_owned(),
            expected,
        })
    }

    fn count(&mut self, what: &'static str) -> Result<usize, ParseError> {
        let value = self.int(what)?;
        usize::try_from(value).map_err(|_| ParseError::NegativeCount { what, value })
    }

    fn rect(&mut self, expected: &'static str) -> Result<Rect, ParseError> {
        Ok(Rect::new(
            self.int(expected)?,
            self.int(expected)?,
            self.int(expected)?,
            self.int(expected)?,
        ))
    }

    fn finish(mut self) -> Result<(), ParseError> {
        match self.inner.next() {
            None => Ok(()),
            Some((index, token)) => Err(ParseError::TrailingInput {
                index,
                token: token.to_owned(),
            }),
        }
    }
}

impl Instance {
    /// Parse the text format. Geometric validity (pitches, extents) is left
    /// to `Instance::legalizer`.
    pub fn from_text(text: &str) -> Result<Self, ParseError> {
        let mut tokens = Tokens::new(text);
        let bbox = tokens.rect("bounding box")?;

        let cell_count = tokens.count("cell")?;
        let mut cells = Vec::new();
        for _ in 0..cell_count {
            cells.push(Cell::new(
                tokens.int("cell width")?,
                tokens.int("cell height")?,
                tokens.int("cell x pitch")?,
                tokens.int("cell y pitch")?,
            ));
        }

        let obstacle_count = tokens.count("obstacle")?;
        let obstacles = (0..obstacle_count)
            .map(|_| tokens.rect("obstacle"))
            .collect::<Result<Vec<_>, _>>()?;

        let net_count = tokens.count("net")?;
        let mut nets = Vec::new();
        for net in 0..net_count {
            let pin_count = tokens.count("pin")?;
            let mut pins = Vec::new();
            for pin in 0..pin_count {
                let owner = tokens.int("pin owner")?;
                let offset = tokens.rect("pin rectangle")?;
                let pin = match owner {
                    -1 => Pin::external(offset),
                    o if o >= 0 && (o as u64) < cell_count as u64 => Pin::on_cell(o as usize, offset),
                    _ => {
                        return Err(ParseError::InvalidOwner {
                            net,
                            pin,
                            owner,
                            cells: cell_count,
                        })
                    }
                };
                pins.push(pin);
            }
            nets.push(Net::new(pins));
        }

        let baseline = if tokens.is_exhausted() {
            None
        } else {
            let mut positions = Vec::new();
            for _ in 0..cell_count {
                positions.push(Point::new(
                    tokens.int("baseline x")?,
                    tokens.int("baseline y")?,
                ));
            }
            Some(positions)
        };
        tokens.finish()?;

        Ok(Self {
            bbox,
            cells,
            obstacles,
            nets,
            baseline,
        })
    }

    /// Render in the text format; `from_text` reads it back unchanged.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let rect = |out: &mut String, r: &Rect| {
            let _ = write!(out, "{} {} {} {}", r.xmin, r.ymin, r.xmax, r.ymax);
        };
        rect(&mut out, &self.bbox);
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.cells.len());
        for c in &self.cells {
            let _ = writeln!(out, "{} {} {} {}", c.width, c.height, c.x_pitch, c.y_pitch);
        }
        let _ = writeln!(out, "{}", self.obstacles.len());
        for o in &self.obstacles {
            rect(&mut out, o);
            let _ = writeln!(out);
        }
        let _ = writeln!(out, "{}", self.nets.len());
        for net in &self.nets {
            let _ = writeln!(out, "{}", net.pins.len());
            for pin in &net.pins {
                let owner = pin.owner.map_or(-1, |o| o as i64);
                let _ = write!(out, "{owner} ");
                rect(&mut out, &pin.offset);
                let _ = writeln!(out);
            }
        }
        if let Some(baseline) = &self.baseline {
            for p in baseline {
                let _ = writeln!(out, "{} {}", p.x, p.y);
            }
        }
        out
    }
}
