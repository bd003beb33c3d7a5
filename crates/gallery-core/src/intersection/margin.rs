use crate::error::{GalleryError, Result};
use std::fmt;
use std::str::FromStr;

/// One side of a root margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarginLength {
    Px(f32),
    /// Percentage of the root's extent along the same axis.
    Percent(f32),
}

impl MarginLength {
    pub fn resolve(self, basis: f32) -> f32 {
        match self {
            MarginLength::Px(px) => px,
            MarginLength::Percent(pct) => basis * pct / 100.0,
        }
    }

    fn parse(token: &str) -> Result<Self> {
        let invalid = || {
            GalleryError::InvalidArgument(format!(
                "root margin `{token}` must be a length in px or %"
            ))
        };
        let (number, build): (&str, fn(f32) -> MarginLength) =
            if let Some(number) = token.strip_suffix("px") {
                (number, MarginLength::Px)
            } else if let Some(number) = token.strip_suffix('%') {
                (number, MarginLength::Percent)
            } else if token == "0" {
                return Ok(MarginLength::Px(0.0));
            } else {
                return Err(invalid());
            };
        let value: f32 = number.parse().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(invalid());
        }
        Ok(build(value))
    }
}

impl fmt::Display for MarginLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarginLength::Px(px) => write!(f, "{px}px"),
            MarginLength::Percent(pct) => write!(f, "{pct}%"),
        }
    }
}

/// Offsets that grow (positive) or shrink (negative) the root bounds,
/// written with the CSS `margin` shorthand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootMargin {
    pub top: MarginLength,
    pub right: MarginLength,
    pub bottom: MarginLength,
    pub left: MarginLength,
}

impl RootMargin {
    pub const ZERO: RootMargin = RootMargin::px(0.0);

    pub const fn px(value: f32) -> Self {
        RootMargin {
            top: MarginLength::Px(value),
            right: MarginLength::Px(value),
            bottom: MarginLength::Px(value),
            left: MarginLength::Px(value),
        }
    }

    pub fn parse(input: &str) -> Result<Self> {
        let sides = input
            .split_whitespace()
            .map(MarginLength::parse)
            .collect::<Result<Vec<_>>>()?;
        let (top, right, bottom, left) = match sides.as_slice() {
            [all] => (*all, *all, *all, *all),
            [vertical, horizontal] => (*vertical, *horizontal, *vertical, *horizontal),
            [top, horizontal, bottom] => (*top, *horizontal, *bottom, *horizontal),
            [top, right, bottom, left] => (*top, *right, *bottom, *left),
            _ => {
                return Err(GalleryError::InvalidArgument(format!(
                    "root margin `{input}` must have between one and four lengths"
                )));
            }
        };
        Ok(RootMargin {
            top,
            right,
            bottom,
            left,
        })
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        RootMargin::ZERO
    }
}

impl FromStr for RootMargin {
    type Err = GalleryError;

    fn from_str(s: &str) -> Result<Self> {
        RootMargin::parse(s)
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}
