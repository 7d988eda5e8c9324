//! Module implementing the caption types.

#![allow(missing_docs)]  // Because IterVariants! produces undocumented methods.

use std::fmt;

use itertools::Itertools;


macro_attr! {
    /// Where on the image a caption is placed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
             Deserialize, IterVariants!(Positions))]
    #[serde(rename_all = "lowercase")]
    pub enum Position {
        /// Caption anchored at the top edge of the image.
        Top,
        /// Caption anchored above the bottom edge of the image.
        Bottom,
    }
}


/// A single piece of text rendered on the image macro.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Caption {
    /// Text to render.
    pub text: String,
    /// Which edge of the image the caption is anchored to.
    pub position: Position,
}

impl Caption {
    #[inline]
    pub fn new<S: Into<String>>(text: S, position: Position) -> Self {
        Caption{text: text.into(), position}
    }

    #[inline]
    pub fn top<S: Into<String>>(text: S) -> Self {
        Self::new(text, Position::Top)
    }

    #[inline]
    pub fn bottom<S: Into<String>>(text: S) -> Self {
        Self::new(text, Position::Bottom)
    }
}


/// The pair of caption texts of an image macro.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct Text {
    #[serde(default)]
    pub top: String,
    #[serde(default)]
    pub bottom: String,
}

impl Text {
    #[inline]
    pub fn new<T: Into<String>, B: Into<String>>(top: T, bottom: B) -> Self {
        Text{top: top.into(), bottom: bottom.into()}
    }

    /// Whether there is any text to render at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.top.is_empty() && self.bottom.is_empty()
    }

    /// Both captions, top first.
    pub fn captions(&self) -> Vec<Caption> {
        Position::iter_variants().map(|pos| match pos {
            Position::Top => Caption::top(self.top.clone()),
            Position::Bottom => Caption::bottom(self.bottom.clone()),
        }).collect()
    }

    /// Stable identifier of the text, usable as a path segment.
    ///
    /// Each line is escaped separately and the two are joined with a slash,
    /// so the result is always two path components.
    pub fn fingerprint(&self) -> String {
        [&self.top, &self.bottom].iter().map(|line| encode_line(line)).join("/")
    }
}

impl fmt::Display for Text {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{} / {}", self.top, self.bottom)
    }
}

/// Escape a caption line so that it can be safely put in a path or URL.
fn encode_line(line: &str) -> String {
    if line.is_empty() {
        return "_".into();
    }
    let mut result = String::with_capacity(line.len());
    for ch in line.chars() {
        match ch {
            '_' => result.push_str("__"),
            '-' => result.push_str("--"),
            ' ' => result.push('_'),
            '?' => result.push_str("~q"),
            '%' => result.push_str("~p"),
            '#' => result.push_str("~h"),
            '/' => result.push_str("~s"),
            '"' => result.push_str("''"),
            c => result.push(c),
        }
    }
    result
}
