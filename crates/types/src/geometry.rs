use crate::units::parse_length;
use serde::{Deserialize, Deserializer, Serialize, de};

/// Tolerance used when comparing physical lengths.
pub const EPSILON: f32 = 0.01;

/// An axis-aligned rectangle with a top-left origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Shrinks the rectangle by the given margins.
    pub fn inset(&self, margins: &Margins) -> Rect {
        Rect {
            x: self.x + margins.left,
            y: self.y + margins.top,
            width: self.width - margins.horizontal(),
            height: self.height - margins.vertical(),
        }
    }

    /// A rectangle of `size` centred inside `self`.
    pub fn center(&self, size: Size) -> Rect {
        Rect {
            x: self.x + (self.width - size.width) / 2.0,
            y: self.y + (self.height - size.height) / 2.0,
            width: size.width,
            height: size.height,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    /// Whether `self` fits inside `outer`, within [`EPSILON`].
    pub fn fits_within(&self, outer: Size) -> bool {
        self.width <= outer.width + EPSILON && self.height <= outer.height + EPSILON
    }

    /// Largest uniform factor that scales `self` to fit inside `outer`.
    pub fn scale_to_fit(&self, outer: Size) -> f32 {
        (outer.width / self.width).min(outer.height / self.height)
    }

    pub fn scaled(&self, factor: f32) -> Size {
        Size::new(self.width * factor, self.height * factor)
    }
}

#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn zero() -> Self {
        Self::all(0.0)
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Parse CSS-style margin shorthand (1, 2, or 4 values)
    pub fn parse_shorthand(input: &str) -> Result<Self, String> {
        let values = input
            .split_whitespace()
            .map(|part| parse_length(part).map_err(|e| e.to_string()))
            .collect::<Result<Vec<_>, _>>()?;

        match values[..] {
            [all] => Ok(Margins::all(all)),
            [vertical, horizontal] => Ok(Margins {
                top: vertical,
                right: horizontal,
                bottom: vertical,
                left: horizontal,
            }),
            [top, right, bottom, left] => Ok(Margins {
                top,
                right,
                bottom,
                left,
            }),
            _ => Err(format!(
                "Invalid margin shorthand: expected 1, 2, or 4 values, got {}",
                values.len()
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Margins {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MarginsVisitor;
        impl<'de> de::Visitor<'de> for MarginsVisitor {
            type Value = Margins;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a number, a string like '10pt' or '10pt 20pt', or a map")
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<Margins, E> {
                Ok(Margins::all(value as f32))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Margins, E> {
                Ok(Margins::all(value as f32))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Margins, E> {
                Ok(Margins::all(value as f32))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Margins, E> {
                Margins::parse_shorthand(value).map_err(E::custom)
            }

            fn visit_map<A>(self, mut map: A) -> Result<Margins, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut margins = Margins::default();
                while let Some(key) = map.next_key::<String>()? {
                    let value: f32 = map.next_value()?;
                    match key.as_str() {
                        "top" => margins.top = value,
                        "right" => margins.right = value,
                        "bottom" => margins.bottom = value,
                        "left" => margins.left = value,
                        other => {
                            return Err(de::Error::unknown_field(
                                other,
                                &["top", "right", "bottom", "left"],
                            ));
                        }
                    }
                }
                Ok(margins)
            }
        }
        deserializer.deserialize_any(MarginsVisitor)
    }
}
