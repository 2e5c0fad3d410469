//! Whitespace-separated text import/export.
//!
//! Formats
//! - `Vec2`/`Vec3`/`Vec4`: components in order, space separated.
//! - `Mat4`: the four rows one after the other (16 numbers).
//! - `BoundingBox`: `lower upper` (8 numbers).
//! - `Trihedron`: `Origin: o ,X x ,Y y ,Z z`.
//! - `Polygon`: `Points n` then one `P x y z` line per vertex.
//! - `Segment` (`[a, b]`) and `Plane` (`[a, b, c, d]`) are export-only, through `Display`.
//!
//! Readers consume tokens from a shared `Tokens` stream, so values can be chained the
//! way they were written.

use std::fmt::Write as _;
use std::str::SplitWhitespace;

use crate::algebra::fixed::Mat4;
use crate::algebra::vector::{Vec2, Vec3, Vec4};
use crate::error::{GeomError, GeomResult};
use crate::geometry::{BoundingBox, Polygon, Polygonal};
use crate::trihedron::Trihedron;

/// Token stream over a text buffer.
pub struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace(),
        }
    }

    fn word(&mut self, what: &'static str) -> GeomResult<&'a str> {
        self.inner
            .next()
            .ok_or_else(|| GeomError::parse(what, "unexpected end of input"))
    }

    fn number(&mut self, what: &'static str) -> GeomResult<f64> {
        let w = self.word(what)?;
        w.parse()
            .map_err(|_| GeomError::parse(what, format!("`{w}` is not a number")))
    }

    /// Skips tokens until one contains `needle` (that token is consumed too).
    fn skip_past(&mut self, needle: &str, what: &'static str) -> GeomResult<()> {
        loop {
            if self.word(what)?.contains(needle) {
                return Ok(());
            }
        }
    }
}

/// Text export.
pub trait WriteText {
    fn write_text(&self, out: &mut String);

    fn to_text(&self) -> String {
        let mut s = String::new();
        self.write_text(&mut s);
        s
    }
}

/// Text import.
pub trait ReadText: Sized {
    fn read_text(tokens: &mut Tokens<'_>) -> GeomResult<Self>;

    fn parse_text(text: &str) -> GeomResult<Self> {
        Self::read_text(&mut Tokens::new(text))
    }
}

fn write_numbers<'a>(out: &mut String, values: impl IntoIterator<Item = &'a f64>) {
    for (i, v) in values.into_iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{v}");
    }
}

macro_rules! vector_text {
    ($ty:ty, $n:expr, $what:expr) => {
        impl WriteText for $ty {
            fn write_text(&self, out: &mut String) {
                write_numbers(out, self.iter());
            }
        }

        impl ReadText for $ty {
            fn read_text(tokens: &mut Tokens<'_>) -> GeomResult<Self> {
                let mut v = <$ty>::zeros();
                for i in 0..$n {
                    v[i] = tokens.number($what)?;
                }
                Ok(v)
            }
        }
    };
}

vector_text!(Vec2, 2, "Vector2");
vector_text!(Vec3, 3, "Vector3");
vector_text!(Vec4, 4, "Vector4");

impl WriteText for Mat4 {
    fn write_text(&self, out: &mut String) {
        for r in 0..4 {
            if r > 0 {
                out.push(' ');
            }
            write_numbers(out, self.row(r).iter());
        }
    }
}

impl ReadText for Mat4 {
    fn read_text(tokens: &mut Tokens<'_>) -> GeomResult<Self> {
        let mut m = Mat4::zeros();
        for r in 0..4 {
            for c in 0..4 {
                m[(r, c)] = tokens.number("Matrix4")?;
            }
        }
        Ok(m)
    }
}

impl WriteText for BoundingBox {
    fn write_text(&self, out: &mut String) {
        self.lower.write_text(out);
        out.push(' ');
        self.upper.write_text(out);
    }
}

impl ReadText for BoundingBox {
    fn read_text(tokens: &mut Tokens<'_>) -> GeomResult<Self> {
        let lower = Vec4::read_text(tokens)?;
        let upper = Vec4::read_text(tokens)?;
        Ok(BoundingBox::new(lower, upper))
    }
}

impl WriteText for Trihedron {
    fn write_text(&self, out: &mut String) {
        let _ = write!(out, "{self}");
    }
}

impl ReadText for Trihedron {
    fn read_text(tokens: &mut Tokens<'_>) -> GeomResult<Self> {
        fn labelled(tokens: &mut Tokens<'_>) -> GeomResult<Vec3> {
            tokens.word("Trihedron")?;
            Vec3::read_text(tokens)
        }
        let o = labelled(tokens)?;
        let x = labelled(tokens)?;
        let y = labelled(tokens)?;
        let z = labelled(tokens)?;
        Trihedron::new(o, x, y, z)
    }
}

impl WriteText for Polygon {
    fn write_text(&self, out: &mut String) {
        let _ = writeln!(out, "Points {}", self.len());
        for p in self.vertices() {
            out.push_str("P ");
            p.write_text(out);
            out.push('\n');
        }
    }
}

impl ReadText for Polygon {
    /// Skips anything before the `Points` header, and before each `P` marker.
    fn read_text(tokens: &mut Tokens<'_>) -> GeomResult<Self> {
        tokens.skip_past("Points", "Polygon")?;
        let w = tokens.word("Polygon")?;
        let n: usize = w
            .parse()
            .map_err(|_| GeomError::parse("Polygon", format!("bad vertex count `{w}`")))?;
        let mut poly = Polygon::default();
        for _ in 0..n {
            tokens.skip_past("P", "Polygon")?;
            poly.push(Vec3::read_text(tokens)?);
        }
        Ok(poly)
    }
}
