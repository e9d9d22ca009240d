//! String-building helpers for view functions.
//!
//! Both helpers are plain functions with no tie to a renderer. Nothing here
//! escapes HTML; the caller owns output safety.

#[cfg(feature = "no_std")]
use alloc::string::String;

use core::fmt::Write;

use crate::Value;

/// A value that can be spliced between the literal parts of a template.
///
/// Absent values (`None`, [`Value::Null`]) write nothing.
pub trait Fragment {
    fn write_fragment(&self, out: &mut String);
}

impl Fragment for str {
    fn write_fragment(&self, out: &mut String) {
        out.push_str(self);
    }
}

impl Fragment for String {
    fn write_fragment(&self, out: &mut String) {
        out.push_str(self);
    }
}

impl Fragment for Value {
    fn write_fragment(&self, out: &mut String) {
        match self {
            Value::Null => {}
            Value::Str(s) => out.push_str(s),
            other => {
                write!(out, "{other}").ok();
            }
        }
    }
}

impl<T: Fragment> Fragment for Option<T> {
    fn write_fragment(&self, out: &mut String) {
        if let Some(value) = self {
            value.write_fragment(out);
        }
    }
}

impl<T: Fragment + ?Sized> Fragment for &T {
    fn write_fragment(&self, out: &mut String) {
        (**self).write_fragment(out);
    }
}

macro_rules! impl_fragment_display {
    ($($ty:ty),*) => {
        $(
            impl Fragment for $ty {
                fn write_fragment(&self, out: &mut String) {
                    write!(out, "{self}").ok();
                }
            }
        )*
    };
}

impl_fragment_display!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

/// Interleave `values` between the literal `parts`, template-literal style.
///
/// Each part `i` is followed by `values[i]`. With the usual calling convention
/// there is one value fewer than parts; missing trailing values write nothing,
/// and values past the last part are ignored.
///
/// ```rust
/// use sparse_view::join;
///
/// assert_eq!(join(&["a", "b", "c"], &[1, 2]), "a1b2c");
/// assert_eq!(join(&["a", "b"], &[None::<&str>]), "ab");
/// ```
pub fn join<V: Fragment>(parts: &[&str], values: &[V]) -> String {
    let mut out = String::new();
    for (i, part) in parts.iter().enumerate() {
        out.push_str(part);
        if let Some(value) = values.get(i) {
            value.write_fragment(&mut out);
        }
    }
    out
}

/// Render every item with its zero-based index and concatenate the results
/// with no separator.
///
/// ```rust
/// use sparse_view::map_list;
///
/// let items = map_list(["milk", "eggs"], |item, i| format!("<li id=\"{i}\">{item}</li>"));
///
/// assert_eq!(items, "<li id=\"0\">milk</li><li id=\"1\">eggs</li>");
/// ```
pub fn map_list<I, F>(items: I, mut render: F) -> String
where
    I: IntoIterator,
    F: FnMut(I::Item, usize) -> String,
{
    items
        .into_iter()
        .enumerate()
        .fold(String::new(), |mut out, (i, item)| {
            out.push_str(&render(item, i));
            out
        })
}

/// Template-literal style markup: literal parts alternating with values.
///
/// Values may be of mixed types, anything implementing [`Fragment`].
///
/// ```rust
/// use sparse_view::{html, State};
///
/// let state = State::new().with("name", "world").with("count", 2i64);
///
/// let markup = html!("<h1>Hello ", state["name"], "</h1><p>", state["count"], " visits</p>");
///
/// assert_eq!(markup, "<h1>Hello world</h1><p>2 visits</p>");
/// ```
#[macro_export]
macro_rules! html {
    ($first:literal $(, $value:expr, $part:literal)*) => {{
        let values: &[&dyn $crate::Fragment] = &[$(&$value),*];
        $crate::join(&[$first $(, $part)*], values)
    }};
}
