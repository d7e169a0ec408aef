//! Common utility for extended `std` types
//!
#![doc = include_str!("../readme.md")]

// standard library
use std::fmt::{Display, LowerExp};

// Alias for the format! macro
pub use std::format as f;

/// Extends string types with common symbol formatting
pub trait StringExt {
    /// Normalise to title case
    ///
    /// Element symbols turn up in every case imaginable, so this forces the
    /// first character to uppercase and the rest to lowercase.
    ///
    /// ```rust
    /// # use naa_utils::StringExt;
    /// assert_eq!("lu".capitalise(), "Lu");
    /// assert_eq!("FE".capitalise(), "Fe");
    /// assert_eq!("co".capitalise(), "Co");
    /// ```
    fn capitalise(&self) -> String;
}

impl<S: AsRef<str>> StringExt for S {
    fn capitalise(&self) -> String {
        let mut chars = self.as_ref().chars();
        match chars.next() {
            Some(first) => {
                first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
            }
            None => String::new(),
        }
    }
}

/// Extends primitives with more specific formatting options
pub trait ValueExt {
    /// Better scientific number formatting
    ///
    /// The default `{:e}` output is inconsistent about signs and exponent
    /// width, which makes for ragged tables. This pins both down.
    ///
    /// ```rust
    /// # use naa_utils::ValueExt;
    /// assert_eq!((1234.5).sci(4, 2), "1.2345e+03".to_string());
    /// assert_eq!((-0.00321).sci(2, 2), "-3.21e-03".to_string());
    /// ```
    fn sci(&self, precision: usize, exp_pad: usize) -> String;
}

impl<T: LowerExp> ValueExt for T {
    fn sci(&self, precision: usize, exp_pad: usize) -> String {
        let formatted = f!("{:.precision$e}", &self, precision = precision);
        // `formatted` always contains 'e', split into mantissa and exponent
        let (mantissa, exp) = formatted.split_once('e').unwrap();
        let (sign, digits) = match exp.strip_prefix('-') {
            Some(digits) => ('-', digits),
            None => ('+', exp),
        };
        f!("{mantissa}e{sign}{digits:0>exp_pad$}")
    }
}

/// Extends Option for easy display formatting
pub trait OptionExt {
    /// Display the contained value, or "none" for the `None` variant
    ///
    /// ```rust
    /// # use naa_utils::OptionExt;
    /// let limit: Option<f64> = Some(0.1);
    /// assert_eq!(limit.display(), "0.1");
    /// assert_eq!(None::<f64>.display(), "none");
    /// ```
    fn display(&self) -> String;
}

impl<T: Display> OptionExt for Option<T> {
    fn display(&self) -> String {
        match self {
            Some(value) => f!("{value}"),
            None => "none".to_string(),
        }
    }
}
