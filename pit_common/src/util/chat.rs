//! Legacy chat formatting codes.
//!
//! Item names and lore are plain strings, styled with the old `§` codes. A
//! code is the [`CODE_SEP`] character followed by a single color or style
//! character. [`Color`] displays as its code, so it can be used directly in a
//! `format!`.
//!
//! # Example
//!
//! ```rust
//! use pit_common::util::chat::{strip_codes, Color};
//!
//! let name = format!("{}Sharpness {}II", Color::Gray, Color::Blue);
//! assert_eq!(name, "§7Sharpness §9II");
//! assert_eq!(strip_codes(&name), "Sharpness II");
//! ```

use std::fmt;

/// The character used in the old chat codes formatting.
pub const CODE_SEP: char = '§';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
  Black,
  DarkBlue,
  DarkGreen,
  DarkAqua,
  DarkRed,
  Purple,
  Gold,
  Gray,
  DarkGray,
  Blue,
  BrightGreen,
  Cyan,
  Red,
  Pink,
  Yellow,
  White,
}

impl Color {
  /// Returns the color code for this color.
  pub const fn code(&self) -> char {
    match self {
      Self::Black => '0',
      Self::DarkBlue => '1',
      Self::DarkGreen => '2',
      Self::DarkAqua => '3',
      Self::DarkRed => '4',
      Self::Purple => '5',
      Self::Gold => '6',
      Self::Gray => '7',
      Self::DarkGray => '8',
      Self::Blue => '9',
      Self::BrightGreen => 'a',
      Self::Cyan => 'b',
      Self::Red => 'c',
      Self::Pink => 'd',
      Self::Yellow => 'e',
      Self::White => 'f',
    }
  }
}

impl fmt::Display for Color {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{CODE_SEP}{}", self.code()) }
}

/// Removes every formatting code from the string. A trailing [`CODE_SEP`]
/// with nothing after it is removed as well.
pub fn strip_codes(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  let mut chars = s.chars();
  while let Some(c) = chars.next() {
    if c == CODE_SEP {
      chars.next();
    } else {
      out.push(c);
    }
  }
  out
}
