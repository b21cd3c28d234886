pub mod chat;

pub use chat::Color;

const NUMERALS: [(u32, &str); 13] = [
  (1000, "M"),
  (900, "CM"),
  (500, "D"),
  (400, "CD"),
  (100, "C"),
  (90, "XC"),
  (50, "L"),
  (40, "XL"),
  (10, "X"),
  (9, "IX"),
  (5, "V"),
  (4, "IV"),
  (1, "I"),
];

/// Converts a number to roman numerals. Zero is the empty string.
pub fn roman(mut n: u32) -> String {
  let mut out = String::new();
  for (value, numeral) in NUMERALS {
    while n >= value {
      out.push_str(numeral);
      n -= value;
    }
  }
  out
}

/// Formats a number as uppercase hex, zero padded to at least 6 digits. This
/// is the format used for leather armor colors.
pub fn to_hex(n: u32) -> String { format!("{n:06X}") }
