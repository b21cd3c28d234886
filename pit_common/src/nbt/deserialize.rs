use super::Tag;
use byteorder::{BigEndian, ReadBytesExt};
use flate2::read::GzDecoder;
use std::{
  collections::HashMap,
  io::{self, Read},
  string::FromUtf8Error,
};
use thiserror::Error;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
/// The deepest a list or compound may be nested. This is the same limit the
/// vanilla client uses.
pub const MAX_DEPTH: usize = 512;

#[derive(Debug, Error)]
pub enum ParseError {
  #[error("invalid tag type: {0}")]
  InvalidType(u8),
  #[error("invalid string: {0}")]
  InvalidString(#[from] FromUtf8Error),
  #[error("invalid length: {0}")]
  InvalidLength(i32),
  #[error("tags nested deeper than {}", MAX_DEPTH)]
  TooDeep,
  #[error("{0}")]
  IO(#[from] io::Error),
}

/// Reads a root tag from the given bytes. If the data starts with the gzip
/// header, it is decompressed first. The root name is discarded.
pub fn read(data: &[u8]) -> Result<Tag, ParseError> {
  if data.starts_with(&GZIP_MAGIC) {
    Tag::deserialize(GzDecoder::new(data)).map(|(_, tag)| tag)
  } else {
    Tag::deserialize(data).map(|(_, tag)| tag)
  }
}

impl Tag {
  /// Reads a named tag from the reader. An `End` tag at the root is read as
  /// an empty compound.
  pub fn deserialize(mut r: impl Read) -> Result<(String, Tag), ParseError> {
    let ty = r.read_u8()?;
    if ty == 0 {
      return Ok((String::new(), Tag::default()));
    }
    let name = read_name(&mut r)?;
    Ok((name, Tag::deserialize_ty(ty, &mut r, 0)?))
  }

  fn deserialize_ty(ty: u8, r: &mut impl Read, depth: usize) -> Result<Self, ParseError> {
    if depth > MAX_DEPTH {
      return Err(ParseError::TooDeep);
    }
    match ty {
      1 => Ok(Self::Byte(r.read_i8()?)),
      2 => Ok(Self::Short(r.read_i16::<BigEndian>()?)),
      3 => Ok(Self::Int(r.read_i32::<BigEndian>()?)),
      4 => Ok(Self::Long(r.read_i64::<BigEndian>()?)),
      5 => Ok(Self::Float(r.read_f32::<BigEndian>()?)),
      6 => Ok(Self::Double(r.read_f64::<BigEndian>()?)),
      7 => {
        let len = read_len(r)?;
        Ok(Self::ByteArr(read_bytes(r, len)?))
      }
      8 => {
        let len = r.read_u16::<BigEndian>()?;
        Ok(Self::String(String::from_utf8(read_bytes(r, len as usize)?)?))
      }
      9 => {
        let inner_ty = r.read_u8()?;
        let len = read_len(r)?;
        if inner_ty == 0 && len != 0 {
          return Err(ParseError::InvalidType(inner_ty));
        }
        let mut inner = Vec::with_capacity(len.min(1024));
        for _ in 0..len {
          inner.push(Tag::deserialize_ty(inner_ty, r, depth + 1)?);
        }
        Ok(Self::List(inner))
      }
      10 => {
        let mut inner = HashMap::new();
        loop {
          let ty = r.read_u8()?;
          if ty == 0 {
            break;
          }
          let name = read_name(r)?;
          inner.insert(name, Tag::deserialize_ty(ty, r, depth + 1)?);
        }
        Ok(Self::Compound(inner))
      }
      11 => {
        let len = read_len(r)?;
        let mut inner = Vec::with_capacity(len.min(1024));
        for _ in 0..len {
          inner.push(r.read_i32::<BigEndian>()?);
        }
        Ok(Self::IntArray(inner))
      }
      12 => {
        let len = read_len(r)?;
        let mut inner = Vec::with_capacity(len.min(1024));
        for _ in 0..len {
          inner.push(r.read_i64::<BigEndian>()?);
        }
        Ok(Self::LongArray(inner))
      }
      _ => Err(ParseError::InvalidType(ty)),
    }
  }
}

fn read_name(r: &mut impl Read) -> Result<String, ParseError> {
  let len = r.read_u16::<BigEndian>()?;
  Ok(String::from_utf8(read_bytes(r, len as usize)?)?)
}

fn read_len(r: &mut impl Read) -> Result<usize, ParseError> {
  let len = r.read_i32::<BigEndian>()?;
  usize::try_from(len).map_err(|_| ParseError::InvalidLength(len))
}

/// Reads exactly `len` bytes. The length comes from untrusted data, so the
/// buffer grows as bytes arrive instead of being allocated up front.
fn read_bytes(r: &mut impl Read, len: usize) -> Result<Vec<u8>, ParseError> {
  let mut buf = vec![];
  r.by_ref().take(len as u64).read_to_end(&mut buf)?;
  if buf.len() != len {
    return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
  }
  Ok(buf)
}

#[cfg(test)]
mod tests {
  use super::*;
  use flate2::{write::GzEncoder, Compression};
  use pretty_assertions::assert_eq;
  use std::io::Write;

  fn named(ty: u8, name: &str) -> Vec<u8> {
    let mut out = vec![ty];
    out.extend((name.len() as u16).to_be_bytes());
    out.extend(name.as_bytes());
    out
  }

  /// `{ i: [{ id: 276s, Count: 1b }, {}] }`, the shape of an inventory blob.
  fn inventory_bytes() -> Vec<u8> {
    let mut out = named(10, "");
    out.extend(named(9, "i"));
    out.push(10);
    out.extend(2_i32.to_be_bytes());
    out.extend(named(2, "id"));
    out.extend(276_i16.to_be_bytes());
    out.extend(named(1, "Count"));
    out.push(1);
    out.push(0);
    // empty slot
    out.push(0);
    // end of root
    out.push(0);
    out
  }

  #[test]
  fn deserialize() -> Result<(), ParseError> {
    let tag = read(&inventory_bytes())?;
    let expected = Tag::compound(&[(
      "i",
      Tag::List(vec![
        Tag::compound(&[("id", Tag::Short(276)), ("Count", Tag::Byte(1))]),
        Tag::compound(&[]),
      ]),
    )]);
    assert_eq!(tag, expected);
    Ok(())
  }

  #[test]
  fn deserialize_gzip() -> Result<(), ParseError> {
    let mut enc = GzEncoder::new(vec![], Compression::default());
    enc.write_all(&inventory_bytes())?;
    let data = enc.finish()?;
    assert_eq!(read(&data)?, read(&inventory_bytes())?);
    Ok(())
  }

  #[test]
  fn invalid_data() {
    assert!(matches!(read(&[99, 0, 0]), Err(ParseError::InvalidType(99))));
    let mut truncated = named(8, "s");
    truncated.extend(10_u16.to_be_bytes());
    truncated.extend(b"abc");
    assert!(matches!(read(&truncated), Err(ParseError::IO(_))));
    let mut negative = named(7, "b");
    negative.extend((-1_i32).to_be_bytes());
    assert!(matches!(read(&negative), Err(ParseError::InvalidLength(-1))));
  }

  /// A root compound holding `depth` lists, each containing the next one.
  fn nested_lists(depth: usize) -> Vec<u8> {
    let mut out = named(10, "");
    out.extend(named(9, "l"));
    for _ in 1..depth {
      out.push(9);
      out.extend(1_i32.to_be_bytes());
    }
    out.push(0);
    out.extend(0_i32.to_be_bytes());
    out.push(0);
    out
  }

  #[test]
  fn nesting_limit() {
    assert!(read(&nested_lists(10)).is_ok());
    assert!(read(&nested_lists(MAX_DEPTH)).is_ok());
    assert!(matches!(read(&nested_lists(MAX_DEPTH + 1)), Err(ParseError::TooDeep)));
    assert!(matches!(read(&nested_lists(200_000)), Err(ParseError::TooDeep)));
  }
}
