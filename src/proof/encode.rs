/*!
Encoding (and decoding) of DRAT lines.

A line is either the addition or the deletion of a clause, and is written in one of two formats:

- Binary:
  + The byte `a` (addition) or `d` (deletion).
  + For each literal *e*, the code `2·|e| + sign` written as LEB128, so seven bits to a byte with the top bit set on every byte but the last.
  + A `0` byte.
- Textual:
  + `a ` or `d `.
  + For each literal, the decimal integer followed by a space.
  + `0` and a newline.

The final byte of a line is the separator of the format, and appears nowhere else in the line.
For binary lines this holds as every literal code is at least 2, so the last byte of any code is non-zero.
As such, a sequence of lines may be split into lines at the separator, and the separator dropped, without loss.

```rust
# use clause_bridge::proof::encode::{self, Format, LineKind};
let mut bytes = Vec::default();
encode::write_line(Format::Text, LineKind::Delete, &[1, -2], &mut bytes);
assert_eq!(bytes, b"d 1 -2 0\n");

bytes.clear();
encode::write_line(Format::Binary, LineKind::Add, &[3], &mut bytes);
assert_eq!(bytes, [b'a', 6, 0]);
```
*/

use crate::structures::literal::{self, ELiteral};

/// The format of a proof.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Binary,
    Text,
}

impl Format {
    pub fn from_binary(binary: bool) -> Self {
        match binary {
            true => Format::Binary,
            false => Format::Text,
        }
    }

    /// The byte which terminates a line.
    pub fn separator(&self) -> u8 {
        match self {
            Format::Binary => 0,
            Format::Text => b'\n',
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Binary => write!(f, "binary"),
            Format::Text => write!(f, "non-binary"),
        }
    }
}

/// Whether a line adds or deletes a clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Add,
    Delete,
}

impl LineKind {
    pub fn prefix(&self) -> u8 {
        match self {
            LineKind::Add => b'a',
            LineKind::Delete => b'd',
        }
    }

    fn from_prefix(byte: u8) -> Option<Self> {
        match byte {
            b'a' => Some(LineKind::Add),
            b'd' => Some(LineKind::Delete),
            _ => None,
        }
    }
}

/// Appends the line of `kind` with literals `elits` in `format` to `out`, including the separator.
///
/// Each literal is assumed to be [valid](literal::is_valid).
pub fn write_line(format: Format, kind: LineKind, elits: &[ELiteral], out: &mut Vec<u8>) {
    out.push(kind.prefix());
    match format {
        Format::Binary => {
            for elit in elits {
                match literal::binary_code(*elit) {
                    Some(code) => write_leb128(code, out),
                    None => debug_assert!(false, "{elit} is not a literal"),
                }
            }
            out.push(0);
        }

        Format::Text => {
            out.push(b' ');
            for elit in elits {
                debug_assert!(literal::is_valid(*elit));
                if *elit < 0 {
                    out.push(b'-');
                }
                write_decimal(elit.unsigned_abs(), out);
                out.push(b' ');
            }
            out.push(b'0');
            out.push(b'\n');
        }
    }
}

fn write_leb128(mut x: u32, out: &mut Vec<u8>) {
    while x & !0x7f != 0 {
        out.push((x & 0x7f) as u8 | 0x80);
        x >>= 7;
    }
    out.push(x as u8);
}

fn write_decimal(x: u32, out: &mut Vec<u8>) {
    let mut digits = [0_u8; 10];
    let mut start = digits.len();
    let mut tmp = x;
    loop {
        start -= 1;
        digits[start] = b'0' + (tmp % 10) as u8;
        tmp /= 10;
        if tmp == 0 {
            break;
        }
    }
    out.extend_from_slice(&digits[start..]);
}

/// The kind and literals of a record, being a line without its separator, or `None` if the record is not a line.
pub fn read_record(format: Format, record: &[u8]) -> Option<(LineKind, Vec<ELiteral>)> {
    match format {
        Format::Binary => read_binary_record(record),
        Format::Text => read_text_record(record),
    }
}

fn read_binary_record(record: &[u8]) -> Option<(LineKind, Vec<ELiteral>)> {
    let (prefix, mut rest) = record.split_first()?;
    let kind = LineKind::from_prefix(*prefix)?;

    let mut elits = Vec::default();
    while !rest.is_empty() {
        let mut code: u64 = 0;
        let mut shift = 0;
        loop {
            let (byte, tail) = rest.split_first()?;
            rest = tail;
            code |= ((byte & 0x7f) as u64) << shift;
            if byte & 0x80 == 0 {
                break;
            }
            shift += 7;
            if shift > 28 {
                return None;
            }
        }
        elits.push(literal::from_binary_code(u32::try_from(code).ok()?)?);
    }
    Some((kind, elits))
}

fn read_text_record(record: &[u8]) -> Option<(LineKind, Vec<ELiteral>)> {
    let text = std::str::from_utf8(record).ok()?;
    let mut parts = text.split_ascii_whitespace();
    let kind = match parts.next()? {
        "a" => LineKind::Add,
        "d" => LineKind::Delete,
        _ => return None,
    };

    let mut elits = Vec::default();
    let mut terminated = false;
    for part in parts {
        if terminated {
            return None;
        }
        match part.parse::<ELiteral>().ok()? {
            0 => terminated = true,
            elit if literal::is_valid(elit) => elits.push(elit),
            _ => return None,
        }
    }
    match terminated {
        true => Some((kind, elits)),
        false => None,
    }
}
