/*!
Literals, in the three representations met by the bridge.

- An [external literal](ELiteral) is a non-zero signed integer, as written in DIMACS and DRAT.
  The sign of the integer is the polarity of the literal and the magnitude is the (1-based) index of the variable.
  [i32::MIN] has no negation and is not a literal.
- An [internal literal](ILiteral) is whatever unsigned integer the host solver uses.
  The bridge never inspects an internal literal, and instead relies on the [host](crate::host) to translate between representations.
- A [proof literal](PLiteral) is the 0-based unsigned encoding `2·(|e| − 1) + sign`, used to index the record of units kept during [checks](crate::proof::checks).

```rust
# use clause_bridge::structures::literal::{self, ELiteral};
let e: ELiteral = -3;
assert_eq!(literal::to_proof(e), Some(5));
assert_eq!(literal::binary_code(e), Some(7));
assert_eq!(literal::to_proof(0), None);
```
*/

/// An external literal.
pub type ELiteral = i32;

/// An internal literal.
pub type ILiteral = u32;

/// A proof literal.
pub type PLiteral = u32;

/// Whether `elit` is an external literal.
pub fn is_valid(elit: ELiteral) -> bool {
    elit != 0 && elit != ELiteral::MIN
}

/// The proof literal of `elit`, if `elit` is a literal.
pub fn to_proof(elit: ELiteral) -> Option<PLiteral> {
    if !is_valid(elit) {
        return None;
    }
    Some(2 * (elit.unsigned_abs() - 1) + (elit < 0) as u32)
}

/// The code of `elit` in binary DRAT, `2·|e| + sign`, if `elit` is a literal.
pub fn binary_code(elit: ELiteral) -> Option<u32> {
    if !is_valid(elit) {
        return None;
    }
    Some(2 * elit.unsigned_abs() + (elit < 0) as u32)
}

/// The external literal of a binary DRAT code, if the code is that of a literal.
pub fn from_binary_code(code: u32) -> Option<ELiteral> {
    let magnitude = ELiteral::try_from(code >> 1).ok()?;
    if magnitude == 0 {
        return None;
    }
    match code & 1 {
        0 => Some(magnitude),
        _ => Some(-magnitude),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proof_literals() {
        assert_eq!(to_proof(1), Some(0));
        assert_eq!(to_proof(-1), Some(1));
        assert_eq!(to_proof(2), Some(2));
        assert_eq!(to_proof(ELiteral::MAX), Some(2 * (ELiteral::MAX as u32 - 1)));
        assert_eq!(to_proof(ELiteral::MIN), None);
    }

    #[test]
    fn binary_codes() {
        assert_eq!(binary_code(3), Some(6));
        assert_eq!(binary_code(-5), Some(11));
        assert_eq!(binary_code(7), Some(14));
        assert_eq!(binary_code(0), None);

        assert_eq!(from_binary_code(11), Some(-5));
        assert_eq!(from_binary_code(14), Some(7));
        assert_eq!(from_binary_code(1), None);
        assert_eq!(from_binary_code(binary_code(ELiteral::MAX).unwrap()), Some(ELiteral::MAX));
        assert_eq!(from_binary_code(binary_code(-ELiteral::MAX).unwrap()), Some(-ELiteral::MAX));
    }
}
