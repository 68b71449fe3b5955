/*!
Optional checks on the lines of a proof.

When enabled through the `checks` [option](crate::config::Config::checks):
- At most one empty clause may be added.
- Each added unit is noted, indexed by [proof literal](crate::structures::literal::PLiteral).
- The internal literals of a line are kept alongside the external literals, for logs.

When disabled, the [proof emitter](super::ProofEmitter) holds no checks, and so pays nothing beyond a check on an optional.
*/

use crate::{
    structures::literal::{self, ELiteral, ILiteral},
    types::err::{self},
};

#[derive(Default)]
pub struct RepeatChecks {
    /// Whether the empty clause has been added.
    empty_seen: bool,

    /// Flags on proof literals, set when the literal is added as a unit.
    units: Vec<bool>,

    /// The internal literals of the line being assembled, if the line was given by internal literals.
    pub imported: Vec<ILiteral>,
}

impl RepeatChecks {
    /// Notes the addition of the clause `line`, or an error if the addition is a repeat of the empty clause.
    pub fn note_added(&mut self, line: &[ELiteral]) -> Result<(), err::ProofError> {
        match line {
            [] => {
                if self.empty_seen {
                    return Err(err::ProofError::RepeatedEmpty);
                }
                self.empty_seen = true;
            }

            [unit] => {
                let Some(plit) = literal::to_proof(*unit) else {
                    return Err(err::ProofError::InvalidLiteral(*unit));
                };
                let plit = plit as usize;
                if self.units.len() <= plit {
                    self.resize_units(plit);
                }
                self.units[plit] = true;
            }

            _ => {}
        }
        Ok(())
    }

    /// Grows the unit flags to the least power of two greater than `plit`, starting from two.
    fn resize_units(&mut self, plit: usize) {
        let mut size = match self.units.len() {
            0 => 2,
            len => len,
        };
        while size <= plit {
            size *= 2;
        }
        self.units.resize(size, false);
    }

    pub fn empty_seen(&self) -> bool {
        self.empty_seen
    }

    /// Whether `elit` has been added as a unit.
    pub fn has_unit(&self, elit: ELiteral) -> bool {
        match literal::to_proof(elit) {
            Some(plit) => self.units.get(plit as usize).copied().unwrap_or(false),
            None => false,
        }
    }

    /// The count of flags kept for units.
    pub fn units_size(&self) -> usize {
        self.units.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_empty() {
        let mut checks = RepeatChecks::default();
        assert!(checks.note_added(&[]).is_ok());
        assert!(checks.empty_seen());
        assert_eq!(checks.note_added(&[]), Err(err::ProofError::RepeatedEmpty));
    }

    #[test]
    fn unit_growth() {
        let mut checks = RepeatChecks::default();

        assert!(checks.note_added(&[1]).is_ok());
        assert_eq!(checks.units_size(), 2);

        assert!(checks.note_added(&[-3]).is_ok());
        // plit 5
        assert_eq!(checks.units_size(), 8);

        assert!(checks.note_added(&[4]).is_ok());
        // plit 6
        assert_eq!(checks.units_size(), 8);

        assert!(checks.note_added(&[5]).is_ok());
        // plit 8
        assert_eq!(checks.units_size(), 16);

        assert!(checks.has_unit(1));
        assert!(checks.has_unit(-3));
        assert!(!checks.has_unit(3));
        assert!(!checks.has_unit(-1));
        assert!(!checks.has_unit(1000));
    }

    #[test]
    fn long_lines_pass() {
        let mut checks = RepeatChecks::default();
        assert!(checks.note_added(&[1, 2]).is_ok());
        assert_eq!(checks.units_size(), 0);
        assert!(!checks.empty_seen());
    }
}
