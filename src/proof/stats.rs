//! Statistics regarding a proof.

/// Counts for a proof.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProofStats {
    /// Lines adding a clause.
    pub added: u64,

    /// Lines deleting a clause.
    pub deleted: u64,

    /// All lines, so `added + deleted`.
    pub lines: u64,

    /// Literals over all lines.
    pub literals: u64,

    /// Records written to the store.
    pub records: u64,

    /// Complete records lost to a failure of the store.
    pub dropped: u64,
}

/// A single line of a statistics report.
#[derive(Clone, Debug, PartialEq)]
pub struct StatLine {
    pub name: &'static str,
    pub count: u64,
    pub ratio: f64,
    pub unit: &'static str,
    pub per: &'static str,
}

impl std::fmt::Display for StatLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "c {:<22} {:>13} {:>14.2} {:<2}{}",
            format!("{}:", self.name),
            self.count,
            self.ratio,
            self.unit,
            self.per
        )
    }
}

fn percent(a: u64, b: u64) -> f64 {
    match b {
        0 => 0.0,
        _ => 100.0 * a as f64 / b as f64,
    }
}

fn average(a: u64, b: u64) -> f64 {
    match b {
        0 => 0.0,
        _ => a as f64 / b as f64,
    }
}

impl ProofStats {
    /// The lines of a report on the proof.
    ///
    /// Counts of all lines and all literals are only included if `verbose`.
    pub fn report(&self, verbose: bool) -> Vec<StatLine> {
        let mut report = vec![
            StatLine {
                name: "proof_added",
                count: self.added,
                ratio: percent(self.added, self.lines),
                unit: "%",
                per: "per line",
            },
            StatLine {
                name: "proof_deleted",
                count: self.deleted,
                ratio: percent(self.deleted, self.lines),
                unit: "%",
                per: "per line",
            },
        ];

        if verbose {
            report.push(StatLine {
                name: "proof_lines",
                count: self.lines,
                ratio: 100.0,
                unit: "%",
                per: "",
            });
            report.push(StatLine {
                name: "proof_literals",
                count: self.literals,
                ratio: average(self.literals, self.lines),
                unit: "",
                per: "per line",
            });
            report.push(StatLine {
                name: "proof_records",
                count: self.records,
                ratio: percent(self.records, self.lines),
                unit: "%",
                per: "per line",
            });
            report.push(StatLine {
                name: "proof_dropped",
                count: self.dropped,
                ratio: percent(self.dropped, self.lines),
                unit: "%",
                per: "per line",
            });
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratios() {
        let stats = ProofStats {
            added: 3,
            deleted: 1,
            lines: 4,
            literals: 10,
            records: 4,
            dropped: 0,
        };

        let report = stats.report(false);
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].ratio, 75.0);
        assert_eq!(report[1].ratio, 25.0);

        let report = stats.report(true);
        assert_eq!(report.len(), 6);
        assert_eq!(report[3].name, "proof_literals");
        assert_eq!(report[3].ratio, 2.5);
    }

    #[test]
    fn no_lines() {
        let report = ProofStats::default().report(true);
        assert!(report.iter().skip(1).all(|line| line.ratio == 0.0 || line.name == "proof_lines"));
        assert!(report[0].to_string().starts_with("c proof_added:"));
    }
}
