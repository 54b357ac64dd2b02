//! Letter grades and the grade-point derivation rule.
//!
//! `grade_points` on an enrollment is never chosen freely when the grade is
//! on the numeric scale: [`derive_grade_points`] overwrites it from a fixed
//! table on every write. Non-numeric grades (Incomplete, Withdrawn, Pass,
//! No Pass) and a missing grade leave the existing value alone.

use rust_decimal::Decimal;

use crate::choices::define_code_enum;

define_code_enum! {
    /// The 16-symbol grading scale.
    Grade {
        APlus = "A+",
        A = "A",
        AMinus = "A-",
        BPlus = "B+",
        B = "B",
        BMinus = "B-",
        CPlus = "C+",
        C = "C",
        CMinus = "C-",
        DPlus = "D+",
        D = "D",
        F = "F",
        Incomplete = "I",
        Withdrawn = "W",
        Pass = "P",
        NoPass = "NP",
    }
}

impl Grade {
    /// Grade points for grades on the numeric scale, `None` otherwise.
    pub fn points(self) -> Option<Decimal> {
        let hundredths = match self {
            Grade::APlus | Grade::A => 400,
            Grade::AMinus => 367,
            Grade::BPlus => 333,
            Grade::B => 300,
            Grade::BMinus => 267,
            Grade::CPlus => 233,
            Grade::C => 200,
            Grade::CMinus => 167,
            Grade::DPlus => 133,
            Grade::D => 100,
            Grade::F => 0,
            Grade::Incomplete | Grade::Withdrawn | Grade::Pass | Grade::NoPass => return None,
        };
        Some(Decimal::new(hundredths, 2))
    }

    /// Whether the grade carries grade points.
    pub fn is_numeric(self) -> bool {
        self.points().is_some()
    }
}

/// Compute the `grade_points` to persist for an enrollment write.
///
/// `current` is the value the row would otherwise carry (the stored value,
/// or one supplied with the write). It survives only when `grade` is absent
/// or off the numeric scale.
pub fn derive_grade_points(grade: Option<Grade>, current: Option<Decimal>) -> Option<Decimal> {
    grade.and_then(Grade::points).or(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(hundredths: i64) -> Option<Decimal> {
        Some(Decimal::new(hundredths, 2))
    }

    #[test]
    fn numeric_scale_matches_table() {
        let table = [
            ("A+", 400),
            ("A", 400),
            ("A-", 367),
            ("B+", 333),
            ("B", 300),
            ("B-", 267),
            ("C+", 233),
            ("C", 200),
            ("C-", 167),
            ("D+", 133),
            ("D", 100),
            ("F", 0),
        ];
        for (code, hundredths) in table {
            let grade = Grade::from_code(code).unwrap();
            assert_eq!(grade.points(), pts(hundredths), "grade {code}");
        }
    }

    #[test]
    fn twelve_numeric_and_four_other_symbols() {
        assert_eq!(Grade::ALL.len(), 16);
        assert_eq!(Grade::ALL.iter().filter(|g| g.is_numeric()).count(), 12);
    }

    #[test]
    fn b_plus_derives_three_thirty_three() {
        let derived = derive_grade_points(Some(Grade::BPlus), None).unwrap();
        assert_eq!(derived.to_string(), "3.33");
    }

    #[test]
    fn numeric_grade_overwrites_stale_points() {
        assert_eq!(derive_grade_points(Some(Grade::F), pts(350)), pts(0));
    }

    #[test]
    fn non_numeric_grade_leaves_points_untouched() {
        for grade in [Grade::Incomplete, Grade::Withdrawn, Grade::Pass, Grade::NoPass] {
            assert_eq!(derive_grade_points(Some(grade), pts(250)), pts(250));
            assert_eq!(derive_grade_points(Some(grade), None), None);
        }
        assert_eq!(derive_grade_points(None, pts(123)), pts(123));
    }

    #[test]
    fn derivation_is_idempotent() {
        for grade in Grade::ALL {
            let once = derive_grade_points(Some(*grade), pts(111));
            let twice = derive_grade_points(Some(*grade), once);
            assert_eq!(once, twice);
        }
    }
}
