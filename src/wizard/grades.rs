//! Static grade reference tables.
//!
//! The app does not compute a grade; the user compares their photos against
//! these reference rows on the Results screen. Loaded once, never mutated.

/// One row of a grade reference table.
#[derive(Clone, Copy, Debug)]
pub struct GradeEntry {
    /// Grade label.
    pub num: &'static str,
    /// Human-readable range-of-motion threshold.
    pub rom: &'static str,
    /// Reference illustration name (resolved under `resources/images/`).
    pub pic: &'static str,
}

/// Anterior tongue range-of-motion grades (Zaghi et al. grading).
pub const ANTERIOR_GRADES: [GradeEntry; 4] = [
    GradeEntry { num: "1", rom: "> 80%", pic: "anteriorgrade1" },
    GradeEntry { num: "2", rom: "50 - 80%", pic: "anteriorgrade2" },
    GradeEntry { num: "3", rom: "< 50%", pic: "anteriorgrade3" },
    GradeEntry { num: "4", rom: "< 25%", pic: "anteriorgrade4" },
];

/// Posterior tongue range-of-motion grades.
pub const POSTERIOR_GRADES: [GradeEntry; 4] = [
    GradeEntry { num: "1", rom: "> 60%", pic: "posteriorgrade1" },
    GradeEntry { num: "2", rom: "30 - 60%", pic: "posteriorgrade2" },
    GradeEntry { num: "3", rom: "< 30%", pic: "posteriorgrade3" },
    GradeEntry { num: "4", rom: "< 5% or unable", pic: "posteriorgrade4" },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_have_four_rows_with_distinct_pics() {
        assert_eq!(ANTERIOR_GRADES.len(), 4);
        assert_eq!(POSTERIOR_GRADES.len(), 4);
        for (i, grade) in ANTERIOR_GRADES.iter().enumerate() {
            assert_eq!(grade.num, (i + 1).to_string());
            assert!(grade.pic.starts_with("anteriorgrade"));
        }
        for (i, grade) in POSTERIOR_GRADES.iter().enumerate() {
            assert_eq!(grade.num, (i + 1).to_string());
            assert!(grade.pic.starts_with("posteriorgrade"));
        }
    }
}
