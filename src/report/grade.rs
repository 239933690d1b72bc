use serde::Serialize;
use std::fmt;

/// Letter grade awarded for a semester average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

/// Pass/fail recommendation that accompanies a [`Grade`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Recommendation {
    #[serde(rename = "Recommend Pass")]
    Pass,
    #[serde(rename = "Recommend Fail")]
    Fail,
}

/// Legend rows printed under the results table, highest band first.
pub static GRADE_BANDS: &[(&str, Grade)] = &[
    ("70-100", Grade::A),
    ("60-69", Grade::B),
    ("50-59", Grade::C),
    ("40-49", Grade::D),
    ("Below 40", Grade::F),
];

impl Grade {
    /// Converts an average mark into a letter grade.
    ///
    /// | Range       | Grade |
    /// |-------------|-------|
    /// | >= 70       | A     |
    /// | >= 60       | B     |
    /// | >= 50       | C     |
    /// | >= 40       | D     |
    /// | < 40        | F     |
    ///
    /// A NaN average matches no band and falls through to `F`.
    pub fn from_average(avg: f64) -> Self {
        match avg {
            a if a >= 70.0 => Grade::A,
            a if a >= 60.0 => Grade::B,
            a if a >= 50.0 => Grade::C,
            a if a >= 40.0 => Grade::D,
            _ => Grade::F,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Grade::A => 'A',
            Grade::B => 'B',
            Grade::C => 'C',
            Grade::D => 'D',
            Grade::F => 'F',
        }
    }

    pub fn recommendation(self) -> Recommendation {
        match self {
            Grade::F => Recommendation::Fail,
            _ => Recommendation::Pass,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Recommendation::Pass => "Recommend Pass",
            Recommendation::Fail => "Recommend Fail",
        })
    }
}
