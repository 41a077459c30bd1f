use std::fmt;
use std::str::FromStr;

/// Charting intervals known to the heatmap, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Timeframe {
    M1,
    M5,
    M15,
    M30,
    H1,
    H4,
    D1,
    W1,
    MN,
}

impl Timeframe {
    pub const ALL: [Timeframe; 9] = [
        Self::M1,
        Self::M5,
        Self::M15,
        Self::M30,
        Self::H1,
        Self::H4,
        Self::D1,
        Self::W1,
        Self::MN,
    ];

    /// Length of the interval in minutes. A month counts as 30 days.
    pub fn minutes(self) -> u32 {
        match self {
            Self::M1 => 1,
            Self::M5 => 5,
            Self::M15 => 15,
            Self::M30 => 30,
            Self::H1 => 60,
            Self::H4 => 240,
            Self::D1 => 1440,
            Self::W1 => 10080,
            Self::MN => 43200,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::M1 => "M1",
            Self::M5 => "M5",
            Self::M15 => "M15",
            Self::M30 => "M30",
            Self::H1 => "H1",
            Self::H4 => "H4",
            Self::D1 => "D1",
            Self::W1 => "W1",
            Self::MN => "MN",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown timeframe code: {0}")]
pub struct UnknownTimeframe(pub String);

impl FromStr for Timeframe {
    type Err = UnknownTimeframe;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tf| tf.code() == s)
            .ok_or_else(|| UnknownTimeframe(s.to_string()))
    }
}

/// Sort weight for a timeframe code. Unknown codes weigh more than any
/// known one.
pub fn timeframe_weight(code: &str) -> u32 {
    code.parse::<Timeframe>()
        .map(Timeframe::minutes)
        .unwrap_or(u32::MAX)
}

/// Sort timeframe codes into canonical order.
///
/// The sort is stable: unknown codes keep their relative input order after
/// all known codes.
pub fn sort_timeframes(timeframes: &mut [String]) {
    timeframes.sort_by_key(|code| timeframe_weight(code));
}
