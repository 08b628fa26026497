use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// The five tolerance steps exposed to users instead of a raw [0, 1] slider.
///
/// Rounding two ratios to the same level doubles as the noise-tolerant
/// equality used by the satisfaction checker.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DivergenceLevel {
    VeryStrict,
    Strict,
    Mid,
    Loose,
    VeryLoose,
}

impl DivergenceLevel {
    /// Representative divergence ratio of this level.
    pub fn value(self) -> f64 {
        match self {
            DivergenceLevel::VeryStrict => 0.10,
            DivergenceLevel::Strict => 0.25,
            DivergenceLevel::Mid => 0.50,
            DivergenceLevel::Loose => 0.75,
            DivergenceLevel::VeryLoose => 0.90,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Nearest level by absolute distance. The scan keeps the first minimum,
    /// so ties resolve toward the stricter level.
    pub fn from_value(value: f64) -> Self {
        let mut best = DivergenceLevel::VeryStrict;
        let mut best_distance = f64::INFINITY;
        for level in DivergenceLevel::iter() {
            let distance = (value - level.value()).abs();
            if distance < best_distance {
                best_distance = distance;
                best = level;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, DivergenceLevel::VeryStrict)]
    #[case(0.10, DivergenceLevel::VeryStrict)]
    #[case(0.175, DivergenceLevel::VeryStrict)] // equidistant, first declared wins
    #[case(0.2, DivergenceLevel::Strict)]
    #[case(0.375, DivergenceLevel::Strict)] // equidistant Strict/Mid
    #[case(0.5, DivergenceLevel::Mid)]
    #[case(0.7, DivergenceLevel::Loose)]
    #[case(0.825, DivergenceLevel::Loose)] // equidistant Loose/VeryLoose
    #[case(1.0, DivergenceLevel::VeryLoose)]
    #[case(7.5, DivergenceLevel::VeryLoose)]
    fn nearest_level(#[case] value: f64, #[case] expected: DivergenceLevel) {
        assert_eq!(DivergenceLevel::from_value(value), expected);
    }

    #[test]
    fn levels_are_ordered() {
        let indices: Vec<usize> = DivergenceLevel::iter().map(|l| l.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn representative_values_round_trip() {
        for level in DivergenceLevel::iter() {
            assert_eq!(DivergenceLevel::from_value(level.value()), level);
        }
    }
}
