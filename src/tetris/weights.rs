use std::fmt;
use std::str::FromStr;

use crate::tetris::consts::{FeatureIndex, NUM_FEATURES};
use crate::utils::prelude::*;

/// A length-7 weight vector, one entry per [`FeatureIndex`] in canonical order.
/// Parsed from and serialized to the plain-text weights file (one float per
/// line, exactly 7 lines).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weights(pub [f64; NUM_FEATURES]);

impl Weights {
    pub fn new(values: [f64; NUM_FEATURES]) -> Weights {
        Weights(values)
    }

    /// Dot product of a feature vector against these weights.
    pub fn score(&self, features: &[f64; NUM_FEATURES]) -> f64 {
        self.0.iter().zip(features.iter()).map(|(w, f)| w * f).sum()
    }

    pub fn get(&self, index: FeatureIndex) -> f64 {
        self.0[index as usize]
    }

    pub fn get_index(&self, index: usize) -> f64 {
        self.0[index]
    }

    pub fn into_array(self) -> [f64; NUM_FEATURES] {
        self.0
    }
}

impl FromStr for Weights {
    type Err = Error;

    fn from_str(text: &str) -> Result<Weights> {
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        if lines.len() != NUM_FEATURES {
            return Err(anyhow!(
                "expected {NUM_FEATURES} weight lines, found {}",
                lines.len()
            ));
        }

        let mut values = [0.0; NUM_FEATURES];
        for (i, line) in lines.iter().enumerate() {
            values[i] = line
                .trim()
                .parse::<f64>()
                .with_context(|| format!("line {}: {line:?} is not a valid float", i + 1))?;
        }
        Ok(Weights(values))
    }
}

impl fmt::Display for Weights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for w in self.0.iter() {
            writeln!(f, "{w}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_seven_lines_in_order() {
        let text = "1.0\n2.0\n3.0\n-4.0\n5.0\n6.0\n7.0\n";
        let weights = text.parse::<Weights>().unwrap();
        assert_eq!(weights.0, [1.0, 2.0, 3.0, -4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn rejects_the_wrong_number_of_lines() {
        let err = "1.0\n2.0\n".parse::<Weights>().unwrap_err();
        assert!(err.to_string().contains("expected 7"));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        let original = Weights::new([1.0, -2.5, 0.0, 3.0, 4.0, -5.0, 6.0]);
        let text = original.to_string();
        let parsed = text.parse::<Weights>().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn score_is_the_weighted_dot_product() {
        let weights = Weights::new([1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0]);
        let features = [3.0, 0.0, 0.0, 0.0, 0.0, 0.0, 5.0];
        assert_eq!(weights.score(&features), 13.0);
    }
}
