//Copyright 2025 Loquax Authors
//
//Licensed under the Apache License, Version 2.0 (the "License");
//you may not use this file except in compliance with the License.
//You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
//Unless required by applicable law or agreed to in writing, software
//distributed under the License is distributed on an "AS IS" BASIS,
//WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//See the License for the specific language governing permissions and
//limitations under the License.

use std::str::FromStr;

use strum::{Display, EnumIter, EnumString};

/// The fixed label mapping used to annotate predictions with a numeric
/// sentiment score. Labels outside of it are reported as unmapped.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, EnumString, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Sentiment {
    Pozytywny,
    Neutralny,
    Negatywny,
}

impl Sentiment {
    pub const fn score(&self) -> i8 {
        match self {
            Sentiment::Pozytywny => 1,
            Sentiment::Neutralny => 0,
            Sentiment::Negatywny => -1,
        }
    }

    /// The numeric score for an arbitrary label, [`None`] when the label
    /// is not part of the standard mapping.
    pub fn score_of(label: &str) -> Option<i8> {
        Sentiment::from_str(label.to_lowercase().as_str())
            .ok()
            .map(|sentiment| sentiment.score())
    }
}

#[cfg(test)]
mod test {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn mapping_matches_the_fixed_scores() {
        assert_eq!(Sentiment::score_of("pozytywny"), Some(1));
        assert_eq!(Sentiment::score_of("Neutralny"), Some(0));
        assert_eq!(Sentiment::score_of("NEGATYWNY"), Some(-1));
    }

    #[test]
    fn unknown_labels_are_unmapped() {
        assert_eq!(Sentiment::score_of("sarkastyczny"), None);
        assert_eq!(Sentiment::score_of(""), None);
    }

    #[test]
    fn display_round_trips() {
        for sentiment in Sentiment::iter() {
            assert_eq!(Sentiment::score_of(&sentiment.to_string()), Some(sentiment.score()));
        }
    }
}
