use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

pub mod defaults {
    use crate::tf_idf::{Idf, Tf, TfIdf};

    /// Plain bag of words.
    pub const RAW_COUNT: TfIdf<Tf, Idf> = TfIdf::new(Tf::RawCount, Idf::Unary);
    /// The weighting used for the tf-idf representation.
    pub const TERM_FREQUENCY_INVERSE_SMOOTH: TfIdf<Tf, Idf> =
        TfIdf::new(Tf::TermFrequency, Idf::InverseDocumentFrequencySmooth);
}

/// A combination of a Tf and an Idf algorithm.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct TfIdf<Tf, Idf> {
    pub tf: Tf,
    pub idf: Idf,
}

impl<Tf, Idf> TfIdf<Tf, Idf> {
    pub const fn new(tf: Tf, idf: Idf) -> Self {
        Self { tf, idf }
    }
}

/// Trait for TF algorithms.
pub trait TfAlgorithm {
    /// Calculates the term weights for one document.
    fn calculate_tf<W, D: IntoIterator<Item = W>>(&self, doc: D) -> HashMap<W, f64>
    where
        W: Hash + Eq;
}

/// Default TF algorithms.
/// From https://en.wikipedia.org/wiki/Tf%E2%80%93idf
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub enum Tf {
    Binary,
    RawCount,
    TermFrequency,
}

impl Tf {
    /// The implementation for Tf::RawCount, used in multiple impls.
    fn raw_count<W, D: IntoIterator<Item = W>>(doc: D) -> HashMap<W, f64>
    where
        W: Hash + Eq,
    {
        let mut result = HashMap::new();
        for word in doc {
            match result.entry(word) {
                Entry::Occupied(mut value) => {
                    value.insert(*value.get() + 1.0);
                }
                Entry::Vacant(value) => {
                    value.insert(1.0);
                }
            }
        }
        result
    }
}

impl TfAlgorithm for Tf {
    fn calculate_tf<W, D: IntoIterator<Item = W>>(&self, doc: D) -> HashMap<W, f64>
    where
        W: Hash + Eq,
    {
        match self {
            Tf::Binary => {
                let mut result = HashMap::new();
                for word in doc.into_iter() {
                    result.insert(word, 1.0);
                }
                result
            }
            Tf::RawCount => Self::raw_count(doc),
            Tf::TermFrequency => {
                let mut result = Self::raw_count(doc);
                let divider = result.values().sum::<f64>();
                if divider > 0.0 {
                    for value in result.values_mut() {
                        *value /= divider;
                    }
                }
                result
            }
        }
    }
}

/// Trait for IDF algorithms, keyed by document frequency.
pub trait IdfAlgorithm {
    /// Calculates the IDF weight of a word appearing in
    /// [`document_frequency`] of the [`document_count`] documents.
    fn calculate_idf(&self, document_count: u64, document_frequency: u64) -> f64;
}

/// Default IDF algorithms.
/// From https://en.wikipedia.org/wiki/Tf%E2%80%93idf
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub enum Idf {
    Unary,
    InverseDocumentFrequency,
    InverseDocumentFrequencySmooth,
}

impl IdfAlgorithm for Idf {
    fn calculate_idf(&self, document_count: u64, document_frequency: u64) -> f64 {
        match self {
            Idf::Unary => 1.0,
            Idf::InverseDocumentFrequency => {
                (document_count as f64 / document_frequency as f64).log10()
            }
            Idf::InverseDocumentFrequencySmooth => {
                (document_count as f64 / (document_frequency as f64 + 1.0)).log10() + 1.0
            }
        }
    }
}

#[cfg(test)]
mod test {
    use float_cmp::approx_eq;

    use super::*;

    #[test]
    fn raw_count_counts() {
        let tf = Tf::RawCount.calculate_tf(["a", "b", "a"]);
        assert_eq!(tf.len(), 2);
        assert!(approx_eq!(f64, tf["a"], 2.0));
        assert!(approx_eq!(f64, tf["b"], 1.0));
    }

    #[test]
    fn term_frequency_sums_to_one() {
        let tf = Tf::TermFrequency.calculate_tf(["a", "b", "a", "c"]);
        assert!(approx_eq!(f64, tf.values().sum::<f64>(), 1.0));
        assert!(approx_eq!(f64, tf["a"], 0.5));
    }

    #[test]
    fn term_frequency_of_empty_doc_is_empty() {
        let tf = Tf::TermFrequency.calculate_tf(Vec::<&str>::new());
        assert!(tf.is_empty());
    }

    #[test]
    fn smooth_idf_of_everywhere_word_stays_positive() {
        // A word in every document still gets a positive weight.
        let weight = Idf::InverseDocumentFrequencySmooth.calculate_idf(3, 3);
        assert!(weight > 0.0);
        let rare = Idf::InverseDocumentFrequencySmooth.calculate_idf(3, 1);
        assert!(rare > weight);
    }

    #[test]
    fn unary_idf_is_one() {
        assert!(approx_eq!(f64, Idf::Unary.calculate_idf(10, 3), 1.0));
    }
}
