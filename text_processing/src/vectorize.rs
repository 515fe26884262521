use indexmap::IndexMap;
use ndarray::{Array1, Array2};

use crate::tf_idf::{defaults, Idf, IdfAlgorithm, Tf, TfAlgorithm, TfIdf};
use crate::tokenizer::Tokenizer;

/// A dense term-document matrix: one row per input text, one column per
/// vocabulary entry. Vocabulary indices follow tokenizer discovery order.
#[derive(Debug, Clone)]
pub struct TermDocumentMatrix {
    pub vocabulary: IndexMap<String, usize>,
    pub matrix: Array2<f64>,
}

impl TermDocumentMatrix {
    pub fn document_count(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    /// Maps a new text onto this vocabulary as raw counts. Tokens outside
    /// the vocabulary are dropped, matching the training representation.
    pub fn vectorize(&self, text: &str, tokenizer: &Tokenizer) -> Array1<f64> {
        let mut row = Array1::zeros(self.vocabulary.len());
        for token in tokenizer.tokenize(text) {
            if let Some(&index) = self.vocabulary.get(&token) {
                row[index] += 1.0;
            }
        }
        row
    }
}

/// Builds the raw count representation.
pub fn bag_of_words<S: AsRef<str>>(texts: &[S], tokenizer: &Tokenizer) -> TermDocumentMatrix {
    weighted(texts, tokenizer, defaults::RAW_COUNT)
}

/// Builds the term-frequency inverse-document-frequency representation.
pub fn tf_idf_matrix<S: AsRef<str>>(texts: &[S], tokenizer: &Tokenizer) -> TermDocumentMatrix {
    weighted(texts, tokenizer, defaults::TERM_FREQUENCY_INVERSE_SMOOTH)
}

/// Builds a term-document matrix with the given weighting.
pub fn weighted<S: AsRef<str>>(
    texts: &[S],
    tokenizer: &Tokenizer,
    weighting: TfIdf<Tf, Idf>,
) -> TermDocumentMatrix {
    let documents: Vec<Vec<String>> = texts
        .iter()
        .map(|text| tokenizer.tokenize(text.as_ref()))
        .collect();

    let mut vocabulary: IndexMap<String, usize> = IndexMap::new();
    let mut document_frequency: Vec<u64> = Vec::new();
    for document in &documents {
        let mut seen = vec![false; vocabulary.len()];
        for token in document {
            let next_index = vocabulary.len();
            let index = *vocabulary.entry(token.clone()).or_insert(next_index);
            if index == document_frequency.len() {
                document_frequency.push(0);
                seen.push(false);
            }
            if !seen[index] {
                seen[index] = true;
                document_frequency[index] += 1;
            }
        }
    }

    let document_count = documents.len() as u64;
    let mut matrix = Array2::zeros((documents.len(), vocabulary.len()));
    for (row, document) in documents.iter().enumerate() {
        let tf = weighting.tf.calculate_tf(document.iter());
        for (token, weight) in tf {
            if let Some(&column) = vocabulary.get(token.as_str()) {
                let idf = weighting
                    .idf
                    .calculate_idf(document_count, document_frequency[column]);
                matrix[(row, column)] = weight * idf;
            }
        }
    }

    TermDocumentMatrix { vocabulary, matrix }
}

#[cfg(test)]
mod test {
    use float_cmp::approx_eq;

    use super::*;

    fn texts(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn bag_of_words_counts_terms() {
        let corpus = texts(&["ala ma kota", "kot ma ale ma"]);
        let bow = bag_of_words(&corpus, &Tokenizer::default());

        assert_eq!(bow.document_count(), 2);
        // Discovery order: first document left to right, then the second.
        let words: Vec<&str> = bow.vocabulary.keys().map(String::as_str).collect();
        assert_eq!(words, vec!["ala", "ma", "kota", "kot", "ale"]);

        let ma = bow.vocabulary["ma"];
        assert!(approx_eq!(f64, bow.matrix[(0, ma)], 1.0));
        assert!(approx_eq!(f64, bow.matrix[(1, ma)], 2.0));
        let kota = bow.vocabulary["kota"];
        assert!(approx_eq!(f64, bow.matrix[(1, kota)], 0.0));
    }

    #[test]
    fn single_text_yields_one_row() {
        let corpus = texts(&["jeden dokument"]);
        let bow = bag_of_words(&corpus, &Tokenizer::default());
        assert_eq!(bow.matrix.nrows(), 1);
        assert_eq!(bow.vocabulary_size(), 2);
    }

    #[test]
    fn empty_corpus_yields_empty_matrix() {
        let corpus: Vec<String> = Vec::new();
        let bow = bag_of_words(&corpus, &Tokenizer::default());
        assert!(bow.is_empty());
        assert_eq!(bow.vocabulary_size(), 0);
    }

    #[test]
    fn tf_idf_weights_rare_terms_higher() {
        let corpus = texts(&["rain today rain", "sun today"]);
        let weighted = tf_idf_matrix(&corpus, &Tokenizer::default());
        let rain = weighted.vocabulary["rain"];
        let today = weighted.vocabulary["today"];
        // "rain" appears only in the first document, "today" in both.
        assert!(weighted.matrix[(0, rain)] > weighted.matrix[(0, today)]);
        assert!(approx_eq!(f64, weighted.matrix[(1, rain)], 0.0));
    }

    #[test]
    fn shapes_match_contract() {
        let corpus = texts(&["a b c", "b c d", "c d e"]);
        let bow = bag_of_words(&corpus, &Tokenizer::default());
        let tfidf = tf_idf_matrix(&corpus, &Tokenizer::default());
        assert_eq!(bow.matrix.dim(), (3, 5));
        assert_eq!(tfidf.matrix.dim(), bow.matrix.dim());
    }

    #[test]
    fn large_corpus_rows_stay_aligned() {
        let corpus: Vec<String> = (1..=20).map(|words| lipsum::lipsum(words * 3)).collect();
        let bow = bag_of_words(&corpus, &Tokenizer::default());
        let tfidf = tf_idf_matrix(&corpus, &Tokenizer::default());
        assert_eq!(bow.document_count(), 20);
        assert_eq!(tfidf.matrix.dim(), bow.matrix.dim());
        // Every document contributed at least one term.
        for row in bow.matrix.rows() {
            assert!(row.sum() > 0.0);
        }
    }

    #[test]
    fn vectorize_maps_onto_existing_vocabulary() {
        let corpus = texts(&["ala ma kota"]);
        let bow = bag_of_words(&corpus, &Tokenizer::default());
        let row = bow.vectorize("ma ma pies", &Tokenizer::default());
        assert_eq!(row.len(), 3);
        assert!(approx_eq!(f64, row[bow.vocabulary["ma"]], 2.0));
        assert!(approx_eq!(f64, row[bow.vocabulary["ala"]], 0.0));
    }
}
