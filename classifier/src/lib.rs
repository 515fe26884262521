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

pub mod error;
pub mod sentiment;

use itertools::Itertools;
use linfa::prelude::*;
use linfa_logistic::{MultiFittedLogisticRegression, MultiLogisticRegression};
use ndarray::{Array1, Axis};
use text_processing::vectorize::{self, TermDocumentMatrix};
use text_processing::Tokenizer;

pub use crate::error::ClassifierError;
pub use crate::sentiment::Sentiment;

/// The minimum number of labeled examples training requires.
pub const MIN_TRAIN_EXAMPLES: usize = 2;
const MAX_ITERATIONS: u64 = 1000;

/// A struct implementing this is used as train data.
pub trait TrainDataEntry {
    /// The text of the entry.
    fn text(&self) -> &str;
    /// The class label of the entry.
    fn label(&self) -> &str;
}

impl<T> TrainDataEntry for &T
where
    T: TrainDataEntry + ?Sized,
{
    fn text(&self) -> &str {
        (*self).text()
    }

    fn label(&self) -> &str {
        (*self).label()
    }
}

impl<Text, Label> TrainDataEntry for (Text, Label)
where
    Text: AsRef<str>,
    Label: AsRef<str>,
{
    fn text(&self) -> &str {
        self.0.as_ref()
    }

    fn label(&self) -> &str {
        self.1.as_ref()
    }
}

/// A text classifier trained from scratch on every construction: a
/// multinomial logistic regression over bag-of-words features. No model
/// state survives the value itself.
pub struct SentimentClassifier {
    model: MultiFittedLogisticRegression<f64, String>,
    features: TermDocumentMatrix,
    tokenizer: Tokenizer,
}

impl SentimentClassifier {
    /// Trains on the given examples. Fails with an enumerated error when
    /// there are fewer than [`MIN_TRAIN_EXAMPLES`] entries or fewer than
    /// two distinct labels; no feature extraction happens in that case.
    pub fn train<I, T>(data: I, tokenizer: Tokenizer) -> Result<Self, ClassifierError>
    where
        I: IntoIterator<Item = T>,
        T: TrainDataEntry,
    {
        let (texts, labels): (Vec<String>, Vec<String>) = data
            .into_iter()
            .map(|entry| (entry.text().to_owned(), entry.label().to_owned()))
            .unzip();

        if texts.len() < MIN_TRAIN_EXAMPLES {
            return Err(ClassifierError::NotEnoughExamples {
                found: texts.len(),
                needed: MIN_TRAIN_EXAMPLES,
            });
        }
        if labels.iter().unique().count() < 2 {
            return Err(ClassifierError::NotEnoughClasses);
        }

        let features = vectorize::bag_of_words(&texts, &tokenizer);
        log::info!(
            "Training a logistic regression on {} examples with {} features.",
            features.document_count(),
            features.vocabulary_size()
        );

        let dataset = Dataset::new(features.matrix.clone(), Array1::from(labels));
        let model = MultiLogisticRegression::default()
            .max_iterations(MAX_ITERATIONS)
            .fit(&dataset)?;

        Ok(Self {
            model,
            features,
            tokenizer,
        })
    }

    /// Predicts the label of exactly one text.
    pub fn predict(&self, text: &str) -> Result<String, ClassifierError> {
        let row = self.features.vectorize(text, &self.tokenizer);
        let input = row.insert_axis(Axis(0));
        let prediction = self.model.predict(&input);
        prediction
            .into_iter()
            .next()
            .ok_or(ClassifierError::EmptyPrediction)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn train_data() -> Vec<(&'static str, &'static str)> {
        vec![
            ("dobry wspaniały film", "pozytywny"),
            ("świetny dobry wieczór", "pozytywny"),
            ("zły okropny dzień", "negatywny"),
            ("fatalny zły humor", "negatywny"),
        ]
    }

    #[test]
    fn too_few_examples_refuse_before_training() {
        let result =
            SentimentClassifier::train(vec![("jeden", "pozytywny")], Tokenizer::default());
        assert!(matches!(
            result.err(),
            Some(ClassifierError::NotEnoughExamples { found: 1, needed: 2 })
        ));
    }

    #[test]
    fn single_class_refuses_before_training() {
        let data = vec![("dobry", "pozytywny"), ("wspaniały", "pozytywny")];
        let result = SentimentClassifier::train(data, Tokenizer::default());
        assert!(matches!(result.err(), Some(ClassifierError::NotEnoughClasses)));
    }

    #[test]
    fn trains_and_predicts_on_separable_data() {
        let model = SentimentClassifier::train(train_data(), Tokenizer::default()).unwrap();
        assert_eq!(model.predict("dobry wspaniały").unwrap(), "pozytywny");
        assert_eq!(model.predict("okropny zły").unwrap(), "negatywny");
    }

    #[test]
    fn predicts_something_for_unknown_vocabulary() {
        let model = SentimentClassifier::train(train_data(), Tokenizer::default()).unwrap();
        // An all-zero feature row still yields one of the trained labels.
        let label = model.predict("xyz nieznane").unwrap();
        assert!(label == "pozytywny" || label == "negatywny");
    }
}
