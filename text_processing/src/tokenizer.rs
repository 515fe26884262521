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

use std::borrow::Cow;
use std::fmt::Debug;
use std::sync::Arc;

use itertools::Itertools;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use crate::lemmatizer::Lemmatizer;
use crate::stopwords::{ContainsKind, StopWordList};

/// A primitive tokenization pipeline: optional NFC normalization, word
/// segmentation, optional stopword filtering, optional lemmatization and
/// stemming, lowercasing last. Used wherever feature tokens are needed.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    normalize: bool,
    stop_words: Option<Arc<StopWordList>>,
    lemmatizer: Option<Arc<Lemmatizer>>,
    stemmer: Option<rust_stemmers::Algorithm>,
}

impl Tokenizer {
    pub fn new(
        normalize: bool,
        stop_words: Option<Arc<StopWordList>>,
        lemmatizer: Option<Arc<Lemmatizer>>,
        stemmer: Option<rust_stemmers::Algorithm>,
    ) -> Self {
        Self {
            normalize,
            stop_words,
            lemmatizer,
            stemmer,
        }
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let text = if self.normalize {
            Cow::Owned(text.nfc().to_string())
        } else {
            Cow::Borrowed(text)
        };

        let words = text.unicode_words();

        let words = if let Some(stop_words) = &self.stop_words {
            let target = if self.normalize {
                ContainsKind::Normalized
            } else {
                ContainsKind::Raw
            };
            words
                .filter(|value| !stop_words.contains(target, value.to_lowercase().as_str()))
                .collect_vec()
        } else {
            words.collect_vec()
        };

        let words = if let Some(lemmatizer) = &self.lemmatizer {
            words
                .into_iter()
                .map(|value| lemmatizer.lemma_of(value))
                .collect_vec()
        } else {
            words.into_iter().map(str::to_owned).collect_vec()
        };

        if let Some(stemmer) = self.stemmer {
            let stemmer = rust_stemmers::Stemmer::create(stemmer);
            words
                .into_iter()
                .map(|value| stemmer.stem(&value.to_lowercase()).into_owned())
                .collect_vec()
        } else {
            words.into_iter().map(|value| value.to_lowercase()).collect_vec()
        }
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use compact_str::CompactString;

    use super::*;

    #[test]
    fn plain_pipeline_lowercases() {
        let tokenizer = Tokenizer::default();
        assert_eq!(
            tokenizer.tokenize("Hello, World!"),
            vec!["hello".to_string(), "world".to_string()]
        );
    }

    #[test]
    fn full_pipeline_filters_and_stems() {
        let stop_words = Arc::new(StopWordList::from_raw(HashSet::from([
            CompactString::from("the"),
        ])));
        let tokenizer = Tokenizer::new(
            true,
            Some(stop_words),
            None,
            Some(rust_stemmers::Algorithm::English),
        );
        assert_eq!(
            tokenizer.tokenize("The cats are running"),
            vec!["cat".to_string(), "are".to_string(), "run".to_string()]
        );
    }

    #[test]
    fn lemmatizer_stage_runs_before_lowercasing() {
        let dir = camino_tempfile::tempdir().unwrap();
        let file = dir.path().join("lemmas.txt");
        std::fs::write(&file, "Cats\tcat\n").unwrap();
        let lemmatizer = Arc::new(Lemmatizer::from_file(&file).unwrap());
        let tokenizer = Tokenizer::new(false, None, Some(lemmatizer), None);
        assert_eq!(tokenizer.tokenize("Cats"), vec!["cat".to_string()]);
    }
}
