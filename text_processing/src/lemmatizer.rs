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

use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader};

use camino::Utf8Path;
use compact_str::CompactString;
use itertools::Itertools;

/// A dictionary backed lemmatizer. Tokens without a dictionary entry are
/// returned unchanged, so an empty dictionary behaves as the identity.
#[derive(Debug, Clone, Default)]
pub struct Lemmatizer {
    lemmas: HashMap<CompactString, CompactString>,
}

impl Lemmatizer {
    /// A lemmatizer without a dictionary, mapping every token to itself.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Reads a dictionary of `word<TAB>lemma` lines. Lines without a tab
    /// or starting with `#` are skipped.
    pub fn from_file(file: impl AsRef<Utf8Path>) -> Result<Self, io::Error> {
        let mut lemmas = HashMap::new();
        for line in BufReader::new(File::open(file.as_ref())?).lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((word, lemma)) = line.split_once('\t') {
                lemmas.insert(
                    CompactString::from(word.trim()),
                    CompactString::from(lemma.trim()),
                );
            }
        }
        lemmas.shrink_to_fit();
        Ok(Self { lemmas })
    }

    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }

    /// Returns the lemma of a single token. Tries the exact form first,
    /// then the lowercased form, and falls back to the token itself.
    pub fn lemma_of(&self, token: &str) -> String {
        if let Some(found) = self.lemmas.get(token) {
            return found.to_string();
        }
        let lowered = token.to_lowercase();
        match self.lemmas.get(lowered.as_str()) {
            Some(found) => found.to_string(),
            None => token.to_owned(),
        }
    }

    pub fn lemmatize(&self, tokens: &[String]) -> Vec<String> {
        tokens.iter().map(|token| self.lemma_of(token)).collect_vec()
    }
}
