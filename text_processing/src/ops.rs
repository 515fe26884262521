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

//! Stateless text transformations. Empty or whitespace-only inputs
//! degrade to empty outputs, they never fail.

use itertools::Itertools;
use unicode_segmentation::UnicodeSegmentation;

use crate::stopwords::{ContainsKind, StopWordList};

/// Strips every character that is neither alphanumeric nor whitespace
/// and lowercases the rest. Idempotent.
pub fn clean_text(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Splits a text into word tokens, preserving their case.
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words().map(str::to_owned).collect_vec()
}

/// Splits a text into sentences on `.`, `!` and `?`. A run of terminators
/// stays with the sentence it ends.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            while let Some(&next) = chars.peek() {
                if matches!(next, '.' | '!' | '?') {
                    current.push(next);
                    chars.next();
                } else {
                    break;
                }
            }
            if chars.peek().map_or(true, |next| next.is_whitespace()) {
                push_trimmed(&mut sentences, &current);
                current.clear();
            }
        }
    }
    push_trimmed(&mut sentences, &current);
    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, raw: &str) {
    let sentence = raw.trim();
    if !sentence.is_empty() {
        sentences.push(sentence.to_owned())
    }
}

/// Filters all tokens whose lowercased form is in [`stop_words`].
pub fn remove_stopwords(tokens: &[String], stop_words: &StopWordList) -> Vec<String> {
    tokens
        .iter()
        .filter(|token| !stop_words.contains(ContainsKind::Both, token.to_lowercase().as_str()))
        .cloned()
        .collect_vec()
}

/// Stems every token with the given algorithm, lowercasing the result.
pub fn stem(tokens: &[String], algorithm: rust_stemmers::Algorithm) -> Vec<String> {
    let stemmer = rust_stemmers::Stemmer::create(algorithm);
    tokens
        .iter()
        .map(|token| stemmer.stem(&token.to_lowercase()).into_owned())
        .collect_vec()
}

/// Returns all overlapping windows of [`n`] consecutive tokens.
/// Yields `max(0, len - n + 1)` windows; `n == 0` yields none.
pub fn ngrams(tokens: &[String], n: usize) -> Vec<Vec<String>> {
    if n == 0 || tokens.len() < n {
        return Vec::new();
    }
    tokens.windows(n).map(|window| window.to_vec()).collect_vec()
}
