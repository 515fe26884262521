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

use isolang::Language;
use rust_stemmers::Algorithm;
use serde::{Deserialize, Serialize};

/// The config for the feature tokenization used by other modules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// If set to true the text is NFC normalized before segmentation.
    pub normalize_text: bool,
    /// Filter the stopwords of this language out of the feature tokens.
    pub stopword_language: Option<Language>,
    /// Lemmatize feature tokens through the configured dictionary.
    pub lemmatize: bool,
    pub stemmer: Option<Algorithm>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            normalize_text: true,
            stopword_language: None,
            lemmatize: false,
            stemmer: None,
        }
    }
}
