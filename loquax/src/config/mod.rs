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

use camino::{Utf8Path, Utf8PathBuf};
use isolang::Language;
use serde::{Deserialize, Serialize};
use text_processing::configs::TokenizerConfig;
use text_processing::stopwords::StopWordRepository;

/// The whole configuration of the responder.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Configs {
    pub system: SystemConfig,
    pub paths: PathsConfig,
    pub session: SessionConfig,
    pub tokenizer: TokenizerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SystemConfig {
    pub log_level: log::LevelFilter,
    pub log_to_file: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            log_level: log::LevelFilter::Info,
            log_to_file: false,
        }
    }
}

/// Where the responder keeps its files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    /// The root for everything the responder writes.
    pub root: Utf8PathBuf,
    /// Overrides `<root>/sentences.json`.
    pub record_store: Option<Utf8PathBuf>,
    /// Overrides `<root>/plots`.
    pub plots: Option<Utf8PathBuf>,
    /// Overrides `<root>/resources` (stopword cache, lemma dictionary).
    pub resources: Option<Utf8PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root: Utf8PathBuf::from("loquax_data"),
            record_store: None,
            plots: None,
            resources: None,
        }
    }
}

impl PathsConfig {
    pub fn root_path(&self) -> &Utf8Path {
        &self.root
    }

    pub fn record_store_file(&self) -> Utf8PathBuf {
        self.record_store
            .clone()
            .unwrap_or_else(|| self.root.join("sentences.json"))
    }

    pub fn plots_dir(&self) -> Utf8PathBuf {
        self.plots.clone().unwrap_or_else(|| self.root.join("plots"))
    }

    pub fn resources_dir(&self) -> Utf8PathBuf {
        self.resources
            .clone()
            .unwrap_or_else(|| self.root.join("resources"))
    }

    pub fn lemma_dictionary_file(&self, language: Language) -> Utf8PathBuf {
        self.resources_dir()
            .join(format!("lemmas-{}.txt", language.to_639_3()))
    }
}

/// The language dependent parts of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// The working language of the responder.
    pub language: Language,
    /// The remote word list used to seed the stopword cache; `{lang}` is
    /// replaced by the ISO 639-1 code of [`language`].
    pub stopword_url_template: String,
    /// The stemming algorithm for the `stemming` task. `rust-stemmers`
    /// has no Polish stemmer, so the default stays the English one the
    /// tasks have always used.
    pub stemming_algorithm: rust_stemmers::Algorithm,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            language: Language::Pol,
            stopword_url_template:
                "https://raw.githubusercontent.com/stopwords-iso/stopwords-{lang}/master/stopwords-{lang}.txt"
                    .to_owned(),
            stemming_algorithm: rust_stemmers::Algorithm::English,
        }
    }
}

impl SessionConfig {
    /// The stopword repository for the configured language: the remote
    /// list, cached permanently under the resources dir.
    pub fn stopword_repository(&self, paths: &PathsConfig) -> Option<StopWordRepository> {
        let code = self.language.to_639_1()?;
        Some(StopWordRepository::Remote {
            language: self.language,
            url: self.stopword_url_template.replace("{lang}", code),
            cache: paths
                .resources_dir()
                .join(format!("stopwords-{code}.txt")),
        })
    }
}
