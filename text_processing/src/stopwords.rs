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

use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::hash::Hash;
use std::io::{BufRead, BufReader};
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use compact_str::{CompactString, ToCompactString};
use isolang::Language;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use unicode_normalization::UnicodeNormalization;

/// An error while acquiring a stopword list from a repository.
#[derive(Debug, Error)]
pub enum StopWordError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Fetch(#[from] reqwest::Error),
}

/// A registry for stopwords with an in-memory cache per language.
/// May have multiple repositories; the resulting list is the union of
/// everything the registered repositories provide for the language.
#[derive(Debug, Default)]
pub struct StopWordRegistry {
    cached_stop_words: RwLock<HashMap<Language, Arc<StopWordList>>>,
    repositories: Vec<StopWordRepository>,
}

impl StopWordRegistry {
    pub fn new(repositories: Vec<StopWordRepository>) -> Self {
        Self {
            cached_stop_words: RwLock::default(),
            repositories,
        }
    }

    pub fn register(&mut self, repository: StopWordRepository) {
        self.repositories.push(repository)
    }

    async fn load_stop_words(&self, language: Language) -> Option<Vec<String>> {
        let mut collection = Vec::new();
        for repo in &self.repositories {
            match repo.load_raw_stop_words(language).await {
                Ok(Some(found)) => collection.extend(found),
                Ok(None) => {}
                Err(error) => {
                    log::warn!("Failed to load the stopwords for {language} from {repo:?}: {error}")
                }
            }
        }
        (!collection.is_empty()).then_some(collection)
    }

    /// Returns the stopword list for [`language`], loading it from the
    /// repositories at most once per process. Returns [`None`] when no
    /// repository can provide anything, without caching the failure, so
    /// a later call retries.
    pub async fn get_or_load(&self, language: Language) -> Option<Arc<StopWordList>> {
        {
            let lock = self.cached_stop_words.read().await;
            if let Some(found) = lock.get(&language) {
                return Some(found.clone());
            }
        }
        let raw = self
            .load_stop_words(language)
            .await?
            .into_iter()
            .map(CompactString::from)
            .collect();
        let mut lock = self.cached_stop_words.write().await;
        Some(
            lock.entry(language)
                .or_insert_with(|| Arc::new(StopWordList::from_raw(raw)))
                .clone(),
        )
    }
}

/// Where the raw stopword lists come from.
#[derive(Debug, Clone, Serialize, Deserialize, Hash, Eq, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StopWordRepository {
    /// A local newline-delimited word list.
    File { language: Language, file: Utf8PathBuf },
    /// A remote newline-delimited word list, fetched once and written to
    /// [`cache`]. Once the cache file exists it is never refreshed.
    Remote {
        language: Language,
        url: String,
        cache: Utf8PathBuf,
    },
}

impl StopWordRepository {
    /// Loads the raw words for [`language`], or [`None`] when this
    /// repository does not serve that language.
    pub async fn load_raw_stop_words(
        &self,
        language: Language,
    ) -> Result<Option<Vec<String>>, StopWordError> {
        match self {
            StopWordRepository::File {
                language: file_language,
                file,
            } => {
                if language != *file_language {
                    Ok(None)
                } else {
                    read_word_file(file).map(Some)
                }
            }
            StopWordRepository::Remote {
                language: repo_language,
                url,
                cache,
            } => {
                if language != *repo_language {
                    return Ok(None);
                }
                if !cache.exists() {
                    log::info!("Fetching the stopwords for {language} from {url}.");
                    fetch_to_cache(url, cache).await?;
                }
                read_word_file(cache).map(Some)
            }
        }
    }
}

fn read_word_file(file: &Utf8Path) -> Result<Vec<String>, StopWordError> {
    let words = BufReader::new(File::open(file)?)
        .lines()
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|line| line.trim().to_owned())
        .filter(|line| !line.is_empty())
        .collect();
    Ok(words)
}

async fn fetch_to_cache(url: &str, cache: &Utf8Path) -> Result<(), StopWordError> {
    let body = reqwest::get(url).await?.error_for_status()?.text().await?;
    if let Some(parent) = cache.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(cache, body)?;
    Ok(())
}

/// A stopword list holding the raw words and their NFC-normalized forms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopWordList {
    raw: HashSet<CompactString>,
    normalized: HashSet<CompactString>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ContainsKind {
    Raw,
    Normalized,
    Both,
}

impl StopWordList {
    pub fn new(mut raw: HashSet<CompactString>, mut normalized: HashSet<CompactString>) -> Self {
        raw.shrink_to_fit();
        normalized.shrink_to_fit();
        Self { raw, normalized }
    }

    pub fn from_raw(raw: HashSet<CompactString>) -> Self {
        let normalized = raw
            .iter()
            .map(|value| value.nfc().collect::<CompactString>())
            .collect::<HashSet<_>>();
        Self::new(raw, normalized)
    }

    /// An empty list, filtering nothing.
    pub fn empty() -> Self {
        Self::new(HashSet::new(), HashSet::new())
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    #[inline]
    pub fn contains<Q: ?Sized>(&self, kind: ContainsKind, value: &Q) -> bool
    where
        CompactString: Borrow<Q>,
        Q: Hash + Eq,
    {
        match kind {
            ContainsKind::Raw => self.raw.contains(value),
            ContainsKind::Normalized => self.normalized.contains(value),
            ContainsKind::Both => self.raw.contains(value) || self.normalized.contains(value),
        }
    }
}

impl<Q> Extend<Q> for StopWordList
where
    Q: ToCompactString,
{
    fn extend<T: IntoIterator<Item = Q>>(&mut self, iter: T) {
        for value in iter.into_iter() {
            let word = value.to_compact_string();
            let normalized = word.nfc().collect::<CompactString>();
            self.raw.insert(word);
            self.normalized.insert(normalized);
        }
        self.raw.shrink_to_fit();
        self.normalized.shrink_to_fit();
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use camino_tempfile::tempdir;
    use isolang::Language;

    use super::*;

    fn write_words(dir: &Utf8Path, name: &str, words: &[&str]) -> Utf8PathBuf {
        let file = dir.join(name);
        let mut handle = File::create(&file).unwrap();
        for word in words {
            writeln!(handle, "{word}").unwrap();
        }
        file
    }

    #[tokio::test]
    async fn file_repository_loads_and_caches() {
        let dir = tempdir().unwrap();
        let file = write_words(dir.path(), "pl.txt", &["i", "oraz", "ale"]);
        let registry = StopWordRegistry::new(vec![StopWordRepository::File {
            language: Language::Pol,
            file: file.clone(),
        }]);

        let list = registry.get_or_load(Language::Pol).await.unwrap();
        assert_eq!(list.len(), 3);
        assert!(list.contains(ContainsKind::Both, "oraz"));

        // A second call must not re-read the file.
        std::fs::remove_file(&file).unwrap();
        let again = registry.get_or_load(Language::Pol).await.unwrap();
        assert!(Arc::ptr_eq(&list, &again));
    }

    #[tokio::test]
    async fn missing_source_yields_none_and_is_retried() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("pl.txt");
        let registry = StopWordRegistry::new(vec![StopWordRepository::File {
            language: Language::Pol,
            file: file.clone(),
        }]);

        assert!(registry.get_or_load(Language::Pol).await.is_none());

        // The failure was not cached; once the file appears it loads.
        write_words(dir.path(), "pl.txt", &["nie"]);
        assert!(registry.get_or_load(Language::Pol).await.is_some());
    }

    #[tokio::test]
    async fn language_mismatch_is_not_served() {
        let dir = tempdir().unwrap();
        let file = write_words(dir.path(), "pl.txt", &["i"]);
        let registry = StopWordRegistry::new(vec![StopWordRepository::File {
            language: Language::Pol,
            file,
        }]);
        assert!(registry.get_or_load(Language::Eng).await.is_none());
    }

    #[test]
    fn list_contains_normalized_forms() {
        // "u\u{308}ber" composes to "über" under NFC.
        let list = StopWordList::from_raw(HashSet::from([CompactString::from("u\u{308}ber")]));
        assert!(list.contains(ContainsKind::Normalized, "über"));
        assert!(!list.contains(ContainsKind::Raw, "über"));
        assert!(list.contains(ContainsKind::Both, "über"));
    }
}
