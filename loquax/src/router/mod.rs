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

//! The command router: parses one input line into a command plus quoted
//! arguments, dispatches, and assembles the reply. Every failure past
//! construction is reported through the reply text, never as an error.

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;

use camino::Utf8PathBuf;
use classifier::{ClassifierError, Sentiment, SentimentClassifier};
use itertools::Itertools;
use strum::IntoEnumIterator;
use text_processing::ops;
use text_processing::stopwords::{StopWordList, StopWordRegistry};
use text_processing::{Lemmatizer, Tokenizer};
use thiserror::Error;

use crate::charts::{ChartError, ChartRenderer};
use crate::config::Configs;
use crate::store::RecordStore;

pub const HELP_TEXT: &str = "Hi! I am an NLP responder.\n\
Available commands:\n\
/task <task_name> \"text\" \"class\"\n\
/full_pipeline \"text\" \"class\"\n\
/classifier \"text\"\n\
/stats";

const USAGE_TASK: &str = "Syntax error. Usage: /task <task_name> \"text\" \"class\"";
const USAGE_FULL_PIPELINE: &str = "Syntax error. Usage: /full_pipeline \"text\" \"class\"";
const USAGE_CLASSIFIER: &str = "Syntax error. Usage: /classifier \"text\"";
const USAGE_STATS: &str = "Syntax error. /stats takes no arguments.";

/// Splits shell-style: whitespace separated, double or single quoted
/// segments form one argument. Returns [`None`] on an unbalanced quote.
pub fn split_args(raw: &str) -> Option<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    for c in raw.chars() {
        match quote {
            Some(open) if c == open => quote = None,
            Some(_) => current.push(c),
            None => match c {
                '"' | '\'' => {
                    quote = Some(c);
                    in_token = true;
                }
                c if c.is_whitespace() => {
                    if in_token {
                        args.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                c => {
                    current.push(c);
                    in_token = true;
                }
            },
        }
    }
    if quote.is_some() {
        return None;
    }
    if in_token {
        args.push(current);
    }
    Some(args)
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Command {
    Start,
    Task,
    FullPipeline,
    Classifier,
    Stats,
}

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, strum::EnumString, strum::Display, strum::EnumIter,
)]
pub enum TaskName {
    #[strum(serialize = "tokenize")]
    Tokenize,
    #[strum(serialize = "remove_stopwords")]
    RemoveStopwords,
    #[strum(serialize = "lemmatize")]
    Lemmatize,
    #[strum(serialize = "stemming")]
    Stemming,
    #[strum(serialize = "n-grams")]
    Ngrams,
    #[strum(serialize = "plot_histogram")]
    PlotHistogram,
    #[strum(serialize = "plot_wordcloud")]
    PlotWordcloud,
    #[strum(serialize = "stats")]
    Stats,
}

/// One reply: text blocks in order, then zero or more image files.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Response {
    pub messages: Vec<String>,
    pub images: Vec<Utf8PathBuf>,
}

impl Response {
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            messages: vec![text.into()],
            images: Vec::new(),
        }
    }

    fn push_message(&mut self, text: impl Into<String>) {
        self.messages.push(text.into());
    }
}

#[derive(Debug, Error)]
pub enum RouterError {
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error("failed to read the lemma dictionary: {0}")]
    LemmaDictionary(#[from] std::io::Error),
}

pub struct Router {
    store: RecordStore,
    charts: ChartRenderer,
    stop_words: StopWordRegistry,
    lemmatizer: Arc<Lemmatizer>,
    configs: Configs,
}

impl Router {
    pub fn new(configs: Configs) -> Result<Self, RouterError> {
        let store = RecordStore::new(configs.paths.record_store_file());
        let charts = ChartRenderer::new(configs.paths.plots_dir())?;
        let stop_words = StopWordRegistry::new(
            configs
                .session
                .stopword_repository(&configs.paths)
                .into_iter()
                .collect(),
        );
        let dictionary = configs.paths.lemma_dictionary_file(configs.session.language);
        let lemmatizer = if dictionary.is_file() {
            Lemmatizer::from_file(&dictionary)?
        } else {
            log::debug!("No lemma dictionary at {dictionary}, lemmatization is the identity.");
            Lemmatizer::identity()
        };
        Ok(Self {
            store,
            charts,
            stop_words,
            lemmatizer: Arc::new(lemmatizer),
            configs,
        })
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Handles one input line. Anything that is not a known `/command`
    /// gets a hint back.
    pub async fn handle(&self, line: &str) -> Response {
        let line = line.trim();
        let (head, rest) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line, ""));
        let Some(name) = head.strip_prefix('/') else {
            return Response::message("Send a command. Use /start for the list.");
        };
        let Ok(command) = Command::from_str(name) else {
            return Response::message(format!(
                "Unknown command: /{name}. Use /start for the list."
            ));
        };
        // Unbalanced quotes count as zero arguments, which then fails
        // the arity check of every argument-taking command.
        let args = split_args(rest).unwrap_or_default();

        match command {
            Command::Start => Response::message(HELP_TEXT),
            Command::Task => self.task(&args).await,
            Command::FullPipeline => self.full_pipeline(&args).await,
            Command::Classifier => self.classify(&args).await,
            Command::Stats if args.is_empty() => self.stats().await,
            Command::Stats => Response::message(USAGE_STATS),
        }
    }

    async fn task(&self, args: &[String]) -> Response {
        let [task_name, text, class] = args else {
            return Response::message(USAGE_TASK);
        };

        // The record is written before the task name is even looked at,
        // so an unknown task still grows the store.
        if let Err(error) = self.store.save_record(text, class) {
            return Response::message(format!("Failed to write the record store: {error}"));
        }

        let tokens = ops::tokenize(text);
        let mut response = Response::default();
        match TaskName::from_str(task_name) {
            Ok(TaskName::Tokenize) => {
                response.push_message(format!("Tokens: {tokens:?}"));
            }
            Ok(TaskName::RemoveStopwords) => {
                let stop_words = self.stop_word_list().await;
                let kept = ops::remove_stopwords(&tokens, &stop_words);
                response.push_message(format!("Without stopwords: {kept:?}"));
            }
            Ok(TaskName::Lemmatize) => {
                let lemmas = self.lemmatizer.lemmatize(&tokens);
                response.push_message(format!("Lemmas: {lemmas:?}"));
            }
            Ok(TaskName::Stemming) => {
                let stems = ops::stem(&tokens, self.configs.session.stemming_algorithm);
                response.push_message(format!("Stems: {stems:?}"));
            }
            Ok(TaskName::Ngrams) => {
                let bigrams = ops::ngrams(&tokens, 2);
                response.push_message(format!("Bigrams: {bigrams:?}"));
            }
            Ok(TaskName::PlotHistogram) => {
                let rendered = self.charts.histogram(&tokens);
                self.attach(&mut response, rendered, "a histogram of token lengths");
            }
            Ok(TaskName::PlotWordcloud) => {
                let rendered = self.charts.wordcloud(text).map(Some);
                self.attach(&mut response, rendered, "a word cloud");
            }
            Ok(TaskName::Stats) => {
                response.push_message(format!(
                    "Characters: {}, tokens: {}",
                    text.chars().count(),
                    tokens.len()
                ));
            }
            Err(_) => {
                response.push_message(format!(
                    "Unknown task. Pick one of: {}.",
                    TaskName::iter().join(", ")
                ));
            }
        }
        response
    }

    async fn full_pipeline(&self, args: &[String]) -> Response {
        let [full_text, class] = args else {
            return Response::message(USAGE_FULL_PIPELINE);
        };

        let sentences = ops::split_sentences(full_text);
        let mut response =
            Response::message(format!("Starting the full pipeline for {} sentences...", sentences.len()));

        let stop_words = self.stop_word_list().await;
        let mut all_tokens = Vec::new();
        for (index, sentence) in sentences.iter().enumerate() {
            // Every sentence inherits the class submitted for the whole text.
            if let Err(error) = self.store.save_record(sentence, class) {
                response.push_message(format!("Failed to write the record store: {error}"));
                return response;
            }

            let cleaned = ops::clean_text(sentence);
            let tokens = ops::tokenize(&cleaned);
            let kept = ops::remove_stopwords(&tokens, &stop_words);
            let lemmas = self.lemmatizer.lemmatize(&kept);
            let stems = ops::stem(&kept, self.configs.session.stemming_algorithm);
            response.push_message(format!(
                "--- Sentence {} ---\n\
                 Original: {sentence}\n\
                 Cleaned: {cleaned}\n\
                 Tokens: {tokens:?}\n\
                 Without stopwords: {kept:?}\n\
                 Lemmas: {lemmas:?}\n\
                 Stems: {stems:?}",
                index + 1
            ));
            all_tokens.extend(tokens);
        }

        if !sentences.is_empty() {
            let tokenizer = self.feature_tokenizer().await;
            let bow = text_processing::vectorize::bag_of_words(&sentences, &tokenizer);
            let _tf_idf = text_processing::vectorize::tf_idf_matrix(&sentences, &tokenizer);
            response.push_message(format!(
                "Computed Bag of Words and TF-IDF representations ({} documents, {} terms).",
                bow.document_count(),
                bow.vocabulary_size()
            ));
        }

        response.push_message("Rendering charts...");
        let bar = self.charts.bar_chart(&all_tokens);
        self.attach(&mut response, bar, "a bar chart of the most frequent tokens");
        let histogram = self.charts.histogram(&all_tokens);
        self.attach(&mut response, histogram, "a histogram of token lengths");
        let cloud = self.charts.wordcloud(full_text).map(Some);
        self.attach(&mut response, cloud, "a word cloud");
        response
    }

    async fn classify(&self, args: &[String]) -> Response {
        let [text] = args else {
            return Response::message(USAGE_CLASSIFIER);
        };

        let records = match self.store.load() {
            Ok(records) => records,
            Err(error) => {
                return Response::message(format!("Failed to read the record store: {error}"))
            }
        };

        let tokenizer = self.feature_tokenizer().await;
        let model = match SentimentClassifier::train(records.iter(), tokenizer) {
            Ok(model) => model,
            Err(ClassifierError::NotEnoughExamples { .. }) => {
                return Response::message(
                    "Not enough data in the record store. \
                     Use /task or /full_pipeline first to add more examples.",
                )
            }
            Err(ClassifierError::NotEnoughClasses) => {
                return Response::message(
                    "The model needs at least two distinct classes to learn from. \
                     Add examples with other classes.",
                )
            }
            Err(error) => return Response::message(format!("Classification failed: {error}")),
        };

        match model.predict(text) {
            Ok(label) => {
                let numeric = Sentiment::score_of(&label)
                    .map(|score| score.to_string())
                    .unwrap_or_else(|| "not in the standard mapping".to_owned());
                Response::message(format!("Predicted class: {label} (numeric value: {numeric})"))
            }
            Err(error) => Response::message(format!("Classification failed: {error}")),
        }
    }

    async fn stats(&self) -> Response {
        let records = match self.store.load() {
            Ok(records) => records,
            Err(error) => {
                return Response::message(format!("Failed to read the record store: {error}"))
            }
        };
        if records.is_empty() {
            return Response::message(
                "The record store is empty. Use /task or /full_pipeline first.",
            );
        }

        let mut response = Response::message("Computing statistics over the whole record store...");

        let all_text = records.iter().map(|record| record.text.as_str()).join(" ");
        let cleaned = ops::clean_text(&all_text);
        let tokens = ops::tokenize(&cleaned);
        let unique_tokens: HashSet<&String> = tokens.iter().collect();
        let bigrams: HashSet<Vec<String>> = ops::ngrams(&tokens, 2).into_iter().collect();
        let trigrams: HashSet<Vec<String>> = ops::ngrams(&tokens, 3).into_iter().collect();

        let class_counts = match self.store.class_histogram() {
            Ok(counts) => counts
                .into_iter()
                .sorted()
                .map(|(class, count)| format!("{class}: {count}"))
                .join("\n"),
            Err(error) => format!("unavailable ({error})"),
        };
        response.push_message(format!(
            "Class counts:\n{class_counts}\n\n\
             Unique tokens: {}\n\
             Unique 2-grams: {}\n\
             Unique 3-grams: {}",
            unique_tokens.len(),
            bigrams.len(),
            trigrams.len()
        ));

        let bar = self.charts.bar_chart(&tokens);
        self.attach(&mut response, bar, "a bar chart of the most frequent tokens");
        let histogram = self.charts.histogram(&tokens);
        self.attach(&mut response, histogram, "a histogram of token lengths");
        let cloud = self.charts.wordcloud(&all_text).map(Some);
        self.attach(&mut response, cloud, "a word cloud");
        response
    }

    fn attach(
        &self,
        response: &mut Response,
        rendered: Result<Option<Utf8PathBuf>, ChartError>,
        what: &str,
    ) {
        match rendered {
            Ok(Some(path)) => {
                response.push_message(format!("Rendered {what}."));
                response.images.push(path);
            }
            Ok(None) => response.push_message(format!("Nothing to plot for {what}.")),
            Err(error) => response.push_message(format!("Failed to render {what}: {error}")),
        }
    }

    /// The stopword list of the session language; the empty set when no
    /// repository can provide one.
    async fn stop_word_list(&self) -> Arc<StopWordList> {
        self.stop_words
            .get_or_load(self.configs.session.language)
            .await
            .unwrap_or_else(|| Arc::new(StopWordList::empty()))
    }

    /// The tokenizer used for classifier features and the vector
    /// representations, per the tokenizer config.
    async fn feature_tokenizer(&self) -> Tokenizer {
        let tokenizer = &self.configs.tokenizer;
        let stop_words = match tokenizer.stopword_language {
            Some(language) => self.stop_words.get_or_load(language).await,
            None => None,
        };
        Tokenizer::new(
            tokenizer.normalize_text,
            stop_words,
            tokenizer.lemmatize.then(|| self.lemmatizer.clone()),
            tokenizer.stemmer,
        )
    }
}

#[cfg(test)]
mod test {
    use camino_tempfile::tempdir;

    use crate::config::Configs;

    use super::*;

    #[test]
    fn split_args_honors_quotes() {
        assert_eq!(
            split_args(r#"tokenize "Hello world" "neutralny""#).unwrap(),
            vec!["tokenize", "Hello world", "neutralny"]
        );
        assert_eq!(
            split_args("say 'quoted text' here").unwrap(),
            vec!["say", "quoted text", "here"]
        );
        assert_eq!(split_args("   ").unwrap(), Vec::<String>::new());
        assert_eq!(split_args(r#""" "x""#).unwrap(), vec!["", "x"]);
    }

    #[test]
    fn split_args_rejects_unbalanced_quotes() {
        assert!(split_args(r#"tokenize "Hello world"#).is_none());
        assert!(split_args("don't").is_none());
    }

    #[test]
    fn command_and_task_names_parse() {
        assert_eq!("full_pipeline".parse::<Command>().unwrap(), Command::FullPipeline);
        assert_eq!("n-grams".parse::<TaskName>().unwrap(), TaskName::Ngrams);
        assert!("reticulate".parse::<TaskName>().is_err());
    }

    fn router_in(root: &camino::Utf8Path) -> Router {
        let mut configs = Configs::default();
        configs.paths.root = root.to_path_buf();
        Router::new(configs).unwrap()
    }

    #[tokio::test]
    async fn start_lists_the_commands() {
        let dir = tempdir().unwrap();
        let router = router_in(dir.path());
        let response = router.handle("/start").await;
        assert!(response.messages[0].contains("/task"));
        assert!(response.messages[0].contains("/classifier"));
        assert!(response.images.is_empty());
    }

    #[tokio::test]
    async fn tokenize_task_preserves_case_and_writes_a_record() {
        let dir = tempdir().unwrap();
        let router = router_in(dir.path());
        let response = router
            .handle(r#"/task tokenize "Hello world" "neutralny""#)
            .await;
        assert_eq!(
            response.messages,
            vec![format!("Tokens: {:?}", vec!["Hello", "world"])]
        );
        let records = router.store().load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text, "Hello world");
        assert_eq!(records[0].class, "neutralny");
    }

    #[tokio::test]
    async fn unknown_task_still_writes_the_record() {
        let dir = tempdir().unwrap();
        let router = router_in(dir.path());
        let response = router
            .handle(r#"/task reticulate "Hello world" "neutralny""#)
            .await;
        assert!(response.messages[0].contains("Unknown task"));
        assert!(response.messages[0].contains("tokenize"));
        assert_eq!(router.store().load().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn task_arity_failure_has_no_side_effects() {
        let dir = tempdir().unwrap();
        let router = router_in(dir.path());
        let response = router.handle(r#"/task tokenize "only text""#).await;
        assert_eq!(response.messages, vec![USAGE_TASK.to_owned()]);
        assert!(!router.store().path().exists());
    }

    #[tokio::test]
    async fn unbalanced_quotes_degrade_to_a_usage_error() {
        let dir = tempdir().unwrap();
        let router = router_in(dir.path());
        let response = router.handle(r#"/task tokenize "oops never closed"#).await;
        assert_eq!(response.messages, vec![USAGE_TASK.to_owned()]);
        assert!(!router.store().path().exists());
    }

    #[tokio::test]
    async fn classifier_refuses_on_an_empty_store() {
        let dir = tempdir().unwrap();
        let router = router_in(dir.path());
        let response = router.handle(r#"/classifier "cokolwiek""#).await;
        assert!(response.messages[0].contains("Not enough data"));
    }

    #[tokio::test]
    async fn classifier_refuses_on_a_single_class() {
        let dir = tempdir().unwrap();
        let router = router_in(dir.path());
        router.store().save_record("dobre", "pozytywny").unwrap();
        router.store().save_record("super", "pozytywny").unwrap();
        let response = router.handle(r#"/classifier "cokolwiek""#).await;
        assert!(response.messages[0].contains("two distinct classes"));
    }

    #[tokio::test]
    async fn stats_hints_on_an_empty_store() {
        let dir = tempdir().unwrap();
        let router = router_in(dir.path());
        let response = router.handle("/stats").await;
        assert!(response.messages[0].contains("record store is empty"));
    }

    #[tokio::test]
    async fn unknown_command_gets_a_hint() {
        let dir = tempdir().unwrap();
        let router = router_in(dir.path());
        let response = router.handle("/frobnicate now").await;
        assert!(response.messages[0].contains("Unknown command"));
        let response = router.handle("hello there").await;
        assert!(response.messages[0].contains("/start"));
    }
}
