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

use crate::config::Configs;

pub const LOQUAX_WELCOME: &str = "loquax - a small NLP responder. Type a command, /start for help.";

/// A config with every optional knob set, as a starting point for users.
pub fn create_example_config() -> Configs {
    let mut configs = Configs::default();
    configs.tokenizer.stopword_language = Some(Language::Pol);
    configs.tokenizer.lemmatize = true;
    configs.tokenizer.stemmer = Some(rust_stemmers::Algorithm::English);
    configs.paths.record_store = Some(configs.paths.record_store_file());
    configs.paths.plots = Some(configs.paths.plots_dir());
    configs.paths.resources = Some(configs.paths.resources_dir());
    configs
}
