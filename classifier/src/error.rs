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

use thiserror::Error;

/// The enumerated failure surface of training and prediction.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("found {found} stored example(s) but training needs at least {needed}")]
    NotEnoughExamples { found: usize, needed: usize },
    #[error("training needs at least two distinct classes among the stored examples")]
    NotEnoughClasses,
    #[error(transparent)]
    Training(#[from] linfa_logistic::error::Error),
    #[error("the model returned no prediction for the input")]
    EmptyPrediction,
}
