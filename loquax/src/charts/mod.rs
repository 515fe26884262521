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

//! Renders the three chart types as PNG files under the plots dir.
//! File names carry the current timestamp; a collision within the same
//! second for the same chart type overwrites the earlier file.

use std::collections::HashMap;

use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use plotters::prelude::*;
use rand::Rng;
use thiserror::Error;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

/// How many of the most frequent tokens the bar chart shows.
const BAR_CHART_TOP: usize = 10;
/// How many words the word cloud places at most.
const WORD_CLOUD_CAP: usize = 40;
/// Substituted when a word cloud is requested over blank text.
const EMPTY_CLOUD_PLACEHOLDER: &str = "brak słów";

const FILE_STAMP: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");

#[derive(Debug, Error)]
pub enum ChartError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to render the chart: {0}")]
    Render(String),
    #[error("failed to format the chart timestamp: {0}")]
    Stamp(#[from] time::error::Format),
}

fn render_error(error: impl std::fmt::Display) -> ChartError {
    ChartError::Render(error.to_string())
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
#[strum(serialize_all = "lowercase")]
enum ChartKind {
    Hist,
    Wc,
    Bar,
}

#[derive(Debug, Clone)]
pub struct ChartRenderer {
    root: Utf8PathBuf,
}

impl ChartRenderer {
    /// Creates the plots directory if it does not exist yet.
    pub fn new(root: impl AsRef<Utf8Path>) -> Result<Self, ChartError> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn chart_path(&self, kind: ChartKind) -> Result<Utf8PathBuf, ChartError> {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        let stamp = now.format(FILE_STAMP)?;
        Ok(self.root.join(format!("Sentence_{stamp}_{kind}.png")))
    }

    /// A histogram of token character lengths, bucketed per integer
    /// length. Returns [`None`] when there is nothing to plot.
    pub fn histogram(&self, tokens: &[String]) -> Result<Option<Utf8PathBuf>, ChartError> {
        let lengths: Vec<u32> = tokens
            .iter()
            .map(|token| token.chars().count() as u32)
            .collect();
        let Some(&max_length) = lengths.iter().max() else {
            return Ok(None);
        };
        let mut buckets: HashMap<u32, u32> = HashMap::new();
        for length in &lengths {
            *buckets.entry(*length).or_insert(0) += 1;
        }
        let tallest = buckets.values().max().copied().unwrap_or(1);

        let path = self.chart_path(ChartKind::Hist)?;
        // The backend borrows the path, so the drawing ends in this block.
        {
            let area = BitMapBackend::new(path.as_str(), (800, 600)).into_drawing_area();
            area.fill(&WHITE).map_err(render_error)?;

            let mut chart = ChartBuilder::on(&area)
                .caption("Token length distribution", ("sans-serif", 28))
                .margin(10)
                .x_label_area_size(40)
                .y_label_area_size(40)
                .build_cartesian_2d((1u32..max_length + 1).into_segmented(), 0u32..tallest + 1)
                .map_err(render_error)?;
            chart
                .configure_mesh()
                .x_desc("token length")
                .y_desc("count")
                .draw()
                .map_err(render_error)?;
            chart
                .draw_series(
                    Histogram::vertical(&chart)
                        .style(BLUE.mix(0.6).filled())
                        .margin(2)
                        .data(lengths.iter().map(|length| (*length, 1u32))),
                )
                .map_err(render_error)?;

            area.present().map_err(render_error)?;
        }
        Ok(Some(path))
    }

    /// A frequency sized word cloud. Blank input is replaced by a
    /// placeholder so rendering never fails on empty text.
    pub fn wordcloud(&self, text: &str) -> Result<Utf8PathBuf, ChartError> {
        let text = if text.trim().is_empty() {
            EMPTY_CLOUD_PLACEHOLDER
        } else {
            text
        };
        let mut counts: IndexMap<String, u32> = IndexMap::new();
        for token in text_processing::ops::tokenize(text) {
            *counts.entry(token.to_lowercase()).or_insert(0) += 1;
        }
        let mut ranked: Vec<(String, u32)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(WORD_CLOUD_CAP);
        let heaviest = ranked.first().map(|(_, count)| *count).unwrap_or(1);

        let path = self.chart_path(ChartKind::Wc)?;
        {
            let area = BitMapBackend::new(path.as_str(), (800, 400)).into_drawing_area();
            area.fill(&WHITE).map_err(render_error)?;

            let mut rng = rand::thread_rng();
            let mut x = 10i32;
            let mut y = 10i32;
            let mut row_height = 0i32;
            for (index, (word, count)) in ranked.iter().enumerate() {
                let size = 16.0 + 44.0 * (*count as f64 / heaviest as f64);
                let estimated_width = (0.62 * size * word.chars().count() as f64) as i32 + 12;
                if x + estimated_width > 790 {
                    x = 10;
                    y += row_height + 8;
                    row_height = 0;
                }
                if y > 340 {
                    break;
                }
                let color = Palette99::pick(index).mix(0.9);
                let jitter: i32 = rng.gen_range(-4..=4);
                area.draw(&Text::new(
                    word.clone(),
                    (x, (y + jitter).max(0)),
                    ("sans-serif", size).into_font().color(&color),
                ))
                .map_err(render_error)?;
                row_height = row_height.max(size as i32 + 6);
                x += estimated_width;
            }

            area.present().map_err(render_error)?;
        }
        Ok(path)
    }

    /// A bar chart of the ten most frequent tokens, ties broken by first
    /// encounter. Returns [`None`] for an empty token sequence.
    pub fn bar_chart(&self, tokens: &[String]) -> Result<Option<Utf8PathBuf>, ChartError> {
        let mut counts: IndexMap<&str, u32> = IndexMap::new();
        for token in tokens {
            *counts.entry(token.as_str()).or_insert(0) += 1;
        }
        if counts.is_empty() {
            return Ok(None);
        }
        let mut ranked: Vec<(&str, u32)> = counts.into_iter().collect();
        // Stable sort keeps first-encountered order among equal counts.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(BAR_CHART_TOP);
        let tallest = ranked.first().map(|(_, count)| *count).unwrap_or(1);

        let path = self.chart_path(ChartKind::Bar)?;
        {
            let area = BitMapBackend::new(path.as_str(), (1000, 600)).into_drawing_area();
            area.fill(&WHITE).map_err(render_error)?;

            let labels: Vec<String> = ranked.iter().map(|(word, _)| (*word).to_owned()).collect();
            let mut chart = ChartBuilder::on(&area)
                .caption("Most frequent tokens", ("sans-serif", 28))
                .margin(10)
                .x_label_area_size(60)
                .y_label_area_size(40)
                .build_cartesian_2d(0f64..ranked.len() as f64, 0u32..tallest + 1)
                .map_err(render_error)?;
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(ranked.len())
                .x_label_formatter(&|value| {
                    labels
                        .get(value.floor() as usize)
                        .cloned()
                        .unwrap_or_default()
                })
                .y_desc("occurrences")
                .draw()
                .map_err(render_error)?;
            chart
                .draw_series(ranked.iter().enumerate().map(|(index, (_, count))| {
                    Rectangle::new(
                        [(index as f64 + 0.15, 0), (index as f64 + 0.85, *count)],
                        GREEN.mix(0.6).filled(),
                    )
                }))
                .map_err(render_error)?;

            area.present().map_err(render_error)?;
        }
        Ok(Some(path))
    }
}

#[cfg(test)]
mod test {
    use camino_tempfile::tempdir;

    use super::*;

    #[test]
    fn creates_the_plots_dir() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("plots");
        let renderer = ChartRenderer::new(&root).unwrap();
        assert!(renderer.root().is_dir());
    }

    #[test]
    fn empty_inputs_are_guarded() {
        let dir = tempdir().unwrap();
        let renderer = ChartRenderer::new(dir.path()).unwrap();
        assert!(renderer.histogram(&[]).unwrap().is_none());
        assert!(renderer.bar_chart(&[]).unwrap().is_none());
    }

    #[test]
    fn non_empty_inputs_yield_a_path() {
        let dir = tempdir().unwrap();
        let renderer = ChartRenderer::new(dir.path()).unwrap();
        let tokens = vec!["a".to_string(), "a".to_string(), "b".to_string()];

        match renderer.bar_chart(&tokens) {
            Ok(Some(path)) => {
                assert!(path.file_name().unwrap().ends_with("_bar.png"));
                assert!(path.is_file());
            }
            Ok(None) => panic!("three tokens must produce a bar chart"),
            // Machines without fonts cannot rasterize the labels.
            Err(ChartError::Render(_)) => {}
            Err(error) => panic!("unexpected error: {error}"),
        }

        match renderer.histogram(&tokens) {
            Ok(Some(path)) => {
                assert!(path.file_name().unwrap().ends_with("_hist.png"));
                assert!(path.is_file());
            }
            Ok(None) => panic!("three tokens must produce a histogram"),
            Err(ChartError::Render(_)) => {}
            Err(error) => panic!("unexpected error: {error}"),
        }

        match renderer.wordcloud("ala ma kota ma") {
            Ok(path) => {
                assert!(path.file_name().unwrap().ends_with("_wc.png"));
                assert!(path.is_file());
            }
            Err(ChartError::Render(_)) => {}
            Err(error) => panic!("unexpected error: {error}"),
        }
    }

    #[test]
    fn chart_paths_carry_stamp_and_kind() {
        let dir = tempdir().unwrap();
        let renderer = ChartRenderer::new(dir.path()).unwrap();
        let path = renderer.chart_path(ChartKind::Bar).unwrap();
        let name = path.file_name().unwrap();
        assert!(name.starts_with("Sentence_"));
        assert!(name.ends_with("_bar.png"));
        // Sentence_YYYY-MM-DD_HH-MM-SS_bar.png
        assert_eq!(name.len(), "Sentence_0000-00-00_00-00-00_bar.png".len());
    }
}
