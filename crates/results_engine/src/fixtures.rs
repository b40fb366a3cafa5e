//! Static fixture buckets used to simulate content responses on hosts without a backend.

use std::collections::BTreeMap;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use results_core::{url_codec, DropdownState, ResultPayload};
use serde::Deserialize;

/// Bucket used for the page count and for any segment without its own bucket.
pub const DEFAULT_BUCKET: &str = "filter";

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("fixture json is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("fixture file could not be read: {0}")]
    Io(#[from] std::io::Error),
    #[error("fixture set has no `{0}` bucket")]
    MissingDefaultBucket(String),
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureBucket {
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub filter_state: Vec<DropdownState>,
}

#[derive(Debug, Deserialize)]
struct RawFixtures {
    #[serde(default)]
    results: Vec<serde_json::Value>,
    #[serde(flatten)]
    buckets: BTreeMap<String, FixtureBucket>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FixtureSet {
    buckets: BTreeMap<String, FixtureBucket>,
    results: Vec<serde_json::Value>,
    default: FixtureBucket,
}

impl FixtureSet {
    /// Parses `{ "results": [...], "filter": {...}, "<segment>": {...}, ... }`.
    pub fn from_json_str(text: &str) -> Result<Self, FixtureError> {
        let raw: RawFixtures = serde_json::from_str(text)?;
        let default = raw
            .buckets
            .get(DEFAULT_BUCKET)
            .cloned()
            .ok_or_else(|| FixtureError::MissingDefaultBucket(DEFAULT_BUCKET.to_string()))?;
        Ok(Self {
            buckets: raw.buckets,
            results: raw.results,
            default,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, FixtureError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn bucket(&self, id: &str) -> &FixtureBucket {
        self.buckets.get(id).unwrap_or(&self.default)
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    /// Builds the payload a backend would have returned for the encoded `path`.
    pub fn synthesize<R: Rng + ?Sized>(&self, path: &str, rng: &mut R) -> ResultPayload {
        let segments = url_codec::path_segments(path);
        let filter_state = if segments.len() > 1 {
            merge_dropdowns(segments.iter().map(|segment| self.bucket(segment)))
        } else {
            segments
                .first()
                .map_or(&self.default, |segment| self.bucket(segment))
                .filter_state
                .clone()
        };

        let mut results = self.results.clone();
        results.shuffle(rng);

        ResultPayload {
            title: None,
            results,
            total_pages: self.default.total_pages,
            filter_state: Some(filter_state),
        }
    }
}

/// Unions disabled options position by position across buckets.
fn merge_dropdowns<'a>(buckets: impl Iterator<Item = &'a FixtureBucket>) -> Vec<DropdownState> {
    let mut merged: Vec<DropdownState> = Vec::new();
    for bucket in buckets {
        for (idx, dropdown) in bucket.filter_state.iter().enumerate() {
            match merged.get_mut(idx) {
                Some(slot) => {
                    let previous = std::mem::take(&mut slot.disabled_options);
                    slot.id = dropdown.id.clone();
                    slot.disabled_options = unique_merge(&dropdown.disabled_options, &previous);
                }
                None => merged.push(DropdownState {
                    id: dropdown.id.clone(),
                    disabled_options: unique_merge(&dropdown.disabled_options, &[]),
                }),
            }
        }
    }
    merged
}

fn unique_merge(first: &[String], second: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(first.len() + second.len());
    for option in first.iter().chain(second) {
        if !out.contains(option) {
            out.push(option.clone());
        }
    }
    out
}
