use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Sentinel value meaning "this dimension is not filtered".
pub const NO_FILTER: &str = "*";
pub const FIRST_PAGE: u32 = 1;

/// Open mapping of filter dimension id (year, month, topic, ...) to the selected value.
/// Dimensions missing from the map read as [`NO_FILTER`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSelection(BTreeMap<String, String>);

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, dimension: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(dimension, value);
        self
    }

    pub fn set(&mut self, dimension: impl Into<String>, value: impl Into<String>) {
        self.0.insert(dimension.into(), value.into());
    }

    pub fn get(&self, dimension: &str) -> &str {
        self.0.get(dimension).map(String::as_str).unwrap_or(NO_FILTER)
    }

    pub fn is_filtered(&self, dimension: &str) -> bool {
        self.get(dimension) != NO_FILTER
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterSelection {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionKind {
    Next,
    Prev,
    Jump,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationData {
    pub current: u32,
    pub total: u32,
    pub last_action: Option<ActionKind>,
}

impl PaginationData {
    pub fn new(current: u32, total: u32) -> Self {
        Self {
            current,
            total,
            last_action: None,
        }
    }

    pub fn with_action(mut self, action: ActionKind) -> Self {
        self.last_action = Some(action);
        self
    }

    /// Pulls `current` into `[1, max(total, 1)]`.
    pub fn clamped(mut self) -> Self {
        let last = self.total.max(FIRST_PAGE);
        self.current = self.current.clamp(FIRST_PAGE, last);
        self
    }

    pub fn is_first_page(&self) -> bool {
        self.current <= FIRST_PAGE
    }
}

impl Default for PaginationData {
    fn default() -> Self {
        Self::new(FIRST_PAGE, 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub is_initial: bool,
    pub data: FilterSelection,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub is_initial: bool,
    pub data: PaginationData,
}

/// What is currently shown: the filter and pagination selection reflected in the UI and URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub filter: FilterState,
    pub pagination: PaginationState,
}

impl ViewState {
    /// State as read from the server-rendered page, before any user interaction.
    pub fn initial(filter: FilterSelection, pagination: PaginationData) -> Self {
        Self {
            filter: FilterState {
                is_initial: true,
                data: filter,
            },
            pagination: PaginationState {
                is_initial: true,
                data: pagination,
            },
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::initial(FilterSelection::new(), PaginationData::default())
    }
}
