//! Catalog facet filters surfaced alongside search results.
//!
//! The catalog tool returns `available_filters` describing facets (price
//! range, availability, ...) the caller may apply on a follow-up turn. They
//! are owned transiently by one response: reconstructed fresh per search and
//! never merged across turns — a follow-up applies one only by re-submitting
//! an augmented query string.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A selectable option within a facet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOption {
    /// Human-readable label, e.g. "0 - 2000".
    pub label: String,
    /// Opaque tool-side input to apply the option.
    pub input: Value,
}

/// The options carried by a facet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterValues {
    /// Ordered options as the tool returned them.
    pub input_options: Vec<FilterOption>,
}

/// A facet the caller may apply on a follow-up search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Facet label, e.g. "Price" or "Availability".
    pub label: String,
    /// Facet options.
    pub values: FilterValues,
}

impl Filter {
    /// Extracts well-formed filters from a raw tool payload's
    /// `available_filters` array. Malformed entries are skipped.
    pub fn from_tool_payload(payload: &Value) -> Vec<Filter> {
        payload
            .get("available_filters")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|e| serde_json::from_value(e.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}
