//! GraphQL documents, filter variables and response envelope decoding.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tally_core::{ItemKind, RawItem};

use crate::error::QueryError;

pub const SCENE_QUERY: &str = r"
query FindScenesWithOCount($scene_filter: SceneFilterType) {
  findScenes(scene_filter: $scene_filter) {
    count
    scenes {
      id
      title
      rating100
      o_counter
      created_at
      updated_at
      last_played_at
      play_count
      date
      tags { id, name }
    }
  }
}
";

pub const IMAGE_QUERY: &str = r"
query FindImagesWithOCount($image_filter: ImageFilterType) {
  findImages(image_filter: $image_filter) {
    count
    images {
      id
      title
      rating100
      o_counter
      created_at
      updated_at
      date
      tags { id, name }
    }
  }
}
";

#[must_use]
pub const fn document_for(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Scene => SCENE_QUERY,
        ItemKind::Image => IMAGE_QUERY,
    }
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CriterionModifier {
    Equals,
    GreaterThan,
    LessThan,
}

/// Integer criterion on the item's mark counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarkCountFilter {
    pub value: i64,
    pub modifier: CriterionModifier,
}

impl MarkCountFilter {
    /// Items with a mark count strictly greater than zero.
    #[must_use]
    pub const fn positive() -> Self {
        Self {
            value: 0,
            modifier: CriterionModifier::GreaterThan,
        }
    }

    /// Variables object for the given kind's query.
    #[must_use]
    pub fn variables(&self, kind: ItemKind) -> Value {
        let mut filter = serde_json::Map::new();
        filter.insert("o_counter".into(), json!(self));
        let mut variables = serde_json::Map::new();
        variables.insert(kind.filter_variable().into(), Value::Object(filter));
        Value::Object(variables)
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: Value,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlErrorEntry>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlErrorEntry {
    pub message: String,
}

impl GraphQlResponse {
    /// Return `data`, or the protocol error the response carries.
    ///
    /// # Errors
    ///
    /// [`QueryError::GraphQl`] when `errors` is non-empty,
    /// [`QueryError::MissingData`] when `data` is absent or null.
    pub fn into_data(self) -> Result<Value, QueryError> {
        if let Some(errors) = self.errors.filter(|errors| !errors.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            tracing::error!(?messages, "GraphQL errors");
            return Err(QueryError::GraphQl { messages });
        }
        match self.data {
            Some(Value::Null) | None => Err(QueryError::MissingData("data".into())),
            Some(data) => Ok(data),
        }
    }
}

/// One kind's result page: the server-side total and the returned items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPage {
    pub count: u64,
    pub items: Vec<RawItem>,
}

/// Pull `{count, <list>}` for `kind` out of a query's `data` object.
///
/// # Errors
///
/// [`QueryError::MissingData`] when the root or list field is absent,
/// [`QueryError::Parse`] when items do not match the wire shape.
pub fn extract_page(kind: ItemKind, mut data: Value) -> Result<ItemPage, QueryError> {
    let mut root = data
        .get_mut(kind.query_field())
        .map(Value::take)
        .ok_or_else(|| QueryError::MissingData(kind.query_field().into()))?;

    let count = root.get("count").and_then(Value::as_u64).unwrap_or(0);
    let list = root
        .get_mut(kind.list_field())
        .map(Value::take)
        .ok_or_else(|| {
            QueryError::MissingData(format!("{}.{}", kind.query_field(), kind.list_field()))
        })?;
    let items: Vec<RawItem> =
        serde_json::from_value(list).map_err(|e| QueryError::Parse(e.to_string()))?;

    Ok(ItemPage { count, items })
}
