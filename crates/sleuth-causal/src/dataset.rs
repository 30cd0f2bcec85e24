//! Upstream tabular rows → graph input.
//!
//! Each row yields one node. `caused_by` lists ids that cause this row,
//! `caused` lists ids this row causes. Optional fields may be null;
//! rows without `id` or `embedding` are rejected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sleuth_core::errors::{GraphError, SleuthResult};
use sleuth_core::models::Node;

/// One dataset row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRow {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, alias = "proposition")]
    pub description: Option<String>,
    #[serde(default)]
    pub datetime: Option<DateTime<Utc>>,
    #[serde(default)]
    pub datetimes: Option<Vec<DateTime<Utc>>>,
    #[serde(default)]
    pub frequency: Option<u32>,
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
    #[serde(default)]
    pub caused_by: Option<Vec<String>>,
    #[serde(default)]
    pub caused: Option<Vec<String>>,
}

/// Nodes and `(source, target)` edges ready for [`GraphStore::build`](crate::GraphStore::build).
#[derive(Debug, Clone, Default)]
pub struct GraphInput {
    pub nodes: Vec<Node>,
    pub edges: Vec<(String, String)>,
}

/// Parse a JSON array of rows.
pub fn parse_json(text: &str) -> SleuthResult<Vec<NodeRow>> {
    Ok(serde_json::from_str(text)?)
}

/// Parse JSON Lines, one row per non-blank line.
pub fn parse_jsonl(text: &str) -> SleuthResult<Vec<NodeRow>> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).map_err(Into::into))
        .collect()
}

/// Convert rows into nodes and edges. Edge endpoints are not checked here.
pub fn rows_to_input(rows: Vec<NodeRow>) -> SleuthResult<GraphInput> {
    let mut input = GraphInput::default();
    for (row_idx, row) in rows.into_iter().enumerate() {
        let id = row
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or(GraphError::MissingField {
                row: row_idx,
                field: "id",
            })?;
        let embedding = row.embedding.ok_or(GraphError::MissingField {
            row: row_idx,
            field: "embedding",
        })?;

        let mut datetimes = row.datetimes.unwrap_or_default();
        if let Some(dt) = row.datetime {
            if !datetimes.contains(&dt) {
                datetimes.push(dt);
            }
        }

        for cause in row.caused_by.into_iter().flatten() {
            input.edges.push((cause, id.clone()));
        }
        for effect in row.caused.into_iter().flatten() {
            input.edges.push((id.clone(), effect));
        }

        input.nodes.push(
            Node::new(id, row.description.unwrap_or_default(), embedding)
                .with_datetimes(datetimes)
                .with_frequency(row.frequency.unwrap_or(1)),
        );
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleuth_core::SleuthError;

    #[test]
    fn proposition_is_an_alias_for_description() {
        let rows = parse_json(r#"[{"id":"a","proposition":"rates rose","embedding":[1.0]}]"#)
            .unwrap();
        assert_eq!(rows[0].description.as_deref(), Some("rates rose"));
    }

    #[test]
    fn null_optional_fields_are_tolerated() {
        let rows = parse_json(
            r#"[{"id":"a","description":null,"datetime":null,"frequency":null,"embedding":[0.5],"caused_by":null}]"#,
        )
        .unwrap();
        let input = rows_to_input(rows).unwrap();
        assert_eq!(input.nodes.len(), 1);
        assert_eq!(input.nodes[0].frequency, 1);
        assert_eq!(input.nodes[0].description, "");
        assert!(input.edges.is_empty());
    }

    #[test]
    fn missing_id_is_rejected_with_row_number() {
        let rows = parse_json(r#"[{"id":"a","embedding":[1.0]},{"embedding":[1.0]}]"#).unwrap();
        let err = rows_to_input(rows).unwrap_err();
        assert!(matches!(
            err,
            SleuthError::Graph(GraphError::MissingField { row: 1, field: "id" })
        ));
    }

    #[test]
    fn missing_embedding_is_rejected() {
        let rows = parse_json(r#"[{"id":"a"}]"#).unwrap();
        let err = rows_to_input(rows).unwrap_err();
        assert!(matches!(
            err,
            SleuthError::Graph(GraphError::MissingField {
                field: "embedding",
                ..
            })
        ));
    }

    #[test]
    fn edge_lists_become_directed_edges() {
        let rows = parse_json(
            r#"[{"id":"b","embedding":[1.0],"caused_by":["a"],"caused":["c"]}]"#,
        )
        .unwrap();
        let input = rows_to_input(rows).unwrap();
        assert_eq!(
            input.edges,
            vec![("a".into(), "b".into()), ("b".into(), "c".into())]
        );
    }

    #[test]
    fn single_datetime_merges_into_datetimes() {
        let rows = parse_json(
            r#"[{"id":"a","embedding":[1.0],"datetime":"2024-03-01T00:00:00Z","datetimes":["2024-01-01T00:00:00Z"]}]"#,
        )
        .unwrap();
        let input = rows_to_input(rows).unwrap();
        let node = &input.nodes[0];
        assert_eq!(node.datetimes.len(), 2);
        assert_eq!(
            node.representative_datetime().unwrap().to_rfc3339(),
            "2024-01-01T00:00:00+00:00"
        );
    }

    #[test]
    fn jsonl_skips_blank_lines() {
        let text = "{\"id\":\"a\",\"embedding\":[1]}\n\n{\"id\":\"b\",\"embedding\":[2]}\n";
        let rows = parse_jsonl(text).unwrap();
        assert_eq!(rows.len(), 2);
    }
}
