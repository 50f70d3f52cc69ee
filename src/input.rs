use postman::Edge;
use serde::Deserialize;
use std::io::Read;

/// Vertex used as the tour start when none is given and the graph has it
pub const DEFAULT_START: &str = "V1";

/// An edge as written in the input JSON, either `["from", "to", "label"]` or an object with an optional weight
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EdgeRecord {
    Triple(String, String, String),
    Weighted {
        from: String,
        to: String,
        label: String,
        #[serde(default = "unit_weight")]
        weight: u64,
    },
}

fn unit_weight() -> u64 {
    1
}

impl From<EdgeRecord> for Edge<String, String, u64> {
    fn from(record: EdgeRecord) -> Self {
        match record {
            EdgeRecord::Triple(from, to, label) => Edge::unit(from, to, label),
            EdgeRecord::Weighted {
                from,
                to,
                label,
                weight,
            } => Edge::new(from, to, label, weight),
        }
    }
}

pub fn read_edges(reader: impl Read) -> serde_json::Result<Vec<Edge<String, String, u64>>> {
    let records: Vec<EdgeRecord> = serde_json::from_reader(reader)?;
    Ok(records.into_iter().map(Edge::from).collect())
}

/// `requested` if given, else [DEFAULT_START] when some edge touches it, else `None` to start at the first vertex
pub fn resolve_start(edges: &[Edge<String, String, u64>], requested: Option<String>) -> Option<String> {
    requested.or_else(|| {
        edges
            .iter()
            .any(|edge| edge.from == DEFAULT_START || edge.to == DEFAULT_START)
            .then(|| DEFAULT_START.to_owned())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn triples_and_weighted_objects_are_accepted() {
        let json = r#"[
            ["A", "B", "e1"],
            {"from": "B", "to": "C", "label": "e2", "weight": 4},
            {"from": "C", "to": "A", "label": "e3"}
        ]"#;
        let edges = read_edges(json.as_bytes()).unwrap();
        assert_eq!(
            edges,
            vec![
                Edge::unit("A".to_owned(), "B".to_owned(), "e1".to_owned()),
                Edge::new("B".to_owned(), "C".to_owned(), "e2".to_owned(), 4),
                Edge::unit("C".to_owned(), "A".to_owned(), "e3".to_owned()),
            ]
        );
    }

    #[test]
    fn malformed_edges_are_rejected() {
        assert!(read_edges(r#"[["A", "B"]]"#.as_bytes()).is_err());
        assert!(read_edges(r#"{"from": "A"}"#.as_bytes()).is_err());
    }

    #[test]
    fn start_defaults_to_v1_when_present() {
        let with_v1 = read_edges(r#"[["V2", "V1", "a1"]]"#.as_bytes()).unwrap();
        let without_v1 = read_edges(r#"[["A", "B", "e1"]]"#.as_bytes()).unwrap();

        assert_eq!(resolve_start(&with_v1, None), Some("V1".to_owned()));
        assert_eq!(resolve_start(&without_v1, None), None);
        assert_eq!(
            resolve_start(&with_v1, Some("V2".to_owned())),
            Some("V2".to_owned())
        );
    }
}
