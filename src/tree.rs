use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Deserialize;

/// One page in the navigation tree, as supplied by the host. Children are
/// pages opened from this one. The core never mutates these records.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationNode {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    /// Unix milliseconds.
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub closed_at: Option<i64>,
    #[serde(default)]
    pub children: Vec<NavigationNode>,
}

/// Root id → root node. A BTreeMap keeps traversal order deterministic for a
/// given tree.
pub type NavigationTree = BTreeMap<String, NavigationNode>;

/// Parses the host's JSON dump of the navigation tree. Roots with an empty id
/// are discarded. An empty map is a valid state (all tabs closed) and yields
/// an empty tree; only malformed JSON is an error.
pub fn parse_navigation_tree(raw: &str) -> Result<NavigationTree> {
    let parsed: BTreeMap<String, NavigationNode> =
        serde_json::from_str(raw).context("invalid navigation tree JSON")?;

    Ok(parsed
        .into_iter()
        .filter(|(root_id, root)| !root_id.is_empty() && !root.id.is_empty())
        .collect())
}

pub fn count_nodes(tree: &NavigationTree) -> usize {
    fn count(node: &NavigationNode) -> usize {
        1 + node.children.iter().map(count).sum::<usize>()
    }
    tree.values().map(count).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_tree() {
        let raw = r#"{
            "a": {
                "id": "a",
                "url": "https://github.com",
                "title": "GitHub",
                "createdAt": 1000,
                "children": [
                    { "id": "b", "url": "https://github.com/x", "createdAt": 2000 }
                ]
            }
        }"#;

        let tree = parse_navigation_tree(raw).unwrap();
        assert_eq!(count_nodes(&tree), 2);
        assert_eq!(tree["a"].children[0].id, "b");
        assert_eq!(tree["a"].children[0].closed_at, None);
    }

    #[test]
    fn empty_root_map_yields_empty_tree() {
        let tree = parse_navigation_tree("{}").unwrap();
        assert!(tree.is_empty());
        assert_eq!(count_nodes(&tree), 0);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(parse_navigation_tree("not json").is_err());
        assert!(parse_navigation_tree("[1, 2]").is_err());
    }
}
