//! Placement parameters shared by all RI generators.

use crate::error::{Error, Result};
use crate::node::{Node, Tag};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Tag assignment for every node of the cluster.
///
/// Iteration is always in ascending node order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(BTreeMap<Node, Tag>);

impl Tags {
    /// Every node gets a tag of its own, so only self-replication is excluded.
    pub fn trivial(num_nodes: usize) -> Self {
        (0..num_nodes)
            .map(|i| (Node(i), Tag(i)))
            .collect()
    }

    /// Tag of `node`, if one was assigned.
    pub fn get(&self, node: Node) -> Option<Tag> {
        self.0.get(&node).copied()
    }

    /// One past the largest tag id (0 when there are no tags).
    pub fn tags_count(&self) -> usize {
        self.0
            .values()
            .map(|tag| tag.0.saturating_add(1))
            .max()
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Node, Tag)> + '_ {
        self.0.iter().map(|(node, tag)| (*node, *tag))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if both nodes carry the same tag.
    pub fn same_tag(&self, a: Node, b: Node) -> bool {
        match (self.get(a), self.get(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }
}

impl FromIterator<(Node, Tag)> for Tags {
    fn from_iter<I: IntoIterator<Item = (Node, Tag)>>(iter: I) -> Self {
        Tags(iter.into_iter().collect())
    }
}

/// Parses either explicit `node:tag` pairs (`"0:0,1:0,2:1"`) or a positional
/// list of tags (`"0,0,1"`, node i gets the i-th tag).
impl FromStr for Tags {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut tags = BTreeMap::new();

        for (position, item) in s.split(',').map(str::trim).enumerate() {
            if item.is_empty() {
                return Err(Error::InvalidTags(format!("empty entry at position {}", position)));
            }

            let (node, tag) = match item.split_once(':') {
                Some((node, tag)) => (parse_num::<usize>(node, item)?, parse_num::<usize>(tag, item)?),
                None => (position, parse_num::<usize>(item, item)?),
            };

            if tags.insert(Node(node), Tag(tag)).is_some() {
                return Err(Error::DuplicateNode(Node(node)));
            }
        }

        Ok(Tags(tags))
    }
}

fn parse_num<T: FromStr>(raw: &str, item: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| Error::InvalidTags(format!("can't parse '{}'", item)))
}

/// Input of an RI generator.
///
/// Values are passed through to the generator as is: nothing here checks that
/// `num_slaves < num_nodes` or that every node below `num_nodes` has a tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VbmapParams {
    pub num_nodes: usize,
    /// Replicas per node (both given and taken).
    pub num_slaves: usize,
    pub tags: Tags,
}

impl VbmapParams {
    pub fn new(num_nodes: usize, num_slaves: usize, tags: Tags) -> Self {
        Self {
            num_nodes,
            num_slaves,
            tags,
        }
    }

    pub fn tags_count(&self) -> usize {
        self.tags.tags_count()
    }
}

/// Generic tuning knobs understood by search-based generators.
///
/// Solver-backed generators accept and ignore them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// How many RIs a randomized generator may try before giving up.
    pub num_ri_retries: usize,
    /// Allow same-tag replicas when nothing else fits.
    pub relax_tag_constraints: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            num_ri_retries: 25,
            relax_tag_constraints: false,
        }
    }
}
