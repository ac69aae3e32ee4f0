//! Replica indicator (RI) matrix.
//!
//! `matrix[i][j] == true` means node `j` holds a replica of data owned by
//! node `i`. Rows therefore describe where a node's replicas go and columns
//! describe how many replicas a node receives.

use crate::error::RiViolation;
use crate::node::Node;
use crate::params::VbmapParams;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How strictly a generated RI keeps replicas out of the source's tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagAwarenessRank {
    /// No replica ever shares a tag with its source node.
    StrictlyTagAware,
    /// Same-tag replicas are avoided where possible but not ruled out.
    LooselyTagAware,
    TagUnaware,
}

impl fmt::Display for TagAwarenessRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TagAwarenessRank::StrictlyTagAware => "strictly tag aware",
            TagAwarenessRank::LooselyTagAware => "loosely tag aware",
            TagAwarenessRank::TagUnaware => "tag unaware",
        })
    }
}

/// A generated replica placement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RI {
    /// Row-major N×N matrix.
    pub matrix: Vec<Vec<bool>>,
    pub tag_awareness_rank: TagAwarenessRank,
}

impl RI {
    pub fn new(matrix: Vec<Vec<bool>>, tag_awareness_rank: TagAwarenessRank) -> Self {
        Self {
            matrix,
            tag_awareness_rank,
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.matrix.len()
    }

    /// Number of replicas of node `row`'s data.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range. Call [`RI::verify`] first on
    /// matrices from an untrusted source.
    pub fn row_sum(&self, row: usize) -> usize {
        self.matrix[row].iter().filter(|&&cell| cell).count()
    }

    /// Number of replicas held by node `col`.
    ///
    /// # Panics
    ///
    /// Panics if any row is shorter than `col + 1`.
    pub fn col_sum(&self, col: usize) -> usize {
        self.matrix.iter().filter(|row| row[col]).count()
    }

    /// Nodes holding replicas of `node`'s data.
    ///
    /// # Panics
    ///
    /// Panics if `node` is out of range.
    pub fn replicas_of(&self, node: Node) -> impl Iterator<Item = Node> + '_ {
        self.matrix[node.0]
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell)
            .map(|(j, _)| Node(j))
    }

    /// Checks the balancing invariants against the parameters that produced
    /// this RI: N×N shape, `num_slaves` per row and per column, and no
    /// same-tag cell when the RI claims to be strictly tag aware.
    pub fn verify(&self, params: &VbmapParams) -> Result<(), RiViolation> {
        let n = params.num_nodes;

        if self.matrix.len() != n {
            return Err(RiViolation::RowCount {
                rows: self.matrix.len(),
                expected: n,
            });
        }

        for (row, cells) in self.matrix.iter().enumerate() {
            if cells.len() != n {
                return Err(RiViolation::RowLength {
                    row,
                    len: cells.len(),
                    expected: n,
                });
            }
        }

        for row in 0..n {
            let count = self.row_sum(row);
            if count != params.num_slaves {
                return Err(RiViolation::RowSum {
                    row,
                    count,
                    expected: params.num_slaves,
                });
            }
        }

        for col in 0..n {
            let count = self.col_sum(col);
            if count != params.num_slaves {
                return Err(RiViolation::ColumnSum {
                    col,
                    count,
                    expected: params.num_slaves,
                });
            }
        }

        if self.tag_awareness_rank == TagAwarenessRank::StrictlyTagAware {
            for i in 0..n {
                for j in 0..n {
                    if self.matrix[i][j] && params.tags.same_tag(Node(i), Node(j)) {
                        return Err(RiViolation::SameTag {
                            owner: i,
                            replica: j,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for RI {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.matrix {
            let cells: Vec<&str> = row.iter().map(|&cell| if cell { "1" } else { "0" }).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Tags;

    fn ri(rows: &[&[u8]]) -> RI {
        RI::new(
            rows.iter()
                .map(|row| row.iter().map(|&v| v != 0).collect())
                .collect(),
            TagAwarenessRank::StrictlyTagAware,
        )
    }

    fn two_racks() -> VbmapParams {
        VbmapParams::new(4, 1, "0:0,1:0,2:1,3:1".parse().unwrap())
    }

    #[test]
    fn test_sums() {
        let ri = ri(&[&[0, 1, 1], &[1, 0, 0], &[0, 0, 0]]);
        assert_eq!(ri.num_nodes(), 3);
        assert_eq!(ri.row_sum(0), 2);
        assert_eq!(ri.col_sum(0), 1);
        assert_eq!(ri.col_sum(2), 1);
        let replicas: Vec<_> = ri.replicas_of(Node(0)).collect();
        assert_eq!(replicas, vec![Node(1), Node(2)]);
    }

    #[test]
    #[should_panic]
    fn test_row_sum_out_of_range() {
        ri(&[&[0, 1], &[1, 0]]).row_sum(2);
    }

    #[test]
    #[should_panic]
    fn test_col_sum_on_ragged_matrix() {
        ri(&[&[0, 1], &[1]]).col_sum(1);
    }

    #[test]
    #[should_panic]
    fn test_replicas_of_unknown_node() {
        let _ = ri(&[&[0, 1], &[1, 0]]).replicas_of(Node(5)).count();
    }

    #[test]
    fn test_verify_ok() {
        let ri = ri(&[&[0, 0, 1, 0], &[0, 0, 0, 1], &[1, 0, 0, 0], &[0, 1, 0, 0]]);
        assert_eq!(ri.verify(&two_racks()), Ok(()));
    }

    #[test]
    fn test_verify_same_tag() {
        let ri = ri(&[&[0, 1, 0, 0], &[1, 0, 0, 0], &[0, 0, 0, 1], &[0, 0, 1, 0]]);
        assert_eq!(
            ri.verify(&two_racks()),
            Err(RiViolation::SameTag { owner: 0, replica: 1 })
        );

        let loose = RI::new(ri.matrix.clone(), TagAwarenessRank::LooselyTagAware);
        assert_eq!(loose.verify(&two_racks()), Ok(()));
    }

    #[test]
    fn test_verify_sums() {
        let rows = ri(&[&[0, 0, 1, 1], &[0, 0, 0, 0], &[1, 0, 0, 0], &[0, 1, 0, 0]]);
        assert_eq!(
            rows.verify(&two_racks()),
            Err(RiViolation::RowSum { row: 0, count: 2, expected: 1 })
        );

        let cols = ri(&[&[0, 0, 1, 0], &[0, 0, 1, 0], &[1, 0, 0, 0], &[0, 1, 0, 0]]);
        assert_eq!(
            cols.verify(&two_racks()),
            Err(RiViolation::ColumnSum { col: 2, count: 2, expected: 1 })
        );
    }

    #[test]
    fn test_verify_shape() {
        let params = VbmapParams::new(2, 0, Tags::trivial(2));
        assert_eq!(
            ri(&[&[0, 0]]).verify(&params),
            Err(RiViolation::RowCount { rows: 1, expected: 2 })
        );
        assert_eq!(
            ri(&[&[0, 0], &[0]]).verify(&params),
            Err(RiViolation::RowLength { row: 1, len: 1, expected: 2 })
        );
    }

    #[test]
    fn test_display() {
        let ri = ri(&[&[0, 1], &[1, 0]]);
        assert_eq!(ri.to_string(), "0 1\n1 0\n");
    }
}
