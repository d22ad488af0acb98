//! CART decision tree over Gini impurity.

use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

/// Node stored in a flat arena; the root is index 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Leaf {
        /// Share of positive samples that reached this leaf.
        probability: f64,
    },
    Split {
        feature: usize,
        /// Samples with `value <= threshold` go left.
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Positive-class probability for one feature row.
    #[must_use]
    pub fn probability(&self, row: &[f64]) -> f64 {
        let mut at = 0;
        loop {
            match self.nodes.get(at) {
                Some(Node::Leaf { probability }) => return *probability,
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = row.get(*feature).copied().unwrap_or(f64::NAN);
                    at = if value <= *threshold { *left } else { *right };
                }
                None => return 0.0,
            }
        }
    }

    /// Longest root-to-leaf path, counted in splits.
    #[must_use]
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], at: usize) -> usize {
            match &nodes[at] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
            }
        }
        if self.nodes.is_empty() {
            0
        } else {
            walk(&self.nodes, 0)
        }
    }
}

/// A fitted tree plus the impurity decrease each feature contributed.
pub(crate) struct GrownTree {
    pub tree: DecisionTree,
    pub importances: Vec<f64>,
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    gain: f64,
}

pub(crate) struct TreeGrower<'a, R> {
    rows: &'a [Vec<f64>],
    labels: &'a [bool],
    max_depth: usize,
    max_features: usize,
    rng: &'a mut R,
    nodes: Vec<Node>,
    importances: Vec<f64>,
}

impl<'a, R: Rng> TreeGrower<'a, R> {
    pub(crate) fn new(
        rows: &'a [Vec<f64>],
        labels: &'a [bool],
        max_depth: usize,
        max_features: usize,
        rng: &'a mut R,
    ) -> Self {
        let width = rows.first().map_or(0, Vec::len);
        Self {
            rows,
            labels,
            max_depth,
            max_features: max_features.clamp(1, width.max(1)),
            rng,
            nodes: Vec::new(),
            importances: vec![0.0; width],
        }
    }

    /// Grow a tree over the given sample indices (repeats allowed).
    pub(crate) fn grow(mut self, samples: Vec<usize>) -> GrownTree {
        self.grow_node(samples, 0);
        GrownTree {
            tree: DecisionTree { nodes: self.nodes },
            importances: self.importances,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn grow_node(&mut self, samples: Vec<usize>, depth: usize) -> usize {
        let at = self.nodes.len();
        let positives = samples.iter().filter(|&&s| self.labels[s]).count();
        let probability = if samples.is_empty() {
            0.0
        } else {
            positives as f64 / samples.len() as f64
        };
        self.nodes.push(Node::Leaf { probability });

        let pure = positives == 0 || positives == samples.len();
        if pure || depth >= self.max_depth || samples.len() < 2 {
            return at;
        }

        let Some(best) = self.best_split(&samples, positives) else {
            return at;
        };
        self.importances[best.feature] += best.gain;

        let (left, right): (Vec<usize>, Vec<usize>) = samples
            .into_iter()
            .partition(|&s| self.rows[s][best.feature] <= best.threshold);
        let left = self.grow_node(left, depth + 1);
        let right = self.grow_node(right, depth + 1);
        self.nodes[at] = Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            left,
            right,
        };
        at
    }

    /// Best Gini split over a random feature subset, measured as the
    /// weighted impurity decrease. `None` when no candidate improves.
    fn best_split(&mut self, samples: &[usize], positives: usize) -> Option<BestSplit> {
        let width = self.importances.len();
        let parent = weighted_gini(positives, samples.len());
        let mut best: Option<BestSplit> = None;

        let candidates = index::sample(&mut *self.rng, width, self.max_features);
        for feature in candidates {
            let mut ordered: Vec<(f64, bool)> = samples
                .iter()
                .map(|&s| (self.rows[s][feature], self.labels[s]))
                .collect();
            ordered.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut left_positives = 0;
            for split in 1..ordered.len() {
                if ordered[split - 1].1 {
                    left_positives += 1;
                }
                let (low, high) = (ordered[split - 1].0, ordered[split].0);
                if low >= high {
                    continue;
                }
                let right_positives = positives - left_positives;
                let children = weighted_gini(left_positives, split)
                    + weighted_gini(right_positives, ordered.len() - split);
                let gain = parent - children;
                if gain > 1e-12 && best.as_ref().is_none_or(|b| gain > b.gain) {
                    best = Some(BestSplit {
                        feature,
                        threshold: low + (high - low) / 2.0,
                        gain,
                    });
                }
            }
        }
        best
    }
}

/// Gini impurity scaled by sample count.
#[allow(clippy::cast_precision_loss)]
fn weighted_gini(positives: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let p = positives as f64;
    let n = total as f64;
    2.0 * p * (n - p) / n
}
