use serde::Deserialize;

const LEAF: i64 = -1;

/// One fitted decision tree, stored as parallel node arrays.
///
/// Node `i` is a leaf when both children are `-1`. Otherwise traversal goes
/// to `children_left[i]` when `x[feature[i]] <= threshold[i]` and to
/// `children_right[i]` otherwise. `value[i]` holds per-class weights.
#[derive(Deserialize, Debug, Clone)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

impl DecisionTree {
    fn node_count(&self) -> usize {
        self.children_left.len()
    }

    fn is_leaf(&self, node: usize) -> bool {
        self.children_left[node] == LEAF && self.children_right[node] == LEAF
    }

    fn validate(&self, n_features: usize, n_classes: usize) -> std::result::Result<(), String> {
        let nodes = self.node_count();
        if nodes == 0 {
            return Err("tree has no nodes".to_string());
        }
        if [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ]
        .iter()
        .any(|&len| len != nodes)
        {
            return Err(format!("node arrays disagree on length (expected {})", nodes));
        }

        for node in 0..nodes {
            let weights = &self.value[node];
            if weights.len() != n_classes {
                return Err(format!(
                    "node {} has {} class weights, expected {}",
                    node,
                    weights.len(),
                    n_classes
                ));
            }
            if self.is_leaf(node) {
                if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
                    return Err(format!("leaf {} has a negative or non-finite weight", node));
                }
                continue;
            }
            // Children must point strictly forward so every walk terminates.
            for child in [self.children_left[node], self.children_right[node]] {
                if child <= node as i64 || child >= nodes as i64 {
                    return Err(format!("node {} has out-of-order child {}", node, child));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(format!("node {} splits on unknown feature {}", node, feature));
            }
            if self.threshold[node].is_nan() {
                return Err(format!("node {} has a NaN threshold", node));
            }
        }
        Ok(())
    }

    /// Normalised class probabilities at the leaf `x` falls into.
    fn leaf_probabilities(&self, x: &[f64]) -> Vec<f64> {
        let mut node = 0;
        while !self.is_leaf(node) {
            let value = x[self.feature[node] as usize];
            node = if value <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        let weights = &self.value[node];
        let total: f64 = weights.iter().sum();
        if total > 0.0 {
            weights.iter().map(|w| w / total).collect()
        } else {
            vec![0.0; weights.len()]
        }
    }
}

/// A random forest over a fixed label set.
#[derive(Deserialize, Debug, Clone)]
pub struct RandomForest {
    pub classes: Vec<String>,
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.classes.is_empty() {
            return Err("forest has no classes".to_string());
        }
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        if self.n_features == 0 {
            return Err("forest expects zero features".to_string());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features, self.classes.len())
                .map_err(|e| format!("tree {}: {}", i, e))?;
        }
        Ok(())
    }

    /// Mean of the per-tree leaf probabilities.
    pub fn predict_proba(&self, x: &[f64]) -> Vec<f64> {
        let mut totals = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            for (total, p) in totals.iter_mut().zip(tree.leaf_probabilities(x)) {
                *total += p;
            }
        }
        let n_trees = self.trees.len() as f64;
        totals.iter_mut().for_each(|t| *t /= n_trees);
        totals
    }

    /// Label with the highest mean probability; the first class wins ties.
    pub fn predict(&self, x: &[f64]) -> &str {
        let probabilities = self.predict_proba(x);
        let mut best = 0;
        for (i, p) in probabilities.iter().enumerate().skip(1) {
            if *p > probabilities[best] {
                best = i;
            }
        }
        &self.classes[best]
    }
}
