//! Decision-tree ensembles exported to JSON.
//!
//! A split sends a sample left when `x[feature] <= threshold`. Each leaf holds
//! per-class weights which are normalised per tree and averaged over the
//! ensemble; the class with the highest mean probability wins, ties going to
//! the lower class index.

use crate::error::{Result, SmartFarmError};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEnsemble {
    n_features: usize,
    classes: Vec<String>,
    trees: Vec<Tree>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Tree {
    nodes: Vec<Node>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

impl TreeEnsemble {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            SmartFarmError::Model(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let model = Self::from_json(&json)
            .map_err(|e| SmartFarmError::Model(format!("{}: {}", path.display(), e)))?;

        tracing::debug!(
            path = %path.display(),
            trees = model.trees.len(),
            classes = model.classes.len(),
            "Loaded tree ensemble"
        );

        Ok(model)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let model: TreeEnsemble = serde_json::from_str(json)
            .map_err(|e| SmartFarmError::Model(format!("Invalid model JSON: {}", e)))?;
        model.validate()?;
        Ok(model)
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    fn validate(&self) -> Result<()> {
        if self.n_features == 0 {
            return Err(SmartFarmError::Model("n_features must be positive".into()));
        }
        if self.classes.is_empty() {
            return Err(SmartFarmError::Model("model has no classes".into()));
        }
        if self.trees.is_empty() {
            return Err(SmartFarmError::Model("model has no trees".into()));
        }

        for (t, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(SmartFarmError::Model(format!("tree {} has no nodes", t)));
            }

            for (i, node) in tree.nodes.iter().enumerate() {
                match node {
                    Node::Split {
                        feature,
                        threshold,
                        left,
                        right,
                    } => {
                        if *feature >= self.n_features {
                            return Err(SmartFarmError::Model(format!(
                                "tree {} node {} splits on feature {} of {}",
                                t, i, feature, self.n_features
                            )));
                        }
                        if !threshold.is_finite() {
                            return Err(SmartFarmError::Model(format!(
                                "tree {} node {} has a non-finite threshold",
                                t, i
                            )));
                        }
                        // Children must come after their parent, which rules out cycles
                        for child in [*left, *right] {
                            if child <= i || child >= tree.nodes.len() {
                                return Err(SmartFarmError::Model(format!(
                                    "tree {} node {} has invalid child {}",
                                    t, i, child
                                )));
                            }
                        }
                    }
                    Node::Leaf { value } => {
                        if value.len() != self.classes.len() {
                            return Err(SmartFarmError::Model(format!(
                                "tree {} leaf {} has {} weights for {} classes",
                                t,
                                i,
                                value.len(),
                                self.classes.len()
                            )));
                        }
                        let total: f64 = value.iter().sum();
                        if value.iter().any(|w| !w.is_finite() || *w < 0.0) || total <= 0.0 {
                            return Err(SmartFarmError::Model(format!(
                                "tree {} leaf {} has invalid weights",
                                t, i
                            )));
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Mean class probabilities across the ensemble.
    pub fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>> {
        if features.len() != self.n_features {
            return Err(SmartFarmError::Prediction(format!(
                "expected {} features, got {}",
                self.n_features,
                features.len()
            )));
        }
        if let Some(pos) = features.iter().position(|x| !x.is_finite()) {
            return Err(SmartFarmError::Prediction(format!(
                "feature {} is not a finite number",
                pos
            )));
        }

        let mut proba = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            let leaf = tree.leaf_for(features);
            let total: f64 = leaf.iter().sum();
            for (p, w) in proba.iter_mut().zip(leaf) {
                *p += w / total;
            }
        }

        let n = self.trees.len() as f64;
        for p in &mut proba {
            *p /= n;
        }

        Ok(proba)
    }

    /// Most probable class name.
    pub fn predict(&self, features: &[f64]) -> Result<&str> {
        let proba = self.predict_proba(features)?;

        let mut best = 0;
        for (i, p) in proba.iter().enumerate().skip(1) {
            if *p > proba[best] {
                best = i;
            }
        }

        Ok(&self.classes[best])
    }
}

impl Tree {
    fn leaf_for(&self, features: &[f64]) -> &[f64] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                Node::Leaf { value } => return value,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    /// Seven-feature crop model: splits on rainfall (index 6) then humidity
    fn crop_model_json() -> serde_json::Value {
        json!({
            "n_features": 7,
            "classes": ["chickpea", "maize", "rice"],
            "trees": [
                { "nodes": [
                    { "feature": 6, "threshold": 100.0, "left": 1, "right": 4 },
                    { "feature": 4, "threshold": 40.0, "left": 2, "right": 3 },
                    { "value": [9.0, 1.0, 0.0] },
                    { "value": [1.0, 8.0, 1.0] },
                    { "value": [0.0, 2.0, 8.0] }
                ]},
                { "nodes": [
                    { "feature": 6, "threshold": 110.0, "left": 1, "right": 2 },
                    { "value": [3.0, 6.0, 1.0] },
                    { "value": [0.0, 1.0, 9.0] }
                ]}
            ]
        })
    }

    fn crop_model() -> TreeEnsemble {
        TreeEnsemble::from_json(&crop_model_json().to_string()).unwrap()
    }

    #[test]
    fn predicts_by_averaged_probability() {
        let model = crop_model();
        // N, P, K, temp, humidity, pH, rainfall
        assert_eq!(
            model.predict(&[60.0, 50.0, 50.0, 26.0, 70.0, 6.5, 120.0]).unwrap(),
            "rice"
        );
        assert_eq!(
            model.predict(&[60.0, 50.0, 50.0, 26.0, 70.0, 6.5, 64.0]).unwrap(),
            "maize"
        );
        assert_eq!(
            model.predict(&[20.0, 10.0, 15.0, 30.0, 30.0, 6.5, 16.0]).unwrap(),
            "chickpea"
        );
    }

    #[test]
    fn threshold_goes_left() {
        let model = crop_model();
        // Rainfall exactly 100 takes the left branch of the first tree
        let proba = model
            .predict_proba(&[60.0, 50.0, 50.0, 26.0, 70.0, 6.5, 100.0])
            .unwrap();
        // tree 1: [0.1, 0.8, 0.1], tree 2: [0.3, 0.6, 0.1]
        assert!((proba[0] - 0.2).abs() < 1e-9);
        assert!((proba[1] - 0.7).abs() < 1e-9);
        assert!((proba[2] - 0.1).abs() < 1e-9);
    }

    #[test]
    fn probabilities_sum_to_one() {
        let model = crop_model();
        let proba = model
            .predict_proba(&[50.0, 40.0, 45.0, 22.0, 55.0, 6.0, 105.0])
            .unwrap();
        assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn ties_go_to_lower_class_index() {
        let model = TreeEnsemble::from_json(
            &json!({
                "n_features": 1,
                "classes": ["a", "b"],
                "trees": [{ "nodes": [{ "value": [5.0, 5.0] }] }]
            })
            .to_string(),
        )
        .unwrap();
        assert_eq!(model.predict(&[0.0]).unwrap(), "a");
    }

    #[test]
    fn shape_mismatch_is_prediction_error() {
        let model = crop_model();
        let err = model.predict(&[1.0, 2.0, 3.0, 4.0]).unwrap_err();
        match err {
            SmartFarmError::Prediction(msg) => assert!(msg.contains("expected 7 features, got 4")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_finite_feature_is_prediction_error() {
        let model = crop_model();
        let result = model.predict(&[60.0, 50.0, 50.0, f64::NAN, 70.0, 6.5, 120.0]);
        assert!(matches!(result, Err(SmartFarmError::Prediction(_))));
    }

    #[test]
    fn rejects_malformed_models() {
        let cases = [
            json!({ "n_features": 2, "classes": ["a"], "trees": [] }),
            json!({ "n_features": 2, "classes": [], "trees": [{ "nodes": [{ "value": [] }] }] }),
            json!({ "n_features": 0, "classes": ["a"], "trees": [{ "nodes": [{ "value": [1.0] }] }] }),
            // split on a feature that does not exist
            json!({ "n_features": 2, "classes": ["a"], "trees": [{ "nodes": [
                { "feature": 2, "threshold": 0.0, "left": 1, "right": 2 },
                { "value": [1.0] }, { "value": [1.0] }
            ]}]}),
            // child pointing back at its parent
            json!({ "n_features": 2, "classes": ["a"], "trees": [{ "nodes": [
                { "feature": 0, "threshold": 0.0, "left": 0, "right": 1 },
                { "value": [1.0] }
            ]}]}),
            // leaf width does not match class count
            json!({ "n_features": 2, "classes": ["a", "b"], "trees": [{ "nodes": [{ "value": [1.0] }] }] }),
            // all-zero leaf
            json!({ "n_features": 2, "classes": ["a", "b"], "trees": [{ "nodes": [{ "value": [0.0, 0.0] }] }] }),
        ];

        for case in cases {
            let result = TreeEnsemble::from_json(&case.to_string());
            assert!(
                matches!(result, Err(SmartFarmError::Model(_))),
                "accepted {case}"
            );
        }
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(
            TreeEnsemble::from_json("not json"),
            Err(SmartFarmError::Model(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", crop_model_json()).unwrap();

        let model = TreeEnsemble::load(file.path()).unwrap();
        assert_eq!(model.n_features(), 7);
        assert_eq!(model.classes(), ["chickpea", "maize", "rice"]);
    }

    #[test]
    fn load_missing_file_is_model_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = TreeEnsemble::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(SmartFarmError::Model(_))));
    }
}
