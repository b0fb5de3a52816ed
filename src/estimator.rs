//! Model-based travel time estimate, independent of live traffic.
//!
//! The estimate only needs the two resolved endpoints: a planar distance in
//! kilometres and a fixed step-count proxy are fed to a pre-trained regression
//! model loaded once at startup.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::coordinate::Coordinate;
use crate::error::Error;
use crate::traits::RegressionModel;

/// Kilometres per degree used by the planar approximation.
pub const KM_PER_DEGREE: f64 = 111.0;

const FEATURE_COUNT: usize = 2;

/// Straight-line distance in degree space scaled to kilometres.
///
/// Not geodesically exact; it matches what the model was trained on.
pub fn planar_distance_km(from: Coordinate, to: Coordinate) -> f64 {
    let d_lat = from.lat - to.lat;
    let d_lng = from.lng - to.lng;
    (d_lat * d_lat + d_lng * d_lng).sqrt() * KM_PER_DEGREE
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictedEstimate {
    pub minutes: f64,
    /// Planar distance the prediction was made from.
    pub distance_km: f64,
}

/// Serialized model artifact.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearModel),
    Forest(ForestModel),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: [f64; FEATURE_COUNT],
}

/// Averaged ensemble of regression trees.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForestModel {
    pub trees: Vec<TreeNode>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Leaf {
        leaf: f64,
    },
    /// Goes `left` when `features[feature] <= threshold`.
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    /// `None` when a split names a feature the model does not take.
    fn evaluate(&self, features: &[f64; FEATURE_COUNT]) -> Option<f64> {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf { leaf } => return Some(*leaf),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features.get(*feature)?;
                    node = if *value <= *threshold { &**left } else { &**right };
                }
            }
        }
    }

    fn validate(&self) -> Result<(), String> {
        match self {
            TreeNode::Leaf { leaf } if !leaf.is_finite() => Err(format!("non-finite leaf value {}", leaf)),
            TreeNode::Leaf { .. } => Ok(()),
            TreeNode::Split { feature, .. } if *feature >= FEATURE_COUNT => {
                Err(format!("split on feature {} but the model takes {}", feature, FEATURE_COUNT))
            }
            TreeNode::Split { left, right, .. } => {
                left.validate()?;
                right.validate()
            }
        }
    }
}

impl ModelArtifact {
    fn validate(&self) -> Result<(), String> {
        match self {
            ModelArtifact::Linear(linear) => {
                if linear.intercept.is_finite() && linear.coefficients.iter().all(|c| c.is_finite()) {
                    Ok(())
                } else {
                    Err("non-finite linear coefficient".to_string())
                }
            }
            ModelArtifact::Forest(forest) => {
                if forest.trees.is_empty() {
                    return Err("forest has no trees".to_string());
                }
                forest.trees.iter().try_for_each(TreeNode::validate)
            }
        }
    }
}

impl RegressionModel for ModelArtifact {
    fn predict(&self, features: [f64; FEATURE_COUNT]) -> f64 {
        match self {
            ModelArtifact::Linear(linear) => {
                linear.intercept
                    + linear
                        .coefficients
                        .iter()
                        .zip(features.iter())
                        .map(|(c, x)| c * x)
                        .sum::<f64>()
            }
            // An unusable tree yields NaN, which `Estimator::estimate` rejects.
            ModelArtifact::Forest(forest) => forest
                .trees
                .iter()
                .map(|tree| tree.evaluate(&features))
                .sum::<Option<f64>>()
                .map_or(f64::NAN, |total| total / forest.trees.len() as f64),
        }
    }
}

/// Process-wide, read-only estimator handle.
pub struct Estimator {
    model: Box<dyn RegressionModel>,
    step_proxy: f64,
}

impl fmt::Debug for Estimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Estimator")
            .field("step_proxy", &self.step_proxy)
            .finish_non_exhaustive()
    }
}

impl Estimator {
    pub fn new(model: impl RegressionModel + 'static, step_proxy: f64) -> Self {
        Self {
            model: Box::new(model),
            step_proxy,
        }
    }

    /// Loads a JSON model artifact. Call once at startup.
    pub fn load(path: impl AsRef<Path>, step_proxy: f64) -> Result<Self, Error> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|err| Error::EstimatorUnavailable(format!("cannot read {}: {}", path.display(), err)))?;
        let estimator = Self::from_json(&json, step_proxy)?;
        info!(path = %path.display(), "loaded duration model");
        Ok(estimator)
    }

    pub fn from_json(json: &str, step_proxy: f64) -> Result<Self, Error> {
        let artifact: ModelArtifact =
            serde_json::from_str(json).map_err(|err| Error::EstimatorUnavailable(format!("invalid model artifact: {}", err)))?;
        artifact.validate().map_err(Error::EstimatorUnavailable)?;
        Ok(Self::new(artifact, step_proxy))
    }

    pub fn step_proxy(&self) -> f64 {
        self.step_proxy
    }

    pub fn estimate(&self, start: Coordinate, end: Coordinate) -> Result<PredictedEstimate, Error> {
        let distance_km = planar_distance_km(start, end);
        let minutes = self.model.predict([distance_km, self.step_proxy]);
        debug!(distance_km, step_proxy = self.step_proxy, minutes, "model prediction");

        if !minutes.is_finite() {
            return Err(Error::EstimatorUnavailable(format!("model produced {}", minutes)));
        }

        Ok(PredictedEstimate {
            minutes: minutes.max(0.0),
            distance_km,
        })
    }
}
