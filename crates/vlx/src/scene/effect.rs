//! Effects, shaders and LOD evaluators

use super::enums::EnableFlag;
use crate::foundation::collections::ObjectHandle;

/// A render state bound to a shader, optionally at an index
///
/// The index selects the light, clip plane or texture unit for indexed
/// states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStateSlot {
    /// The render state object
    pub state: ObjectHandle,
    /// Index for indexed states
    pub index: Option<i32>,
}

impl RenderStateSlot {
    /// Non-indexed slot
    pub fn new(state: ObjectHandle) -> Self {
        Self { state, index: None }
    }

    /// Indexed slot
    pub fn indexed(state: ObjectHandle, index: i32) -> Self {
        Self {
            state,
            index: Some(index),
        }
    }
}

/// One rendering pass: render states, enables and uniforms
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shader {
    /// Optional object name
    pub object_name: String,
    /// Bound render states
    pub render_states: Vec<RenderStateSlot>,
    /// Enabled capabilities
    pub enables: Vec<EnableFlag>,
    /// Uniforms set for this pass
    pub uniforms: Vec<ObjectHandle>,
}

/// Set of shader passes per level of detail
#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    /// Optional object name
    pub object_name: String,
    /// Sorting rank
    pub render_rank: i32,
    /// Bitmask matched against the rendering enable mask
    pub enable_mask: u32,
    /// Forced LOD, negative to use the evaluator
    pub active_lod: i32,
    /// Shader passes of each LOD
    pub lods: Vec<Vec<ObjectHandle>>,
    /// LOD selection
    pub lod_evaluator: Option<ObjectHandle>,
}

impl Default for Effect {
    fn default() -> Self {
        Self {
            object_name: String::new(),
            render_rank: 0,
            enable_mask: u32::MAX,
            active_lod: -1,
            lods: Vec::new(),
            lod_evaluator: None,
        }
    }
}

/// Metric a LOD evaluator thresholds on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LodMetric {
    /// Distance from the camera
    Distance,
    /// Projected size in pixels
    Pixel,
}

/// Picks a LOD by comparing a metric against sorted thresholds
#[derive(Debug, Clone, PartialEq)]
pub struct LodEvaluator {
    /// Metric used
    pub metric: LodMetric,
    /// Thresholds between consecutive LODs
    pub ranges: Vec<f32>,
}

impl LodEvaluator {
    /// Create an evaluator with no thresholds
    pub fn new(metric: LodMetric) -> Self {
        Self {
            metric,
            ranges: Vec::new(),
        }
    }

    /// Type name of the metric variant
    pub fn type_name(&self) -> &'static str {
        match self.metric {
            LodMetric::Distance => "vl::DistanceLODEvaluator",
            LodMetric::Pixel => "vl::PixelLODEvaluator",
        }
    }

    /// Key holding the thresholds
    pub fn range_key(&self) -> &'static str {
        match self.metric {
            LodMetric::Distance => "DistanceRangeSet",
            LodMetric::Pixel => "PixelRangeSet",
        }
    }

    /// LOD selected for `metric_value`
    pub fn evaluate(&self, metric_value: f32) -> usize {
        match self.metric {
            LodMetric::Distance => self.ranges.iter().take_while(|range| metric_value >= **range).count(),
            LodMetric::Pixel => self.ranges.iter().take_while(|range| metric_value < **range).count(),
        }
    }
}

impl Default for LodEvaluator {
    fn default() -> Self {
        Self::new(LodMetric::Distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_evaluator() {
        let mut evaluator = LodEvaluator::new(LodMetric::Distance);
        evaluator.ranges = vec![10.0, 100.0];
        assert_eq!(evaluator.evaluate(5.0), 0);
        assert_eq!(evaluator.evaluate(50.0), 1);
        assert_eq!(evaluator.evaluate(500.0), 2);
        assert_eq!(evaluator.type_name(), "vl::DistanceLODEvaluator");
    }

    #[test]
    fn test_pixel_evaluator() {
        let mut evaluator = LodEvaluator::new(LodMetric::Pixel);
        evaluator.ranges = vec![1000.0, 100.0];
        assert_eq!(evaluator.evaluate(5000.0), 0);
        assert_eq!(evaluator.evaluate(500.0), 1);
        assert_eq!(evaluator.evaluate(10.0), 2);
        assert_eq!(evaluator.range_key(), "PixelRangeSet");
    }
}
