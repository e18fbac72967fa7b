//! Animated values: scalars or named components

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Named components of a structured value (`x`, `y`, `z`, `r`, `g`, ...),
/// kept in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentValues(IndexMap<String, f32>);

impl ComponentValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<f32> {
        self.0.get(name).copied()
    }

    /// Set a component, adding it if absent
    pub fn set(&mut self, name: &str, value: f32) {
        match self.0.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.0.insert(name.to_string(), value);
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Same component names, every value zero
    pub fn zeroed(&self) -> Self {
        Self(self.0.keys().map(|k| (k.clone(), 0.0)).collect())
    }
}

impl<S: Into<String>> FromIterator<(S, f32)> for ComponentValues {
    fn from_iter<I: IntoIterator<Item = (S, f32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A key value, tangent, or evaluation result
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnimatedValue {
    Scalar(f32),
    Components(ComponentValues),
}

impl Default for AnimatedValue {
    fn default() -> Self {
        AnimatedValue::Scalar(0.0)
    }
}

impl From<f32> for AnimatedValue {
    fn from(value: f32) -> Self {
        AnimatedValue::Scalar(value)
    }
}

impl From<ComponentValues> for AnimatedValue {
    fn from(values: ComponentValues) -> Self {
        AnimatedValue::Components(values)
    }
}

impl AnimatedValue {
    pub fn vector2(x: f32, y: f32) -> Self {
        Self::Components([("x", x), ("y", y)].into_iter().collect())
    }

    pub fn vector3(x: f32, y: f32, z: f32) -> Self {
        Self::Components([("x", x), ("y", y), ("z", z)].into_iter().collect())
    }

    pub fn quaternion(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self::Components([("x", x), ("y", y), ("z", z), ("w", w)].into_iter().collect())
    }

    pub fn color3(r: f32, g: f32, b: f32) -> Self {
        Self::Components([("r", r), ("g", g), ("b", b)].into_iter().collect())
    }

    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            AnimatedValue::Scalar(v) => Some(*v),
            AnimatedValue::Components(_) => None,
        }
    }

    pub fn as_components(&self) -> Option<&ComponentValues> {
        match self {
            AnimatedValue::Scalar(_) => None,
            AnimatedValue::Components(c) => Some(c),
        }
    }

    pub fn as_components_mut(&mut self) -> Option<&mut ComponentValues> {
        match self {
            AnimatedValue::Scalar(_) => None,
            AnimatedValue::Components(c) => Some(c),
        }
    }

    /// Read a named component (`None` for scalars)
    pub fn component(&self, name: &str) -> Option<f32> {
        self.as_components().and_then(|c| c.get(name))
    }

    /// Same shape, every value zero
    pub fn zeroed(&self) -> Self {
        match self {
            AnimatedValue::Scalar(_) => AnimatedValue::Scalar(0.0),
            AnimatedValue::Components(c) => AnimatedValue::Components(c.zeroed()),
        }
    }

    /// Multiply every component by `factor`
    pub fn scaled(&self, factor: f32) -> Self {
        self.map(|_, v| v * factor)
    }

    fn map(&self, f: impl Fn(&str, f32) -> f32) -> Self {
        match self {
            AnimatedValue::Scalar(v) => AnimatedValue::Scalar(f("", *v)),
            AnimatedValue::Components(c) => {
                AnimatedValue::Components(c.iter().map(|(k, v)| (k, f(k, v))).collect())
            }
        }
    }

    /// Component of `other` matching `name` in shape; missing reads as `fallback`
    fn matching(other: &AnimatedValue, name: &str, fallback: f32) -> f32 {
        match other {
            AnimatedValue::Scalar(v) => *v,
            AnimatedValue::Components(c) => c.get(name).unwrap_or(fallback),
        }
    }

    /// Linear interpolation. Components absent from `end` hold their start value.
    pub fn lerp(&self, end: &AnimatedValue, t: f32) -> Self {
        self.map(|name, start| {
            let end = Self::matching(end, name, start);
            start + (end - start) * t
        })
    }

    /// Cubic Hermite interpolation; missing tangent components count as zero.
    pub fn hermite(
        &self,
        out_tangent: &AnimatedValue,
        end: &AnimatedValue,
        in_tangent: &AnimatedValue,
        t: f32,
    ) -> Self {
        let squared = t * t;
        let cubed = t * squared;
        let part1 = 2.0 * cubed - 3.0 * squared + 1.0;
        let part2 = -2.0 * cubed + 3.0 * squared;
        let part3 = cubed - 2.0 * squared + t;
        let part4 = cubed - squared;

        self.map(|name, start| {
            let end = Self::matching(end, name, start);
            let t0 = Self::matching(out_tangent, name, 0.0);
            let t1 = Self::matching(in_tangent, name, 0.0);
            start * part1 + end * part2 + t0 * part3 + t1 * part4
        })
    }
}
