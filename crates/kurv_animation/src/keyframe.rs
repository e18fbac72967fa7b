//! Keyed animations
//!
//! An [`Animation`] stores its keys in a slot map so every key keeps a stable
//! [`KeyId`] while the frame order is tracked separately. Editors hold on to
//! ids rather than positions, which keeps them aligned when keys are
//! re-sorted or removed.

use crate::easing::Easing;
use crate::value::AnimatedValue;
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable identity of a key inside an [`Animation`]
    pub struct KeyId;
}

/// How the segment starting at a key is interpolated
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Linear, or Hermite when both neighbouring tangents are present
    #[default]
    Continuous,
    /// Hold the key's value until the next key
    Step,
}

/// A single key of an animation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationKey {
    pub frame: f32,
    pub value: AnimatedValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_tangent: Option<AnimatedValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_tangent: Option<AnimatedValue>,
    #[serde(default)]
    pub interpolation: Interpolation,
    /// Easing for the segment starting at this key, overriding the animation's
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<Easing>,
}

impl AnimationKey {
    pub fn new(frame: f32, value: impl Into<AnimatedValue>) -> Self {
        Self {
            frame,
            value: value.into(),
            in_tangent: None,
            out_tangent: None,
            interpolation: Interpolation::Continuous,
            easing: None,
        }
    }

    /// Builder: set the incoming tangent
    pub fn with_in_tangent(mut self, tangent: impl Into<AnimatedValue>) -> Self {
        self.in_tangent = Some(tangent.into());
        self
    }

    /// Builder: set the outgoing tangent
    pub fn with_out_tangent(mut self, tangent: impl Into<AnimatedValue>) -> Self {
        self.out_tangent = Some(tangent.into());
        self
    }

    /// Builder: set interpolation mode
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Builder: set segment easing
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }
}

/// A named, keyed animation sampled by frame
#[derive(Clone, Debug, Default)]
pub struct Animation {
    name: String,
    keys: SlotMap<KeyId, AnimationKey>,
    /// Key ids in ascending frame order
    order: Vec<KeyId>,
    easing: Option<Easing>,
}

impl Animation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keys: SlotMap::with_key(),
            order: Vec::new(),
            easing: None,
        }
    }

    /// Build an animation from keys in any order
    pub fn from_keys(name: impl Into<String>, keys: impl IntoIterator<Item = AnimationKey>) -> Self {
        let mut animation = Self::new(name);
        for key in keys {
            animation.add_key(key);
        }
        animation
    }

    /// Builder: set the default easing
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn easing(&self) -> Option<Easing> {
        self.easing
    }

    pub fn set_easing(&mut self, easing: Option<Easing>) {
        self.easing = easing;
    }

    /// Insert a key, placed after any existing keys on the same frame
    pub fn add_key(&mut self, key: AnimationKey) -> KeyId {
        let frame = key.frame;
        let id = self.keys.insert(key);
        let position = self
            .order
            .partition_point(|existing| self.keys[*existing].frame <= frame);
        self.order.insert(position, id);
        id
    }

    pub fn remove_key(&mut self, id: KeyId) -> Option<AnimationKey> {
        let key = self.keys.remove(id)?;
        self.order.retain(|existing| *existing != id);
        Some(key)
    }

    pub fn key(&self, id: KeyId) -> Option<&AnimationKey> {
        self.keys.get(id)
    }

    /// Mutable key access. Frame edits do not re-sort; call [`sort_keys`](Self::sort_keys).
    pub fn key_mut(&mut self, id: KeyId) -> Option<&mut AnimationKey> {
        self.keys.get_mut(id)
    }

    /// Re-establish frame order after frame edits
    pub fn sort_keys(&mut self) {
        let keys = &self.keys;
        self.order
            .sort_by(|a, b| keys[*a].frame.total_cmp(&keys[*b].frame));
        tracing::debug!(animation = %self.name, keys = self.order.len(), "sorted keys");
    }

    /// Key ids in frame order
    pub fn key_ids(&self) -> &[KeyId] {
        &self.order
    }

    /// Keys in frame order
    pub fn keys(&self) -> impl Iterator<Item = (KeyId, &AnimationKey)> {
        self.order.iter().map(move |id| (*id, &self.keys[*id]))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// First and last key frames
    pub fn frame_range(&self) -> Option<(f32, f32)> {
        let first = self.order.first()?;
        let last = self.order.last()?;
        Some((self.keys[*first].frame, self.keys[*last].frame))
    }

    /// Sample the animation at `frame`.
    ///
    /// Frames outside the key range hold the nearest end value. An empty
    /// animation evaluates to scalar zero.
    pub fn evaluate(&self, frame: f32) -> AnimatedValue {
        let (Some(first), Some(last)) = (self.order.first(), self.order.last()) else {
            return AnimatedValue::default();
        };

        let first = &self.keys[*first];
        if frame <= first.frame {
            return first.value.clone();
        }
        let last = &self.keys[*last];
        if frame >= last.frame {
            return last.value.clone();
        }

        for pair in self.order.windows(2) {
            let start = &self.keys[pair[0]];
            let end = &self.keys[pair[1]];
            if frame >= start.frame && frame <= end.frame {
                return self.interpolate(start, end, frame);
            }
        }

        last.value.clone()
    }

    fn interpolate(&self, start: &AnimationKey, end: &AnimationKey, frame: f32) -> AnimatedValue {
        if start.interpolation == Interpolation::Step {
            return start.value.clone();
        }

        let frame_delta = end.frame - start.frame;
        if frame_delta.abs() < f32::EPSILON {
            return end.value.clone();
        }

        let mut gradient = (frame - start.frame) / frame_delta;
        if let Some(easing) = start.easing.or(self.easing) {
            gradient = easing.apply(gradient);
        }

        match (&start.out_tangent, &end.in_tangent) {
            (Some(out_tangent), Some(in_tangent)) => start.value.hermite(
                &out_tangent.scaled(frame_delta),
                &end.value,
                &in_tangent.scaled(frame_delta),
                gradient,
            ),
            _ => start.value.lerp(&end.value, gradient),
        }
    }
}
