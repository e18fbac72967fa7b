//! Editable bezier view of one animation channel
//!
//! Each segment between two keys is drawn as a cubic bezier. A key with a
//! nonzero tangent places its handle a third of the way into the segment,
//! offset by a third of the tangent; without one, the handle sits at the
//! segment midpoint on the animation's own sampled value.

use crate::error::{CurveError, Result};
use crate::projection::ValueProjection;
use kurv_animation::{AnimatedValue, Animation, AnimationSource, KeyId, SharedAnimation};
use kurv_core::{Color, Observable, ObserverId, Path, PathBuilder, Point};

/// One key in curve space
#[derive(Clone, Debug, PartialEq)]
pub struct KeyEntry {
    pub frame: f32,
    pub value: f32,
    pub in_tangent: Option<f32>,
    pub out_tangent: Option<f32>,
    /// The animation key this entry mirrors
    pub source: KeyId,
}

impl KeyEntry {
    pub fn new(source: KeyId, frame: f32, value: f32) -> Self {
        Self {
            frame,
            value,
            in_tangent: None,
            out_tangent: None,
            source,
        }
    }

    pub fn with_in_tangent(mut self, tangent: f32) -> Self {
        self.in_tangent = Some(tangent);
        self
    }

    pub fn with_out_tangent(mut self, tangent: f32) -> Self {
        self.out_tangent = Some(tangent);
        self
    }
}

/// A handle position in curve space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlPoint {
    pub frame: f32,
    pub value: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TangentSide {
    In,
    Out,
}

/// What an edit changed, sent to observers once per edit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurveChange {
    Tangent { key: usize, side: TangentSide },
    Frame { key: usize },
    Value { key: usize },
}

/// Builds a zero-valued tangent container for component channels
pub type TangentBuilder = Box<dyn Fn() -> AnimatedValue>;

/// Tangents that are absent, zero or NaN do not shape the curve
fn active(tangent: Option<f32>) -> Option<f32> {
    tangent.filter(|t| *t != 0.0 && !t.is_nan())
}

fn midpoint(a: f32, b: f32) -> f32 {
    a + (b - a) / 2.0
}

/// An editable curve over one channel of an animation
pub struct Curve<A: AnimationSource = Animation> {
    keys: Vec<KeyEntry>,
    animation: SharedAnimation<A>,
    color: Color,
    projection: ValueProjection,
    tangent_builder: Option<TangentBuilder>,
    tangent_length: f32,
    path_precision: Option<usize>,
    on_data_updated: Observable<CurveChange>,
}

impl<A: AnimationSource> Curve<A> {
    /// Screen-space length of a drawn tangent handle
    pub const TANGENT_LENGTH: f32 = 50.0;

    pub fn new(color: Color, animation: SharedAnimation<A>, projection: ValueProjection) -> Self {
        Self {
            keys: Vec::new(),
            animation,
            color,
            projection,
            tangent_builder: None,
            tangent_length: Self::TANGENT_LENGTH,
            path_precision: None,
            on_data_updated: Observable::new(),
        }
    }

    /// Builder: set the tangent container factory for component channels
    pub fn with_tangent_builder<F>(mut self, builder: F) -> Self
    where
        F: Fn() -> AnimatedValue + 'static,
    {
        self.tangent_builder = Some(Box::new(builder));
        self
    }

    /// Builder: override the drawn handle length
    pub fn with_tangent_length(mut self, length: f32) -> Self {
        self.tangent_length = length;
        self
    }

    /// Builder: fix the number of decimals in path data
    pub fn with_path_precision(mut self, precision: Option<usize>) -> Self {
        self.path_precision = precision;
        self
    }

    pub fn keys(&self) -> &[KeyEntry] {
        &self.keys
    }

    pub fn push_key(&mut self, key: KeyEntry) {
        self.keys.push(key);
    }

    pub fn clear_keys(&mut self) {
        self.keys.clear();
    }

    /// Sort local keys by frame, e.g. after dragging a key past a neighbour
    pub fn sort_keys(&mut self) {
        self.keys.sort_by(|a, b| a.frame.total_cmp(&b.frame));
    }

    /// Rebuild the local keys from the animation, in the animation's frame order
    pub fn load_keys(&mut self) -> Result<()> {
        let animation = self.animation.borrow();
        let mut keys = Vec::new();

        for id in animation.key_ids() {
            let key = animation.key(id).ok_or(CurveError::SourceKeyMissing(id))?;
            let value = self
                .projection
                .read(&key.value)
                .ok_or_else(|| CurveError::ShapeMismatch {
                    projection: self.projection.clone(),
                })?;

            keys.push(KeyEntry {
                frame: key.frame,
                value,
                in_tangent: key.in_tangent.as_ref().and_then(|t| self.projection.read(t)),
                out_tangent: key.out_tangent.as_ref().and_then(|t| self.projection.read(t)),
                source: id,
            });
        }
        drop(animation);

        tracing::debug!(projection = %self.projection, keys = keys.len(), "loaded curve keys");
        self.keys = keys;
        Ok(())
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn projection(&self) -> &ValueProjection {
        &self.projection
    }

    pub fn animation(&self) -> &SharedAnimation<A> {
        &self.animation
    }

    pub fn tangent_length(&self) -> f32 {
        self.tangent_length
    }

    /// Observers fired once after every completed edit
    pub fn on_data_updated(&mut self) -> &mut Observable<CurveChange> {
        &mut self.on_data_updated
    }

    pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&CurveChange) + 'static,
    {
        self.on_data_updated.add(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.on_data_updated.remove(id)
    }

    // ========================================================================
    // Geometry
    // ========================================================================

    /// Sample the animation through the projection.
    ///
    /// A value that cannot be projected falls back to the straight line
    /// between the segment's keys.
    fn sample(&self, frame: f32, left: &KeyEntry, right: &KeyEntry) -> f32 {
        let evaluated = self.animation.borrow().evaluate(frame);
        match self.projection.read(&evaluated) {
            Some(value) => value,
            None => {
                tracing::warn!(
                    frame,
                    projection = %self.projection,
                    "sampled value does not match projection, using linear fallback"
                );
                let span = right.frame - left.frame;
                if span.abs() < f32::EPSILON {
                    left.value
                } else {
                    left.value + (right.value - left.value) * (frame - left.frame) / span
                }
            }
        }
    }

    /// Outgoing handle of `left` in the segment `left -> right`
    fn out_handle(&self, left: &KeyEntry, right: &KeyEntry) -> ControlPoint {
        match active(left.out_tangent) {
            Some(tangent) => ControlPoint {
                frame: 2.0 * left.frame / 3.0 + right.frame / 3.0,
                value: left.value + tangent / 3.0,
            },
            None => {
                let frame = midpoint(left.frame, right.frame);
                ControlPoint {
                    frame,
                    value: self.sample(frame, left, right),
                }
            }
        }
    }

    /// Incoming handle of `right` in the segment `left -> right`
    fn in_handle(&self, left: &KeyEntry, right: &KeyEntry) -> ControlPoint {
        match active(right.in_tangent) {
            Some(tangent) => ControlPoint {
                frame: left.frame / 3.0 + 2.0 * right.frame / 3.0,
                value: right.value - tangent / 3.0,
            },
            None => {
                let frame = midpoint(left.frame, right.frame);
                ControlPoint {
                    frame,
                    value: self.sample(frame, left, right),
                }
            }
        }
    }

    /// Build the curve as a chain of cubic segments in screen space.
    ///
    /// Empty when the curve has fewer than two keys.
    pub fn path<X, Y>(&self, convert_x: X, convert_y: Y) -> Path
    where
        X: Fn(f32) -> f32,
        Y: Fn(f32) -> f32,
    {
        if self.keys.len() < 2 {
            return Path::new();
        }

        let first = &self.keys[0];
        let mut builder = PathBuilder::new().move_to(convert_x(first.frame), convert_y(first.value));

        for pair in self.keys.windows(2) {
            let (left, right) = (&pair[0], &pair[1]);
            let c0 = self.out_handle(left, right);
            let c1 = self.in_handle(left, right);
            builder = builder.cubic_to(
                convert_x(c0.frame),
                convert_y(c0.value),
                convert_x(c1.frame),
                convert_y(c1.value),
                convert_x(right.frame),
                convert_y(right.value),
            );
        }

        builder.build()
    }

    /// SVG path data for [`path`](Self::path); `""` for fewer than two keys
    pub fn path_data<X, Y>(&self, convert_x: X, convert_y: Y) -> String
    where
        X: Fn(f32) -> f32,
        Y: Fn(f32) -> f32,
    {
        self.path(convert_x, convert_y)
            .to_svg_data(self.path_precision)
    }

    /// Incoming handle of key `index`; `None` for the first key
    pub fn in_control_point(&self, index: usize) -> Option<ControlPoint> {
        if index == 0 || index >= self.keys.len() {
            return None;
        }
        Some(self.in_handle(&self.keys[index - 1], &self.keys[index]))
    }

    /// Outgoing handle of key `index`; `None` for the last key
    pub fn out_control_point(&self, index: usize) -> Option<ControlPoint> {
        if index >= self.keys.len().saturating_sub(1) {
            return None;
        }
        Some(self.out_handle(&self.keys[index], &self.keys[index + 1]))
    }

    /// Screen position of the drawn incoming handle: the control point's
    /// direction from the key, at [`tangent_length`](Self::tangent_length) pixels
    pub fn in_handle_position<X, Y>(&self, index: usize, convert_x: X, convert_y: Y) -> Option<Point>
    where
        X: Fn(f32) -> f32,
        Y: Fn(f32) -> f32,
    {
        let control = self.in_control_point(index)?;
        Some(self.handle_position(&self.keys[index], control, convert_x, convert_y))
    }

    /// Screen position of the drawn outgoing handle
    pub fn out_handle_position<X, Y>(&self, index: usize, convert_x: X, convert_y: Y) -> Option<Point>
    where
        X: Fn(f32) -> f32,
        Y: Fn(f32) -> f32,
    {
        let control = self.out_control_point(index)?;
        Some(self.handle_position(&self.keys[index], control, convert_x, convert_y))
    }

    fn handle_position<X, Y>(
        &self,
        key: &KeyEntry,
        control: ControlPoint,
        convert_x: X,
        convert_y: Y,
    ) -> Point
    where
        X: Fn(f32) -> f32,
        Y: Fn(f32) -> f32,
    {
        let anchor = Point::new(convert_x(key.frame), convert_y(key.value));
        let target = Point::new(convert_x(control.frame), convert_y(control.value));
        let distance = anchor.distance(target);
        if distance < f32::EPSILON {
            return target;
        }
        let scale = self.tangent_length / distance;
        Point::new(
            anchor.x + (target.x - anchor.x) * scale,
            anchor.y + (target.y - anchor.y) * scale,
        )
    }

    // ========================================================================
    // Edits
    // ========================================================================

    fn entry(&self, index: usize) -> Result<&KeyEntry> {
        self.keys.get(index).ok_or(CurveError::KeyIndexOutOfRange {
            index,
            len: self.keys.len(),
        })
    }

    fn notify(&mut self, change: CurveChange) {
        self.on_data_updated.notify(&change);
    }

    /// Set the incoming tangent of key `index` from a dragged handle value
    pub fn update_in_tangent_from_control_point(&mut self, index: usize, value: f32) -> Result<()> {
        self.update_tangent(index, value, TangentSide::In)
    }

    /// Set the outgoing tangent of key `index` from a dragged handle value
    pub fn update_out_tangent_from_control_point(&mut self, index: usize, value: f32) -> Result<()> {
        self.update_tangent(index, value, TangentSide::Out)
    }

    fn update_tangent(&mut self, index: usize, handle_value: f32, side: TangentSide) -> Result<()> {
        let entry = self.entry(index)?;
        let (slope, existing) = match side {
            TangentSide::In => (entry.value - handle_value, entry.in_tangent),
            TangentSide::Out => (handle_value - entry.value, entry.out_tangent),
        };
        // Refining a tangent keeps 2/3 of the slope; a first tangent takes 1/2
        let factor = if active(existing).is_some() {
            2.0 / 3.0
        } else {
            1.0 / 2.0
        };
        let tangent = slope * factor;
        let source = entry.source;

        {
            let mut animation = self.animation.borrow_mut();
            let key = animation
                .key_mut(source)
                .ok_or(CurveError::SourceKeyMissing(source))?;
            let slot = match side {
                TangentSide::In => &mut key.in_tangent,
                TangentSide::Out => &mut key.out_tangent,
            };

            let mut updated = match (slot.as_ref(), &self.projection) {
                (Some(current), _) => current.clone(),
                (None, ValueProjection::Scalar) => AnimatedValue::Scalar(0.0),
                (None, ValueProjection::Component(component)) => {
                    let builder = self.tangent_builder.as_ref().ok_or_else(|| {
                        CurveError::MissingTangentBuilder {
                            component: component.clone(),
                        }
                    })?;
                    builder()
                }
            };
            self.projection.write(&mut updated, tangent)?;
            *slot = Some(updated);
        }

        let entry = &mut self.keys[index];
        match side {
            TangentSide::In => entry.in_tangent = Some(tangent),
            TangentSide::Out => entry.out_tangent = Some(tangent),
        }

        tracing::debug!(key = index, ?side, tangent, projection = %self.projection, "updated tangent");
        self.notify(CurveChange::Tangent { key: index, side });
        Ok(())
    }

    /// Move key `index` to `frame`
    pub fn update_key_frame(&mut self, index: usize, frame: f32) -> Result<()> {
        let source = self.entry(index)?.source;

        {
            let mut animation = self.animation.borrow_mut();
            let key = animation
                .key_mut(source)
                .ok_or(CurveError::SourceKeyMissing(source))?;
            key.frame = frame;
        }
        self.keys[index].frame = frame;

        tracing::debug!(key = index, frame, "updated key frame");
        self.notify(CurveChange::Frame { key: index });
        Ok(())
    }

    /// Set the value of key `index`, through the projection
    pub fn update_key_value(&mut self, index: usize, value: f32) -> Result<()> {
        let source = self.entry(index)?.source;

        {
            let mut animation = self.animation.borrow_mut();
            let key = animation
                .key_mut(source)
                .ok_or(CurveError::SourceKeyMissing(source))?;
            self.projection.write(&mut key.value, value)?;
        }
        self.keys[index].value = value;

        tracing::debug!(key = index, value, projection = %self.projection, "updated key value");
        self.notify(CurveChange::Value { key: index });
        Ok(())
    }
}

impl<A: AnimationSource> std::fmt::Debug for Curve<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Curve")
            .field("keys", &self.keys)
            .field("color", &self.color)
            .field("projection", &self.projection)
            .field("has_tangent_builder", &self.tangent_builder.is_some())
            .field("on_data_updated", &self.on_data_updated)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurv_animation::{share, AnimationKey};
    use std::cell::Cell;
    use std::rc::Rc;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn scalar_curve(keys: Vec<AnimationKey>) -> Curve {
        let animation = share(Animation::from_keys("test", keys));
        let mut curve = Curve::new(Color::WHITE, animation, ValueProjection::Scalar);
        curve.load_keys().unwrap();
        curve
    }

    fn identity(v: f32) -> f32 {
        v
    }

    #[test]
    fn test_path_data_needs_two_keys() {
        let empty = scalar_curve(vec![]);
        assert_eq!(empty.path_data(identity, identity), "");

        let single = scalar_curve(vec![AnimationKey::new(0.0, 1.0)]);
        assert_eq!(single.path_data(identity, identity), "");
    }

    #[test]
    fn test_untangented_segment_uses_midpoint_samples() {
        let curve = scalar_curve(vec![AnimationKey::new(0.0, 0.0), AnimationKey::new(10.0, 20.0)]);
        // Engine is linear here, so the midpoint sample is 10
        assert_eq!(curve.path_data(identity, identity), "M0 0 C5 10, 5 10, 10 20");
    }

    #[test]
    fn test_tangents_place_handles_at_thirds() {
        let curve = scalar_curve(vec![
            AnimationKey::new(0.0, 0.0).with_out_tangent(3.0),
            AnimationKey::new(9.0, 9.0).with_in_tangent(6.0),
        ]);
        assert_eq!(curve.path_data(identity, identity), "M0 0 C3 1, 6 7, 9 9");
    }

    #[test]
    fn test_path_applies_converters() {
        let curve = scalar_curve(vec![AnimationKey::new(0.0, 0.0), AnimationKey::new(10.0, 20.0)]);
        let data = curve.path_data(|x| x * 2.0, |y| 100.0 - y);
        assert_eq!(data, "M0 100 C10 90, 10 90, 20 80");
    }

    #[test]
    fn test_path_precision() {
        let curve = scalar_curve(vec![
            AnimationKey::new(0.0, 0.0).with_out_tangent(1.0),
            AnimationKey::new(1.0, 1.0),
        ])
        .with_path_precision(Some(1));
        assert_eq!(
            curve.path_data(identity, identity),
            "M0.0 0.0 C0.3 0.3, 0.5 0.5, 1.0 1.0"
        );
    }

    #[test]
    fn test_zero_tangent_counts_as_absent() {
        let curve = scalar_curve(vec![
            AnimationKey::new(0.0, 0.0).with_out_tangent(0.0),
            AnimationKey::new(10.0, 10.0),
        ]);
        let cp = curve.out_control_point(0).unwrap();
        assert_eq!(cp, ControlPoint { frame: 5.0, value: 5.0 });
    }

    #[test]
    fn test_boundary_control_points() {
        let curve = scalar_curve(vec![
            AnimationKey::new(0.0, 0.0),
            AnimationKey::new(5.0, 5.0),
            AnimationKey::new(10.0, 0.0),
        ]);
        assert!(curve.in_control_point(0).is_none());
        assert!(curve.out_control_point(2).is_none());
        assert!(curve.in_control_point(3).is_none());
        assert!(curve.out_control_point(3).is_none());
        assert!(curve.in_control_point(2).is_some());
        assert!(curve.out_control_point(0).is_some());
    }

    #[test]
    fn test_handle_position_has_fixed_length() {
        let curve = scalar_curve(vec![
            AnimationKey::new(0.0, 0.0).with_out_tangent(3.0),
            AnimationKey::new(3.0, 0.0),
        ]);
        // Control point is (1, 1) in curve space
        let p = curve.out_handle_position(0, |x| x * 100.0, |y| y * 100.0).unwrap();
        assert!(approx(Point::new(0.0, 0.0).distance(p), Curve::<Animation>::TANGENT_LENGTH));
        assert!(approx(p.x, p.y));
    }

    #[test]
    fn test_first_out_tangent_takes_half_slope() {
        let mut curve = scalar_curve(vec![AnimationKey::new(0.0, 0.0), AnimationKey::new(10.0, 10.0)]);
        curve.update_out_tangent_from_control_point(0, 5.0).unwrap();

        assert_eq!(curve.keys()[0].out_tangent, Some(2.5));
        let animation = curve.animation().borrow();
        let id = curve.keys()[0].source;
        assert_eq!(
            animation.key(id).unwrap().out_tangent,
            Some(AnimatedValue::Scalar(2.5))
        );
    }

    #[test]
    fn test_existing_in_tangent_takes_two_thirds() {
        let mut curve = scalar_curve(vec![
            AnimationKey::new(0.0, 0.0),
            AnimationKey::new(10.0, 10.0).with_in_tangent(6.0),
        ]);
        curve.update_in_tangent_from_control_point(1, 7.0).unwrap();
        // (10 - 7) * 2/3
        assert!(approx(curve.keys()[1].in_tangent.unwrap(), 2.0));
    }

    #[test]
    fn test_failed_edit_writes_and_notifies_nothing() {
        let mut curve = scalar_curve(vec![AnimationKey::new(0.0, 0.0)]);
        let fired = Rc::new(Cell::new(0));
        let f = fired.clone();
        curve.subscribe(move |_| f.set(f.get() + 1));

        let err = curve.update_key_value(4, 1.0).unwrap_err();
        assert_eq!(err, CurveError::KeyIndexOutOfRange { index: 4, len: 1 });
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn test_component_tangent_without_builder_fails() {
        let animation = share(Animation::from_keys(
            "position",
            vec![
                AnimationKey::new(0.0, AnimatedValue::vector2(0.0, 0.0)),
                AnimationKey::new(10.0, AnimatedValue::vector2(10.0, 10.0)),
            ],
        ));
        let mut curve = Curve::new(Color::WHITE, animation, ValueProjection::component("x"));
        curve.load_keys().unwrap();

        let err = curve.update_out_tangent_from_control_point(0, 4.0).unwrap_err();
        assert_eq!(
            err,
            CurveError::MissingTangentBuilder {
                component: "x".to_string()
            }
        );
        assert_eq!(curve.keys()[0].out_tangent, None);
    }

    #[test]
    fn test_load_keys_rejects_shape_mismatch() {
        let animation = share(Animation::from_keys("a", vec![AnimationKey::new(0.0, 1.0)]));
        let mut curve = Curve::new(Color::WHITE, animation, ValueProjection::component("x"));
        assert!(matches!(
            curve.load_keys(),
            Err(CurveError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_sort_keys() {
        let mut curve = scalar_curve(vec![AnimationKey::new(0.0, 0.0), AnimationKey::new(10.0, 10.0)]);
        curve.update_key_frame(0, 20.0).unwrap();
        curve.sort_keys();
        let frames: Vec<f32> = curve.keys().iter().map(|k| k.frame).collect();
        assert_eq!(frames, vec![10.0, 20.0]);
    }
}
