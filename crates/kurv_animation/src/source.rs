//! The seam between editors and whatever engine owns the keys

use crate::keyframe::{Animation, AnimationKey, KeyId};
use crate::value::AnimatedValue;
use std::cell::RefCell;
use std::rc::Rc;

/// An animation an editor can sample and write keys into.
///
/// Keys are addressed by [`KeyId`], which must stay valid while the key
/// exists, regardless of how the engine orders its keys.
pub trait AnimationSource {
    /// Sample the interpolated value at `frame`
    fn evaluate(&self, frame: f32) -> AnimatedValue;

    /// Key ids in ascending frame order
    fn key_ids(&self) -> Vec<KeyId>;

    fn key(&self, id: KeyId) -> Option<&AnimationKey>;

    fn key_mut(&mut self, id: KeyId) -> Option<&mut AnimationKey>;
}

impl AnimationSource for Animation {
    fn evaluate(&self, frame: f32) -> AnimatedValue {
        Animation::evaluate(self, frame)
    }

    fn key_ids(&self) -> Vec<KeyId> {
        Animation::key_ids(self).to_vec()
    }

    fn key(&self, id: KeyId) -> Option<&AnimationKey> {
        Animation::key(self, id)
    }

    fn key_mut(&mut self, id: KeyId) -> Option<&mut AnimationKey> {
        Animation::key_mut(self, id)
    }
}

/// An animation shared between the editor and its host (single-threaded UI)
pub type SharedAnimation<A = Animation> = Rc<RefCell<A>>;

/// Wrap an animation for sharing with editors
pub fn share<A>(animation: A) -> SharedAnimation<A> {
    Rc::new(RefCell::new(animation))
}
