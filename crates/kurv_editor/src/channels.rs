//! Split an animation into one editable curve per channel

use crate::config::EditorConfig;
use crate::curve::Curve;
use crate::error::Result;
use crate::projection::ValueProjection;
use kurv_animation::{AnimatedValue, AnimationSource, SharedAnimation};
use kurv_core::Color;

/// Build the curves an editor shows for `animation`.
///
/// Scalar animations give a single curve. Structured values give one curve
/// per component, each able to create a zeroed tangent container with the
/// same component names. Keys are loaded into every curve.
pub fn curves_for_animation<A: AnimationSource>(
    animation: &SharedAnimation<A>,
    config: &EditorConfig,
) -> Result<Vec<Curve<A>>> {
    let shape = {
        let source = animation.borrow();
        let ids = source.key_ids();
        let first = ids.first().and_then(|id| source.key(*id));
        first.map(|key| key.value.clone())
    };

    let configured = |color: Color, projection: ValueProjection| {
        Curve::new(color, animation.clone(), projection)
            .with_tangent_length(config.tangent_length)
            .with_path_precision(config.path_precision)
    };

    let mut curves = match shape {
        Some(AnimatedValue::Components(components)) => components
            .names()
            .map(|name| {
                let zero = components.zeroed();
                configured(config.color_for(name), ValueProjection::component(name))
                    .with_tangent_builder(move || AnimatedValue::Components(zero.clone()))
            })
            .collect::<Vec<_>>(),
        Some(AnimatedValue::Scalar(_)) | None => {
            vec![configured(config.default_color, ValueProjection::Scalar)]
        }
    };

    for curve in &mut curves {
        curve.load_keys()?;
    }

    tracing::debug!(curves = curves.len(), "built channel curves");
    Ok(curves)
}
