//! Kurv Core
//!
//! Foundational primitives shared by the Kurv curve editor crates:
//!
//! - **Observables**: synchronous publish/subscribe registries
//! - **Paths**: move/line/cubic commands with SVG path-data output
//! - **Colors**: RGBA colors with hex parsing for curve labels
//! - **Scales**: linear domain-to-pixel mapping
//!
//! # Example
//!
//! ```rust
//! use kurv_core::PathBuilder;
//!
//! let path = PathBuilder::new()
//!     .move_to(0.0, 100.0)
//!     .cubic_to(25.0, 80.0, 75.0, 20.0, 100.0, 0.0)
//!     .build();
//!
//! assert_eq!(path.to_svg_data(None), "M0 100 C25 80, 75 20, 100 0");
//! ```

pub mod color;
pub mod events;
pub mod path;
pub mod scale;

pub use color::{Color, ColorParseError};
pub use events::{Observable, ObserverId};
pub use path::{Path, PathBuilder, PathCommand, Point};
pub use scale::LinearScale;
