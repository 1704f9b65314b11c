//! # Bubble-Chart
//!
//! Bubble chart visualization plugin: one circle per data row, area
//! proportional to a numeric column, packed into a square and colored from a
//! theme, emitted as SVG.
//!
//! The crate holds both sides of the plugin contract:
//!
//! - **Host side**: a [`Registry`](registry::Registry) of visualizations,
//!   the accessor traits in [`host`], and an in-memory [`Dataset`](data::Dataset),
//!   [`Theme`](theme::Theme) and [`MountPoint`](output::MountPoint).
//! - **Plugin side**: the [`BubbleChart`](chart::BubbleChart) descriptor and
//!   renderer, built on a front-chain circle packing layout.
//!
//! ## Quick Start
//!
//! ```rust
//! use bubble_chart::prelude::*;
//!
//! let mut registry = Registry::new();
//! bubble_chart::chart::register(&mut registry)?;
//!
//! let dataset = Dataset::new()
//!     .column(Column::texts("name", &["A", "B"]))
//!     .column(Column::numbers("value", &[10.0, 30.0]))
//!     .bind("label", "name")
//!     .bind("size", "value");
//! let theme = Theme::default();
//! let size = (200.0, 200.0);
//!
//! let mut mount = MountPoint::new("chart");
//! let ctx = RenderContext::new(&dataset, &dataset, &theme, &size);
//! registry.render("bubble-chart", &mut mount, &ctx)?;
//! assert!(mount.to_svg().contains("<title>A: 10</title>"));
//! # Ok::<(), bubble_chart::Error>(())
//! ```
//!
//! ## References
//!
//! - Wang, W., Wang, H., Dai, G., & Wang, H. (2006). "Visualization of Large
//!   Hierarchical Data by Circle Packing." CHI '06.
//! - Welzl, E. (1991). "Smallest enclosing disks (balls and ellipsoids)."

#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and CIELAB lightness.
pub mod color;

/// Geometric primitives (points, circles, rectangles).
pub mod geometry;

/// Scale functions for data-to-visual mappings.
pub mod scale;

/// Number and label formatting.
pub mod format;

/// Circle packing layout.
pub mod layout;

// ============================================================================
// Host Contract
// ============================================================================

/// Accessor traits between host and visualization.
pub mod host;

/// In-memory datasets.
pub mod data;

/// Themes.
pub mod theme;

/// Visualization descriptors.
pub mod meta;

/// Visualization registry.
pub mod registry;

/// Output encoders (SVG, HTML) and mount points.
pub mod output;

// ============================================================================
// Visualizations
// ============================================================================

/// The bubble chart.
pub mod chart;

/// YAML chart documents.
pub mod config;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for bubble-chart operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use bubble_chart::prelude::*;
/// ```
pub mod prelude {
    pub use crate::chart::BubbleChart;
    pub use crate::color::Rgba;
    pub use crate::config::ChartDocument;
    pub use crate::data::{Column, ColumnType, Dataset, Value};
    pub use crate::error::{Error, Result};
    pub use crate::host::{
        AxesAccessor, AxisAccessor, DatasetAccessor, RenderTarget, SizeAccessor, ThemeAccessor,
    };
    pub use crate::meta::VisualizationMeta;
    pub use crate::output::{MountPoint, SvgDocument};
    pub use crate::registry::{Registry, RenderContext, Visualization};
    pub use crate::scale::{ColorScale, Scale};
    pub use crate::theme::Theme;
}
