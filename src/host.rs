//! Capability contracts between the host platform and a visualization.
//!
//! The host resolves data, theme and size before calling a renderer; these
//! traits are the only way a renderer sees them. Each has a fixed method set
//! so renderers can be written generically (static dispatch) while the
//! [`Registry`](crate::registry::Registry) hands out `&dyn` versions.

use crate::color::Rgba;
use crate::data::{ColumnType, Value};
use crate::output::SvgDocument;

/// Row-level view of the dataset.
pub trait DatasetAccessor {
    /// Number of rows, in stored order.
    fn row_count(&self) -> usize;
}

/// A column bound to an axis.
pub trait AxisAccessor {
    /// Declared semantic type of the bound column.
    fn column_type(&self) -> ColumnType;

    /// `[min, max]` of a numeric column; `None` for other types or when
    /// there is no finite value.
    fn range(&self) -> Option<(f64, f64)>;

    /// Value at `row`; [`Value::Missing`] when absent.
    fn val(&self, row: usize) -> Value;
}

/// Lookup of axis bindings by axis name.
pub trait AxesAccessor {
    /// Accessor for the column bound to `name`, or `None` if unbound.
    fn axis(&self, name: &str) -> Option<&dyn AxisAccessor>;
}

/// Theme colors used by visualizations.
pub trait ThemeAccessor {
    /// First gradient (`colors.gradients[0]`), for continuous scales.
    fn gradient(&self) -> &[Rgba];

    /// First categorical palette (`colors.categories[0]`), for discrete scales.
    fn categories(&self) -> &[Rgba];
}

/// Space available to the chart.
pub trait SizeAccessor {
    /// `(width, height)` in pixels.
    fn size(&self) -> (f64, f64);
}

impl SizeAccessor for (f64, f64) {
    fn size(&self) -> (f64, f64) {
        *self
    }
}

/// Drawable surface a renderer populates.
pub trait RenderTarget {
    /// Remove everything previously drawn.
    fn clear(&mut self);

    /// Append a visual tree.
    fn append(&mut self, svg: SvgDocument);
}
