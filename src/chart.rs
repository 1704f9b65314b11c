//! The bubble chart.
//!
//! Rows become circles whose areas follow the `size` axis, packed without
//! sorting so later rows paint on top. Fill comes from the `color` axis
//! (gradient for numbers, palette otherwise) and each circle carries a
//! tooltip plus a label shortened to fit.

use crate::color::Rgba;
use crate::data::{ColumnType, Value};
use crate::error::{Error, Result};
use crate::format::{format_thousands, label_capacity, truncate_chars};
use crate::host::{AxesAccessor, DatasetAccessor, RenderTarget, SizeAccessor, ThemeAccessor};
use crate::layout::{PackLayout, PackedLayout};
use crate::meta::{AxisSpec, OptionSpec, VisualizationMeta};
use crate::output::{SvgDocument, SvgElement, TextAnchor};
use crate::registry::{Registry, RenderContext, Visualization};
use crate::scale::{ColorScale, Scale};

/// Registry id of the bubble chart.
pub const ID: &str = "bubble-chart";

/// Labels on fills darker than this CIELAB lightness switch to the
/// `inverted` class.
pub const INVERTED_LIGHTNESS: f64 = 80.0;

const STYLESHEET: &str = ".bubble text { font: 10px sans-serif; fill: #333; \
                          pointer-events: none; } \
                          .bubble text.inverted { fill: #fff; }";

/// One row, as read through the axis bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleDatum {
    /// Label text.
    pub label: String,
    /// Size value; never negative or non-finite.
    pub value: f64,
    /// Color axis value; [`Value::Missing`] when the axis is unbound.
    pub color: Value,
}

impl BubbleDatum {
    /// Tooltip text, e.g. `"Germany: 83,200,000"`.
    #[must_use]
    pub fn tooltip(&self) -> String {
        format!("{}: {}", self.label, format_thousands(self.value))
    }
}

/// Root of the single-level tree the packing runs over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartDatum {
    /// Leaves in dataset row order.
    pub children: Vec<BubbleDatum>,
}

impl ChartDatum {
    /// Read every row through the `label`, `size` and `color` bindings.
    ///
    /// Missing, unparseable, negative or non-finite sizes become `0`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingAxis`] if `label` or `size` is unbound.
    pub fn from_axes<D, A>(dataset: &D, axes: &A) -> Result<Self>
    where
        D: DatasetAccessor + ?Sized,
        A: AxesAccessor + ?Sized,
    {
        let label = axes.axis("label").ok_or_else(|| Error::MissingAxis("label".to_string()))?;
        let size = axes.axis("size").ok_or_else(|| Error::MissingAxis("size".to_string()))?;
        let color = axes.axis("color");

        let children = (0..dataset.row_count())
            .map(|row| {
                let raw = size.val(row);
                let value = match raw.as_number() {
                    Some(v) if v >= 0.0 => v,
                    _ => {
                        tracing::warn!(
                            row,
                            value = %raw,
                            "bubble size is not a non-negative number, using 0"
                        );
                        0.0
                    }
                };
                BubbleDatum {
                    label: label.val(row).to_string(),
                    value,
                    color: color.map_or(Value::Missing, |c| c.val(row)),
                }
            })
            .collect();

        Ok(Self { children })
    }
}

/// The bubble chart renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct BubbleChart;

impl BubbleChart {
    /// Create the renderer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Registration metadata.
    #[must_use]
    pub fn meta() -> VisualizationMeta {
        VisualizationMeta::new(ID, "Bubble Chart (d3)")
            .library("vendor/d3.min.js", "//cdnjs.cloudflare.com/ajax/libs/d3/3.3.11/d3.min.js")
            .axis(AxisSpec::new("label", &[ColumnType::Text, ColumnType::Date]))
            .axis(AxisSpec::new("size", &[ColumnType::Number]))
            .axis(AxisSpec::new("color", &[ColumnType::Number, ColumnType::Text]).optional())
            .option(OptionSpec::select_axis_column("select-label", "label", "Label"))
            .option(OptionSpec::select_axis_column("select-size", "size", "Size"))
            .option(OptionSpec::select_axis_column("select-color", "color", "Color"))
    }

    /// Color scale for the `color` axis.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScaleDomain`] if the theme's gradient or palette is empty.
    pub fn color_scale<A, T>(datum: &ChartDatum, axes: &A, theme: &T) -> Result<ColorScale>
    where
        A: AxesAccessor + ?Sized,
        T: ThemeAccessor + ?Sized,
    {
        let colors = datum.children.iter().map(|c| &c.color);
        match axes.axis("color") {
            Some(axis) if axis.column_type() == ColumnType::Number => {
                ColorScale::gradient(theme.gradient(), axis.range(), colors)
            }
            _ => ColorScale::categorical(theme.categories(), colors),
        }
    }

    /// Pack the datum into a square of side `side`.
    #[must_use]
    pub fn layout(datum: &ChartDatum, side: f64) -> PackedLayout {
        let values: Vec<f64> = datum.children.iter().map(|c| c.value).collect();
        PackLayout::square(side).layout(&values)
    }

    /// Build the chart's SVG document without touching a mount point.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-positive size, an unbound `label`/`size`
    /// axis, or an empty theme color set.
    pub fn build<D, A, T, S>(
        &self,
        dataset: &D,
        axes: &A,
        theme: &T,
        size: &S,
    ) -> Result<SvgDocument>
    where
        D: DatasetAccessor + ?Sized,
        A: AxesAccessor + ?Sized,
        T: ThemeAccessor + ?Sized,
        S: SizeAccessor + ?Sized,
    {
        let (width, height) = size.size();
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(Error::InvalidDimensions { width, height });
        }

        let datum = ChartDatum::from_axes(dataset, axes)?;
        let color = Self::color_scale(&datum, axes, theme)?;

        let side = width.min(height);
        let margin = (width - side) / 2.0;
        let packed = Self::layout(&datum, side);
        tracing::debug!(rows = datum.children.len(), side, margin, "rendering bubble chart");

        let mut svg = SvgDocument::new(side, side)
            .class("bubble")
            .style(&format!("margin-left: {margin}px"))
            .stylesheet(STYLESHEET);

        for (leaf, node) in datum.children.iter().zip(&packed.leaves) {
            let fill = color.scale(&leaf.color);
            svg.add_element(
                SvgElement::group("node", node.x, node.y)
                    .child(SvgElement::Title {
                        text: leaf.tooltip(),
                    })
                    .child(SvgElement::Circle {
                        cx: 0.0,
                        cy: 0.0,
                        r: node.r,
                        fill,
                    })
                    .child(SvgElement::Text {
                        x: 0.0,
                        y: 0.0,
                        dy: Some(".3em".to_string()),
                        text: truncate_chars(&leaf.label, label_capacity(node.r)).to_string(),
                        anchor: TextAnchor::Middle,
                        class: Some(label_class(fill).to_string()),
                    }),
            );
        }

        Ok(svg)
    }

    /// Replace the contents of `mount` with the chart.
    ///
    /// # Errors
    ///
    /// See [`BubbleChart::build`]. On error `mount` is left untouched.
    pub fn render<M, D, A, T, S>(
        &self,
        mount: &mut M,
        dataset: &D,
        axes: &A,
        theme: &T,
        size: &S,
    ) -> Result<()>
    where
        M: RenderTarget + ?Sized,
        D: DatasetAccessor + ?Sized,
        A: AxesAccessor + ?Sized,
        T: ThemeAccessor + ?Sized,
        S: SizeAccessor + ?Sized,
    {
        let svg = self.build(dataset, axes, theme, size)?;
        mount.clear();
        mount.append(svg);
        Ok(())
    }
}

impl Visualization for BubbleChart {
    fn render(&self, target: &mut dyn RenderTarget, ctx: &RenderContext<'_>) -> Result<()> {
        BubbleChart::render(self, target, ctx.dataset, ctx.axes, ctx.theme, ctx.size)
    }
}

/// CSS class for a label drawn on `fill`.
#[must_use]
pub fn label_class(fill: Rgba) -> &'static str {
    if fill.lab_lightness() < INVERTED_LIGHTNESS {
        "inverted"
    } else {
        ""
    }
}

/// Register the bubble chart with `registry`.
///
/// # Errors
///
/// Returns [`Error::DuplicateVisualization`] if it is already registered.
pub fn register(registry: &mut Registry) -> Result<()> {
    registry.register(BubbleChart::meta(), Box::new(BubbleChart::new()))
}
