//! Visualization registry.
//!
//! The host-side catalogue of chart types: plugins register a descriptor and
//! a renderer once, and chart instances are later rendered by id. The
//! registry is an ordinary value passed by reference; there is no global
//! state.

use crate::error::{Error, Result};
use crate::host::{AxesAccessor, DatasetAccessor, RenderTarget, SizeAccessor, ThemeAccessor};
use crate::meta::VisualizationMeta;
use std::collections::BTreeMap;

/// Everything a renderer reads for one chart instance.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    /// Dataset rows.
    pub dataset: &'a dyn DatasetAccessor,
    /// Axis bindings.
    pub axes: &'a dyn AxesAccessor,
    /// Active theme.
    pub theme: &'a dyn ThemeAccessor,
    /// Available size.
    pub size: &'a dyn SizeAccessor,
}

impl<'a> RenderContext<'a> {
    /// Bundle the accessors for a render call.
    #[must_use]
    pub fn new(
        dataset: &'a dyn DatasetAccessor,
        axes: &'a dyn AxesAccessor,
        theme: &'a dyn ThemeAccessor,
        size: &'a dyn SizeAccessor,
    ) -> Self {
        Self {
            dataset,
            axes,
            theme,
            size,
        }
    }
}

/// A renderer the registry can dispatch to.
pub trait Visualization: Send + Sync {
    /// Populate `target` from the context.
    ///
    /// # Errors
    ///
    /// Returns an error if the chart cannot be drawn (bad size, empty theme
    /// palette, unbound required axis).
    fn render(&self, target: &mut dyn RenderTarget, ctx: &RenderContext<'_>) -> Result<()>;
}

/// A registered visualization.
pub struct Registered {
    meta: VisualizationMeta,
    renderer: Box<dyn Visualization>,
}

impl Registered {
    /// Descriptor supplied at registration.
    #[must_use]
    pub fn meta(&self) -> &VisualizationMeta {
        &self.meta
    }

    /// The renderer.
    #[must_use]
    pub fn renderer(&self) -> &dyn Visualization {
        self.renderer.as_ref()
    }
}

impl std::fmt::Debug for Registered {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registered").field("meta", &self.meta).finish_non_exhaustive()
    }
}

/// Catalogue of visualizations keyed by id.
#[derive(Debug, Default)]
pub struct Registry {
    entries: BTreeMap<String, Registered>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a visualization.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDescriptor`] for a malformed descriptor and
    /// [`Error::DuplicateVisualization`] if the id is taken.
    pub fn register(
        &mut self,
        meta: VisualizationMeta,
        renderer: Box<dyn Visualization>,
    ) -> Result<()> {
        meta.validate()?;
        if self.entries.contains_key(&meta.id) {
            return Err(Error::DuplicateVisualization(meta.id));
        }

        tracing::debug!(id = %meta.id, axes = meta.axes.len(), "registered visualization");
        self.entries.insert(meta.id.clone(), Registered { meta, renderer });
        Ok(())
    }

    /// Look up a visualization by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Registered> {
        self.entries.get(id)
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of registered visualizations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render a chart instance with the visualization registered as `id`.
    ///
    /// Axis bindings are checked against the descriptor before the renderer
    /// runs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownVisualization`], a binding error, or whatever
    /// the renderer reports.
    pub fn render(
        &self,
        id: &str,
        target: &mut dyn RenderTarget,
        ctx: &RenderContext<'_>,
    ) -> Result<()> {
        let entry = self.get(id).ok_or_else(|| Error::UnknownVisualization(id.to_string()))?;
        entry.meta.check_bindings(ctx.axes)?;
        entry.renderer.render(target, ctx)
    }
}
