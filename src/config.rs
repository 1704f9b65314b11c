//! Chart documents.
//!
//! A YAML file describing one chart instance: the visualization to use,
//! its size and theme, the data columns and which axis each column feeds.
//!
//! ```yaml
//! type: bubble-chart
//! size: [600, 400]
//! theme: default
//! axes: { label: country, size: population }
//! columns:
//!   - { name: country, type: text, values: [France, Germany] }
//!   - { name: population, type: number, values: [67.8, 83.2] }
//! ```

use crate::data::{Column, ColumnType, Dataset, Value};
use crate::error::{Error, Result};
use crate::output::MountPoint;
use crate::registry::{Registry, RenderContext};
use crate::theme::Theme;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Theme reference: a built-in name or an inline definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ThemeSpec {
    /// Built-in theme by name.
    Named(String),
    /// Inline theme.
    Inline(Theme),
}

impl Default for ThemeSpec {
    fn default() -> Self {
        Self::Named("default".to_string())
    }
}

/// A data column as written in a chart document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColumnSpec {
    /// Column name.
    pub name: String,
    /// Column type.
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Cell values; `null` marks a missing value.
    #[serde(default)]
    pub values: Vec<Value>,
}

/// A chart instance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChartDocument {
    /// Registered visualization id.
    #[serde(rename = "type", default = "default_visualization")]
    pub visualization: String,

    /// Element id of the mount point.
    #[serde(default = "default_mount")]
    pub mount: String,

    /// Available `[width, height]` in pixels.
    #[serde(default = "default_size")]
    pub size: [f64; 2],

    /// Theme name or inline theme.
    #[serde(default)]
    pub theme: ThemeSpec,

    /// Axis name to column name.
    #[serde(default)]
    pub axes: BTreeMap<String, String>,

    /// Data columns.
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,
}

fn default_visualization() -> String {
    crate::chart::ID.to_string()
}
fn default_mount() -> String {
    "chart".to_string()
}
fn default_size() -> [f64; 2] {
    [600.0, 400.0]
}

impl ChartDocument {
    /// Loads a chart document from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses a chart document from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`], with the line number, if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::Config(format!("line {line}: {e}"))
        })
    }

    /// Build the dataset and apply the axis bindings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if an axis names a column that does not exist.
    pub fn dataset(&self) -> Result<Dataset> {
        let mut dataset = Dataset::new();
        for spec in &self.columns {
            dataset.add_column(Column::new(&spec.name, spec.column_type, spec.values.clone()));
        }
        for (axis, column) in &self.axes {
            if !dataset.bind_axis(axis, column) {
                return Err(Error::Config(format!(
                    "axis '{axis}' is bound to unknown column '{column}'"
                )));
            }
        }
        Ok(dataset)
    }

    /// Resolve the theme.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an unknown theme name.
    pub fn theme(&self) -> Result<Theme> {
        match &self.theme {
            ThemeSpec::Named(name) => Theme::by_name(name)
                .ok_or_else(|| Error::Config(format!("unknown theme '{name}'"))),
            ThemeSpec::Inline(theme) => Ok(theme.clone()),
        }
    }

    /// Render through `registry` into a fresh mount point.
    ///
    /// # Errors
    ///
    /// Returns configuration errors from [`ChartDocument::dataset`] and
    /// [`ChartDocument::theme`], or whatever the registry reports.
    pub fn render(&self, registry: &Registry) -> Result<MountPoint> {
        let dataset = self.dataset()?;
        let theme = self.theme()?;
        let size = (self.size[0], self.size[1]);

        let mut mount = MountPoint::new(&self.mount);
        let ctx = RenderContext::new(&dataset, &dataset, &theme, &size);
        registry.render(&self.visualization, &mut mount, &ctx)?;
        Ok(mount)
    }
}
