//! Visualization metadata descriptors.
//!
//! The static description a visualization hands to the host at registration
//! time: identity, external assets, the axes it binds data to and the editor
//! controls that select columns for those axes.

use crate::data::ColumnType;
use crate::error::{Error, Result};
use crate::host::AxesAccessor;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An external script the visualization depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    /// Path relative to the plugin's static directory.
    pub local: String,
    /// CDN fallback URL.
    pub cdn: String,
}

/// A data axis and the column types it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSpec {
    /// Axis name.
    pub name: String,
    /// Accepted column types.
    pub accepts: Vec<ColumnType>,
    /// Whether the axis may be left unbound.
    #[serde(default)]
    pub optional: bool,
}

impl AxisSpec {
    /// A required axis.
    #[must_use]
    pub fn new(name: &str, accepts: &[ColumnType]) -> Self {
        Self {
            name: name.to_string(),
            accepts: accepts.to_vec(),
            optional: false,
        }
    }

    /// Mark the axis optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// True if `column_type` is accepted.
    #[must_use]
    pub fn accepts(&self, column_type: ColumnType) -> bool {
        self.accepts.contains(&column_type)
    }
}

/// Reference from an editor control to an axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisRef {
    /// Axis name.
    pub id: String,
    /// Label shown in the editor.
    pub label: String,
}

/// Editor control kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OptionControl {
    /// Column selector for one or more axes.
    SelectAxisColumn {
        /// Axes the selector binds.
        axes: Vec<AxisRef>,
    },
}

/// An editor option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Option key.
    pub key: String,
    /// Control descriptor.
    #[serde(flatten)]
    pub control: OptionControl,
}

impl OptionSpec {
    /// Column selector for a single axis.
    #[must_use]
    pub fn select_axis_column(key: &str, axis: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            control: OptionControl::SelectAxisColumn {
                axes: vec![AxisRef {
                    id: axis.to_string(),
                    label: label.to_string(),
                }],
            },
        }
    }
}

/// Metadata describing a visualization type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualizationMeta {
    /// Unique id within the registry.
    pub id: String,
    /// Display name.
    pub title: String,
    /// External assets, in load order.
    #[serde(default)]
    pub libraries: Vec<Library>,
    /// Data axes, in declaration order.
    #[serde(default)]
    pub axes: Vec<AxisSpec>,
    /// Editor options, in declaration order.
    #[serde(default)]
    pub options: Vec<OptionSpec>,
}

impl VisualizationMeta {
    /// Create a descriptor with no libraries, axes or options.
    #[must_use]
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            libraries: Vec::new(),
            axes: Vec::new(),
            options: Vec::new(),
        }
    }

    /// Add a library.
    #[must_use]
    pub fn library(mut self, local: &str, cdn: &str) -> Self {
        self.libraries.push(Library {
            local: local.to_string(),
            cdn: cdn.to_string(),
        });
        self
    }

    /// Add an axis.
    #[must_use]
    pub fn axis(mut self, axis: AxisSpec) -> Self {
        self.axes.push(axis);
        self
    }

    /// Add an editor option.
    #[must_use]
    pub fn option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    /// Look up a declared axis.
    #[must_use]
    pub fn find_axis(&self, name: &str) -> Option<&AxisSpec> {
        self.axes.iter().find(|a| a.name == name)
    }

    /// Check the descriptor is well formed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDescriptor`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Error::InvalidDescriptor { id: self.id.clone(), reason };

        if self.id.trim().is_empty() {
            return Err(invalid("id is empty".to_string()));
        }
        if self.title.trim().is_empty() {
            return Err(invalid("title is empty".to_string()));
        }

        for library in &self.libraries {
            if library.local.is_empty() || library.cdn.is_empty() {
                return Err(invalid("library needs both a local path and a CDN url".to_string()));
            }
        }

        let mut axis_names = HashSet::new();
        for axis in &self.axes {
            if axis.name.is_empty() {
                return Err(invalid("axis name is empty".to_string()));
            }
            if !axis_names.insert(axis.name.as_str()) {
                return Err(invalid(format!("axis '{}' declared twice", axis.name)));
            }
            if axis.accepts.is_empty() {
                return Err(invalid(format!("axis '{}' accepts no column types", axis.name)));
            }
        }

        let mut option_keys = HashSet::new();
        for option in &self.options {
            if !option_keys.insert(option.key.as_str()) {
                return Err(invalid(format!("option '{}' declared twice", option.key)));
            }
            let OptionControl::SelectAxisColumn { axes } = &option.control;
            if let Some(unknown) = axes.iter().find(|r| !axis_names.contains(r.id.as_str())) {
                return Err(invalid(format!(
                    "option '{}' refers to undeclared axis '{}'",
                    option.key, unknown.id
                )));
            }
        }

        Ok(())
    }

    /// Check host bindings against the declared axes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingAxis`] for an unbound required axis and
    /// [`Error::AxisTypeMismatch`] for a column of an unaccepted type.
    pub fn check_bindings<A: AxesAccessor + ?Sized>(&self, axes: &A) -> Result<()> {
        for spec in &self.axes {
            match axes.axis(&spec.name) {
                None if spec.optional => {}
                None => return Err(Error::MissingAxis(spec.name.clone())),
                Some(bound) if !spec.accepts(bound.column_type()) => {
                    return Err(Error::AxisTypeMismatch {
                        axis: spec.name.clone(),
                        found: bound.column_type().to_string(),
                    });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Serialize as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }
}
