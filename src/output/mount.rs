//! Mount points: the containers charts are rendered into.

use super::svg::{escape, SvgDocument};
use crate::error::Result;
use crate::host::RenderTarget;
use std::fs;
use std::path::Path;

/// In-memory stand-in for a host page element holding rendered SVG.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MountPoint {
    id: String,
    documents: Vec<SvgDocument>,
}

impl MountPoint {
    /// Create an empty mount point with an element id.
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            documents: Vec::new(),
        }
    }

    /// Element id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Documents appended so far.
    #[must_use]
    pub fn documents(&self) -> &[SvgDocument] {
        &self.documents
    }

    /// True if nothing has been rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Concatenated SVG of every document.
    #[must_use]
    pub fn to_svg(&self) -> String {
        self.documents.iter().map(SvgDocument::render).collect()
    }

    /// Contents wrapped in a `<div>` carrying the element id.
    #[must_use]
    pub fn to_html(&self) -> String {
        format!(r#"<div id="{}" class="chart">{}</div>"#, escape(&self.id), self.to_svg())
    }

    /// Standalone HTML page showing the contents.
    #[must_use]
    pub fn to_html_page(&self, title: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
            escape(title),
            self.to_html()
        )
    }

    /// Write the SVG contents to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_svg())?;
        Ok(())
    }
}

impl RenderTarget for MountPoint {
    fn clear(&mut self) {
        self.documents.clear();
    }

    fn append(&mut self, svg: SvgDocument) {
        self.documents.push(svg);
    }
}
