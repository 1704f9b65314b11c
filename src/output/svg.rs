//! SVG document model and encoder.
//!
//! A small typed element tree covering what chart renderers emit (groups,
//! circles, text, tooltips), serialized to an SVG string.

use crate::color::Rgba;
use crate::error::Result;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// An SVG element.
///
/// Field names match SVG attribute names.
#[derive(Debug, Clone, PartialEq)]
pub enum SvgElement {
    /// Group (`<g>`), optionally translated.
    Group {
        /// CSS class.
        class: Option<String>,
        /// `translate(x,y)` offset.
        translate: Option<(f64, f64)>,
        /// Child elements, in paint order.
        children: Vec<SvgElement>,
    },
    /// Tooltip text for the parent element (`<title>`).
    Title {
        /// Tooltip text.
        text: String,
    },
    /// Circle; zero `cx`/`cy` are omitted.
    Circle {
        /// Center x.
        cx: f64,
        /// Center y.
        cy: f64,
        /// Radius.
        r: f64,
        /// Fill color, written as a `style` declaration.
        fill: Rgba,
    },
    /// Text.
    Text {
        /// Anchor x.
        x: f64,
        /// Anchor y.
        y: f64,
        /// Vertical shift (e.g. `.3em`).
        dy: Option<String>,
        /// Text content.
        text: String,
        /// Horizontal alignment.
        anchor: TextAnchor,
        /// CSS class; an empty string is written as `class=""`.
        class: Option<String>,
    },
}

impl SvgElement {
    /// A group translated to `(x, y)`.
    #[must_use]
    pub fn group(class: &str, x: f64, y: f64) -> Self {
        Self::Group {
            class: Some(class.to_string()),
            translate: Some((x, y)),
            children: Vec::new(),
        }
    }

    /// Append a child to a group; no-op for other elements.
    #[must_use]
    pub fn child(mut self, element: SvgElement) -> Self {
        if let Self::Group { children, .. } = &mut self {
            children.push(element);
        }
        self
    }

    /// Children of a group; empty for other elements.
    #[must_use]
    pub fn children(&self) -> &[SvgElement] {
        match self {
            Self::Group { children, .. } => children,
            _ => &[],
        }
    }
}

/// Text anchor position for SVG text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Align text start at position (left-aligned for LTR)
    #[default]
    Start,
    /// Center text at position
    Middle,
    /// Align text end at position (right-aligned for LTR)
    End,
}

impl TextAnchor {
    fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// A standalone `<svg>` document.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgDocument {
    width: f64,
    height: f64,
    class: Option<String>,
    style: Option<String>,
    stylesheet: Option<String>,
    elements: Vec<SvgElement>,
}

impl SvgDocument {
    /// Create an empty document with given dimensions.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            class: None,
            style: None,
            stylesheet: None,
            elements: Vec::new(),
        }
    }

    /// Set the root CSS class.
    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    /// Set the root inline style.
    #[must_use]
    pub fn style(mut self, style: &str) -> Self {
        self.style = Some(style.to_string());
        self
    }

    /// Embed a `<style>` block.
    #[must_use]
    pub fn stylesheet(mut self, css: &str) -> Self {
        self.stylesheet = Some(css.to_string());
        self
    }

    /// Add an element (builder style).
    #[must_use]
    pub fn element(mut self, element: SvgElement) -> Self {
        self.elements.push(element);
        self
    }

    /// Add an element.
    pub fn add_element(&mut self, element: SvgElement) {
        self.elements.push(element);
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Root inline style.
    #[must_use]
    pub fn root_style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// Top-level elements in paint order.
    #[must_use]
    pub fn elements(&self) -> &[SvgElement] {
        &self.elements
    }

    /// Render to SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(256 + self.elements.len() * 192);

        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}""#,
            self.width, self.height, self.width, self.height
        );
        if let Some(class) = &self.class {
            let _ = write!(svg, r#" class="{}""#, escape(class));
        }
        if let Some(style) = &self.style {
            let _ = write!(svg, r#" style="{}""#, escape(style));
        }
        svg.push_str(">\n");

        if let Some(css) = &self.stylesheet {
            let _ = writeln!(svg, "  <style>{}</style>", escape(css));
        }

        for element in &self.elements {
            write_element(&mut svg, element, 1);
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

/// Escape XML special characters.
pub(crate) fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn write_element(svg: &mut String, element: &SvgElement, depth: usize) {
    let indent = "  ".repeat(depth);
    match element {
        SvgElement::Group { class, translate, children } => {
            let _ = write!(svg, "{indent}<g");
            if let Some(class) = class {
                let _ = write!(svg, r#" class="{}""#, escape(class));
            }
            if let Some((x, y)) = translate {
                let _ = write!(svg, r#" transform="translate({x},{y})""#);
            }
            if children.is_empty() {
                svg.push_str("/>\n");
                return;
            }
            svg.push_str(">\n");
            for child in children {
                write_element(svg, child, depth + 1);
            }
            let _ = writeln!(svg, "{indent}</g>");
        }
        SvgElement::Title { text } => {
            let _ = writeln!(svg, "{indent}<title>{}</title>", escape(text));
        }
        SvgElement::Circle { cx, cy, r, fill } => {
            let _ = write!(svg, "{indent}<circle");
            if *cx != 0.0 {
                let _ = write!(svg, r#" cx="{cx}""#);
            }
            if *cy != 0.0 {
                let _ = write!(svg, r#" cy="{cy}""#);
            }
            let _ = writeln!(svg, r#" r="{r}" style="fill: {}"/>"#, fill.to_hex());
        }
        SvgElement::Text { x, y, dy, text, anchor, class } => {
            let _ = write!(svg, "{indent}<text");
            if *x != 0.0 {
                let _ = write!(svg, r#" x="{x}""#);
            }
            if *y != 0.0 {
                let _ = write!(svg, r#" y="{y}""#);
            }
            let _ = write!(svg, r#" text-anchor="{}""#, anchor.as_str());
            if let Some(dy) = dy {
                let _ = write!(svg, r#" dy="{}""#, escape(dy));
            }
            if let Some(class) = class {
                let _ = write!(svg, r#" class="{}""#, escape(class));
            }
            let _ = writeln!(svg, ">{}</text>", escape(text));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> SvgElement {
        SvgElement::group("node", 10.0, 20.5)
            .child(SvgElement::Title {
                text: "A: 10".to_string(),
            })
            .child(SvgElement::Circle {
                cx: 0.0,
                cy: 0.0,
                r: 5.0,
                fill: Rgba::RED,
            })
            .child(SvgElement::Text {
                x: 0.0,
                y: 0.0,
                dy: Some(".3em".to_string()),
                text: "A".to_string(),
                anchor: TextAnchor::Middle,
                class: Some(String::new()),
            })
    }

    #[test]
    fn test_svg_document_new() {
        let svg = SvgDocument::new(800.0, 600.0).render();
        assert!(svg.contains("width=\"800\""));
        assert!(svg.contains("height=\"600\""));
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn test_root_class_and_style() {
        let svg = SvgDocument::new(100.0, 100.0)
            .class("bubble")
            .style("margin-left: 50px")
            .render();
        assert!(svg.contains(r#"class="bubble""#));
        assert!(svg.contains(r#"style="margin-left: 50px""#));
    }

    #[test]
    fn test_group_tree() {
        let svg = SvgDocument::new(100.0, 100.0).element(node()).render();
        assert!(svg.contains(r#"<g class="node" transform="translate(10,20.5)">"#));
        assert!(svg.contains("<title>A: 10</title>"));
        assert!(svg.contains(r#"<circle r="5" style="fill: #ff0000"/>"#));
        assert!(svg.contains(r#"<text text-anchor="middle" dy=".3em" class="">A</text>"#));
        assert!(svg.contains("</g>"));
    }

    #[test]
    fn test_circle_offsets_written_when_set() {
        let svg = SvgDocument::new(10.0, 10.0)
            .element(SvgElement::Circle {
                cx: 3.0,
                cy: 4.0,
                r: 1.0,
                fill: Rgba::BLUE,
            })
            .render();
        assert!(svg.contains(r#"<circle cx="3" cy="4" r="1""#));
    }

    #[test]
    fn test_text_escaping() {
        let svg = SvgDocument::new(100.0, 100.0)
            .element(SvgElement::Title {
                text: "<script>alert('x')</script> & \"q\"".to_string(),
            })
            .render();
        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&lt;script&gt;"));
        assert!(svg.contains("&amp;"));
        assert!(svg.contains("&quot;"));
    }

    #[test]
    fn test_empty_group_self_closes() {
        let svg = SvgDocument::new(10.0, 10.0)
            .element(SvgElement::group("node", 1.0, 1.0))
            .render();
        assert!(svg.contains(r#"<g class="node" transform="translate(1,1)"/>"#));
    }

    #[test]
    fn test_child_on_non_group_is_noop() {
        let title = SvgElement::Title {
            text: "t".to_string(),
        }
        .child(node());
        assert!(title.children().is_empty());
        assert_eq!(node().children().len(), 3);
    }

    #[test]
    fn test_stylesheet() {
        let svg = SvgDocument::new(10.0, 10.0).stylesheet("text { fill: #333 }").render();
        assert!(svg.contains("<style>text { fill: #333 }</style>"));
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        SvgDocument::new(10.0, 10.0).element(node()).write_to_file(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
        assert!(content.contains("</svg>"));
    }

    #[test]
    fn test_text_anchor_default() {
        assert_eq!(TextAnchor::default(), TextAnchor::Start);
        assert_eq!(TextAnchor::End.as_str(), "end");
    }
}
