//! Output: SVG document model and mount points.

mod mount;
mod svg;

pub use mount::MountPoint;
pub use svg::{SvgDocument, SvgElement, TextAnchor};
