//! End-to-end rendering tests: registry dispatch, chart documents, and
//! layout properties of the emitted SVG.
//!
//! Run: cargo test --test render_test

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use bubble_chart::chart::{self, ChartDatum};
use bubble_chart::prelude::*;
use bubble_chart::output::SvgElement;
use proptest::prelude::*;

const COUNTRIES: &str = include_str!("../demos/countries.yaml");
const GDP: &str = include_str!("../demos/gdp.yaml");

fn registry() -> Registry {
    let mut registry = Registry::new();
    chart::register(&mut registry).unwrap();
    registry
}

/// `(x, y, r)` of every node group, in paint order.
fn circles(svg: &SvgDocument) -> Vec<(f64, f64, f64)> {
    svg.elements()
        .iter()
        .map(|node| {
            let SvgElement::Group { translate: Some((x, y)), children, .. } = node else {
                panic!("expected translated group, got {node:?}");
            };
            let SvgElement::Circle { r, .. } = &children[1] else {
                panic!("expected circle, got {:?}", children[1]);
            };
            (*x, *y, *r)
        })
        .collect()
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn test_descriptor_matches_plugin_contract() {
    let registry = registry();
    let meta = registry.get("bubble-chart").unwrap().meta();

    assert_eq!(meta.title, "Bubble Chart (d3)");
    assert_eq!(meta.libraries[0].local, "vendor/d3.min.js");
    assert_eq!(meta.libraries[0].cdn, "//cdnjs.cloudflare.com/ajax/libs/d3/3.3.11/d3.min.js");

    let names: Vec<&str> = meta.axes.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["label", "size", "color"]);
    assert!(meta.find_axis("label").unwrap().accepts(ColumnType::Date));
    assert!(!meta.find_axis("size").unwrap().accepts(ColumnType::Text));

    let keys: Vec<&str> = meta.options.iter().map(|o| o.key.as_str()).collect();
    assert_eq!(keys, vec!["select-label", "select-size", "select-color"]);
}

#[test]
fn test_descriptor_yaml_export() {
    let yaml = BubbleChart::meta().to_yaml().unwrap();
    assert!(yaml.contains("id: bubble-chart"));
    assert!(yaml.contains("type: select-axis-column"));
}

#[test]
fn test_registry_rejects_wrong_column_type() {
    let dataset = Dataset::new()
        .column(Column::texts("name", &["a"]))
        .bind("label", "name")
        .bind("size", "name");
    let theme = Theme::default();
    let size = (100.0, 100.0);
    let mut mount = MountPoint::new("chart");
    let ctx = RenderContext::new(&dataset, &dataset, &theme, &size);

    let err = registry().render("bubble-chart", &mut mount, &ctx).unwrap_err();
    assert!(matches!(err, Error::AxisTypeMismatch { ref axis, .. } if axis == "size"));
    assert!(mount.is_empty());
}

// ============================================================================
// Chart documents
// ============================================================================

#[test]
fn test_countries_demo() {
    let document = ChartDocument::parse(COUNTRIES).unwrap();
    let mount = document.render(&registry()).unwrap();
    let svg = &mount.documents()[0];

    assert_eq!(svg.width(), 480.0);
    assert_eq!(svg.root_style(), Some("margin-left: 80px"));
    assert_eq!(svg.elements().len(), 10);

    let output = mount.to_svg();
    assert!(output.contains("<title>China: 1,412,000,000</title>"));
    assert!(output.contains("<title>Australia: 26,000,000</title>"));

    // China and India are far larger than Australia.
    let nodes = circles(svg);
    assert!(nodes[0].2 > nodes[9].2 * 5.0);
}

#[test]
fn test_countries_share_continent_colors() {
    let document = ChartDocument::parse(COUNTRIES).unwrap();
    let mount = document.render(&registry()).unwrap();
    let fills: Vec<Rgba> = mount.documents()[0]
        .elements()
        .iter()
        .map(|node| match &node.children()[1] {
            SvgElement::Circle { fill, .. } => *fill,
            other => panic!("expected circle, got {other:?}"),
        })
        .collect();

    // China, India and Indonesia are all in Asia.
    assert_eq!(fills[0], fills[1]);
    assert_eq!(fills[0], fills[3]);
    assert_ne!(fills[0], fills[2]);
}

#[test]
fn test_gdp_demo_uses_gradient() {
    let document = ChartDocument::parse(GDP).unwrap();
    let theme = document.theme().unwrap();
    assert_eq!(theme.name, "greens");

    let mount = document.render(&registry()).unwrap();
    let output = mount.to_svg();
    // Norway has the highest per-capita value, Kenya the lowest.
    assert!(output.contains("fill: #00441b"));
    assert!(output.contains("fill: #f7fcf5"));
}

#[test]
fn test_rerender_replaces_previous_svg() {
    let registry = registry();
    let dataset = Dataset::new()
        .column(Column::texts("name", &["A", "B"]))
        .column(Column::numbers("value", &[10.0, 30.0]))
        .bind("label", "name")
        .bind("size", "value");
    let theme = Theme::default();
    let mut mount = MountPoint::new("chart");

    for size in [(200.0, 200.0), (300.0, 100.0)] {
        let ctx = RenderContext::new(&dataset, &dataset, &theme, &size);
        registry.render("bubble-chart", &mut mount, &ctx).unwrap();
    }

    assert_eq!(mount.documents().len(), 1);
    assert_eq!(mount.documents()[0].width(), 100.0);
}

// ============================================================================
// Custom host
// ============================================================================

struct Labels(Vec<String>);
struct Sizes(Vec<f64>);

impl AxisAccessor for Labels {
    fn column_type(&self) -> ColumnType {
        ColumnType::Text
    }
    fn range(&self) -> Option<(f64, f64)> {
        None
    }
    fn val(&self, row: usize) -> Value {
        self.0.get(row).cloned().into()
    }
}

impl AxisAccessor for Sizes {
    fn column_type(&self) -> ColumnType {
        ColumnType::Number
    }
    fn range(&self) -> Option<(f64, f64)> {
        None
    }
    fn val(&self, row: usize) -> Value {
        self.0.get(row).copied().into()
    }
}

struct Host {
    labels: Labels,
    sizes: Sizes,
}

impl DatasetAccessor for Host {
    fn row_count(&self) -> usize {
        self.labels.0.len()
    }
}

impl AxesAccessor for Host {
    fn axis(&self, name: &str) -> Option<&dyn AxisAccessor> {
        match name {
            "label" => Some(&self.labels),
            "size" => Some(&self.sizes),
            _ => None,
        }
    }
}

struct FixedTheme;

impl ThemeAccessor for FixedTheme {
    fn gradient(&self) -> &[Rgba] {
        &[Rgba::WHITE, Rgba::BLACK]
    }
    fn categories(&self) -> &[Rgba] {
        &[Rgba::BLUE]
    }
}

#[derive(Default)]
struct Recorder {
    clears: usize,
    documents: Vec<SvgDocument>,
}

impl RenderTarget for Recorder {
    fn clear(&mut self) {
        self.clears += 1;
        self.documents.clear();
    }
    fn append(&mut self, svg: SvgDocument) {
        self.documents.push(svg);
    }
}

#[test]
fn test_render_into_custom_host() {
    let host = Host {
        labels: Labels(vec!["one".to_string(), "two".to_string(), "three".to_string()]),
        sizes: Sizes(vec![1.0, 4.0, 9.0]),
    };
    let mut target = Recorder::default();

    BubbleChart::new().render(&mut target, &host, &host, &FixedTheme, &(90.0, 120.0)).unwrap();

    assert_eq!(target.clears, 1);
    assert_eq!(target.documents.len(), 1);
    let svg = &target.documents[0];
    assert_eq!(svg.width(), 90.0);
    assert_eq!(svg.root_style(), Some("margin-left: 0px"));

    let radii: Vec<f64> = circles(svg).iter().map(|c| c.2).collect();
    assert!(radii[0] < radii[1] && radii[1] < radii[2]);
    // Radii follow the square root of the values.
    assert!((radii[1] / radii[0] - 2.0).abs() < 1e-9);
    assert!((radii[2] / radii[0] - 3.0).abs() < 1e-9);
}

#[test]
fn test_failed_render_leaves_target_untouched() {
    let host = Host {
        labels: Labels(vec!["a".to_string()]),
        sizes: Sizes(vec![1.0]),
    };
    let mut target = Recorder::default();
    let result = BubbleChart::new().render(&mut target, &host, &host, &FixedTheme, &(0.0, 10.0));

    assert!(matches!(result, Err(Error::InvalidDimensions { .. })));
    assert_eq!(target.clears, 0);
}

// ============================================================================
// Layout properties
// ============================================================================

fn dataset(sizes: &[f64]) -> Dataset {
    let labels: Vec<String> = (0..sizes.len()).map(|i| format!("item {i}")).collect();
    let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
    Dataset::new()
        .column(Column::texts("name", &refs))
        .column(Column::numbers("value", sizes))
        .bind("label", "name")
        .bind("size", "value")
        .bind("color", "value")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_one_node_per_row_in_order(sizes in prop::collection::vec(0.0f64..1000.0, 0..40)) {
        let ds = dataset(&sizes);
        let svg = BubbleChart::new().build(&ds, &ds, &Theme::default(), &(300.0, 200.0)).unwrap();
        prop_assert_eq!(svg.elements().len(), sizes.len());

        let datum = ChartDatum::from_axes(&ds, &ds).unwrap();
        for (i, (node, leaf)) in svg.elements().iter().zip(&datum.children).enumerate() {
            prop_assert_eq!(&leaf.label, &format!("item {i}"));
            let title = SvgElement::Title {
                text: leaf.tooltip(),
            };
            prop_assert_eq!(&node.children()[0], &title);
        }
    }

    #[test]
    fn prop_circles_inside_square_without_overlap(
        sizes in prop::collection::vec(0.1f64..1000.0, 1..40),
        width in 50.0f64..800.0,
        height in 50.0f64..800.0,
        exponent in -15i32..15,
    ) {
        let factor = 10f64.powi(exponent);
        let sizes: Vec<f64> = sizes.iter().map(|s| s * factor).collect();
        let ds = dataset(&sizes);
        let svg = BubbleChart::new()
            .build(&ds, &ds, &Theme::default(), &(width, height))
            .unwrap();
        let side = width.min(height);
        let tol = 1e-6 * side;
        let nodes = circles(&svg);
        prop_assert_eq!(nodes.len(), sizes.len());
        for &(x, y, r) in &nodes {
            prop_assert!(x.is_finite() && y.is_finite() && r.is_finite());
        }

        for &(x, y, r) in &nodes {
            prop_assert!(x - r >= -tol && x + r <= side + tol);
            prop_assert!(y - r >= -tol && y + r <= side + tol);
        }
        for (i, a) in nodes.iter().enumerate() {
            for b in &nodes[i + 1..] {
                let d = ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt();
                prop_assert!(d + tol >= a.2 + b.2);
            }
        }
    }

    #[test]
    fn prop_labels_fit_radius(sizes in prop::collection::vec(0.0f64..1000.0, 1..20)) {
        let ds = dataset(&sizes);
        let svg = BubbleChart::new().build(&ds, &ds, &Theme::default(), &(400.0, 400.0)).unwrap();
        for node in svg.elements() {
            let (SvgElement::Circle { r, .. }, SvgElement::Text { text, .. }) =
                (&node.children()[1], &node.children()[2])
            else {
                panic!("unexpected node layout");
            };
            prop_assert!(text.chars().count() <= (r / 5.0).floor() as usize);
        }
    }
}
