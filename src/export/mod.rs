//! Frame export.
//!
//! Selects the layers of a frame, collects their pixels once, and encodes
//! them with the requested strategy. When a strategy produces nothing even
//! though there are visible pixels, the next less aggressive one is tried:
//! CSS classes, then optimized paths, then flat rectangles.

mod json;
mod layers;
pub mod report;
mod svg;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PxSvgError, Result};
use crate::types::Sprite;
use crate::vector::{ClassTable, HostDecoder, NamedColours};

pub use json::{layers_to_json, LayerSvg};
pub use layers::{
    collect_pixels, layer_status, select_layers, ColourGroup, LayerPixels, LayerStatus,
    SelectedLayer, FALLBACK_FRAME,
};
pub use report::{Diagnostic, ExportReport, Severity};
pub use svg::{encode_css, encode_flat, encode_optimized, Canvas};

use report::{EMPTY, STRATEGY_FALLBACK};

/// SVG encoding strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// One `<rect>` per pixel.
    Flat,
    /// Region paths grouped by colour, inline fills.
    Optimized,
    /// Region paths grouped by colour, fills via a `<style>` block.
    #[serde(rename = "css")]
    CssClasses,
}

impl Strategy {
    /// Resolve the caller's flags. Without `optimized`, CSS classes are ignored.
    pub fn from_flags(optimized: bool, css_classes: bool) -> Self {
        match (optimized, css_classes) {
            (false, _) => Strategy::Flat,
            (true, false) => Strategy::Optimized,
            (true, true) => Strategy::CssClasses,
        }
    }

    /// The next less aggressive strategy, if any.
    pub fn fallback(self) -> Option<Self> {
        match self {
            Strategy::CssClasses => Some(Strategy::Optimized),
            Strategy::Optimized => Some(Strategy::Flat),
            Strategy::Flat => None,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Flat => write!(f, "flat"),
            Strategy::Optimized => write!(f, "optimized"),
            Strategy::CssClasses => write!(f, "css"),
        }
    }
}

impl FromStr for Strategy {
    type Err = PxSvgError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "flat" => Ok(Strategy::Flat),
            "optimized" => Ok(Strategy::Optimized),
            "css" => Ok(Strategy::CssClasses),
            other => Err(PxSvgError::Parse {
                message: format!("Unknown SVG strategy: {}", other),
                help: Some("Use one of: flat, optimized, css".to_string()),
            }),
        }
    }
}

/// Caller-selected export settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub strategy: Strategy,
    /// Wrap each layer's content in `<g id="layer-name">`.
    pub layer_groups: bool,
    /// Recognized colours for class naming.
    pub named_colours: NamedColours,
}

impl ExportOptions {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// Build options from the three caller flags.
    pub fn from_flags(optimized: bool, layer_groups: bool, css_classes: bool) -> Self {
        Self {
            strategy: Strategy::from_flags(optimized, css_classes),
            layer_groups,
            named_colours: NamedColours::default(),
        }
    }

    pub fn with_layer_groups(mut self, layer_groups: bool) -> Self {
        self.layer_groups = layer_groups;
        self
    }

    pub fn with_named_colours(mut self, named_colours: NamedColours) -> Self {
        self.named_colours = named_colours;
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::Optimized,
            layer_groups: true,
            named_colours: NamedColours::default(),
        }
    }
}

/// Result of an SVG export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgExport {
    /// The document, or `None` when there was nothing to export.
    pub svg: Option<String>,
    /// Strategy that produced `svg`.
    pub strategy: Option<Strategy>,
    pub report: ExportReport,
}

impl SvgExport {
    pub fn is_empty(&self) -> bool {
        self.svg.is_none()
    }
}

/// Result of a per-layer JSON export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonExport {
    pub json: String,
    /// Number of entries in the `layers` array.
    pub layer_count: usize,
    pub report: ExportReport,
}

/// Exports frames of one sprite.
///
/// Holds no state between calls; every export builds its own class table,
/// id allocator and occupancy grids.
pub struct Exporter<'a> {
    sprite: &'a Sprite,
    options: ExportOptions,
    host: Option<&'a dyn HostDecoder>,
}

impl fmt::Debug for Exporter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exporter")
            .field("width", &self.sprite.width())
            .field("height", &self.sprite.height())
            .field("options", &self.options)
            .field("host_decoder", &self.host.is_some())
            .finish()
    }
}

impl<'a> Exporter<'a> {
    pub fn new(sprite: &'a Sprite, options: ExportOptions) -> Self {
        Self {
            sprite,
            options,
            host: None,
        }
    }

    /// Use a host colour decoder when sampling pixels.
    pub fn with_host_decoder(mut self, host: &'a dyn HostDecoder) -> Self {
        self.host = Some(host);
        self
    }

    fn canvas(&self) -> Canvas {
        Canvas {
            width: self.sprite.width(),
            height: self.sprite.height(),
        }
    }

    /// Select layers for `frame` and collect their visible pixels.
    fn collect(&self, frame: u32, report: &mut ExportReport) -> Vec<LayerPixels> {
        select_layers(self.sprite, frame, report)
            .iter()
            .map(|layer| collect_pixels(self.sprite, layer, self.host, report))
            .collect()
    }

    /// Encode `layers` with the configured strategy, falling back as needed.
    fn encode(
        &self,
        layers: &[LayerPixels],
        layer_groups: bool,
        report: &mut ExportReport,
    ) -> Option<(String, Strategy)> {
        if layers.iter().all(LayerPixels::is_empty) {
            return None;
        }

        let canvas = self.canvas();
        encode_with(self.options.strategy, report, |strategy| match strategy {
            Strategy::Flat => encode_flat(canvas, layers, layer_groups),
            Strategy::Optimized => encode_optimized(canvas, layers, layer_groups),
            Strategy::CssClasses => {
                let mut classes = ClassTable::new(self.options.named_colours.clone());
                encode_css(canvas, layers, layer_groups, &mut classes)
            }
        })
    }

    /// Export `frame` as one SVG document containing every selected layer.
    pub fn svg(&self, frame: u32) -> SvgExport {
        let mut report = ExportReport::new();
        let layers = self.collect(frame, &mut report);

        match self.encode(&layers, self.options.layer_groups, &mut report) {
            Some((svg, strategy)) => SvgExport {
                svg: Some(svg),
                strategy: Some(strategy),
                report,
            },
            None => {
                report.push(
                    Diagnostic::warning(EMPTY, format!("Frame {} has nothing to export", frame))
                        .with_help("Check that the frame has visible, non-transparent layers"),
                );
                SvgExport {
                    svg: None,
                    strategy: None,
                    report,
                }
            }
        }
    }

    /// Export `frame` as a JSON document with one standalone SVG per layer.
    ///
    /// Layers with no visible pixels are left out; a frame with nothing to
    /// export yields an empty `layers` array.
    pub fn layers_json(&self, frame: u32) -> Result<JsonExport> {
        let mut report = ExportReport::new();
        let layers = self.collect(frame, &mut report);

        let mut entries = Vec::new();
        for layer in &layers {
            let single = std::slice::from_ref(layer);
            if let Some((svg, _)) = self.encode(single, false, &mut report) {
                entries.push(LayerSvg {
                    name: layer.name.clone(),
                    svg,
                });
            }
        }

        if entries.is_empty() {
            report.warning(EMPTY, format!("Frame {} has nothing to export", frame));
        }

        let json = layers_to_json(self.sprite.width(), self.sprite.height(), frame, &entries)?;
        Ok(JsonExport {
            json,
            layer_count: entries.len(),
            report,
        })
    }
}

/// Run `encoder` starting at `strategy`, stepping down the fallback chain
/// until one produces output. Each step down is reported.
fn encode_with<F>(
    mut strategy: Strategy,
    report: &mut ExportReport,
    mut encoder: F,
) -> Option<(String, Strategy)>
where
    F: FnMut(Strategy) -> Option<String>,
{
    loop {
        if let Some(svg) = encoder(strategy) {
            return Some((svg, strategy));
        }

        let next = strategy.fallback()?;
        report.warning(
            STRATEGY_FALLBACK,
            format!("{} encoding produced no output; retrying as {}", strategy, next),
        );
        strategy = next;
    }
}

/// Export `frame` of `sprite` as a single SVG document.
pub fn export_svg(sprite: &Sprite, frame: u32, options: &ExportOptions) -> SvgExport {
    Exporter::new(sprite, options.clone()).svg(frame)
}

/// Export `frame` of `sprite` as a per-layer JSON document.
pub fn export_layers_json(sprite: &Sprite, frame: u32, options: &ExportOptions) -> Result<JsonExport> {
    Exporter::new(sprite, options.clone()).layers_json(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::report::CEL_FALLBACK;
    use crate::types::{Cel, Colour, Image, Layer};
    use pretty_assertions::assert_eq;

    const RED: Colour = Colour::rgb(255, 0, 0);

    fn solid(w: u32, h: u32, colour: Colour) -> Image {
        Image::from_colours(&vec![vec![colour; w as usize]; h as usize]).unwrap()
    }

    fn red_sprite() -> Sprite {
        Sprite::new(2, 2)
            .unwrap()
            .with_layer(Layer::new("Layer 1").with_cel(1, Cel::new(solid(2, 2, RED))))
    }

    fn transparent_sprite() -> Sprite {
        Sprite::new(2, 2)
            .unwrap()
            .with_layer(Layer::new("clear").with_cel(1, Cel::new(solid(2, 2, Colour::TRANSPARENT))))
    }

    #[test]
    fn test_strategy_from_flags() {
        assert_eq!(Strategy::from_flags(false, false), Strategy::Flat);
        assert_eq!(Strategy::from_flags(false, true), Strategy::Flat);
        assert_eq!(Strategy::from_flags(true, false), Strategy::Optimized);
        assert_eq!(Strategy::from_flags(true, true), Strategy::CssClasses);
    }

    #[test]
    fn test_strategy_fallback_chain() {
        assert_eq!(Strategy::CssClasses.fallback(), Some(Strategy::Optimized));
        assert_eq!(Strategy::Optimized.fallback(), Some(Strategy::Flat));
        assert_eq!(Strategy::Flat.fallback(), None);
    }

    #[test]
    fn test_encode_with_falls_back_from_css() {
        let mut report = ExportReport::new();
        let mut tried = Vec::new();
        let encoded = encode_with(Strategy::CssClasses, &mut report, |strategy| {
            tried.push(strategy);
            (strategy != Strategy::CssClasses).then(|| format!("<{}>", strategy))
        });

        assert_eq!(encoded, Some(("<optimized>".to_string(), Strategy::Optimized)));
        assert_eq!(tried, vec![Strategy::CssClasses, Strategy::Optimized]);
        assert!(report.contains(STRATEGY_FALLBACK));
        assert_eq!(report.iter().count(), 1);
    }

    #[test]
    fn test_encode_with_reaches_flat() {
        let mut report = ExportReport::new();
        let encoded = encode_with(Strategy::CssClasses, &mut report, |strategy| {
            (strategy == Strategy::Flat).then(|| "flat".to_string())
        });

        assert_eq!(encoded, Some(("flat".to_string(), Strategy::Flat)));
        assert_eq!(report.iter().filter(|d| d.code == STRATEGY_FALLBACK).count(), 2);
    }

    #[test]
    fn test_encode_with_exhausted() {
        let mut report = ExportReport::new();
        assert_eq!(encode_with(Strategy::Optimized, &mut report, |_| None), None);
        assert_eq!(report.iter().count(), 1);
    }

    #[test]
    fn test_encode_with_first_success_reports_nothing() {
        let mut report = ExportReport::new();
        let encoded = encode_with(Strategy::Flat, &mut report, |_| Some("x".to_string()));
        assert_eq!(encoded, Some(("x".to_string(), Strategy::Flat)));
        assert!(report.is_empty());
    }

    #[test]
    fn test_export_options_from_flags() {
        let flat = ExportOptions::from_flags(false, true, true);
        assert_eq!(flat.strategy, Strategy::Flat);
        assert!(flat.layer_groups);

        let css = ExportOptions::from_flags(true, false, true);
        assert_eq!(css.strategy, Strategy::CssClasses);
        assert!(!css.layer_groups);

        let export = export_svg(&red_sprite(), 1, &ExportOptions::from_flags(false, false, false));
        assert_eq!(export.strategy, Some(Strategy::Flat));
        assert!(!export.svg.unwrap().contains("<g id="));
    }

    struct AllBlue;

    impl HostDecoder for AllBlue {
        fn decode(&self, _raw: u32) -> Option<[i32; 4]> {
            Some([0, 0, 255, 255])
        }
    }

    #[test]
    fn test_exporter_with_host_decoder() {
        let sprite = red_sprite();
        let host = AllBlue;
        let exporter = Exporter::new(&sprite, ExportOptions::default()).with_host_decoder(&host);
        let svg = exporter.svg(1).svg.unwrap();

        assert!(svg.contains(r##"<g fill="#0000ff">"##));
        assert!(!svg.contains("#ff0000"));
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("css".parse::<Strategy>().unwrap(), Strategy::CssClasses);
        assert_eq!(Strategy::Optimized.to_string(), "optimized");
        assert!("bezier".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_export_svg_optimized() {
        let export = export_svg(&red_sprite(), 1, &ExportOptions::default());
        assert_eq!(export.strategy, Some(Strategy::Optimized));
        let svg = export.svg.unwrap();
        assert!(svg.contains(r#"<g id="Layer_1">"#));
        assert!(svg.contains(r#"<path d="M0,0h2v2h-2z"/>"#));
    }

    #[test]
    fn test_transparent_sprite_is_empty_for_every_strategy() {
        let sprite = transparent_sprite();
        for strategy in [Strategy::Flat, Strategy::Optimized, Strategy::CssClasses] {
            let export = export_svg(&sprite, 1, &ExportOptions::new(strategy));
            assert!(export.is_empty());
            assert!(export.report.contains(EMPTY));
            assert!(!export.report.contains(STRATEGY_FALLBACK));
        }

        let json = export_layers_json(&sprite, 1, &ExportOptions::default()).unwrap();
        assert_eq!(json.layer_count, 0);
        assert!(json.json.contains("\"layers\": []"));
    }

    #[test]
    fn test_sprite_without_layers_is_empty() {
        let sprite = Sprite::new(3, 3).unwrap();
        assert!(export_svg(&sprite, 1, &ExportOptions::default()).is_empty());
    }

    #[test]
    fn test_layer_fallback_to_frame_one() {
        let sprite = Sprite::new(2, 2)
            .unwrap()
            .with_frames(2)
            .with_layer(Layer::new("A").with_cel(1, Cel::new(solid(1, 1, RED))));

        let export = export_svg(&sprite, 2, &ExportOptions::default());
        let svg = export.svg.unwrap();
        assert!(svg.contains(r#"<path d="M0,0h1v1h-1z"/>"#));
        assert!(export.report.contains(CEL_FALLBACK));
    }

    #[test]
    fn test_json_shape() {
        let export = export_layers_json(&red_sprite(), 1, &ExportOptions::default()).unwrap();
        assert_eq!(export.layer_count, 1);
        assert_eq!(
            export.json,
            [
                "{",
                "  \"width\": 2,",
                "  \"height\": 2,",
                "  \"frame\": 1,",
                "  \"layers\": [",
                "    {",
                "      \"name\": \"Layer 1\",",
                concat!(
                    "      \"svg\": \"<svg xmlns=\\\"http://www.w3.org/2000/svg\\\" width=\\\"2\\\" ",
                    "height=\\\"2\\\" viewBox=\\\"0 0 2 2\\\" shape-rendering=\\\"crispEdges\\\">",
                    "\\n  <g fill=\\\"#ff0000\\\">\\n    <path d=\\\"M0,0h2v2h-2z\\\"/>\\n  </g>\\n</svg>\""
                ),
                "    }",
                "  ]",
                "}",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_json_skips_empty_layers() {
        let sprite = Sprite::new(2, 2)
            .unwrap()
            .with_layer(Layer::new("clear").with_cel(1, Cel::new(solid(2, 2, Colour::TRANSPARENT))))
            .with_layer(Layer::new("red").with_cel(1, Cel::new(solid(1, 1, RED))));

        let export = export_layers_json(&sprite, 1, &ExportOptions::new(Strategy::Flat)).unwrap();
        assert_eq!(export.layer_count, 1);
        let parsed: serde_json::Value = serde_json::from_str(&export.json).unwrap();
        assert_eq!(parsed["layers"][0]["name"], "red");
    }

    #[test]
    fn test_css_export_uses_named_colours() {
        let mut named = NamedColours::default();
        named.insert(RED, "danger");
        let options = ExportOptions::new(Strategy::CssClasses).with_named_colours(named);

        let export = export_svg(&red_sprite(), 1, &options);
        assert_eq!(export.strategy, Some(Strategy::CssClasses));
        let svg = export.svg.unwrap();
        assert!(svg.contains(".danger{fill:#ff0000}"));
        assert!(svg.contains(r#"<g class="danger">"#));
    }

    #[test]
    fn test_exports_are_deterministic() {
        let sprite = Sprite::new(3, 1).unwrap().with_layer(
            Layer::new("mix").with_cel(
                1,
                Cel::new(
                    Image::from_colours(&[vec![RED, Colour::BLACK, Colour::new(0, 0, 255, 77)]])
                        .unwrap(),
                ),
            ),
        );
        for strategy in [Strategy::Flat, Strategy::Optimized, Strategy::CssClasses] {
            let options = ExportOptions::new(strategy);
            assert_eq!(export_svg(&sprite, 1, &options), export_svg(&sprite, 1, &options));
        }
    }
}
