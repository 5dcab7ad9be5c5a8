//! SVG encoders.
//!
//! Three interchangeable ways to turn collected layer pixels into an SVG
//! document. Each returns `None` when there is nothing to draw.

use crate::vector::{find_regions, region_to_path, ClassTable, IdAllocator};

use super::layers::LayerPixels;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Output canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

/// Line-oriented SVG builder with two-space indentation.
#[derive(Debug, Default)]
struct SvgWriter {
    lines: Vec<String>,
    depth: usize,
}

impl SvgWriter {
    fn line(&mut self, text: impl AsRef<str>) {
        self.lines
            .push(format!("{}{}", "  ".repeat(self.depth), text.as_ref()));
    }

    fn open(&mut self, tag: impl AsRef<str>) {
        self.line(tag);
        self.depth += 1;
    }

    fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(format!("</{}>", tag));
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}

/// Root element with explicit size, used by the flat and optimized encoders.
fn sized_root(canvas: Canvas) -> String {
    format!(
        r#"<svg xmlns="{ns}" width="{w}" height="{h}" viewBox="0 0 {w} {h}" shape-rendering="crispEdges">"#,
        ns = SVG_NS,
        w = canvas.width,
        h = canvas.height
    )
}

/// Root element carrying only a `viewBox`, used by the CSS-class encoder.
fn viewbox_root(canvas: Canvas) -> String {
    format!(
        r#"<svg xmlns="{ns}" viewBox="0 0 {w} {h}" shape-rendering="crispEdges">"#,
        ns = SVG_NS,
        w = canvas.width,
        h = canvas.height
    )
}

/// Write each non-empty layer, optionally wrapped in `<g id="...">`.
fn write_layers<F>(out: &mut SvgWriter, layers: &[LayerPixels], layer_groups: bool, mut body: F)
where
    F: FnMut(&mut SvgWriter, &LayerPixels),
{
    let mut ids = IdAllocator::new();

    for layer in layers.iter().filter(|l| !l.is_empty()) {
        if layer_groups {
            out.open(format!(r#"<g id="{}">"#, ids.allocate(&layer.name)));
            body(out, layer);
            out.close("g");
        } else {
            body(out, layer);
        }
    }
}

/// One `<rect>` per visible pixel.
pub fn encode_flat(canvas: Canvas, layers: &[LayerPixels], layer_groups: bool) -> Option<String> {
    if layers.iter().all(LayerPixels::is_empty) {
        return None;
    }

    let mut out = SvgWriter::default();
    out.open(sized_root(canvas));
    write_layers(&mut out, layers, layer_groups, |out, layer| {
        for &((x, y), colour) in &layer.pixels {
            out.line(format!(
                r#"<rect x="{}" y="{}" width="1" height="1" fill="{}"/>"#,
                x,
                y,
                colour.key()
            ));
        }
    });
    out.close("svg");

    Some(out.finish())
}

/// Path data for every region of every colour group in a layer.
///
/// Returns `(colour key, paths)` pairs in colour first-appearance order.
fn layer_paths(canvas: Canvas, layer: &LayerPixels) -> Vec<(String, Vec<String>)> {
    layer
        .colour_groups()
        .into_iter()
        .map(|group| {
            let paths = find_regions(&group.pixels, canvas.width, canvas.height)
                .iter()
                .map(region_to_path)
                .collect();
            (group.key, paths)
        })
        .collect()
}

/// One `<g fill="...">` per colour per layer, holding one path per region.
pub fn encode_optimized(
    canvas: Canvas,
    layers: &[LayerPixels],
    layer_groups: bool,
) -> Option<String> {
    if layers.iter().all(LayerPixels::is_empty) {
        return None;
    }

    let mut out = SvgWriter::default();
    out.open(sized_root(canvas));
    write_layers(&mut out, layers, layer_groups, |out, layer| {
        for (key, paths) in layer_paths(canvas, layer) {
            out.open(format!(r#"<g fill="{}">"#, key));
            for d in paths {
                out.line(format!(r#"<path d="{}"/>"#, d));
            }
            out.close("g");
        }
    });
    out.close("svg");

    Some(out.finish())
}

/// Like [`encode_optimized`], but colours become classes in a shared `<style>`.
///
/// `classes` carries the colour-to-class bindings; colours already bound keep
/// their names. Returns `None` if no layer yields a non-empty path.
pub fn encode_css(
    canvas: Canvas,
    layers: &[LayerPixels],
    layer_groups: bool,
    classes: &mut ClassTable,
) -> Option<String> {
    let mut encoded: Vec<(&LayerPixels, Vec<(String, Vec<String>)>)> = Vec::new();
    for layer in layers.iter().filter(|l| !l.is_empty()) {
        let mut groups = Vec::new();
        for (key, paths) in layer_paths(canvas, layer) {
            if paths.is_empty() || paths.iter().any(String::is_empty) {
                return None;
            }
            groups.push((classes.class_for(&key), paths));
        }
        encoded.push((layer, groups));
    }

    if encoded.is_empty() || classes.is_empty() {
        return None;
    }

    let mut out = SvgWriter::default();
    out.open(viewbox_root(canvas));
    out.open("<style>");
    for rule in classes.style_rules() {
        out.line(rule);
    }
    out.close("style");

    let mut ids = IdAllocator::new();
    for (layer, groups) in &encoded {
        if layer_groups {
            out.open(format!(r#"<g id="{}">"#, ids.allocate(&layer.name)));
        }
        for (class, paths) in groups {
            out.open(format!(r#"<g class="{}">"#, class));
            for d in paths {
                out.line(format!(r#"<path d="{}"/>"#, d));
            }
            out.close("g");
        }
        if layer_groups {
            out.close("g");
        }
    }
    out.close("svg");

    Some(out.finish())
}
