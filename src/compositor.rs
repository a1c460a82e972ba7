use ab_glyph::{Font, FontArc, Glyph, GlyphId, OutlineCurve, ScaleFont, point};
use egui::{Color32, Pos2, Rect, Vec2};
use image::RgbaImage;
use image::imageops;
use peniko::Color;
use vello_cpu::kurbo::{self, BezPath, Stroke};
use vello_cpu::{Pixmap, RenderContext, RenderMode, RenderSettings};

use crate::background::BackgroundImage;
use crate::font::{FontBook, TextMeasure, px_scale};
use crate::geometry::text_box;
use crate::layer::TextLayerStore;
use crate::style::{HIGHLIGHT_COLOR, HIGHLIGHT_PADDING, HIGHLIGHT_RISE, HIGHLIGHT_WIDTH, TextStyle};
use crate::surface::Surface;
use crate::wrap::{PlacedLine, layout_lines, wrap_lines};

/// Composites the background and every text annotation onto a [`Surface`].
#[derive(Debug, Clone, Default)]
pub struct Compositor {
    fonts: FontBook,
}

impl Compositor {
    pub fn new(fonts: FontBook) -> Self {
        Self { fonts }
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    /// Redraws the whole surface from the background, the store and `style`.
    ///
    /// Without a background nothing is drawn and `false` is returned. Equal
    /// inputs always produce identical pixels.
    pub fn render(
        &self,
        surface: &mut Surface,
        store: &TextLayerStore,
        background: Option<&BackgroundImage>,
        style: &TextStyle,
    ) -> bool {
        let Some(background) = background else {
            log::debug!("No background image yet, skipping render");
            return false;
        };

        surface.clear();
        surface.draw_background(background);

        if !store.is_empty() {
            let text = self.paint_text(surface.width(), surface.height(), store, style);
            imageops::overlay(surface.pixels_mut(), &text, 0, 0);
        }

        surface.mark_rendered();
        log::debug!(
            "Rendered {} annotations (surface version {})",
            store.len(),
            surface.version()
        );
        true
    }

    /// Paints every annotation onto a transparent layer the size of the
    /// surface. Anything outside the surface is never rasterized.
    fn paint_text(&self, width: u32, height: u32, store: &TextLayerStore, style: &TextStyle) -> RgbaImage {
        let width = u16::try_from(width).unwrap_or(u16::MAX);
        let height = u16::try_from(height).unwrap_or(u16::MAX);
        let settings = RenderSettings {
            render_mode: RenderMode::OptimizeSpeed,
            ..RenderSettings::default()
        };
        let mut ctx = RenderContext::new_with(width, height, settings);
        let clip = Rect::from_min_size(Pos2::ZERO, Vec2::new(f32::from(width), f32::from(height)));

        let face = self.fonts.face(&style.font_family);
        if face.is_none() {
            log::warn!("No font available for '{}', text is not drawn", style.font_family);
        }

        let max_width = style.max_line_width(f32::from(width));
        for (index, annotation) in store.iter() {
            if let Some(face) = face {
                let text = annotation.display_text();
                let lines = wrap_lines(&text, max_width, |line| {
                    self.fonts.text_width(line, &style.font_family, style.font_size)
                });
                for line in layout_lines(lines, annotation.position, style.line_height()) {
                    let path = line_path(face, &line, style, clip);
                    if path.elements().is_empty() {
                        continue;
                    }

                    ctx.set_paint(to_color(style.fill_color));
                    ctx.fill_path(&path);
                    if style.outline_width > 0.0 && style.outline_color != Color32::TRANSPARENT {
                        ctx.set_stroke(Stroke::new(f64::from(style.outline_width)));
                        ctx.set_paint(to_color(style.outline_color));
                        ctx.stroke_path(&path);
                    }
                }
            }

            if store.selected() == Some(index) {
                let highlight = highlight_box(text_box(annotation, style, &self.fonts));
                ctx.set_stroke(Stroke::new(f64::from(HIGHLIGHT_WIDTH)));
                ctx.set_paint(to_color(HIGHLIGHT_COLOR));
                ctx.stroke_rect(&to_kurbo_rect(highlight));
            }
        }

        let mut pixmap = Pixmap::new(width, height);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        let unpremultiplied = pixmap.take_unpremultiplied();
        let mut bytes = Vec::with_capacity(unpremultiplied.len() * 4);
        for p in unpremultiplied {
            bytes.extend_from_slice(&[p.r, p.g, p.b, p.a]);
        }
        RgbaImage::from_raw(u32::from(width), u32::from(height), bytes).unwrap_or_else(|| {
            log::error!("Text layer size mismatch, dropping text for this frame");
            RgbaImage::new(u32::from(width), u32::from(height))
        })
    }
}

/// Rectangle stroked around the selected annotation: it starts one padding
/// left of the measured text box, ends at its right edge, and is raised so
/// it encloses text standing on the anchor's baseline.
pub fn highlight_box(text_box: Rect) -> Rect {
    Rect::from_min_size(
        Pos2::new(text_box.min.x - HIGHLIGHT_PADDING, text_box.min.y - HIGHLIGHT_RISE),
        Vec2::new(text_box.width() + HIGHLIGHT_PADDING, text_box.height()),
    )
}

fn to_color(color: Color32) -> Color {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    Color::from_rgba8(r, g, b, a)
}

fn to_kurbo_rect(rect: Rect) -> kurbo::Rect {
    kurbo::Rect::new(
        f64::from(rect.min.x),
        f64::from(rect.min.y),
        f64::from(rect.max.x),
        f64::from(rect.max.y),
    )
}

/// Positions the glyphs of one line so that it is horizontally centered on
/// `line.baseline.x` and stands on `line.baseline.y`.
fn layout_glyphs(face: &FontArc, line: &PlacedLine, size: f32) -> Vec<Glyph> {
    let scale = px_scale(face, size);
    let scaled = face.as_scaled(scale);

    let mut ids: Vec<GlyphId> = Vec::with_capacity(line.text.len());
    let mut advances = Vec::with_capacity(line.text.len());
    let mut width = 0.0;
    for ch in line.text.chars() {
        let id = scaled.glyph_id(ch);
        let kern = ids.last().map_or(0.0, |&previous| scaled.kern(previous, id));
        advances.push(width + kern);
        width += kern + scaled.h_advance(id);
        ids.push(id);
    }

    let left = line.baseline.x - width / 2.0;
    ids.into_iter()
        .zip(advances)
        .map(|(id, x)| id.with_scale_and_position(scale, point(left + x, line.baseline.y)))
        .collect()
}

/// Outline of every glyph of `line` that can reach `clip`, in surface space.
/// The same path is filled in the text color and stroked in the outline color.
fn line_path(face: &FontArc, line: &PlacedLine, style: &TextStyle, clip: Rect) -> BezPath {
    let mut path = BezPath::new();
    if line.text.is_empty() {
        return path;
    }

    let reach = clip.expand(style.outline_width);
    for glyph in layout_glyphs(face, line, style.font_size) {
        let bounds = face.glyph_bounds(&glyph);
        let bounds = Rect::from_min_max(
            Pos2::new(bounds.min.x, bounds.min.y),
            Pos2::new(bounds.max.x, bounds.max.y),
        );
        if bounds.intersects(reach) {
            append_glyph_outline(&mut path, face, &glyph);
        }
    }
    path
}

fn append_glyph_outline(path: &mut BezPath, face: &FontArc, glyph: &Glyph) {
    let Some(outline) = face.outline(glyph.id) else {
        return;
    };
    let scaled = face.as_scaled(glyph.scale);
    let (h_factor, v_factor) = (scaled.h_scale_factor(), scaled.v_scale_factor());
    let origin = glyph.position;

    // Outlines are in font units with y pointing up.
    let to_surface = |p: ab_glyph::Point| {
        kurbo::Point::new(
            f64::from(origin.x + p.x * h_factor),
            f64::from(origin.y - p.y * v_factor),
        )
    };

    // Curves of one contour follow each other end to start; a gap starts
    // the next contour.
    let mut current: Option<kurbo::Point> = None;
    for curve in &outline.curves {
        let (start, end) = match *curve {
            OutlineCurve::Line(a, b) | OutlineCurve::Quad(a, _, b) | OutlineCurve::Cubic(a, _, _, b) => {
                (to_surface(a), to_surface(b))
            }
        };
        if current != Some(start) {
            if current.is_some() {
                path.close_path();
            }
            path.move_to(start);
        }
        match *curve {
            OutlineCurve::Line(..) => path.line_to(end),
            OutlineCurve::Quad(_, c, _) => path.quad_to(to_surface(c), end),
            OutlineCurve::Cubic(_, c1, c2, _) => path.curve_to(to_surface(c1), to_surface(c2), end),
        }
        current = Some(end);
    }
    if current.is_some() {
        path.close_path();
    }
}
