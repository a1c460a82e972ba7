use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::font::TextMeasure;
use crate::layer::{TextAnnotation, TextLayerStore};
use crate::style::TextStyle;

/// Slack around a text box within which a press still selects it.
pub const HIT_BUFFER: f32 = 17.0;

/// Order in which overlapping annotations are considered by [`hit_test`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HitOrder {
    /// First annotation in creation order wins.
    #[default]
    CreationOrder,
    /// Most recently added annotation, the one drawn on top, wins.
    Topmost,
}

/// Box of the annotation's text laid out on a single line: the un-wrapped
/// width of the uppercased text by one font size, centered on the anchor.
pub fn text_box<M: TextMeasure + ?Sized>(
    annotation: &TextAnnotation,
    style: &TextStyle,
    measure: &M,
) -> Rect {
    let width = measure.text_width(
        &annotation.display_text(),
        &style.font_family,
        style.font_size,
    );
    Rect::from_center_size(annotation.position, Vec2::new(width, style.font_size))
}

pub fn hit_box<M: TextMeasure + ?Sized>(
    annotation: &TextAnnotation,
    style: &TextStyle,
    measure: &M,
) -> Rect {
    text_box(annotation, style, measure).expand(HIT_BUFFER)
}

/// Strict containment: points on the edge are outside.
fn strictly_contains(rect: Rect, point: Pos2) -> bool {
    point.x > rect.min.x && point.x < rect.max.x && point.y > rect.min.y && point.y < rect.max.y
}

/// Finds the annotation under `point`, or `None` when the point misses every
/// annotation.
pub fn hit_test<M: TextMeasure + ?Sized>(
    store: &TextLayerStore,
    point: Pos2,
    style: &TextStyle,
    measure: &M,
    order: HitOrder,
) -> Option<usize> {
    let hits = |&(_, annotation): &(usize, &TextAnnotation)| {
        strictly_contains(hit_box(annotation, style, measure), point)
    };

    let found = match order {
        HitOrder::CreationOrder => store.iter().find(hits),
        HitOrder::Topmost => store.iter().rev().find(hits),
    };
    found.map(|(index, _)| index)
}
