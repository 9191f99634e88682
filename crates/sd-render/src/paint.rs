//! Render list → Vello drawing commands.
//!
//! Call once per frame with a freshly-cleared `Scene`; the host presents
//! the scene via wgpu.

use crate::display::RenderItem;
use kurbo::{Affine, Ellipse as KurboEllipse, Rect, Stroke as KurboStroke};
use peniko::{Color, Fill};
use sd_core::ShapeKind;
use vello::Scene;

/// Paint every item, bottom of the z-order first.
pub fn paint_scene(scene: &mut Scene, items: &[RenderItem]) {
    log::trace!("painting {} items", items.len());
    for item in items {
        paint_item(scene, item);
    }
}

fn paint_item(scene: &mut Scene, item: &RenderItem) {
    let b = &item.bounds;
    let rect = Rect::new(b.x0, b.y0, b.x1, b.y1);

    match item.kind {
        ShapeKind::Oval => {
            let shape = KurboEllipse::from_rect(rect);
            scene.fill(
                Fill::NonZero,
                Affine::IDENTITY,
                to_peniko(item.fill),
                None,
                &shape,
            );
            if item.thickness > 0.0 {
                scene.stroke(
                    &KurboStroke::new(item.thickness),
                    Affine::IDENTITY,
                    to_peniko(item.outline),
                    None,
                    &shape,
                );
            }
        }
    }
}

fn to_peniko(c: sd_core::Color) -> Color {
    Color::from_rgba8(c.r, c.g, c.b, c.a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sd_core::{Bounds, ColorResolver, ShapeCollection, ShapeRecord};

    #[test]
    fn paint_scene_accepts_degenerate_shapes() {
        let mut shapes = ShapeCollection::new();
        shapes.create(ShapeRecord::oval(
            Bounds::new(3.0, 3.0, 3.0, 3.0),
            0.0,
            "black",
            "white",
        ));
        shapes.create(ShapeRecord::oval(
            Bounds::new(0.0, 0.0, 40.0, 20.0),
            2.0,
            "red",
            "#0000ff80",
        ));
        let items = crate::display::render_list(&shapes, &ColorResolver::default());
        let mut scene = Scene::new();
        paint_scene(&mut scene, &items);
    }

    #[test]
    fn colors_convert_channel_for_channel() {
        let c = to_peniko(sd_core::Color::rgba(1, 2, 3, 4));
        let rgba = c.to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (1, 2, 3, 4));
    }
}
