//! Browser backends: Canvas 2D drawing and image loading

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::assets::{AssetLoader, LoadBarrier, SpriteId};
use super::{Renderer, TextStyle};

/// Decoded images indexed by `SpriteId::index`
#[derive(Clone)]
pub struct SpriteSheet {
    images: Rc<RefCell<Vec<Option<HtmlImageElement>>>>,
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteSheet {
    pub fn new() -> Self {
        Self {
            images: Rc::new(RefCell::new(vec![None; SpriteId::ALL.len()])),
        }
    }

    fn insert(&self, id: SpriteId, image: HtmlImageElement) {
        self.images.borrow_mut()[id.index()] = Some(image);
    }

    fn get(&self, id: SpriteId) -> Option<HtmlImageElement> {
        self.images.borrow()[id.index()].clone()
    }
}

/// Loads every manifest entry through `HtmlImageElement::decode`
pub struct ImageLoader {
    sheet: SpriteSheet,
}

impl ImageLoader {
    pub fn new(sheet: SpriteSheet) -> Self {
        Self { sheet }
    }
}

impl AssetLoader for ImageLoader {
    fn load_all(&mut self, manifest: Vec<(SpriteId, String)>, on_ready: Box<dyn FnOnce()>) {
        let barrier = Rc::new(RefCell::new(LoadBarrier::new()));
        let on_ready = Rc::new(RefCell::new(Some(on_ready)));

        for (id, url) in manifest {
            let image = match HtmlImageElement::new() {
                Ok(image) => image,
                Err(e) => {
                    log::error!("Could not create image for {:?}: {:?}", id, e);
                    continue;
                }
            };
            image.set_cross_origin(Some("anonymous"));
            image.set_src(&url);

            let sheet = self.sheet.clone();
            let barrier = barrier.clone();
            let on_ready = on_ready.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = JsFuture::from(image.decode()).await {
                    log::error!("Failed to load sprite {:?} from {}: {:?}", id, url, e);
                    return;
                }
                sheet.insert(id, image);

                let complete = barrier.borrow_mut().mark_loaded(id);
                log::debug!(
                    "Loaded sprite {:?} ({}/{})",
                    id,
                    barrier.borrow().loaded_count(),
                    barrier.borrow().total()
                );
                if complete {
                    if let Some(callback) = on_ready.borrow_mut().take() {
                        callback();
                    }
                }
            });
        }
    }
}

/// Draws sprites onto a 2D canvas context
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    sheet: SpriteSheet,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, sheet: SpriteSheet) -> Self {
        Self { ctx, sheet }
    }

    fn blit(&self, id: SpriteId, x: f32, y: f32, w: f32, h: f32) {
        let Some(image) = self.sheet.get(id) else {
            return;
        };
        if let Err(e) = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            &image, x as f64, y as f64, w as f64, h as f64,
        ) {
            log::warn!("draw_image failed for {:?}: {:?}", id, e);
        }
    }
}

impl Renderer for CanvasRenderer {
    fn clear(&mut self, color: &str) {
        let canvas = self.ctx.canvas();
        let (w, h) = canvas
            .map(|c| (c.width() as f64, c.height() as f64))
            .unwrap_or((0.0, 0.0));
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(0.0, 0.0, w, h);
    }

    fn draw_sprite(&mut self, id: SpriteId, x: f32, y: f32, w: f32, h: f32) {
        self.blit(id, x, y, w, h);
    }

    fn draw_flipped_sprite(&mut self, id: SpriteId, x: f32, y: f32, w: f32, h: f32) {
        self.ctx.save();
        let _ = self.ctx.scale(1.0, -1.0);
        self.blit(id, x, -(y + h), w, h);
        self.ctx.restore();
    }

    fn draw_rotated_sprite(&mut self, id: SpriteId, center: Vec2, w: f32, h: f32, radians: f32) {
        self.ctx.save();
        let _ = self.ctx.translate(center.x as f64, center.y as f64);
        let _ = self.ctx.rotate(radians as f64);
        self.blit(id, -w / 2.0, -h / 2.0, w, h);
        self.ctx.restore();
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        self.ctx.set_fill_style_str("white");
        self.ctx.set_stroke_style_str("black");
        self.ctx.set_line_width(2.0);
        self.ctx.set_font(style.font());
        self.ctx.set_text_align("center");
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
        let _ = self.ctx.stroke_text(text, x as f64, y as f64);
    }
}
