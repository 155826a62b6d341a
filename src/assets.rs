//! Image handles for vehicle and enemy art (wasm only)
//!
//! Loading is fire-and-forget: `HtmlImageElement::set_src` starts the
//! fetch and the renderer simply skips anything whose image is not
//! `complete` yet. A late image heals itself the next frame.

use wasm_bindgen::JsValue;
use web_sys::HtmlImageElement;

use crate::vehicles::CATALOG;

/// One image handle per catalog entry
pub struct Assets {
    images: Vec<HtmlImageElement>,
}

impl Assets {
    pub fn load() -> Result<Self, JsValue> {
        let images = CATALOG
            .iter()
            .map(|vehicle| {
                let img = HtmlImageElement::new()?;
                img.set_src(vehicle.image);
                Ok(img)
            })
            .collect::<Result<Vec<_>, JsValue>>()?;
        log::info!("Requested {} vehicle images", images.len());
        Ok(Self { images })
    }

    /// Art for the selected vehicle
    pub fn vehicle(&self, index: usize) -> &HtmlImageElement {
        &self.images[index]
    }

    /// Art for an enemy variant (the non-starter catalog entries)
    pub fn enemy(&self, variant: usize) -> &HtmlImageElement {
        &self.images[variant + 1]
    }

    /// Ready to draw this frame?
    pub fn ready(img: &HtmlImageElement) -> bool {
        img.complete()
    }
}
