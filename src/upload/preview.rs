use super::types::PendingFile;
use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};
use tracing::warn;

/// Longest edge of a preview texture.
pub const PREVIEW_EDGE: u32 = 512;

/// Texture derived from a pending file. Dropping it frees the GPU texture.
#[derive(Clone)]
pub enum Preview {
    Ready(TextureHandle),
    Unavailable,
}

impl PendingFile {
    /// The file's preview texture, decoded and uploaded on first call.
    pub fn preview(&mut self, ctx: &egui::Context) -> Option<&TextureHandle> {
        if self.preview.is_none() {
            let preview = match decode_thumbnail(&self.bytes, PREVIEW_EDGE) {
                Some(image) => Preview::Ready(ctx.load_texture(
                    format!("preview-{}", self.name),
                    image,
                    TextureOptions::LINEAR,
                )),
                None => {
                    warn!("Could not decode a preview for {}", self.name);
                    Preview::Unavailable
                }
            };
            self.preview = Some(preview);
        }

        match &self.preview {
            Some(Preview::Ready(texture)) => Some(texture),
            _ => None,
        }
    }

    pub fn has_preview(&self) -> bool {
        matches!(self.preview, Some(Preview::Ready(_)))
    }
}

pub fn decode_thumbnail(bytes: &[u8], max_edge: u32) -> Option<ColorImage> {
    let img = image::load_from_memory(bytes).ok()?;
    let img = if img.width() > max_edge || img.height() > max_edge {
        img.thumbnail(max_edge, max_edge)
    } else {
        img
    };
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    Some(ColorImage::from_rgba_unmultiplied(
        [w as usize, h as usize],
        rgba.as_raw(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::{UploadBatchManager, UploadOutcome};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([56, 126, 237, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageOutputFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn small_images_keep_their_size() {
        let image = decode_thumbnail(&png_bytes(8, 4), PREVIEW_EDGE).unwrap();
        assert_eq!(image.size, [8, 4]);
    }

    #[test]
    fn large_images_are_scaled_to_fit() {
        let image = decode_thumbnail(&png_bytes(1024, 256), PREVIEW_EDGE).unwrap();
        assert_eq!(image.size[0], 512);
        assert!(image.size[1] <= 128);
    }

    #[test]
    fn undecodable_bytes_have_no_preview() {
        assert!(decode_thumbnail(b"definitely not an image", PREVIEW_EDGE).is_none());
        let file = PendingFile::from_bytes("broken.png", b"nope".to_vec());
        assert!(!file.has_preview());
    }

    #[test]
    fn textures_are_released_with_their_files() {
        let ctx = egui::Context::default();
        let mut manager = UploadBatchManager::new();
        manager
            .add_files(vec![
                PendingFile::from_bytes("a.png", png_bytes(4, 4)),
                PendingFile::from_bytes("b.png", png_bytes(6, 3)),
            ])
            .unwrap();
        for file in manager.files_mut() {
            assert!(file.preview(&ctx).is_some());
        }
        let allocated = || ctx.tex_manager().read().num_allocated();
        let before = allocated();

        drop(manager.remove_file(0).unwrap());
        assert_eq!(allocated(), before - 1);

        manager.begin_submit().unwrap();
        manager.finish_submit(UploadOutcome::Success { status: 200 });
        assert_eq!(allocated(), before - 2);
    }
}
