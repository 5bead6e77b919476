use std::collections::HashMap;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use exif::{In, Reader, Tag, Value};
use raylib::prelude::*;
use tracing::{debug, warn};

use crate::carousel::slide_image_source;
use crate::dom::NodeId;
use crate::page::Page;

// --- Slide image paths, resolved against the page's directory ---
pub fn slide_image_paths(page: &Page, base_dir: &Path) -> Vec<(NodeId, PathBuf)> {
    let document = page.document();
    let mut paths = Vec::new();
    for carousel in page.carousels() {
        for &slide in carousel.slides() {
            let Some(src) = slide_image_source(document, slide) else {
                continue;
            };
            // Drop query strings and fragments, treat site-absolute paths as page-relative
            let src = src.split(['?', '#']).next().unwrap_or(src);
            let src = src.trim_start_matches('/');
            if !src.is_empty() {
                paths.push((slide, base_dir.join(src)));
            }
        }
    }
    paths
}

pub fn load_slide_textures(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    page: &Page,
    base_dir: &Path,
) -> HashMap<NodeId, Texture2D> {
    let mut textures = HashMap::new();
    for (slide, path) in slide_image_paths(page, base_dir) {
        match load_texture_with_exif_rotation(rl, thread, &path) {
            Ok(texture) => {
                textures.insert(slide, texture);
            }
            Err(e) => {
                // Slide falls back to its text
                warn!("{e:#}");
            }
        }
    }
    debug!(loaded = textures.len(), "slide textures ready");
    textures
}

/// EXIF orientation tag of a JPEG, 1 (upright) when absent or unreadable.
pub fn exif_orientation(bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => match exif.get_field(Tag::Orientation, In::PRIMARY).map(|f| &f.value) {
            Some(Value::Short(values)) if !values.is_empty() => values[0],
            _ => 1,
        },
        Err(e) => {
            debug!("no EXIF data: {e}");
            1
        }
    }
}

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D> {
    let file_bytes = fs::read(image_path)
        .with_context(|| format!("Failed to read slide image {}", image_path.display()))?;

    let extension = image_path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();
    let orientation = if extension == "jpg" || extension == "jpeg" {
        exif_orientation(&file_bytes)
    } else {
        1
    };

    let mut image = Image::load_image_from_mem(&(".".to_string() + &extension), &file_bytes)
        .map_err(|e| anyhow!("Failed to decode slide image {}: {}", image_path.display(), e))?;

    // 3 = 180 deg, 6 = 90 deg CW, 8 = 90 deg CCW; flips are ignored
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }

    let texture = rl
        .load_texture_from_image(thread, &image)
        .map_err(|e| anyhow!("Failed to create texture for {}: {}", image_path.display(), e))?;

    // Unload the CPU copy
    drop(image);

    Ok(texture)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::dom::Document;

    #[test]
    fn resolves_local_slide_images_only() {
        let document = Document::parse(
            r#"<div class="elementor-widget-media-carousel"><div class="swiper-wrapper">
                 <div class="swiper-slide"><img src="img/one.jpg?ver=2"></div>
                 <div class="swiper-slide"><img src="/uploads/two.png"></div>
                 <div class="swiper-slide"><img src="https://example.com/three.jpg"></div>
                 <div class="swiper-slide">Caption</div>
               </div></div>"#,
        );
        let page = Page::mount(document, &Config::default());
        let base = Path::new("/srv/site");
        let paths: Vec<PathBuf> = slide_image_paths(&page, base).into_iter().map(|(_, p)| p).collect();
        assert_eq!(
            paths,
            vec![base.join("img/one.jpg"), base.join("uploads/two.png")]
        );
    }

    #[test]
    fn orientation_defaults_to_upright() {
        assert_eq!(exif_orientation(b"not an image"), 1);
        assert_eq!(exif_orientation(&[]), 1);
    }
}
