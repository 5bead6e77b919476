use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use raylib::prelude::*;
use tracing::info;

use crate::constants::*;
use crate::dom::NodeId;
use crate::engine::PageEvent;
use crate::page::Page;
use crate::preview::layout::{CarouselFrame, Layout, menu_links};
use crate::preview::texture_loader::load_slide_textures;

const BACKGROUND: Color = Color { r: 24, g: 24, b: 28, a: 255 };
const PANEL: Color = Color { r: 44, g: 44, b: 52, a: 255 };
const ACCENT: Color = Color { r: 255, g: 196, b: 0, a: 255 };
const SHADE: Color = Color { r: 0, g: 0, b: 0, a: 96 };
const MARGIN_X: i32 = 16;

/// Raylib host: turns mouse input into page events and frame time into
/// timer updates, then draws the widgets.
pub struct PreviewEngine {
    page: Page,
    textures: HashMap<NodeId, Texture2D>,
    hovered: Vec<bool>,
}

impl PreviewEngine {
    pub fn new(page: Page) -> Self {
        let hovered = vec![false; page.carousels().len()];
        Self { page, textures: HashMap::new(), hovered }
    }

    pub fn initialize(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, base_dir: &Path) {
        self.textures = load_slide_textures(rl, thread, &self.page, base_dir);
    }

    /// Handles input for one frame, advances timers by `dt` and draws.
    pub fn render_frame(&mut self, dt: Duration, rl: &mut RaylibHandle, thread: &RaylibThread) {
        let width = rl.get_screen_width() as f32;
        let height = rl.get_screen_height() as f32;
        let mouse = rl.get_mouse_position();

        let layout = Layout::compute(&self.page, width, height);
        for (k, frame) in layout.carousels.iter().enumerate() {
            let inside = layout.is_over_carousel(k, mouse);
            if inside != self.hovered[k] {
                self.hovered[k] = inside;
                let event = if inside {
                    PageEvent::PointerEnter(frame.root)
                } else {
                    PageEvent::PointerLeave(frame.root)
                };
                self.page.dispatch(event);
            }
        }
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            if let Some(target) = layout.hit(mouse) {
                self.page.dispatch(PageEvent::Click(target));
            }
        }

        self.page.update(dt);

        // Clicks may have opened or closed the menu
        let layout = Layout::compute(&self.page, width, height);

        let mut d = rl.begin_drawing(thread);
        d.clear_background(BACKGROUND);
        for (k, frame) in layout.carousels.iter().enumerate() {
            self.draw_carousel(&mut d, k, frame);
        }
        self.draw_header(&mut d, &layout);
    }

    fn draw_header(&self, d: &mut RaylibDrawHandle, layout: &Layout) {
        let (Some(header), Some((_, toggle))) = (layout.header, layout.toggle) else {
            return;
        };
        d.draw_rectangle_rec(header, PANEL);
        d.draw_text("Site", MARGIN_X, 20, 24, Color::RAYWHITE);

        let expanded = self
            .page
            .nav()
            .is_some_and(|nav| nav.is_expanded(self.page.document()));
        d.draw_rectangle_rec(toggle, if expanded { ACCENT } else { Color::DARKGRAY });
        d.draw_text(
            if expanded { "Close" } else { "Menu" },
            toggle.x as i32 + 18,
            toggle.y as i32 + 10,
            20,
            if expanded { Color::BLACK } else { Color::RAYWHITE },
        );

        if let Some(menu) = layout.menu {
            d.draw_rectangle_rec(menu, PANEL);
            d.draw_rectangle_lines_ex(menu, 1.0, ACCENT);
            for (row, label) in menu_links(&self.page).iter().enumerate() {
                d.draw_text(
                    label,
                    menu.x as i32 + 16,
                    menu.y as i32 + 12 + row as i32 * 32,
                    20,
                    Color::RAYWHITE,
                );
            }
        }
    }

    fn draw_carousel(&self, d: &mut RaylibDrawHandle, index: usize, frame: &CarouselFrame) {
        let carousel = &self.page.carousels()[index];
        let document = self.page.document();

        d.draw_rectangle_rec(frame.bounds, PANEL);

        let slide = carousel.active_slide();
        match self.textures.get(&slide) {
            Some(texture) => draw_fitted(d, texture, frame.slide_area),
            None => {
                let text = document.text_content(slide);
                let label = if text.is_empty() {
                    format!("Slide {}", carousel.active_index() + 1)
                } else {
                    text
                };
                d.draw_text(
                    &label,
                    frame.slide_area.x as i32 + 16,
                    (frame.slide_area.y + frame.slide_area.height * 0.5) as i32 - 12,
                    24,
                    Color::RAYWHITE,
                );
            }
        }

        for (control, glyph) in [(frame.previous, "<"), (frame.next, ">")] {
            if let Some((_, rect)) = control {
                d.draw_rectangle_rec(rect, SHADE);
                d.draw_text(
                    glyph,
                    (rect.x + rect.width * 0.5) as i32 - 6,
                    (rect.y + rect.height * 0.5) as i32 - 14,
                    28,
                    Color::RAYWHITE,
                );
            }
        }

        // One dot per slide, active one highlighted
        let spacing = 18.0;
        let dots_width = spacing * (carousel.len() as f32 - 1.0);
        let start_x = frame.bounds.x + frame.bounds.width * 0.5 - dots_width * 0.5;
        let y = (frame.bounds.y + frame.bounds.height - 16.0) as i32;
        for k in 0..carousel.len() {
            let color = if k == carousel.active_index() { ACCENT } else { Color::GRAY };
            d.draw_circle((start_x + spacing * k as f32) as i32, y, 5.0, color);
        }

        if !carousel.is_autoplaying() {
            d.draw_text(
                "paused",
                (frame.slide_area.x + frame.slide_area.width) as i32 - 80,
                frame.bounds.y as i32 + 10,
                18,
                Color::LIGHTGRAY,
            );
        }
    }

    pub fn into_page(self) -> Page {
        self.page
    }
}

// Scale the texture to fit the area, centered, aspect ratio kept
fn draw_fitted(d: &mut RaylibDrawHandle, texture: &Texture2D, area: Rectangle) {
    let tex_width = texture.width() as f32;
    let tex_height = texture.height() as f32;
    if tex_width <= 0.0 || tex_height <= 0.0 {
        return;
    }
    let scale = (area.width / tex_width).min(area.height / tex_height);
    let scaled_width = tex_width * scale;
    let scaled_height = tex_height * scale;

    d.draw_texture_pro(
        texture,
        Rectangle::new(0.0, 0.0, tex_width, tex_height),
        Rectangle::new(
            area.x + (area.width - scaled_width) * 0.5,
            area.y + (area.height - scaled_height) * 0.5,
            scaled_width,
            scaled_height,
        ),
        Vector2::new(0.0, 0.0),
        0.0,
        Color::WHITE,
    );
}

/// Opens the preview window and runs until it is closed. The page's timers
/// are disposed on the way out.
pub fn run(page: Page, base_dir: &Path) -> Page {
    let (mut rl, thread) = raylib::init()
        .size(RENDER_WIDTH / 2, RENDER_HEIGHT / 2)
        .title("Carousel Preview")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut engine = PreviewEngine::new(page);
    engine.initialize(&mut rl, &thread, base_dir);
    info!("preview window open");

    while !rl.window_should_close() {
        let dt = Duration::from_secs_f32(rl.get_frame_time().max(0.0));
        engine.render_frame(dt, &mut rl, &thread);
    }

    let mut page = engine.into_page();
    page.dispose();
    info!("preview window closed");
    page
}
