use raylib::prelude::*;

use crate::constants::*;
use crate::dom::NodeId;
use crate::page::Page;

const MENU_WIDTH: f32 = 240.0;
const MENU_ROW_HEIGHT: f32 = 32.0;
const MARGIN: f32 = 12.0;

/// Screen placement of one mounted carousel.
#[derive(Debug, Clone)]
pub struct CarouselFrame {
    pub root: NodeId,
    pub bounds: Rectangle,
    pub slide_area: Rectangle,
    pub previous: Option<(NodeId, Rectangle)>,
    pub next: Option<(NodeId, Rectangle)>,
}

/// Screen placement of every widget on the page, recomputed each frame so
/// window resizes are picked up.
#[derive(Debug, Clone)]
pub struct Layout {
    pub header: Option<Rectangle>,
    pub toggle: Option<(NodeId, Rectangle)>,
    pub menu: Option<Rectangle>,
    pub carousels: Vec<CarouselFrame>,
}

impl Layout {
    pub fn compute(page: &Page, width: f32, height: f32) -> Layout {
        let document = page.document();

        let (header, toggle, menu) = match page.nav() {
            Some(nav) => {
                let header = Rectangle::new(0.0, 0.0, width, HEADER_HEIGHT);
                let toggle = Rectangle::new(
                    width - CONTROL_WIDTH * 2.0 - MARGIN,
                    MARGIN,
                    CONTROL_WIDTH * 2.0,
                    HEADER_HEIGHT - MARGIN * 2.0,
                );
                let menu = nav.is_expanded(document).then(|| {
                    let rows = menu_links(page).len().max(1) as f32;
                    Rectangle::new(
                        width - MENU_WIDTH - MARGIN,
                        HEADER_HEIGHT,
                        MENU_WIDTH,
                        rows * MENU_ROW_HEIGHT + MARGIN,
                    )
                });
                (Some(header), Some((nav.button(), toggle)), menu)
            }
            None => (None, None, None),
        };

        let top = if header.is_some() { HEADER_HEIGHT } else { 0.0 };
        let count = page.carousels().len().max(1) as f32;
        let band = ((height - top) / count).max(0.0);

        let carousels = page
            .carousels()
            .iter()
            .enumerate()
            .map(|(k, carousel)| {
                let bounds = Rectangle::new(
                    MARGIN,
                    top + band * k as f32 + MARGIN,
                    (width - MARGIN * 2.0).max(0.0),
                    (band - MARGIN * 2.0).max(0.0),
                );
                let control = |x: f32| Rectangle::new(x, bounds.y, CONTROL_WIDTH, bounds.height);
                let previous = carousel.previous_control().map(|id| (id, control(bounds.x)));
                let next = carousel
                    .next_control()
                    .map(|id| (id, control(bounds.x + bounds.width - CONTROL_WIDTH)));
                let slide_area = Rectangle::new(
                    bounds.x + CONTROL_WIDTH,
                    bounds.y,
                    (bounds.width - CONTROL_WIDTH * 2.0).max(0.0),
                    bounds.height,
                );
                CarouselFrame { root: carousel.root(), bounds, slide_area, previous, next }
            })
            .collect();

        Layout { header, toggle, menu, carousels }
    }

    /// Whether the pointer is over the carousel at `index`. The open menu
    /// covers whatever is below it.
    pub fn is_over_carousel(&self, index: usize, point: Vector2) -> bool {
        if self.menu.is_some_and(|m| m.check_collision_point_rec(point)) {
            return false;
        }
        self.carousels
            .get(index)
            .is_some_and(|frame| frame.bounds.check_collision_point_rec(point))
    }

    /// Element whose drawn control lies under `point`, if any.
    pub fn hit(&self, point: Vector2) -> Option<NodeId> {
        if let Some((id, rect)) = self.toggle {
            if rect.check_collision_point_rec(point) {
                return Some(id);
            }
        }
        if self.menu.is_some_and(|m| m.check_collision_point_rec(point)) {
            return None;
        }
        self.carousels
            .iter()
            .flat_map(|frame| frame.previous.iter().chain(frame.next.iter()))
            .find(|(_, rect)| rect.check_collision_point_rec(point))
            .map(|&(id, _)| id)
    }
}

/// Link labels listed in the expanded navigation menu.
pub fn menu_links(page: &Page) -> Vec<String> {
    let document = page.document();
    let Some(nav) = page.nav() else {
        return Vec::new();
    };
    document
        .descendants(nav.header())
        .into_iter()
        .filter(|&id| document.tag(id) == "a")
        .map(|id| document.text_content(id))
        .filter(|label| !label.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::dom::Document;
    use crate::engine::PageEvent;

    const PAGE: &str = r#"
        <header class="site-header" aria-expanded="false">
          <button class="nav-toggle">Menu</button>
          <ul><li><a href="/">Home</a></li><li><a href="/work">Work</a></li></ul>
        </header>
        <div class="elementor-widget-media-carousel">
          <div class="swiper-wrapper"><div class="swiper-slide">A</div><div class="swiper-slide">B</div></div>
          <div class="elementor-swiper-button-prev"></div>
          <div class="elementor-swiper-button-next"></div>
        </div>
        <div class="elementor-widget-media-carousel">
          <div class="swiper-wrapper"><div class="swiper-slide">C</div></div>
        </div>
    "#;

    fn page() -> Page {
        Page::mount(Document::parse(PAGE), &Config::default())
    }

    #[test]
    fn carousels_share_height_below_header() {
        let page = page();
        let layout = Layout::compute(&page, 960.0, 540.0);
        assert!(layout.header.is_some());
        assert_eq!(layout.carousels.len(), 2);
        let first = &layout.carousels[0].bounds;
        let second = &layout.carousels[1].bounds;
        assert!(first.y >= HEADER_HEIGHT);
        assert!(second.y >= first.y + first.height);
        assert!(layout.carousels[0].previous.is_some());
        assert!(layout.carousels[1].next.is_none());
    }

    #[test]
    fn hit_finds_controls() {
        let page = page();
        let layout = Layout::compute(&page, 960.0, 540.0);
        let carousel = &page.carousels()[0];
        let frame = &layout.carousels[0];

        let (_, next_rect) = frame.next.unwrap();
        let center = Vector2::new(next_rect.x + 4.0, next_rect.y + 4.0);
        assert_eq!(layout.hit(center), carousel.next_control());

        let (_, toggle_rect) = layout.toggle.unwrap();
        let on_toggle = Vector2::new(toggle_rect.x + 1.0, toggle_rect.y + 1.0);
        assert_eq!(layout.hit(on_toggle), page.nav().map(|n| n.button()));

        let on_slide = Vector2::new(frame.slide_area.x + 10.0, frame.slide_area.y + 10.0);
        assert_eq!(layout.hit(on_slide), None);
        assert!(layout.is_over_carousel(0, on_slide));
        assert!(!layout.is_over_carousel(1, on_slide));
    }

    #[test]
    fn expanded_menu_lists_links_and_covers_carousel() {
        let mut page = page();
        let button = page.nav().unwrap().button();
        page.dispatch(PageEvent::Click(button));

        assert_eq!(menu_links(&page), vec!["Home".to_string(), "Work".to_string()]);
        let layout = Layout::compute(&page, 960.0, 540.0);
        let menu = layout.menu.unwrap();
        let inside_menu = Vector2::new(menu.x + 5.0, menu.y + menu.height - 5.0);
        assert!(!layout.is_over_carousel(0, inside_menu));
    }
}
