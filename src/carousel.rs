use std::time::Duration;

use tracing::{debug, trace};

use crate::config::Hooks;
use crate::dom::{Document, NodeId};
use crate::engine::{PageEvent, Widget};
use crate::state::{CarouselState, wrap_index};

/// One carousel bound to a container element: an ordered, non-empty list of
/// slides with exactly one marked active, optional previous/next controls
/// and hover-pausable autoplay.
#[derive(Debug, Clone)]
pub struct Carousel {
    root: NodeId,
    slides: Vec<NodeId>,
    previous_control: Option<NodeId>,
    next_control: Option<NodeId>,
    active_class: String,
    state: CarouselState,
}

impl Carousel {
    /// Mounts a carousel on `root`, marks the first slide active and starts
    /// autoplay. Returns `None` when the slide wrapper is missing or holds no
    /// slides; the document is left untouched in that case.
    pub fn mount(
        document: &mut Document,
        root: NodeId,
        hooks: &Hooks,
        autoplay_interval: Duration,
    ) -> Option<Self> {
        let Some(wrapper) = document.query_class(root, &hooks.slide_wrapper) else {
            debug!(?root, hook = %hooks.slide_wrapper, "carousel has no slide wrapper, skipping");
            return None;
        };
        let slides = document.query_class_all(wrapper, &hooks.slide);
        if slides.is_empty() {
            debug!(?root, hook = %hooks.slide, "carousel wrapper holds no slides, skipping");
            return None;
        }

        let mut carousel = Self {
            root,
            slides,
            previous_control: document.query_class(root, &hooks.previous_control),
            next_control: document.query_class(root, &hooks.next_control),
            active_class: hooks.active_class.clone(),
            state: CarouselState::new(autoplay_interval),
        };
        carousel.show(document, 0);
        carousel.state.autoplay.start();
        debug!(?root, slides = carousel.len(), "carousel mounted");
        Some(carousel)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn slides(&self) -> &[NodeId] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn previous_control(&self) -> Option<NodeId> {
        self.previous_control
    }

    pub fn next_control(&self) -> Option<NodeId> {
        self.next_control
    }

    pub fn active_index(&self) -> usize {
        self.state.index
    }

    pub fn active_slide(&self) -> NodeId {
        self.slides[self.state.index]
    }

    pub fn is_autoplaying(&self) -> bool {
        self.state.autoplay.is_running()
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    /// Activates the slide at `target` modulo the slide count and returns the
    /// resulting index.
    pub fn show(&mut self, document: &mut Document, target: isize) -> usize {
        self.state.index = wrap_index(target, self.slides.len());
        for (k, &slide) in self.slides.iter().enumerate() {
            document.toggle_class(slide, &self.active_class, k == self.state.index);
        }
        trace!(root = ?self.root, index = self.state.index, "slide shown");
        self.state.index
    }

    pub fn next(&mut self, document: &mut Document) -> usize {
        self.show(document, self.state.index as isize + 1)
    }

    pub fn previous(&mut self, document: &mut Document) -> usize {
        self.show(document, self.state.index as isize - 1)
    }

    /// Pauses autoplay until the pointer leaves again.
    pub fn pointer_enter(&mut self) {
        self.state.autoplay.stop();
    }

    /// Resumes autoplay with a fresh interval. Any running task is replaced,
    /// so uneven enter/leave sequences never stack timers.
    pub fn pointer_leave(&mut self) {
        if !self.state.disposed {
            self.state.autoplay.start();
        }
    }
}

impl Widget for Carousel {
    fn handle_event(&mut self, document: &mut Document, event: PageEvent) -> bool {
        match event {
            PageEvent::Click(target) => {
                if self.previous_control.is_some_and(|c| document.contains(c, target)) {
                    self.previous(document);
                    true
                } else if self.next_control.is_some_and(|c| document.contains(c, target)) {
                    self.next(document);
                    true
                } else {
                    false
                }
            }
            PageEvent::PointerEnter(target) if target == self.root => {
                self.pointer_enter();
                true
            }
            PageEvent::PointerLeave(target) if target == self.root => {
                self.pointer_leave();
                true
            }
            _ => false,
        }
    }

    fn update(&mut self, document: &mut Document, dt: Duration) {
        for _ in 0..self.state.autoplay.update(dt) {
            self.next(document);
        }
    }

    fn dispose(&mut self) {
        self.state.autoplay.stop();
        self.state.disposed = true;
    }
}

/// Local path of the image a slide shows, if any: the first `img` inside the
/// slide with a `src` (or lazy-load `data-src`) that is not a remote URL.
pub fn slide_image_source(document: &Document, slide: NodeId) -> Option<&str> {
    let img = if document.tag(slide) == "img" {
        slide
    } else {
        document.query_tag(slide, "img")?
    };
    let src = document
        .attribute(img, "src")
        .filter(|s| !s.is_empty())
        .or_else(|| document.attribute(img, "data-src"))?;
    let remote = ["http://", "https://", "//", "data:"].iter().any(|p| src.starts_with(p));
    (!remote).then_some(src)
}
