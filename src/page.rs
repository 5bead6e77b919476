//! Composition root: mounts every widget a document supports and routes host
//! events and time to them.

use std::fmt;
use std::time::Duration;

use tracing::info;

use crate::carousel::Carousel;
use crate::config::Config;
use crate::dom::Document;
use crate::engine::{PageEvent, Widget};
use crate::nav::NavToggle;

pub struct Page {
    document: Document,
    nav: Option<NavToggle>,
    carousels: Vec<Carousel>,
}

impl Page {
    /// Mounts the nav toggle and one carousel per matching container. Markup
    /// a widget cannot use is skipped without affecting the others.
    pub fn mount(mut document: Document, config: &Config) -> Self {
        let hooks = &config.hooks;
        let nav = NavToggle::mount(&document, hooks);
        let containers = document.query_class_all(document.root(), &hooks.carousel);
        let found = containers.len();
        let carousels: Vec<Carousel> = containers
            .into_iter()
            .filter_map(|root| Carousel::mount(&mut document, root, hooks, config.autoplay_interval()))
            .collect();

        info!(
            nav = nav.is_some(),
            carousels = carousels.len(),
            skipped = found - carousels.len(),
            "page mounted"
        );
        Self { document, nav, carousels }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn nav(&self) -> Option<&NavToggle> {
        self.nav.as_ref()
    }

    pub fn carousels(&self) -> &[Carousel] {
        &self.carousels
    }

    /// Delivers `event` to every widget; returns how many reacted.
    pub fn dispatch(&mut self, event: PageEvent) -> usize {
        let Self { document, nav, carousels } = self;
        widgets(nav, carousels)
            .map(|widget| widget.handle_event(document, event))
            .filter(|&handled| handled)
            .count()
    }

    pub fn update(&mut self, dt: Duration) {
        let Self { document, nav, carousels } = self;
        for widget in widgets(nav, carousels) {
            widget.update(document, dt);
        }
    }

    /// Replays `duration` of host time in `step` increments.
    pub fn run_for(&mut self, duration: Duration, step: Duration) {
        let step = step.max(Duration::from_micros(1));
        let mut remaining = duration;
        while !remaining.is_zero() {
            let dt = step.min(remaining);
            self.update(dt);
            remaining -= dt;
        }
    }

    /// Stops every timer on the page.
    pub fn dispose(&mut self) {
        let Self { nav, carousels, .. } = self;
        for widget in widgets(nav, carousels) {
            widget.dispose();
        }
    }

    pub fn report(&self) -> PageReport {
        PageReport {
            nav_expanded: self.nav.as_ref().map(|nav| nav.is_expanded(&self.document)),
            carousels: self
                .carousels
                .iter()
                .map(|c| CarouselReport {
                    active: c.active_index(),
                    total: c.len(),
                    autoplaying: c.is_autoplaying(),
                })
                .collect(),
        }
    }
}

fn widgets<'a>(
    nav: &'a mut Option<NavToggle>,
    carousels: &'a mut [Carousel],
) -> impl Iterator<Item = &'a mut dyn Widget> {
    nav.iter_mut()
        .map(|nav| -> &'a mut dyn Widget { nav })
        .chain(carousels.iter_mut().map(|c| -> &'a mut dyn Widget { c }))
}

/// Snapshot of widget state, printed by the headless host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    pub nav_expanded: Option<bool>,
    pub carousels: Vec<CarouselReport>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselReport {
    pub active: usize,
    pub total: usize,
    pub autoplaying: bool,
}

impl fmt::Display for PageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.nav_expanded {
            Some(expanded) => writeln!(f, "nav: {}", if expanded { "expanded" } else { "collapsed" })?,
            None => writeln!(f, "nav: not mounted")?,
        }
        if self.carousels.is_empty() {
            writeln!(f, "carousels: none mounted")?;
        }
        for (k, c) in self.carousels.iter().enumerate() {
            writeln!(
                f,
                "carousel {k}: slide {}/{} ({})",
                c.active + 1,
                c.total,
                if c.autoplaying { "playing" } else { "paused" }
            )?;
        }
        Ok(())
    }
}
