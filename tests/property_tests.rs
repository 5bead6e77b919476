//! Property-based tests for carousel indexing and the active marker.

use std::time::Duration;

use proptest::prelude::*;

use carousel::{Carousel, Config, Document, Hooks, Widget};

#[derive(Debug, Clone, Copy)]
enum Step {
    Next,
    Previous,
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![Just(Step::Next), Just(Step::Previous)]
}

fn mounted(slides: usize) -> (Document, Carousel) {
    let hooks = Hooks::default();
    let mut doc = Document::new();
    let root = doc.root();
    let container = doc.append_with_classes(root, "div", &[hooks.carousel.as_str()]);
    let wrapper = doc.append_with_classes(container, "div", &[hooks.slide_wrapper.as_str()]);
    for _ in 0..slides {
        doc.append_with_classes(wrapper, "div", &[hooks.slide.as_str()]);
    }
    let interval = Config::default().autoplay_interval();
    let carousel = Carousel::mount(&mut doc, container, &hooks, interval).expect("slides present");
    (doc, carousel)
}

fn active_slides(doc: &Document, carousel: &Carousel) -> Vec<usize> {
    carousel
        .slides()
        .iter()
        .enumerate()
        .filter(|&(_, &s)| doc.has_class(s, "is-active"))
        .map(|(k, _)| k)
        .collect()
}

proptest! {
    /// Index always equals net displacement reduced into [0, N)
    #[test]
    fn index_tracks_net_displacement(
        slides in 1usize..12,
        steps in prop::collection::vec(step_strategy(), 0..64),
    ) {
        let (mut doc, mut carousel) = mounted(slides);
        let mut displacement: i64 = 0;
        for step in steps {
            let index = match step {
                Step::Next => { displacement += 1; carousel.next(&mut doc) }
                Step::Previous => { displacement -= 1; carousel.previous(&mut doc) }
            };
            prop_assert_eq!(index as i64, displacement.rem_euclid(slides as i64));
        }
    }

    /// Exactly one slide carries the active class after every transition
    #[test]
    fn exactly_one_active_slide(
        slides in 1usize..12,
        steps in prop::collection::vec(step_strategy(), 0..32),
    ) {
        let (mut doc, mut carousel) = mounted(slides);
        prop_assert_eq!(active_slides(&doc, &carousel), vec![0]);
        for step in steps {
            match step {
                Step::Next => carousel.next(&mut doc),
                Step::Previous => carousel.previous(&mut doc),
            };
            prop_assert_eq!(active_slides(&doc, &carousel), vec![carousel.active_index()]);
        }
    }

    /// Autoplay advances once per whole interval regardless of tick size
    #[test]
    fn autoplay_counts_whole_intervals(
        slides in 1usize..8,
        ticks in prop::collection::vec(1u64..2500, 1..40),
    ) {
        let (mut doc, mut carousel) = mounted(slides);
        let total: u64 = ticks.iter().sum();
        for ms in ticks {
            carousel.update(&mut doc, Duration::from_millis(ms));
        }
        let fired = (total / 5000) as usize;
        prop_assert_eq!(carousel.active_index(), fired % slides);
    }
}
