use std::time::Duration;

use crate::timer::RepeatingTask;

/// Per-carousel mutable state: the active slide and the autoplay task.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselState {
    pub index: usize,
    pub autoplay: RepeatingTask,
    pub disposed: bool,
}

impl CarouselState {
    pub fn new(autoplay_interval: Duration) -> Self {
        Self {
            index: 0,
            autoplay: RepeatingTask::new(autoplay_interval),
            disposed: false,
        }
    }
}

/// Reduces `target` into `[0, len)`, wrapping negative targets from the end.
///
/// # Panics
///
/// Panics when `len` is zero. Carousels never mount without slides.
pub fn wrap_index(target: isize, len: usize) -> usize {
    target.rem_euclid(len as isize) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_both_directions() {
        assert_eq!(wrap_index(0, 3), 0);
        assert_eq!(wrap_index(3, 3), 0);
        assert_eq!(wrap_index(4, 3), 1);
        assert_eq!(wrap_index(-1, 4), 3);
        assert_eq!(wrap_index(-9, 4), 3);
        assert_eq!(wrap_index(7, 1), 0);
    }
}
