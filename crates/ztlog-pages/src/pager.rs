//! Page navigation bounds for list screens.

use serde::Serialize;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pager {
    pub current: u32,
    pub total: u32,
}

impl Pager {
    /// `total` is clamped to at least 1 and `current` into `1..=total`.
    pub fn new(current: u32, total: u32) -> Self {
        let total = total.max(1);
        Self {
            current: current.clamp(1, total),
            total,
        }
    }

    /// Hidden when there is only one page.
    pub fn is_visible(&self) -> bool {
        self.total > 1
    }

    pub fn pages(&self) -> RangeInclusive<u32> {
        1..=self.total
    }

    pub fn contains(&self, page: u32) -> bool {
        self.pages().contains(&page)
    }

    pub fn prev(&self) -> Option<u32> {
        (self.current > 1).then(|| self.current - 1)
    }

    pub fn next(&self) -> Option<u32> {
        (self.current < self.total).then(|| self.current + 1)
    }
}
