//! Page growth.
//!
//! While a stroke is being drawn, each sample is checked against the
//! bottom of the last page. Crossing into the look-ahead margin adds
//! exactly one page; the count never shrinks.

use crate::config::EngineConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pagination {
    pub page_height: f32,
    pub margin: f32,
}

impl Pagination {
    pub const fn new(page_height: f32, margin: f32) -> Self {
        Self {
            page_height,
            margin,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.page_height, config.grow_margin)
    }

    /// Y beyond which a sample triggers growth at `page_count` pages.
    pub fn threshold(&self, page_count: u32) -> f32 {
        page_count as f32 * self.page_height - self.margin
    }

    /// The page count after checking one sample. Grows by at most one.
    pub fn maybe_grow(&self, point_y: f32, page_count: u32) -> u32 {
        if point_y > self.threshold(page_count) {
            log::debug!(
                "sample y={point_y} past threshold {}, growing to {} pages",
                self.threshold(page_count),
                page_count + 1
            );
            page_count + 1
        } else {
            page_count
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_past_margin() {
        let p = Pagination::default();
        assert_eq!(p.threshold(1), 856.0);
        assert_eq!(p.maybe_grow(856.0, 1), 1);
        assert_eq!(p.maybe_grow(856.5, 1), 2);
    }

    #[test]
    fn one_page_per_check_even_for_far_samples() {
        let p = Pagination::default();
        assert_eq!(p.maybe_grow(10_000.0, 1), 2);
    }

    #[test]
    fn negative_y_never_grows() {
        let p = Pagination::default();
        assert_eq!(p.maybe_grow(-500.0, 4), 4);
    }
}
