//! Dual-thumb price slider.
//!
//! Both thumbs share one `[floor, ceiling]` scale and always stay at least
//! one unit apart. Each drag is clamped against the other thumb's current
//! position, so successive drags compose without drift.

use serde::{Deserialize, Serialize};

use crate::price::{parse_price, ParsedPrice};

/// Minimum distance between the thumbs.
pub const THUMB_GAP: i64 = 1;

/// Clamp a dragged min thumb against the max thumb.
pub fn clamp_min_thumb(value: i64, other: i64, floor: i64) -> i64 {
    value.min(other - THUMB_GAP).max(floor)
}

/// Clamp a dragged max thumb against the min thumb.
pub fn clamp_max_thumb(value: i64, other: i64, ceiling: i64) -> i64 {
    value.max(other + THUMB_GAP).min(ceiling)
}

/// Slider bounds derived from listing price aggregates.
pub fn bounds_from_prices(price_min: Option<f64>, price_max: Option<f64>) -> (i64, i64) {
    let floor = price_min
        .filter(|v| v.is_finite())
        .map(|v| v.floor() as i64)
        .unwrap_or(0)
        .max(0);
    let ceiling = price_max
        .filter(|v| v.is_finite())
        .map(|v| v.ceil() as i64)
        .unwrap_or(floor)
        .max(floor);
    (floor, ceiling)
}

/// State of the two linked range inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSlider {
    floor: i64,
    ceiling: i64,
    min_thumb: i64,
    max_thumb: i64,
}

impl PriceSlider {
    /// Create a slider. Unset prices put the thumbs at the bounds.
    pub fn new(floor: i64, ceiling: i64, min_price: &str, max_price: &str) -> Self {
        let ceiling = ceiling.max(floor);
        Self {
            floor,
            ceiling,
            min_thumb: thumb_position(min_price, floor, ceiling).unwrap_or(floor),
            max_thumb: thumb_position(max_price, floor, ceiling).unwrap_or(ceiling),
        }
    }

    pub fn floor(&self) -> i64 {
        self.floor
    }

    pub fn ceiling(&self) -> i64 {
        self.ceiling
    }

    pub fn min_thumb(&self) -> i64 {
        self.min_thumb
    }

    pub fn max_thumb(&self) -> i64 {
        self.max_thumb
    }

    /// Move the min thumb. Returns the new min price.
    pub fn drag_min(&mut self, value: i64) -> String {
        let value = value.clamp(self.floor, self.ceiling);
        self.min_thumb = clamp_min_thumb(value, self.max_thumb, self.floor);
        self.min_thumb.to_string()
    }

    /// Move the max thumb. Returns the new max price.
    pub fn drag_max(&mut self, value: i64) -> String {
        let value = value.clamp(self.floor, self.ceiling);
        self.max_thumb = clamp_max_thumb(value, self.min_thumb, self.ceiling);
        self.max_thumb.to_string()
    }

    /// Follow new bounds. Thumbs whose price is unset jump to the new
    /// bound; explicit prices keep their position, clamped into range.
    pub fn set_bounds(&mut self, floor: i64, ceiling: i64, min_price: &str, max_price: &str) {
        let ceiling = ceiling.max(floor);
        self.floor = floor;
        self.ceiling = ceiling;

        let min_explicit = thumb_position(min_price, floor, ceiling).is_some();
        let max_explicit = thumb_position(max_price, floor, ceiling).is_some();
        self.min_thumb = if min_explicit {
            self.min_thumb.clamp(floor, ceiling)
        } else {
            floor
        };
        self.max_thumb = if max_explicit {
            self.max_thumb.clamp(floor, ceiling)
        } else {
            ceiling
        };

        // Keep the gap; thumbs only meet when floor == ceiling.
        if min_explicit {
            self.min_thumb = clamp_min_thumb(self.min_thumb, self.max_thumb, floor);
        }
        self.max_thumb = clamp_max_thumb(self.max_thumb, self.min_thumb, ceiling);
    }
}

fn thumb_position(price: &str, floor: i64, ceiling: i64) -> Option<i64> {
    match parse_price(price) {
        ParsedPrice::Value(v) => Some((v.round() as i64).clamp(floor, ceiling)),
        ParsedPrice::Unset | ParsedPrice::Invalid => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_thumb_stays_below_max() {
        let mut slider = PriceSlider::new(0, 100, "10", "50");
        assert_eq!(slider.drag_min(90), "49");
        assert_eq!(slider.min_thumb(), 49);
    }

    #[test]
    fn test_max_thumb_stays_above_min() {
        let mut slider = PriceSlider::new(0, 100, "40", "60");
        assert_eq!(slider.drag_max(5), "41");

        let mut slider = PriceSlider::new(0, 100, "40", "60");
        assert_eq!(slider.drag_max(20), "41");
    }

    #[test]
    fn test_successive_drags_compose() {
        let mut slider = PriceSlider::new(0, 100, "", "");
        assert_eq!(slider.drag_max(30), "30");
        assert_eq!(slider.drag_min(80), "29");
        assert_eq!(slider.drag_max(0), "30");
    }

    #[test]
    fn test_degenerate_bounds_collapse() {
        let mut slider = PriceSlider::new(50, 50, "", "");
        assert_eq!(slider.drag_min(10), "50");
        assert_eq!(slider.drag_max(90), "50");
    }

    #[test]
    fn test_initializes_to_bounds_when_unset() {
        let slider = PriceSlider::new(100, 900, "", "");
        assert_eq!(slider.min_thumb(), 100);
        assert_eq!(slider.max_thumb(), 900);
    }

    #[test]
    fn test_resync_on_new_bounds() {
        let mut slider = PriceSlider::new(0, 0, "", "");
        slider.set_bounds(99, 1425, "", "");
        assert_eq!(slider.min_thumb(), 99);
        assert_eq!(slider.max_thumb(), 1425);
    }

    #[test]
    fn test_explicit_prices_survive_new_bounds() {
        let mut slider = PriceSlider::new(0, 1000, "200", "");
        slider.set_bounds(50, 800, "200", "");
        assert_eq!(slider.min_thumb(), 200);
        assert_eq!(slider.max_thumb(), 800);
    }

    #[test]
    fn test_new_bounds_keep_thumb_gap() {
        let mut slider = PriceSlider::new(0, 1000, "200", "");
        slider.set_bounds(50, 150, "200", "");
        assert_eq!(slider.max_thumb(), 150);
        assert_eq!(slider.min_thumb(), 149);

        let mut slider = PriceSlider::new(0, 1000, "", "20");
        slider.set_bounds(50, 150, "", "20");
        assert_eq!(slider.min_thumb(), 50);
        assert_eq!(slider.max_thumb(), 51);

        let mut slider = PriceSlider::new(0, 1000, "10", "20");
        slider.set_bounds(50, 150, "10", "20");
        assert_eq!((slider.min_thumb(), slider.max_thumb()), (50, 51));

        let mut slider = PriceSlider::new(0, 1000, "200", "");
        slider.set_bounds(70, 70, "200", "");
        assert_eq!((slider.min_thumb(), slider.max_thumb()), (70, 70));
    }

    #[test]
    fn test_bounds_from_prices() {
        assert_eq!(bounds_from_prices(Some(99.5), Some(1424.2)), (99, 1425));
        assert_eq!(bounds_from_prices(None, None), (0, 0));
        assert_eq!(bounds_from_prices(Some(10.0), Some(5.0)), (10, 10));
    }
}
