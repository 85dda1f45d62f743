use reel_protocol::{SLOT_COUNT, SlotIndex};
use serde::{Deserialize, Serialize};

/// Horizontal extent of one card inside the scrollable strip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardExtent {
    /// Left edge in strip content coordinates.
    pub left: f64,
    pub width: f64,
}

/// Measurements of the horizontally scrollable card strip, as reported by the
/// host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StripGeometry {
    /// Visible width of the strip.
    pub viewport_width: f64,
    /// Total scrollable width.
    pub content_width: f64,
    pub cards: [CardExtent; SLOT_COUNT],
}

impl StripGeometry {
    /// Equal-width cards laid out from the left edge with `gap` between them.
    pub fn uniform(card_width: f64, gap: f64, viewport_width: f64) -> Self {
        let cards = SlotIndex::ALL.map(|slot| CardExtent {
            left: slot.get() as f64 * (card_width + gap),
            width: card_width,
        });
        let content_width = SLOT_COUNT as f64 * card_width + (SLOT_COUNT - 1) as f64 * gap;
        Self {
            viewport_width,
            content_width,
            cards,
        }
    }

    pub fn max_offset(&self) -> f64 {
        (self.content_width - self.viewport_width).max(0.0)
    }

    /// Scroll offset that puts the center of `slot`'s card on the center of
    /// the strip viewport, clamped to the scrollable range.
    pub fn centered_offset(&self, slot: SlotIndex) -> f64 {
        let card = self.cards[slot.get()];
        let target = card.left + card.width / 2.0 - self.viewport_width / 2.0;
        if target.is_finite() {
            target.clamp(0.0, self.max_offset())
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(i: usize) -> SlotIndex {
        SlotIndex::new(i).unwrap()
    }

    #[test]
    fn centers_middle_card() {
        // Cards 100 wide, gap 10: slot 2 spans 220..320, center 270.
        let geometry = StripGeometry::uniform(100.0, 10.0, 200.0);
        assert_eq!(geometry.content_width, 540.0);
        assert_eq!(geometry.centered_offset(slot(2)), 170.0);
    }

    #[test]
    fn clamps_at_both_ends() {
        let geometry = StripGeometry::uniform(100.0, 10.0, 200.0);
        assert_eq!(geometry.centered_offset(slot(0)), 0.0);
        assert_eq!(geometry.centered_offset(slot(4)), geometry.max_offset());
        assert_eq!(geometry.max_offset(), 340.0);
    }

    #[test]
    fn no_scroll_when_everything_fits() {
        let geometry = StripGeometry::uniform(100.0, 10.0, 1000.0);
        for s in SlotIndex::ALL {
            assert_eq!(geometry.centered_offset(s), 0.0);
        }
    }
}
