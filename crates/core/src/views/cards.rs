use reel_protocol::{SlotIndex, SlotView};

use crate::engine::LayoutEngine;
use crate::model::CarouselConfig;

/// Build the view of every card for the current layout and playback.
///
/// `active` is only flagged on a card while playback is engaged; a collapsed
/// carousel has no active card even though the index is pinned to 0.
pub fn render_cards(
    layout: &LayoutEngine,
    config: &CarouselConfig,
    expanded: bool,
    active: Option<SlotIndex>,
) -> Vec<SlotView> {
    SlotIndex::ALL
        .iter()
        .map(|&slot| SlotView {
            slot,
            label: slot.label(),
            transform: layout.compute_slot_transform(slot, expanded),
            active: active == Some(slot),
            media: config.media_for(slot).clone(),
            frame_asset: config.frame_asset.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_one_based_and_active_flag_is_exclusive() {
        let config = CarouselConfig::default();
        let layout = LayoutEngine::new(&config);
        let cards = render_cards(&layout, &config, true, SlotIndex::new(2));

        let labels: Vec<u8> = cards.iter().map(|c| c.label).collect();
        assert_eq!(labels, vec![1, 2, 3, 4, 5]);
        let active: Vec<usize> = cards.iter().filter(|c| c.active).map(|c| c.slot.get()).collect();
        assert_eq!(active, vec![2]);
    }

    #[test]
    fn collapsed_cards_use_bunched_table() {
        let config = CarouselConfig::default();
        let layout = LayoutEngine::new(&config);
        let cards = render_cards(&layout, &config, false, None);
        assert!(cards.iter().all(|c| !c.active));
        assert_eq!(cards[0].transform.offset_y, -12.0);
        assert_eq!(cards[0].transform.delay_ms, 200);
        assert_eq!(cards[0].frame_asset, config.frame_asset);
    }
}
