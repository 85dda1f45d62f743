use serde::{Deserialize, Serialize};

/// Number of card slots in a carousel.
pub const SLOT_COUNT: usize = 5;

/// Identity of one of the five carousel slots, `0..SLOT_COUNT`.
///
/// The only ways to obtain a value are [`SlotIndex::new`], which rejects
/// out-of-range input, [`SlotIndex::ALL`], and [`SlotIndex::next`], which wraps
/// modulo [`SLOT_COUNT`]. Code holding a `SlotIndex` can index `[T; SLOT_COUNT]`
/// tables without bounds checks failing.
///
/// Identity is 0-based; the label printed on a card is 1-based (see
/// [`SlotIndex::label`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SlotIndex(u8);

impl SlotIndex {
    pub const FIRST: SlotIndex = SlotIndex(0);
    pub const LAST: SlotIndex = SlotIndex(SLOT_COUNT as u8 - 1);
    pub const ALL: [SlotIndex; SLOT_COUNT] = [
        SlotIndex(0),
        SlotIndex(1),
        SlotIndex(2),
        SlotIndex(3),
        SlotIndex(4),
    ];

    pub fn new(index: usize) -> Option<Self> {
        (index < SLOT_COUNT).then_some(Self(index as u8))
    }

    #[inline]
    pub fn get(self) -> usize {
        usize::from(self.0)
    }

    /// The following slot, wrapping from the last slot back to the first.
    pub fn next(self) -> Self {
        Self(((self.get() + 1) % SLOT_COUNT) as u8)
    }

    /// Distance from this slot to the last one.
    pub fn from_last(self) -> usize {
        Self::LAST.get() - self.get()
    }

    /// 1-based label shown on the card.
    pub fn label(self) -> u8 {
        self.0 + 1
    }
}

impl std::fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotOutOfRange(pub u8);

impl std::fmt::Display for SlotOutOfRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slot index {} is out of range 0..{SLOT_COUNT}", self.0)
    }
}

impl std::error::Error for SlotOutOfRange {}

impl TryFrom<u8> for SlotIndex {
    type Error = SlotOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(usize::from(value)).ok_or(SlotOutOfRange(value))
    }
}

impl From<SlotIndex> for u8 {
    fn from(slot: SlotIndex) -> u8 {
        slot.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range() {
        assert!(SlotIndex::new(4).is_some());
        assert!(SlotIndex::new(5).is_none());
        assert!(SlotIndex::try_from(9u8).is_err());
    }

    #[test]
    fn next_wraps_after_last() {
        assert_eq!(SlotIndex::LAST.next(), SlotIndex::FIRST);
        assert_eq!(SlotIndex::FIRST.next().get(), 1);
    }

    #[test]
    fn label_is_one_based() {
        assert_eq!(SlotIndex::FIRST.label(), 1);
        assert_eq!(SlotIndex::LAST.label(), 5);
    }

    #[test]
    fn from_last_counts_down() {
        let distances: Vec<usize> = SlotIndex::ALL.iter().map(|s| s.from_last()).collect();
        assert_eq!(distances, vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn deserialize_validates() {
        let ok: Result<SlotIndex, _> = serde_json::from_str("3");
        assert_eq!(ok.ok(), SlotIndex::new(3));
        let bad: Result<SlotIndex, _> = serde_json::from_str("7");
        assert!(bad.is_err());
    }
}
