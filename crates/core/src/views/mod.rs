pub mod cards;
pub mod strip;

pub use cards::render_cards;
pub use strip::render_strip;
