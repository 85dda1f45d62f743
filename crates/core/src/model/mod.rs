pub mod config;
pub mod media;

pub use config::{CarouselConfig, ConfigError, StripConfig};
pub use media::{HandleTable, MediaError, MediaHandle};
