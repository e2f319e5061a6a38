pub mod encode;
pub mod main;
pub mod media_source;
