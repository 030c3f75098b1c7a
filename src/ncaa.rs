//! Everything related to the NCAA statistics API: the HTTP client, the
//! known stat categories and the shaping of upstream payloads.

pub mod categories;
pub mod client;
pub mod fallback;
pub mod normalize;
pub mod rankings;
pub mod scoreboard;
