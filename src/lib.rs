pub mod coerce;
pub mod detail;
pub mod field;
pub mod pipeline;
pub mod record;
pub mod render;
pub mod search;
pub mod urlstate;
