pub mod aggregate;
pub mod format;
pub mod primitives;
pub mod scale;
pub mod ticks;
pub mod types;

pub use aggregate::{count_by, extent, group_by, max, max_by_first, mean, rollup, sum};
pub use format::{format_default_tick, format_fixed, format_integer, format_with_commas};
pub use primitives::{coerce_number, coerce_optional_number, day_of_year, parse_iso_date};
pub use scale::{BandScale, LinearScale, OrdinalScale, SlotScale, SqrtScale};
pub use ticks::{nice_domain, tick_increment, tick_step, ticks};
pub use types::{Margin, PlotArea, Viewport};
