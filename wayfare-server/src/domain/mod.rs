//! Domain types for the bus trip explorer.
//!
//! A [`TripRecord`] keeps the catalog text exactly as loaded. Comparable
//! views (fare, rating, departure time, travel duration) are derived on
//! demand through the normalizers in this module, so the display layer
//! always shows the source text while the engine compares parsed values.

mod error;
mod normalize;
mod time;
mod trip;
mod weekday;

pub use error::DomainError;
pub use normalize::{
    DURATION_SENTINEL_MINUTES, FALLBACK_TIME_OF_DAY, Normalized, parse_duration_minutes,
    parse_fare, parse_rating, parse_time_of_day,
};
pub use time::{DurationError, TimeError, parse_travel_duration, parse_twelve_hour};
pub use trip::{TripRecord, column};
pub use weekday::{day_name, weekday_of};
