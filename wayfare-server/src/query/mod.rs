//! Trip search: matching, ranking, and reduction over the catalog.
//!
//! A search runs in three stages. Raw [`QueryInput`] is normalized into an
//! immutable [`Query`]; the catalog is filtered by [`matches`] and the
//! matches ordered by [`rank_trips`]; the result becomes the working set of
//! a [`QuerySession`], which [`cheapest`] and [`fastest`] can then narrow
//! to a single trip.

mod predicate;
mod rank;
mod reduce;
mod request;
mod session;

pub use predicate::{filter_trips, matches};
pub use rank::rank_trips;
pub use reduce::{Reduction, cheapest, fastest};
pub use request::{Query, QueryError, QueryInput, SortKey};
pub use session::{QuerySession, SearchError, SessionState};
