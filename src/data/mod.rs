//! Loading and normalization of tabular and boundary data.

pub mod coerce;
pub mod flow;
pub mod geo;
pub mod indicator;
pub mod load;
pub mod source;
pub mod table;
