//! Database entities for forecasts, inventory and shipments.

pub mod entities;

pub use entities::prelude;
