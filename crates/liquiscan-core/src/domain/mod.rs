mod bar;
mod date_range;
mod symbol;

pub use bar::{Bar, PriceSeries};
pub use date_range::DateRange;
pub use symbol::{ExchangeGroup, Symbol};
