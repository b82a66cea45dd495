mod date;
mod decimal;

pub use date::Date;
pub use decimal::Decimal;
