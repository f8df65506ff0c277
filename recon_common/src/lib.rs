mod money;

pub use money::{Money, MoneyConversionError, CENTS_PER_UNIT};
