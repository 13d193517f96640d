use rust_decimal::Decimal;

/// An amount as handed over by a caller, before validation.
///
/// Upstream form parsing may produce either exact decimals or binary floats;
/// floats are only converted after they pass the finiteness check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawAmount {
    Decimal(Decimal),
    Float(f64),
}

impl From<Decimal> for RawAmount {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<i64> for RawAmount {
    fn from(value: i64) -> Self {
        Self::Decimal(Decimal::from(value))
    }
}
