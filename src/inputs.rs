use rust_decimal::Decimal;
use std::str::FromStr;

use crate::types::FaraidError;

/// Conversion into the `Decimal` the estate builder works with.
///
/// Estate figures arrive from many places: integers from ledgers, floats
/// from spreadsheets, strings from forms. Any of them can feed
/// [`crate::estate::EstateInputs`] directly; a value that has no exact
/// decimal representation is an [`FaraidError::InvalidInput`].
pub trait IntoFaraidDecimal {
    fn into_faraid_decimal(self) -> Result<Decimal, FaraidError>;
}

impl IntoFaraidDecimal for Decimal {
    fn into_faraid_decimal(self) -> Result<Decimal, FaraidError> {
        Ok(self)
    }
}

macro_rules! faraid_decimal_from_int {
    ($($t:ty),*) => {
        $(
            impl IntoFaraidDecimal for $t {
                fn into_faraid_decimal(self) -> Result<Decimal, FaraidError> {
                    Ok(Decimal::from(self))
                }
            }
        )*
    };
}

faraid_decimal_from_int!(i32, u32, i64, u64, isize, usize);

macro_rules! faraid_decimal_from_float {
    ($($t:ty),*) => {
        $(
            impl IntoFaraidDecimal for $t {
                fn into_faraid_decimal(self) -> Result<Decimal, FaraidError> {
                    Decimal::from_f64_retain(self as f64).ok_or_else(|| {
                        FaraidError::InvalidInput(format!(
                            "the value {} has no exact decimal representation",
                            self
                        ))
                    })
                }
            }
        )*
    };
}

faraid_decimal_from_float!(f32, f64);

impl IntoFaraidDecimal for &str {
    fn into_faraid_decimal(self) -> Result<Decimal, FaraidError> {
        Decimal::from_str(self).map_err(|e| {
            FaraidError::InvalidInput(format!("{:?} is not a decimal amount: {}", self, e))
        })
    }
}

impl IntoFaraidDecimal for String {
    fn into_faraid_decimal(self) -> Result<Decimal, FaraidError> {
        self.as_str().into_faraid_decimal()
    }
}
