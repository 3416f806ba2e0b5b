//! Payment events: non-coupon flows of a leg.

use pricer_core::types::{Currency, CurrencyAmount, Date};

use crate::instruments::error::{ensure_finite, InstrumentError};

/// Exchange of notional on a known date.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NotionalExchange {
    payment: CurrencyAmount,
    payment_date: Date,
}

impl NotionalExchange {
    /// Signed `payment` made on `payment_date`.
    ///
    /// # Errors
    ///
    /// `InstrumentError::NonFinite` for a NaN or infinite amount.
    pub fn new(payment: CurrencyAmount, payment_date: Date) -> Result<Self, InstrumentError> {
        ensure_finite("amount", payment.amount())?;
        Ok(Self {
            payment,
            payment_date,
        })
    }

    /// Signed amount.
    #[inline]
    pub fn payment(&self) -> CurrencyAmount {
        self.payment
    }

    /// Payment date.
    #[inline]
    pub fn payment_date(&self) -> Date {
        self.payment_date
    }
}

/// A flow that is not a coupon; counted in value but not in PVBP.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaymentEvent {
    /// Notional exchange.
    NotionalExchange(NotionalExchange),
}

impl PaymentEvent {
    /// Payment date.
    pub fn payment_date(&self) -> Date {
        match self {
            PaymentEvent::NotionalExchange(e) => e.payment_date(),
        }
    }

    /// Currency of the flow.
    pub fn currency(&self) -> Currency {
        match self {
            PaymentEvent::NotionalExchange(e) => e.payment().currency(),
        }
    }

    /// Signed amount of the flow.
    pub fn payment(&self) -> CurrencyAmount {
        match self {
            PaymentEvent::NotionalExchange(e) => e.payment(),
        }
    }
}

impl From<NotionalExchange> for PaymentEvent {
    fn from(event: NotionalExchange) -> Self {
        PaymentEvent::NotionalExchange(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notional_exchange() {
        let date = Date::from_ymd(2025, 1, 2).unwrap();
        let event: PaymentEvent = NotionalExchange::new(CurrencyAmount::new(Currency::USD, -1.0e6), date)
            .unwrap()
            .into();
        assert_eq!(event.payment_date(), date);
        assert_eq!(event.currency(), Currency::USD);
        assert_eq!(event.payment().amount(), -1.0e6);
        assert!(NotionalExchange::new(CurrencyAmount::new(Currency::USD, f64::NAN), date).is_err());
    }
}
