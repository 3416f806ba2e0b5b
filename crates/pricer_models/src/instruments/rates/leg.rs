//! Resolved swap legs.

use std::fmt;

use pricer_core::types::{Currency, Date};

use super::event::PaymentEvent;
use super::payment::PaymentPeriod;
use crate::instruments::error::InstrumentError;

/// Kind of a swap leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwapLegType {
    /// Fixed rate.
    Fixed,
    /// Term index rate.
    Ibor,
    /// Overnight index rate.
    Overnight,
    /// Price index ratio.
    Inflation,
    /// Anything else.
    Other,
}

impl fmt::Display for SwapLegType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SwapLegType::Fixed => "Fixed",
            SwapLegType::Ibor => "Ibor",
            SwapLegType::Overnight => "Overnight",
            SwapLegType::Inflation => "Inflation",
            SwapLegType::Other => "Other",
        };
        write!(f, "{}", name)
    }
}

/// Direction of the leg flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PayReceive {
    /// Flows are paid; signed values are negative.
    Pay,
    /// Flows are received; signed values are positive.
    Receive,
}

impl PayReceive {
    /// Whether a signed value agrees with the direction; zero always does.
    #[inline]
    pub fn accepts(&self, value: f64) -> bool {
        match self {
            PayReceive::Pay => value <= 0.0,
            PayReceive::Receive => value >= 0.0,
        }
    }

    /// `-1` for pay, `1` for receive.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            PayReceive::Pay => -1.0,
            PayReceive::Receive => 1.0,
        }
    }
}

impl fmt::Display for PayReceive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayReceive::Pay => write!(f, "Pay"),
            PayReceive::Receive => write!(f, "Receive"),
        }
    }
}

/// One side of a swap: payment periods and events in a single currency.
///
/// # Invariants
///
/// - at least one payment period
/// - every period and event is in the leg currency
/// - rate period notionals and known amounts carry the sign of the
///   pay/receive flag; notional exchanges are exempt
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedSwapLeg {
    leg_type: SwapLegType,
    pay_receive: PayReceive,
    payment_periods: Vec<PaymentPeriod>,
    payment_events: Vec<PaymentEvent>,
    currency: Currency,
}

impl ResolvedSwapLeg {
    /// Validated leg. The currency is taken from the first period.
    ///
    /// # Errors
    ///
    /// - `InstrumentError::Empty` without payment periods
    /// - `InstrumentError::CurrencyMismatch` for a period or event in
    ///   another currency
    /// - `InstrumentError::SignMismatch` for a signed value disagreeing
    ///   with `pay_receive`
    pub fn new(
        leg_type: SwapLegType,
        pay_receive: PayReceive,
        payment_periods: Vec<PaymentPeriod>,
        payment_events: Vec<PaymentEvent>,
    ) -> Result<Self, InstrumentError> {
        let currency = payment_periods
            .first()
            .map(PaymentPeriod::currency)
            .ok_or(InstrumentError::Empty {
                what: "payment periods",
            })?;
        let currencies = payment_periods
            .iter()
            .map(PaymentPeriod::currency)
            .chain(payment_events.iter().map(PaymentEvent::currency));
        for found in currencies {
            if found != currency {
                return Err(InstrumentError::CurrencyMismatch {
                    expected: currency,
                    found,
                });
            }
        }
        for period in &payment_periods {
            let value = period.signed_value();
            if !pay_receive.accepts(value) {
                return Err(InstrumentError::SignMismatch {
                    direction: match pay_receive {
                        PayReceive::Pay => "Pay",
                        PayReceive::Receive => "Receive",
                    },
                    value,
                });
            }
        }
        Ok(Self {
            leg_type,
            pay_receive,
            payment_periods,
            payment_events,
            currency,
        })
    }

    /// Leg type.
    #[inline]
    pub fn leg_type(&self) -> SwapLegType {
        self.leg_type
    }

    /// Pay or receive.
    #[inline]
    pub fn pay_receive(&self) -> PayReceive {
        self.pay_receive
    }

    /// Payment periods, in schedule order.
    #[inline]
    pub fn payment_periods(&self) -> &[PaymentPeriod] {
        &self.payment_periods
    }

    /// Payment events.
    #[inline]
    pub fn payment_events(&self) -> &[PaymentEvent] {
        &self.payment_events
    }

    /// Leg currency.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Earliest accrual start.
    pub fn start_date(&self) -> Date {
        let first = self.payment_periods[0].start_date();
        self.payment_periods
            .iter()
            .map(PaymentPeriod::start_date)
            .fold(first, std::cmp::min)
    }

    /// Latest accrual end.
    pub fn end_date(&self) -> Date {
        let first = self.payment_periods[0].end_date();
        self.payment_periods
            .iter()
            .map(PaymentPeriod::end_date)
            .fold(first, std::cmp::max)
    }
}
