//! Payment event pricer.

use pricer_core::market_data::RatesProvider;
use pricer_core::sensitivity::PointSensitivities;
use pricer_core::types::CurrencyAmount;
use pricer_models::instruments::rates::PaymentEvent;

use super::error::SwapPricingError;
use super::explain::{ExplainKey, ExplainMap};

/// Prices non-coupon flows by discounting their known amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscountingPaymentEventPricer;

impl DiscountingPaymentEventPricer {
    /// Creates the pricer.
    pub fn new() -> Self {
        Self
    }

    /// Discounted amount.
    ///
    /// # Errors
    ///
    /// `SwapPricingError::MarketData` without a discount curve.
    pub fn present_value(&self, event: &PaymentEvent, provider: &dyn RatesProvider) -> Result<f64, SwapPricingError> {
        let df = provider.discount_factor(event.currency(), event.payment_date())?;
        Ok(event.payment().amount() * df)
    }

    /// Amount paid.
    pub fn forecast_value(&self, event: &PaymentEvent) -> f64 {
        event.payment().amount()
    }

    /// Sensitivity of [`present_value`](Self::present_value) to the
    /// discount curve.
    ///
    /// # Errors
    ///
    /// `SwapPricingError::MarketData` without a discount curve.
    pub fn present_value_sensitivity(
        &self,
        event: &PaymentEvent,
        provider: &dyn RatesProvider,
    ) -> Result<PointSensitivities, SwapPricingError> {
        Ok(provider
            .discount_factor_sensitivity(event.currency(), event.payment_date())?
            .multiplied_by(event.payment().amount()))
    }

    /// Present value, recording the event in `explain`.
    ///
    /// # Errors
    ///
    /// `SwapPricingError::MarketData` without a discount curve.
    pub fn explain_present_value(
        &self,
        event: &PaymentEvent,
        provider: &dyn RatesProvider,
        explain: &mut ExplainMap,
    ) -> Result<f64, SwapPricingError> {
        let ccy = event.currency();
        explain
            .put(ExplainKey::EntryType, "NotionalExchange")
            .put(ExplainKey::PaymentDate, event.payment_date())
            .put(ExplainKey::Currency, ccy);
        if event.payment_date() < provider.valuation_date() {
            explain
                .put(ExplainKey::Completed, true)
                .put(ExplainKey::ForecastValue, CurrencyAmount::zero(ccy))
                .put(ExplainKey::PresentValue, CurrencyAmount::zero(ccy));
            return Ok(0.0);
        }
        let df = provider.discount_factor(ccy, event.payment_date())?;
        let pv = self.forecast_value(event) * df;
        explain
            .put(ExplainKey::DiscountFactor, df)
            .put(ExplainKey::ForecastValue, event.payment())
            .put(ExplainKey::PresentValue, CurrencyAmount::new(ccy, pv));
        Ok(pv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::curves::CurveEnum;
    use pricer_core::market_data::ImmutableRatesProvider;
    use pricer_core::types::{Currency, Date};
    use pricer_models::instruments::rates::NotionalExchange;

    #[test]
    fn test_present_value_and_sensitivity() {
        let valuation = Date::from_ymd(2024, 1, 15).unwrap();
        let paid = Date::from_ymd(2026, 1, 15).unwrap();
        let prov = ImmutableRatesProvider::builder(valuation)
            .discount_curve(Currency::USD, CurveEnum::flat(0.04))
            .build();
        let event: PaymentEvent = NotionalExchange::new(CurrencyAmount::new(Currency::USD, 1e6), paid)
            .unwrap()
            .into();
        let pricer = DiscountingPaymentEventPricer::new();
        let t = prov.relative_time(paid);
        let pv = pricer.present_value(&event, &prov).unwrap();
        assert_relative_eq!(pv, 1e6 * (-0.04 * t).exp(), epsilon = 1e-6);
        assert_eq!(pricer.forecast_value(&event), 1e6);

        let sens = pricer.present_value_sensitivity(&event, &prov).unwrap();
        assert_eq!(sens.len(), 1);
        assert_relative_eq!(sens.iter().next().unwrap().sensitivity, -t * pv, epsilon = 1e-6);
    }
}
