//! Parallel valuation of swap portfolios.
//!
//! Batches at or above the configured threshold are valued with rayon;
//! smaller ones run sequentially. Merging amounts and sensitivities is
//! associative and commutative, so totals do not depend on the split.

use pricer_core::market_data::RatesProvider;
use pricer_core::sensitivity::PointSensitivities;
use pricer_core::types::MultiCurrencyAmount;
use pricer_models::instruments::rates::ResolvedSwap;
use rayon::prelude::*;
use tracing::debug;

use super::config::SwapPricerConfig;
use super::error::SwapPricingError;
use super::product::DiscountingSwapProductPricer;

/// Values many swaps against one provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapBatchPricer {
    pricer: DiscountingSwapProductPricer,
    parallel_threshold: usize,
}

impl Default for SwapBatchPricer {
    fn default() -> Self {
        Self::new(&SwapPricerConfig::default())
    }
}

impl SwapBatchPricer {
    /// Batch pricer configured by `config`.
    pub fn new(config: &SwapPricerConfig) -> Self {
        Self {
            pricer: DiscountingSwapProductPricer::new(config),
            parallel_threshold: config.parallel_batch_threshold,
        }
    }

    /// Product pricer applied to each swap.
    pub fn pricer(&self) -> &DiscountingSwapProductPricer {
        &self.pricer
    }

    #[inline]
    fn is_parallel(&self, len: usize) -> bool {
        let parallel = len >= self.parallel_threshold;
        debug!(swaps = len, parallel, "batch valuation");
        parallel
    }

    /// Present value of each swap, in input order.
    ///
    /// # Errors
    ///
    /// The first failure encountered; no partial result is returned.
    pub fn present_values(
        &self,
        swaps: &[ResolvedSwap],
        provider: &dyn RatesProvider,
    ) -> Result<Vec<MultiCurrencyAmount>, SwapPricingError> {
        let value = |swap: &ResolvedSwap| self.pricer.present_value(swap, provider);
        if self.is_parallel(swaps.len()) {
            swaps.par_iter().map(value).collect()
        } else {
            swaps.iter().map(value).collect()
        }
    }

    /// Sum of the present values, per currency.
    ///
    /// # Errors
    ///
    /// The first failure encountered.
    pub fn total_present_value(
        &self,
        swaps: &[ResolvedSwap],
        provider: &dyn RatesProvider,
    ) -> Result<MultiCurrencyAmount, SwapPricingError> {
        let value = |swap: &ResolvedSwap| self.pricer.present_value(swap, provider);
        if self.is_parallel(swaps.len()) {
            swaps
                .par_iter()
                .map(value)
                .try_reduce(MultiCurrencyAmount::empty, |a, b| Ok(a.plus(&b)))
        } else {
            swaps
                .iter()
                .try_fold(MultiCurrencyAmount::empty(), |acc, swap| {
                    Ok::<_, SwapPricingError>(acc.plus(&value(swap)?))
                })
        }
    }

    /// Sum of the present value sensitivities.
    ///
    /// # Errors
    ///
    /// The first failure encountered.
    pub fn total_present_value_sensitivity(
        &self,
        swaps: &[ResolvedSwap],
        provider: &dyn RatesProvider,
    ) -> Result<PointSensitivities, SwapPricingError> {
        let sensitivity = |swap: &ResolvedSwap| self.pricer.present_value_sensitivity(swap, provider);
        let total = if self.is_parallel(swaps.len()) {
            swaps
                .par_iter()
                .map(sensitivity)
                .try_reduce(PointSensitivities::empty, |a, b| Ok(a.combined_with(b)))?
        } else {
            swaps
                .iter()
                .try_fold(PointSensitivities::empty(), |acc, swap| {
                    Ok::<_, SwapPricingError>(acc.combined_with(sensitivity(swap)?))
                })?
        };
        Ok(total.normalized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::curves::CurveEnum;
    use pricer_core::market_data::ImmutableRatesProvider;
    use pricer_core::types::{Currency, Date, DayCountConvention};
    use pricer_models::instruments::rates::{
        FixedRateCalculation, PayReceive, RateCalculation, RateCalculationSwapLeg,
    };
    use pricer_models::schedules::{Frequency, ScheduleBuilder};

    fn swaps(n: usize) -> Vec<ResolvedSwap> {
        (0..n)
            .map(|i| {
                let schedule = ScheduleBuilder::new()
                    .start(Date::from_ymd(2024, 2, 1).unwrap())
                    .end(Date::from_ymd(2025 + (i % 5) as i32, 2, 1).unwrap())
                    .frequency(Frequency::Quarterly)
                    .build()
                    .unwrap();
                let ccy = if i % 2 == 0 { Currency::USD } else { Currency::JPY };
                let leg = RateCalculationSwapLeg::new(
                    PayReceive::Receive,
                    schedule,
                    ccy,
                    1_000.0 * (i + 1) as f64,
                    RateCalculation::Fixed(FixedRateCalculation::new(DayCountConvention::Act360, 0.03)),
                )
                .resolve()
                .unwrap();
                ResolvedSwap::new(vec![leg]).unwrap()
            })
            .collect()
    }

    fn provider() -> ImmutableRatesProvider {
        ImmutableRatesProvider::builder(Date::from_ymd(2024, 2, 1).unwrap())
            .discount_curve(Currency::USD, CurveEnum::flat(0.05))
            .discount_curve(Currency::JPY, CurveEnum::flat(0.001))
            .build()
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let book = swaps(40);
        let prov = provider();
        let sequential = SwapBatchPricer::new(&SwapPricerConfig::new().with_parallel_batch_threshold(1_000));
        let parallel = SwapBatchPricer::new(&SwapPricerConfig::new().with_parallel_batch_threshold(1));

        let a = sequential.total_present_value(&book, &prov).unwrap();
        let b = parallel.total_present_value(&book, &prov).unwrap();
        for ccy in [Currency::USD, Currency::JPY] {
            assert_relative_eq!(a.amount_or_zero(ccy), b.amount_or_zero(ccy), max_relative = 1e-12);
        }

        let sa = sequential.total_present_value_sensitivity(&book, &prov).unwrap();
        let sb = parallel.total_present_value_sensitivity(&book, &prov).unwrap();
        assert!(sa.equal_with_tolerance(&sb, 1e-6));
    }

    #[test]
    fn test_present_values_keep_order() {
        let book = swaps(10);
        let prov = provider();
        let batch = SwapBatchPricer::new(&SwapPricerConfig::new().with_parallel_batch_threshold(2));
        let values = batch.present_values(&book, &prov).unwrap();
        assert_eq!(values.len(), 10);
        for (swap, value) in book.iter().zip(values.iter()) {
            assert_eq!(value, &batch.pricer().present_value(swap, &prov).unwrap());
        }
    }

    #[test]
    fn test_failure_is_propagated() {
        let book = swaps(4);
        let prov = ImmutableRatesProvider::builder(Date::from_ymd(2024, 2, 1).unwrap())
            .discount_curve(Currency::USD, CurveEnum::flat(0.05))
            .build();
        assert!(matches!(
            SwapBatchPricer::default().total_present_value(&book, &prov),
            Err(SwapPricingError::MarketData(_))
        ));
    }
}
