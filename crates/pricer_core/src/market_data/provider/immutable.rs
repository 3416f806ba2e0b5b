//! Rates provider backed by in-memory curves, fixings and FX quotes.

use std::collections::HashMap;

use super::RatesProvider;
use crate::market_data::curves::{
    CurveEnum, CurveId, CurveSet, ParameterizedCurve, PriceIndexCurve, YieldCurve,
};
use crate::market_data::error::MarketDataError;
use crate::market_data::fixings::{DateSeries, MonthlySeries};
use crate::market_data::fx::FxMatrix;
use crate::market_data::observation::{IborIndexObservation, OvernightIndexObservation};
use crate::sensitivity::{
    CurrencyParameterSensitivities, CurrencyParameterSensitivity, PointSensitivities,
    PointSensitivity, SensitivityKey,
};
use crate::types::{
    Currency, CurrencyPair, Date, DayCountConvention, IborIndex, OvernightIndex, PriceIndex,
    YearMonth,
};

/// Market environment fixed at construction.
///
/// Curve times are ACT/365F year fractions from the valuation date.
/// Forward index rates are simple rates implied by the index curve's
/// discount factors over the observation's deposit period.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::CurveEnum;
/// use pricer_core::market_data::{ImmutableRatesProvider, RatesProvider};
/// use pricer_core::types::{Currency, CurrencyPair, Date};
///
/// let valuation = Date::from_ymd(2024, 1, 2).unwrap();
/// let provider = ImmutableRatesProvider::builder(valuation)
///     .discount_curve(Currency::USD, CurveEnum::flat(0.05))
///     .fx_rate(CurrencyPair::new(Currency::EUR, Currency::USD, 1.1).unwrap())
///     .build();
///
/// let df = provider.discount_factor(Currency::USD, valuation).unwrap();
/// assert_eq!(df, 1.0);
/// assert!((provider.fx_rate(Currency::USD, Currency::EUR).unwrap() - 1.0 / 1.1).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct ImmutableRatesProvider {
    valuation_date: Date,
    curves: CurveSet<f64>,
    price_index_curves: HashMap<PriceIndex, PriceIndexCurve>,
    ibor_fixings: HashMap<IborIndex, DateSeries>,
    overnight_fixings: HashMap<OvernightIndex, DateSeries>,
    price_index_values: HashMap<PriceIndex, MonthlySeries>,
    fx: FxMatrix,
}

/// Consuming builder for [`ImmutableRatesProvider`].
#[derive(Debug, Clone)]
pub struct ImmutableRatesProviderBuilder {
    inner: ImmutableRatesProvider,
}

impl ImmutableRatesProviderBuilder {
    /// Sets the discount curve of a currency.
    pub fn discount_curve(mut self, currency: Currency, curve: impl Into<CurveEnum<f64>>) -> Self {
        self.inner
            .curves
            .insert(CurveId::Discount(currency), curve.into());
        self
    }

    /// Sets the forward curve of a term index.
    pub fn ibor_curve(mut self, index: IborIndex, curve: impl Into<CurveEnum<f64>>) -> Self {
        self.inner.curves.insert(CurveId::Ibor(index), curve.into());
        self
    }

    /// Sets the forward curve of an overnight index.
    pub fn overnight_curve(mut self, index: OvernightIndex, curve: impl Into<CurveEnum<f64>>) -> Self {
        self.inner
            .curves
            .insert(CurveId::Overnight(index), curve.into());
        self
    }

    /// Sets the projection curve of a price index.
    pub fn price_index_curve(mut self, index: PriceIndex, curve: PriceIndexCurve) -> Self {
        self.inner.price_index_curves.insert(index, curve);
        self
    }

    /// Sets the published fixings of a term index.
    pub fn ibor_fixings(mut self, index: IborIndex, fixings: DateSeries) -> Self {
        self.inner.ibor_fixings.insert(index, fixings);
        self
    }

    /// Sets the published fixings of an overnight index.
    pub fn overnight_fixings(mut self, index: OvernightIndex, fixings: DateSeries) -> Self {
        self.inner.overnight_fixings.insert(index, fixings);
        self
    }

    /// Sets the published levels of a price index.
    pub fn price_index_values(mut self, index: PriceIndex, values: MonthlySeries) -> Self {
        self.inner.price_index_values.insert(index, values);
        self
    }

    /// Adds an FX quote.
    pub fn fx_rate(mut self, pair: CurrencyPair<f64>) -> Self {
        self.inner.fx.add_pair(pair);
        self
    }

    /// Finishes the provider.
    pub fn build(self) -> ImmutableRatesProvider {
        self.inner
    }
}

impl ImmutableRatesProvider {
    /// Starts a provider for `valuation_date` with no market data.
    pub fn builder(valuation_date: Date) -> ImmutableRatesProviderBuilder {
        ImmutableRatesProviderBuilder {
            inner: Self {
                valuation_date,
                curves: CurveSet::new(),
                price_index_curves: HashMap::new(),
                ibor_fixings: HashMap::new(),
                overnight_fixings: HashMap::new(),
                price_index_values: HashMap::new(),
                fx: FxMatrix::new(),
            },
        }
    }

    /// Curve time of `date`.
    #[inline]
    pub fn relative_time(&self, date: Date) -> f64 {
        DayCountConvention::Act365F.year_fraction(self.valuation_date, date)
    }

    /// Zero-rate curves.
    pub fn curves(&self) -> &CurveSet<f64> {
        &self.curves
    }

    /// Identifiers of every curve with parameters, sorted.
    pub fn curve_ids(&self) -> Vec<CurveId> {
        let mut ids = self.curves.ids();
        ids.extend(self.price_index_curves.keys().map(|i| CurveId::PriceIndex(*i)));
        ids.sort();
        ids
    }

    /// Number of parameters of a curve.
    pub fn parameter_count(&self, id: &CurveId) -> Result<usize, MarketDataError> {
        match id {
            CurveId::PriceIndex(index) => Ok(self.price_index_curve(*index)?.parameter_count()),
            _ => Ok(self.curves.get_or_err(id)?.parameter_count()),
        }
    }

    /// Current value of one curve parameter.
    pub fn parameter(&self, id: &CurveId, index: usize) -> Result<f64, MarketDataError> {
        match id {
            CurveId::PriceIndex(price_index) => {
                let levels = self.price_index_curve(*price_index)?.levels();
                levels.get(index).copied().ok_or(MarketDataError::InvalidParameterIndex {
                    index,
                    count: levels.len(),
                })
            }
            _ => self.curves.get_or_err(id)?.parameter(index),
        }
    }

    /// Copy of the provider with one curve parameter replaced.
    pub fn with_parameter(&self, id: &CurveId, index: usize, value: f64) -> Result<Self, MarketDataError> {
        let mut bumped = self.clone();
        match id {
            CurveId::PriceIndex(price_index) => {
                let curve = self.price_index_curve(*price_index)?.with_parameter(index, value)?;
                bumped.price_index_curves.insert(*price_index, curve);
            }
            _ => bumped.curves = self.curves.with_parameter(id, index, value)?,
        }
        Ok(bumped)
    }

    fn price_index_curve(&self, index: PriceIndex) -> Result<&PriceIndexCurve, MarketDataError> {
        self.price_index_curves
            .get(&index)
            .ok_or(MarketDataError::CurveNotFound {
                curve: CurveId::PriceIndex(index),
            })
    }

    /// Simple forward rate on `curve` over `[start, end)` accruing `yf`.
    fn simple_forward(&self, curve: &CurveId, start: Date, end: Date, yf: f64) -> Result<f64, MarketDataError> {
        let curve = self.curves.get_or_err(curve)?;
        let df_start = curve.discount_factor(self.relative_time(start))?;
        let df_end = curve.discount_factor(self.relative_time(end))?;
        Ok((df_start / df_end - 1.0) / yf)
    }

    /// `∂f/∂p_k` of the simple forward over `[start, end)` for each curve
    /// parameter, through the zero rates at both ends.
    fn simple_forward_parameter_sensitivity(
        &self,
        id: &CurveId,
        start: Date,
        end: Date,
        yf: f64,
    ) -> Result<Vec<f64>, MarketDataError> {
        let curve = self.curves.get_or_err(id)?;
        let t_start = self.relative_time(start);
        let t_end = self.relative_time(end);
        let ratio = curve.discount_factor(t_start)? / curve.discount_factor(t_end)?;
        let bar_z_start = -t_start * ratio / yf;
        let bar_z_end = t_end * ratio / yf;
        let dz_start = curve.zero_rate_parameter_sensitivity(t_start)?;
        let dz_end = curve.zero_rate_parameter_sensitivity(t_end)?;
        Ok(dz_start
            .iter()
            .zip(dz_end.iter())
            .map(|(s, e)| bar_z_start * s + bar_z_end * e)
            .collect())
    }

    /// Published fixing for `date`: `Ok(Some)` if published, `Ok(None)` if
    /// the forward applies, `Err` for a missing past fixing.
    fn fixing(
        &self,
        series: Option<&DateSeries>,
        name: &str,
        date: Date,
    ) -> Result<Option<f64>, MarketDataError> {
        let published = series.and_then(|s| s.get(date));
        if date < self.valuation_date && published.is_none() {
            return Err(MarketDataError::MissingFixing {
                index: name.to_string(),
                date,
            });
        }
        if date <= self.valuation_date {
            Ok(published)
        } else {
            Ok(None)
        }
    }

    fn published_price_index(&self, index: PriceIndex, month: YearMonth) -> Option<f64> {
        self.price_index_values.get(&index).and_then(|s| s.get(month))
    }
}

impl RatesProvider for ImmutableRatesProvider {
    fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    fn discount_factor(&self, currency: Currency, date: Date) -> Result<f64, MarketDataError> {
        self.curves
            .get_or_err(&CurveId::Discount(currency))?
            .discount_factor(self.relative_time(date))
    }

    fn discount_factor_sensitivity(
        &self,
        currency: Currency,
        date: Date,
    ) -> Result<PointSensitivities, MarketDataError> {
        let t = self.relative_time(date);
        let df = self.discount_factor(currency, date)?;
        Ok(PointSensitivities::of(PointSensitivity::new(
            SensitivityKey::ZeroRate {
                curve_currency: currency,
                date,
            },
            currency,
            -t * df,
        )))
    }

    fn fx_rate(&self, from: Currency, to: Currency) -> Result<f64, MarketDataError> {
        self.fx.rate(from, to)
    }

    fn ibor_index_rate(&self, observation: &IborIndexObservation) -> Result<f64, MarketDataError> {
        let index = observation.index();
        if let Some(fixing) = self.fixing(self.ibor_fixings.get(&index), index.name(), observation.fixing_date())? {
            return Ok(fixing);
        }
        self.simple_forward(
            &CurveId::Ibor(index),
            observation.effective_date(),
            observation.maturity_date(),
            observation.year_fraction(),
        )
    }

    fn ibor_index_rate_sensitivity(
        &self,
        observation: &IborIndexObservation,
    ) -> Result<PointSensitivities, MarketDataError> {
        let index = observation.index();
        if self
            .fixing(self.ibor_fixings.get(&index), index.name(), observation.fixing_date())?
            .is_some()
        {
            return Ok(PointSensitivities::empty());
        }
        Ok(PointSensitivities::of(PointSensitivity::new(
            SensitivityKey::IborRate {
                index,
                fixing_date: observation.fixing_date(),
            },
            index.currency(),
            1.0,
        )))
    }

    fn overnight_index_rate(
        &self,
        observation: &OvernightIndexObservation,
    ) -> Result<f64, MarketDataError> {
        let index = observation.index();
        if let Some(fixing) = self.fixing(
            self.overnight_fixings.get(&index),
            index.name(),
            observation.fixing_date(),
        )? {
            return Ok(fixing);
        }
        self.simple_forward(
            &CurveId::Overnight(index),
            observation.fixing_date(),
            observation.maturity_date(),
            observation.year_fraction(),
        )
    }

    fn overnight_index_rate_sensitivity(
        &self,
        observation: &OvernightIndexObservation,
    ) -> Result<PointSensitivities, MarketDataError> {
        let index = observation.index();
        if self
            .fixing(
                self.overnight_fixings.get(&index),
                index.name(),
                observation.fixing_date(),
            )?
            .is_some()
        {
            return Ok(PointSensitivities::empty());
        }
        Ok(PointSensitivities::of(PointSensitivity::new(
            SensitivityKey::OvernightRate {
                index,
                fixing_date: observation.fixing_date(),
                end_date: observation.maturity_date(),
            },
            index.currency(),
            1.0,
        )))
    }

    fn inflation_index_rate(&self, index: PriceIndex, month: YearMonth) -> Result<f64, MarketDataError> {
        if let Some(level) = self.published_price_index(index, month) {
            return Ok(level);
        }
        match self.price_index_curves.get(&index) {
            Some(curve) => curve.value(month),
            None => Err(MarketDataError::MissingInflationValue {
                index: index.name().to_string(),
                month,
            }),
        }
    }

    fn inflation_index_rate_sensitivity(
        &self,
        index: PriceIndex,
        month: YearMonth,
    ) -> Result<PointSensitivities, MarketDataError> {
        if self.published_price_index(index, month).is_some() {
            return Ok(PointSensitivities::empty());
        }
        if !self.price_index_curves.contains_key(&index) {
            return Err(MarketDataError::MissingInflationValue {
                index: index.name().to_string(),
                month,
            });
        }
        Ok(PointSensitivities::of(PointSensitivity::new(
            SensitivityKey::InflationRate {
                index,
                reference_month: month,
            },
            index.currency(),
            1.0,
        )))
    }

    fn parameter_sensitivity(
        &self,
        points: &PointSensitivities,
    ) -> Result<CurrencyParameterSensitivities, MarketDataError> {
        let mut result = CurrencyParameterSensitivities::empty();
        for point in points.clone().normalized() {
            let curve = point.key.curve_id();
            let unit = match point.key {
                SensitivityKey::ZeroRate { date, .. } => self
                    .curves
                    .get_or_err(&curve)?
                    .zero_rate_parameter_sensitivity(self.relative_time(date))?,
                SensitivityKey::IborRate { index, fixing_date } => {
                    let obs = IborIndexObservation::new(index, fixing_date)?;
                    self.simple_forward_parameter_sensitivity(
                        &curve,
                        obs.effective_date(),
                        obs.maturity_date(),
                        obs.year_fraction(),
                    )?
                }
                SensitivityKey::OvernightRate {
                    index,
                    fixing_date,
                    end_date,
                } => {
                    let obs = OvernightIndexObservation::with_maturity(index, fixing_date, end_date);
                    self.simple_forward_parameter_sensitivity(
                        &curve,
                        fixing_date,
                        end_date,
                        obs.year_fraction(),
                    )?
                }
                SensitivityKey::InflationRate {
                    index,
                    reference_month,
                } => self
                    .price_index_curve(index)?
                    .value_parameter_sensitivity(reference_month)?,
            };
            let values = unit.into_iter().map(|v| v * point.sensitivity).collect();
            result = result.plus(CurrencyParameterSensitivity::new(curve, point.currency, values));
        }
        Ok(result)
    }
}
