//! Core DCF engine: FCF derivation, discounting, terminal value, aggregation

use super::discount::DiscountCurve;
use super::result::{FcfSource, ValuationResult, ValuationWarning};
use super::terminal::gordon_growth_value;
use crate::assumptions::Assumptions;
use crate::error::{DcfError, DcfResult};
use crate::projection::{ProjectionPeriod, FCF_COLUMN, YEAR_COLUMN};

/// How `Year` labels are checked against sequence position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearCheck {
    /// Integer labels must increase by exactly 1 from one period to the next.
    /// Non-integer labels (e.g. "2025E") are not checked.
    #[default]
    Contiguous,
    /// Labels are ignored entirely
    Off,
}

/// Configuration for a valuation run
#[derive(Debug, Clone, Default)]
pub struct ValuationConfig {
    pub year_check: YearCheck,
}

/// DCF valuation engine
///
/// Holds no mutable state; `value` may be called any number of times, from
/// any number of threads.
#[derive(Debug, Clone)]
pub struct ValuationEngine {
    assumptions: Assumptions,
    config: ValuationConfig,
}

impl ValuationEngine {
    /// Create a new engine with given assumptions and config
    pub fn new(assumptions: Assumptions, config: ValuationConfig) -> Self {
        Self { assumptions, config }
    }

    /// Value a projection sequence. The input slice is not modified; the
    /// result carries an annotated copy.
    pub fn value(&self, projections: &[ProjectionPeriod]) -> DcfResult<ValuationResult> {
        let (discount_rate, growth_rate, net_debt) = self.assumptions.resolve();
        check_assumptions(discount_rate, growth_rate, net_debt)?;

        if projections.is_empty() {
            return Err(DcfError::empty_projections());
        }
        check_finite(projections)?;
        if self.config.year_check == YearCheck::Contiguous {
            check_years(projections)?;
        }

        let mut periods = projections.to_vec();
        let fcf_source = fill_fcf(&mut periods)?;

        // Discount each period's FCF; position i is period t = i + 1
        let curve = DiscountCurve::single_rate(discount_rate);
        let fcfs: Vec<f64> = periods.iter().map(|p| p.fcf.unwrap_or_default()).collect();
        let discounted = curve.discount_stream(&fcfs);

        let mut discounted_fcf_total = 0.0;
        for (i, (period, value)) in periods.iter_mut().zip(&discounted).enumerate() {
            log::debug!("Period {} ({}): FCF={:.2} discounted={:.2}", i + 1, period.year, fcfs[i], value);
            period.discounted_fcf = Some(*value);
            discounted_fcf_total += value;
        }
        let last_fcf = fcfs.last().copied().unwrap_or_default();

        let n_periods = periods.len() as u32;
        let terminal_value = gordon_growth_value(last_fcf, discount_rate, growth_rate)?;
        let terminal_value_discounted = curve.discount(terminal_value, n_periods);

        let mut warnings = Vec::new();
        if discount_rate < growth_rate {
            let warning = ValuationWarning::GrowthExceedsDiscountRate {
                discount_rate,
                terminal_growth_rate: growth_rate,
            };
            log::warn!("{}", warning);
            warnings.push(warning);
        }

        let enterprise_value = discounted_fcf_total + terminal_value_discounted;
        let equity_value = enterprise_value - net_debt;

        log::info!(
            "Valued {} periods: EV={:.2} equity={:.2}",
            n_periods,
            enterprise_value,
            equity_value
        );

        Ok(ValuationResult {
            assumptions: self.assumptions.clone(),
            fcf_source,
            discounted_fcf_total,
            terminal_value,
            terminal_value_discounted,
            enterprise_value,
            equity_value,
            projections: periods,
            warnings,
        })
    }
}

/// Value projections with the default engine configuration
pub fn calculate_dcf(
    projections: &[ProjectionPeriod],
    assumptions: &Assumptions,
) -> DcfResult<ValuationResult> {
    ValuationEngine::new(assumptions.clone(), ValuationConfig::default()).value(projections)
}

fn check_assumptions(discount_rate: f64, growth_rate: f64, net_debt: f64) -> DcfResult<()> {
    for (name, value) in [
        ("discount_rate", discount_rate),
        ("terminal_growth_rate", growth_rate),
        ("net_debt", net_debt),
    ] {
        if !value.is_finite() {
            return Err(DcfError::InvalidAssumption(format!("{} must be finite, got {}", name, value)));
        }
    }
    if 1.0 + discount_rate == 0.0 {
        return Err(DcfError::InvalidAssumption(
            "discount_rate of -1 makes every discount factor undefined".to_string(),
        ));
    }
    Ok(())
}

fn check_finite(projections: &[ProjectionPeriod]) -> DcfResult<()> {
    for (i, period) in projections.iter().enumerate() {
        for (field, value) in period.numeric_fields() {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(DcfError::InvalidInput(format!(
                        "period {} field '{}' is not a finite number ({})",
                        i, field, v
                    )));
                }
            }
        }
    }
    Ok(())
}

fn check_years(projections: &[ProjectionPeriod]) -> DcfResult<()> {
    let years: Option<Vec<i64>> = projections.iter().map(|p| p.year_number()).collect();
    let Some(years) = years else {
        log::debug!("{} labels are not all integers; skipping contiguity check", YEAR_COLUMN);
        return Ok(());
    };

    for (i, pair) in years.windows(2).enumerate() {
        if pair[0].checked_add(1) != Some(pair[1]) {
            return Err(DcfError::InvalidInput(format!(
                "{} labels must increase by 1 per period: period {} is {} after {}",
                YEAR_COLUMN,
                i + 1,
                pair[1],
                pair[0]
            )));
        }
    }
    Ok(())
}

/// Fill FCF on every period. The decision is made for the whole set: if any
/// period carries FCF, all must and none are recomputed.
fn fill_fcf(periods: &mut [ProjectionPeriod]) -> DcfResult<FcfSource> {
    if periods.iter().any(|p| p.fcf.is_some()) {
        if let Some(i) = periods.iter().position(|p| p.fcf.is_none()) {
            return Err(DcfError::missing_field(i, FCF_COLUMN));
        }
        return Ok(FcfSource::Supplied);
    }

    for (i, period) in periods.iter_mut().enumerate() {
        period.fcf = Some(period.derive_fcf(i)?);
    }
    Ok(FcfSource::Derived)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn single_period() -> Vec<ProjectionPeriod> {
        vec![ProjectionPeriod::new("2025", 1_000_000.0, 100_000.0, 200_000.0, 50_000.0)]
    }

    fn base_assumptions() -> Assumptions {
        Assumptions::new(0.10, 0.02, 5_000_000.0)
    }

    #[test]
    fn test_single_period_scenario() {
        let result = calculate_dcf(&single_period(), &base_assumptions()).unwrap();

        assert_eq!(result.fcf_source, FcfSource::Derived);
        assert_relative_eq!(result.projections[0].fcf.unwrap(), 650_000.0, max_relative = 1e-9);
        assert_relative_eq!(result.discounted_fcf_total, 590_909.0909, max_relative = 1e-9);
        assert_relative_eq!(result.terminal_value, 8_287_500.0, max_relative = 1e-9);
        assert_relative_eq!(result.terminal_value_discounted, 7_534_090.9091, max_relative = 1e-9);
        assert_relative_eq!(result.enterprise_value, 8_125_000.0, max_relative = 1e-9);
        assert_relative_eq!(result.equity_value, 3_125_000.0, max_relative = 1e-9);
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_supplied_fcf_is_not_recomputed() {
        // Line items are inconsistent with the supplied FCF on purpose
        let mut first = ProjectionPeriod::new("1", 999.0, 1.0, 1.0, 1.0);
        first.fcf = Some(100.0);
        let mut second = ProjectionPeriod::new("2", 5.0, 1.0, 1.0, 1.0);
        second.fcf = Some(110.0);

        let assumptions = Assumptions::new(0.10, 0.02, 0.0);
        let result = calculate_dcf(&[first, second], &assumptions).unwrap();

        assert_eq!(result.fcf_source, FcfSource::Supplied);
        assert_eq!(result.projections[0].fcf, Some(100.0));
        assert_eq!(result.projections[1].fcf, Some(110.0));
        assert_relative_eq!(result.projections[0].discounted_fcf.unwrap(), 90.909090909, max_relative = 1e-9);
        assert_relative_eq!(result.projections[1].discounted_fcf.unwrap(), 90.909090909, max_relative = 1e-9);
    }

    #[test]
    fn test_partial_fcf_column_rejected() {
        let mut periods = vec![
            ProjectionPeriod::new("2025", 10.0, 1.0, 1.0, 1.0),
            ProjectionPeriod::new("2026", 10.0, 1.0, 1.0, 1.0),
        ];
        periods[0].fcf = Some(7.0);

        let err = calculate_dcf(&periods, &base_assumptions()).unwrap_err();
        assert!(err.is_invalid_input());
        let msg = err.to_string();
        assert!(msg.contains("period 1"));
        assert!(msg.contains("FCF"));
    }

    #[test]
    fn test_discounting_and_aggregation_properties() {
        let periods: Vec<_> = (0..5)
            .map(|i| {
                let base = 1_000.0 + 150.0 * i as f64;
                ProjectionPeriod::new(format!("{}", 2025 + i), base, 80.0, 120.0, 30.0 + i as f64)
            })
            .collect();
        let assumptions = Assumptions::new(0.09, 0.025, -300.0);
        let result = calculate_dcf(&periods, &assumptions).unwrap();

        let mut sum = 0.0;
        for (i, period) in result.projections.iter().enumerate() {
            let input = &periods[i];
            let expected_fcf = input.ebitda.unwrap()
                - input.depreciation.unwrap()
                - input.capex.unwrap()
                - input.change_in_nwc.unwrap();
            let fcf = period.fcf.unwrap();
            assert_relative_eq!(fcf, expected_fcf, max_relative = 1e-9);

            let expected_disc = fcf / 1.09_f64.powi(i as i32 + 1);
            assert_relative_eq!(period.discounted_fcf.unwrap(), expected_disc, max_relative = 1e-9);
            sum += period.discounted_fcf.unwrap();
        }

        assert_relative_eq!(result.discounted_fcf_total, sum, max_relative = 1e-9);
        assert_relative_eq!(
            result.terminal_value_discounted,
            result.terminal_value / 1.09_f64.powi(5),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            result.enterprise_value,
            result.discounted_fcf_total + result.terminal_value_discounted,
            max_relative = 1e-12
        );
        assert_relative_eq!(result.equity_value, result.enterprise_value + 300.0, max_relative = 1e-12);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let periods = single_period();
        let before = periods.clone();
        let _ = calculate_dcf(&periods, &base_assumptions()).unwrap();
        assert_eq!(periods, before);
        assert!(periods[0].fcf.is_none());
    }

    #[test]
    fn test_empty_projections() {
        let err = calculate_dcf(&[], &base_assumptions()).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_equal_rates_fail_without_nan() {
        let assumptions = Assumptions::new(0.04, 0.04, 0.0);
        let err = calculate_dcf(&single_period(), &assumptions).unwrap_err();
        assert!(err.is_invalid_assumption());
    }

    #[test]
    fn test_discount_rate_minus_one_rejected() {
        let assumptions = Assumptions::new(-1.0, 0.02, 0.0);
        let err = calculate_dcf(&single_period(), &assumptions).unwrap_err();
        assert!(err.is_invalid_assumption());
    }

    #[test]
    fn test_non_finite_assumption_rejected() {
        let assumptions = Assumptions::new(f64::NAN, 0.02, 0.0);
        let err = calculate_dcf(&single_period(), &assumptions).unwrap_err();
        assert!(err.is_invalid_assumption());
    }

    #[test]
    fn test_growth_above_discount_passes_through_with_warning() {
        let assumptions = Assumptions::new(0.03, 0.05, 0.0);
        let result = calculate_dcf(&single_period(), &assumptions).unwrap();
        assert!(result.terminal_value < 0.0);
        assert_eq!(result.warnings.len(), 1);
        assert!(matches!(
            result.warnings[0],
            ValuationWarning::GrowthExceedsDiscountRate { .. }
        ));
    }

    #[test]
    fn test_missing_field_names_period() {
        let mut periods = vec![
            ProjectionPeriod::new("2025", 10.0, 1.0, 1.0, 1.0),
            ProjectionPeriod::new("2026", 10.0, 1.0, 1.0, 1.0),
        ];
        periods[1].depreciation = None;

        let err = calculate_dcf(&periods, &base_assumptions()).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("period 1 is missing required field 'Depreciation'"));
    }

    #[test]
    fn test_non_finite_line_item_rejected() {
        let periods = vec![ProjectionPeriod::new("2025", f64::INFINITY, 1.0, 1.0, 1.0)];
        let err = calculate_dcf(&periods, &base_assumptions()).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_non_contiguous_years_rejected() {
        let periods = vec![
            ProjectionPeriod::with_fcf("2025", 100.0),
            ProjectionPeriod::with_fcf("2027", 110.0),
        ];
        let err = calculate_dcf(&periods, &base_assumptions()).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("2027 after 2025"));
    }

    #[test]
    fn test_year_labels_at_integer_limit_do_not_overflow() {
        let periods = vec![
            ProjectionPeriod::with_fcf("9223372036854775807", 100.0),
            ProjectionPeriod::with_fcf("9223372036854775807", 110.0),
        ];
        let err = calculate_dcf(&periods, &base_assumptions()).unwrap_err();
        assert!(err.is_invalid_input());

        let periods = vec![
            ProjectionPeriod::with_fcf("9223372036854775806", 100.0),
            ProjectionPeriod::with_fcf("9223372036854775807", 110.0),
        ];
        assert!(calculate_dcf(&periods, &base_assumptions()).is_ok());
    }

    #[test]
    fn test_huge_float_year_labels_skip_check() {
        let periods = vec![
            ProjectionPeriod::with_fcf("1e300", 100.0),
            ProjectionPeriod::with_fcf("1e300", 110.0),
        ];
        assert!(calculate_dcf(&periods, &base_assumptions()).is_ok());
    }

    #[test]
    fn test_year_check_off_uses_position_only() {
        let periods = vec![
            ProjectionPeriod::with_fcf("2030", 100.0),
            ProjectionPeriod::with_fcf("2025", 110.0),
        ];
        let engine = ValuationEngine::new(
            base_assumptions(),
            ValuationConfig { year_check: YearCheck::Off },
        );
        let result = engine.value(&periods).unwrap();
        assert_relative_eq!(result.projections[0].discounted_fcf.unwrap(), 100.0 / 1.1, max_relative = 1e-12);
        assert_relative_eq!(result.projections[1].discounted_fcf.unwrap(), 110.0 / 1.21, max_relative = 1e-12);
    }

    #[test]
    fn test_non_integer_year_labels_skip_check() {
        let periods = vec![
            ProjectionPeriod::with_fcf("FY25E", 100.0),
            ProjectionPeriod::with_fcf("FY27E", 110.0),
        ];
        assert!(calculate_dcf(&periods, &base_assumptions()).is_ok());
    }

    #[test]
    fn test_engine_is_reusable() {
        let engine = ValuationEngine::new(base_assumptions(), ValuationConfig::default());
        let first = engine.value(&single_period()).unwrap();
        let second = engine.value(&single_period()).unwrap();
        assert_eq!(first.enterprise_value, second.enterprise_value);
    }
}
