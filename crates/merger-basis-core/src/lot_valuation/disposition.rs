use crate::lot::{require, Lot};
use crate::MergerBasisResult;

/// Gain on a lot sold in full before the merger closed.
///
/// Filing basis adds ordinary income back to the cost basis since the
/// brokerage reports the discounted ESPP purchase price.
pub fn calc_not_merged_tax(lot: &mut Lot) -> MergerBasisResult<()> {
    const STAGE: &str = "calc_not_merged_tax";

    let cost_base = require(lot.cost_base, STAGE, "cost_base")?;
    let total_ordinary_income = require(lot.total_ordinary_income, STAGE, "total_ordinary_income")?;
    let total_proceeds = require(lot.total_proceeds, STAGE, "total_proceeds")?;

    let filing_cost_base = cost_base * lot.share + total_ordinary_income;
    lot.filing_cost_base = Some(filing_cost_base);
    lot.total_capital_gain = Some(total_proceeds - filing_cost_base);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::ymd;
    use crate::error::MergerBasisError;
    use crate::types::LotType;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rsu_sold_before_merger() {
        let mut lot = Lot::new(1, LotType::Rsu, dec!(5), ymd(2021, 3, 15), ymd(2022, 6, 15))
            .with_total_proceeds(dec!(800));
        lot.cost_base = Some(dec!(133.42));
        lot.total_ordinary_income = Some(Decimal::ZERO);
        calc_not_merged_tax(&mut lot).unwrap();
        assert_eq!(lot.filing_cost_base, Some(dec!(667.10)));
        assert_eq!(lot.total_capital_gain, Some(dec!(132.90)));
        assert!(lot.merge_gain.is_none());
        assert!(lot.avgo_cost_base.is_none());
    }

    #[test]
    fn test_espp_filing_basis_includes_ordinary_income() {
        let mut lot = Lot::new(2, LotType::Espp, dec!(10), ymd(2023, 6, 30), ymd(2023, 9, 1))
            .with_total_proceeds(dec!(1500));
        lot.cost_base = Some(dec!(76.50));
        lot.total_ordinary_income = Some(dec!(435));
        calc_not_merged_tax(&mut lot).unwrap();
        assert_eq!(lot.filing_cost_base, Some(dec!(1200)));
        assert_eq!(lot.total_capital_gain, Some(dec!(300)));
    }

    #[test]
    fn test_missing_proceeds_is_error() {
        let mut lot = Lot::new(1, LotType::Rsu, dec!(5), ymd(2021, 3, 15), ymd(2022, 6, 15));
        lot.cost_base = Some(dec!(133.42));
        lot.total_ordinary_income = Some(Decimal::ZERO);
        assert!(matches!(
            calc_not_merged_tax(&mut lot),
            Err(MergerBasisError::MissingField { field: "total_proceeds", .. })
        ));
    }
}
