use std::io;

use crate::dates::format_mdy;
use crate::error::MergerBasisError;
use crate::lot::{require, Lot};
use crate::types::LotType;
use crate::MergerBasisResult;

use super::format::{currency, fixed, yes_no};

pub const CSV_HEADER: [&str; 23] = [
    "row id",
    "type",
    "share",
    "acquire date",
    "merge or sold date",
    "long term",
    "Box 1d Proceeds",
    "Filing Cost Basis",
    "total capital gain",
    "total pending ordinary income",
    "avgo share",
    "total avgo cost basis",
    "per share avgo cost base",
    "per share purchase price",
    "per share cost basis",
    "per share merge gain",
    "per share capital gain",
    "espp offer date",
    "espp offer date fmv",
    "acquire date",
    "acquire date fmv",
    "qualifying disposition",
    "per share ordinary income",
];

pub fn csv_header() -> &'static [&'static str; 23] {
    &CSV_HEADER
}

/// One export row; columns that do not apply to the lot are left blank.
pub fn lot_csv_record(lot: &Lot) -> MergerBasisResult<Vec<String>> {
    const STAGE: &str = "lot_csv_record";
    let merged = require(lot.merged, STAGE, "merged")?;
    let is_espp = lot.lot_type == LotType::Espp;
    let blank = String::new;

    let mut row = Vec::with_capacity(CSV_HEADER.len());
    row.push(lot.row_id.to_string());
    row.push(lot.lot_type.to_string());
    row.push(fixed(lot.share, 3));
    row.push(format_mdy(lot.acquire_date));
    row.push(format_mdy(lot.sold_date));
    row.push(yes_no(require(lot.long_term, STAGE, "long_term")?).to_string());
    row.push(currency(require(lot.total_proceeds, STAGE, "total_proceeds")?));
    row.push(currency(require(lot.filing_cost_base, STAGE, "filing_cost_base")?));
    row.push(currency(require(lot.total_capital_gain, STAGE, "total_capital_gain")?));

    if is_espp {
        row.push(currency(require(lot.total_ordinary_income, STAGE, "total_ordinary_income")?));
    } else {
        row.push(blank());
    }

    if merged {
        row.push(fixed(require(lot.avgo_share, STAGE, "avgo_share")?, 3));
        row.push(currency(require(lot.avgo_total_cost_base, STAGE, "avgo_total_cost_base")?));
        row.push(currency(require(lot.avgo_cost_base, STAGE, "avgo_cost_base")?));
    } else {
        row.extend([blank(), blank(), blank()]);
    }

    row.push(currency(require(lot.purchase_price, STAGE, "purchase_price")?));
    row.push(currency(require(lot.cost_base, STAGE, "cost_base")?));

    if merged {
        row.push(currency(require(lot.merge_gain, STAGE, "merge_gain")?));
        row.push(currency(require(lot.capital_gain, STAGE, "capital_gain")?));
    } else {
        row.extend([blank(), blank()]);
    }

    if is_espp {
        row.push(format_mdy(require(lot.offer_date, STAGE, "offer_date")?));
        row.push(currency(require(lot.offer_date_fmv, STAGE, "offer_date_fmv")?));
    } else {
        row.extend([blank(), blank()]);
    }

    row.push(format_mdy(lot.acquire_date));
    row.push(currency(require(lot.acquire_date_fmv, STAGE, "acquire_date_fmv")?));

    if is_espp {
        row.push(
            yes_no(require(lot.qualifying_disposition, STAGE, "qualifying_disposition")?)
                .to_string(),
        );
        row.push(currency(require(lot.ordinary_income, STAGE, "ordinary_income")?));
    } else {
        row.extend([blank(), blank()]);
    }

    debug_assert_eq!(row.len(), CSV_HEADER.len());
    Ok(row)
}

/// Header plus one row per lot.
pub fn write_csv<W: io::Write>(writer: W, lots: &[Lot]) -> MergerBasisResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for lot in lots {
        wtr.write_record(lot_csv_record(lot)?)?;
    }
    wtr.flush()
        .map_err(|e| MergerBasisError::ExportError(e.to_string()))?;
    Ok(())
}

pub fn to_csv_string(lots: &[Lot]) -> MergerBasisResult<String> {
    let mut buf: Vec<u8> = Vec::new();
    write_csv(&mut buf, lots)?;
    String::from_utf8(buf).map_err(|e| MergerBasisError::ExportError(e.to_string()))
}
