use std::error::Error;
use std::io;

use merger_basis_core::{MergerBasisError, OfferDateIndex, PriceIndex};

use super::file::resolve_path;

/// Closing price position in a Date,Open,High,Low,Close,... row.
const PRICE_COLUMN: usize = 4;
const ACQUIRE_DATE_COLUMN: usize = 0;
const OFFER_DATE_COLUMN: usize = 1;

/// Load the historical VMW price feed.
pub fn load_price_index(path: &str) -> Result<PriceIndex, Box<dyn Error>> {
    let canonical = resolve_path(path)?;
    let file = std::fs::File::open(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    let index = read_price_index(file)?;
    tracing::info!(path, days = index.len(), "loaded price feed");
    Ok(index)
}

/// Load the ESPP purchase-date to offer-date feed.
pub fn load_offer_date_index(path: &str) -> Result<OfferDateIndex, Box<dyn Error>> {
    let canonical = resolve_path(path)?;
    let file = std::fs::File::open(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    let index = read_offer_date_index(file)?;
    tracing::info!(path, purchases = index.len(), "loaded ESPP offer-date feed");
    Ok(index)
}

pub fn read_price_index<R: io::Read>(reader: R) -> Result<PriceIndex, MergerBasisError> {
    let rows = read_columns(reader, ACQUIRE_DATE_COLUMN, PRICE_COLUMN, "price feed")?;
    PriceIndex::from_rows(rows)
}

pub fn read_offer_date_index<R: io::Read>(reader: R) -> Result<OfferDateIndex, MergerBasisError> {
    let rows = read_columns(reader, ACQUIRE_DATE_COLUMN, OFFER_DATE_COLUMN, "ESPP offer-date feed")?;
    OfferDateIndex::from_rows(rows)
}

/// Pull two columns out of every data row. A first row whose leading field
/// has no digits (`Date`, `Purchase Date`) is a header and is skipped; a
/// date-shaped field that fails to parse is an error, not a header.
fn read_columns<R: io::Read>(
    reader: R,
    key: usize,
    value: usize,
    feed: &str,
) -> Result<Vec<(String, String)>, MergerBasisError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        let first = record.get(key).unwrap_or_default();
        if i == 0 && !first.chars().any(|c| c.is_ascii_digit()) {
            tracing::debug!(feed, header = ?record, "skipping header row");
            continue;
        }
        let second = record.get(value).ok_or_else(|| MergerBasisError::InvalidInput {
            field: feed.to_string(),
            reason: format!("line {} has no column {}", i + 1, value + 1),
        })?;
        rows.push((first.to_string(), second.to_string()));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use merger_basis_core::dates::ymd;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_feed_with_header() {
        let data = "Date,Open,High,Low,Close,Adj Close,Volume\n\
                    11/16/2023,136.00,137.20,134.90,135.50,135.50,1000\n\
                    11/17/2023,135.60,136.00,134.80,135.12,135.12,900\n";
        let index = read_price_index(data.as_bytes()).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.get(ymd(2023, 11, 17)), Some(dec!(135.12)));
    }

    #[test]
    fn test_price_feed_headerless_with_dollar_signs() {
        let data = "01/03/2022,$190.00,$191.00,$188.00,\"$1,189.50\"\n";
        let index = read_price_index(data.as_bytes()).unwrap();
        assert_eq!(index.get(ymd(2022, 1, 3)), Some(dec!(1189.50)));
    }

    #[test]
    fn test_price_feed_weekend_lookup() {
        let data = "11/17/2023,0,0,0,135.12\n";
        let index = read_price_index(data.as_bytes()).unwrap();
        assert_eq!(index.price_on(ymd(2023, 11, 19)).unwrap(), dec!(135.12));
    }

    #[test]
    fn test_price_feed_short_row_rejected() {
        let data = "11/17/2023,0,0,0,135.12\n11/20/2023,1,2\n";
        let err = read_price_index(data.as_bytes()).unwrap_err();
        assert!(matches!(err, MergerBasisError::InvalidInput { .. }));
    }

    #[test]
    fn test_price_feed_bad_date_after_first_row_rejected() {
        let data = "11/17/2023,0,0,0,135.12\nnot-a-date,0,0,0,1\n";
        assert!(read_price_index(data.as_bytes()).is_err());
    }

    #[test]
    fn test_price_feed_invalid_first_date_rejected() {
        let data = "11/31/2023,0,0,0,999.00\n11/17/2023,0,0,0,135.12\n";
        assert!(matches!(
            read_price_index(data.as_bytes()),
            Err(MergerBasisError::DateError(_))
        ));
    }

    #[test]
    fn test_offer_date_feed_invalid_first_date_rejected() {
        let data = "2021-06-30,2021-01-04\n";
        assert!(matches!(
            read_offer_date_index(data.as_bytes()),
            Err(MergerBasisError::DateError(_))
        ));
    }

    #[test]
    fn test_offer_date_feed() {
        let data = "Purchase Date,Offer Date\n\
                    06/30/2021,01/04/2021\n\
                    \n\
                    12/31/2021,07/01/2021\n";
        let index = read_offer_date_index(data.as_bytes()).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(
            index.offer_date_for(ymd(2021, 12, 31)).unwrap(),
            ymd(2021, 7, 1)
        );
    }
}
