use clap::Args;
use serde_json::json;

use merger_basis_core::dates::{days_between, format_mdy, parse_mdy};
use merger_basis_core::lot_valuation::espp::classify_disposition;
use merger_basis_core::report::format::yes_no;

use crate::output::CommandOutput;

/// Arguments for the ESPP qualifying-disposition check
#[derive(Args)]
pub struct QualifyArgs {
    /// Offering period start date (MM/DD/YYYY)
    #[arg(long)]
    pub offer_date: String,

    /// ESPP purchase date (MM/DD/YYYY)
    #[arg(long)]
    pub acquire_date: String,

    /// Sale date, or the merge date for converted shares (MM/DD/YYYY)
    #[arg(long)]
    pub sold_date: String,

    /// Treat the sale as qualifying even if holding periods are not met
    #[arg(long)]
    pub force: bool,
}

pub fn run_qualify(args: QualifyArgs) -> Result<CommandOutput, Box<dyn std::error::Error>> {
    let offer_date = parse_mdy(&args.offer_date)?;
    let acquire_date = parse_mdy(&args.acquire_date)?;
    let sold_date = parse_mdy(&args.sold_date)?;

    let qualification = classify_disposition(offer_date, acquire_date, sold_date, args.force);
    let days_from_purchase = days_between(acquire_date, sold_date);
    let days_from_offer = days_between(offer_date, sold_date);

    let report = format!(
        "offer date: {}\nacquire date: {}\nsold date: {}\n\
         days from purchase: {}\ndays from offer: {}\nqualifying disposition: {}\n",
        format_mdy(offer_date),
        format_mdy(acquire_date),
        format_mdy(sold_date),
        days_from_purchase,
        days_from_offer,
        yes_no(qualification.is_qualifying()),
    );

    Ok(CommandOutput {
        value: json!({
            "qualifying": qualification.is_qualifying(),
            "classification": qualification,
            "days_from_purchase": days_from_purchase,
            "days_from_offer": days_from_offer,
        }),
        report: Some(report),
        csv: None,
    })
}
