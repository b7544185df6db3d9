use clap::Args;

use merger_basis_core::report::{render_report, to_csv_string};
use merger_basis_core::{valuate_lots, Lot, OfferDateIndex, ValuationContext};

use crate::commands::params::MergerArgs;
use crate::input;
use crate::input::csv_feed;
use crate::output::CommandOutput;

/// Arguments for batch lot valuation
#[derive(Args)]
pub struct ValuateArgs {
    /// Historical VMW price feed (CSV, date in column 1, close in column 5)
    #[arg(long)]
    pub prices: String,

    /// ESPP purchase-date to offer-date feed (CSV); required when any lot is ESPP
    #[arg(long)]
    pub espp_dates: Option<String>,

    /// Path to the JSON array of lots (reads stdin when omitted)
    #[arg(long)]
    pub lots: Option<String>,

    #[command(flatten)]
    pub merger: MergerArgs,

    /// Force qualifying-disposition treatment for every ESPP lot
    #[arg(long)]
    pub force_qualifying: bool,

    /// Also write the text report to this file
    #[arg(long)]
    pub report_out: Option<String>,

    /// Also write the CSV export to this file
    #[arg(long)]
    pub csv_out: Option<String>,
}

pub fn run_valuate(args: ValuateArgs) -> Result<CommandOutput, Box<dyn std::error::Error>> {
    let lots: Vec<Lot> = if let Some(ref path) = args.lots {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        return Err("--lots is required (or pipe a JSON array of lots on stdin)".into());
    };

    let params = args.merger.parameters()?;
    let prices = csv_feed::load_price_index(&args.prices)?;
    let offer_dates = match args.espp_dates {
        Some(ref path) => csv_feed::load_offer_date_index(path)?,
        None => OfferDateIndex::new(),
    };

    let ctx = ValuationContext::new(&prices, &offer_dates, &params)
        .force_qualifying(args.force_qualifying);
    let output = valuate_lots(lots, &ctx)?;

    let report = render_report(&params, &output.result.lots, &output.result.totals)?;
    let csv = to_csv_string(&output.result.lots)?;

    if let Some(ref path) = args.report_out {
        input::file::write_text(path, &report)?;
    }
    if let Some(ref path) = args.csv_out {
        input::file::write_text(path, &csv)?;
    }

    Ok(CommandOutput {
        value: serde_json::to_value(&output)?,
        report: Some(report),
        csv: Some(csv),
    })
}
