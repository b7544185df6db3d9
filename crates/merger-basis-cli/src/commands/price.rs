use clap::Args;
use serde_json::json;

use merger_basis_core::dates::{format_mdy, parse_mdy};
use merger_basis_core::report::format::currency;

use crate::input::csv_feed;
use crate::output::CommandOutput;

/// Arguments for a single price lookup
#[derive(Args)]
pub struct PriceArgs {
    /// Historical price feed (CSV, date in column 1, close in column 5)
    #[arg(long)]
    pub prices: String,

    /// Date to look up (MM/DD/YYYY)
    #[arg(long)]
    pub date: String,
}

pub fn run_price(args: PriceArgs) -> Result<CommandOutput, Box<dyn std::error::Error>> {
    let index = csv_feed::load_price_index(&args.prices)?;
    let date = parse_mdy(&args.date)?;
    let price = index.price_on(date)?;

    Ok(CommandOutput {
        value: json!({
            "date": format_mdy(date),
            "price": price,
            "exact": index.get(date).is_some(),
        }),
        report: Some(format!("{}: {}\n", format_mdy(date), currency(price))),
        csv: None,
    })
}
