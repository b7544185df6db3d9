use clap::Args;
use rust_decimal::Decimal;

use merger_basis_core::report::render_parameters;
use merger_basis_core::MergerParameters;

use crate::output::CommandOutput;

/// Statement quantities used to refine the default cash/stock election.
#[derive(Args, Debug, Clone)]
pub struct MergerArgs {
    /// VMW shares settled in cash (requires --stock-share)
    #[arg(long, requires = "stock_share")]
    pub cash_share: Option<Decimal>,

    /// VMW shares settled in AVGO stock (requires --cash-share)
    #[arg(long)]
    pub stock_share: Option<Decimal>,
}

impl MergerArgs {
    /// Default parameters, or parameters refined from the actual split.
    pub fn parameters(&self) -> Result<MergerParameters, Box<dyn std::error::Error>> {
        match (self.cash_share, self.stock_share) {
            (Some(cash), Some(stock)) => {
                let params = MergerParameters::compute(cash, stock)?;
                tracing::info!(
                    cash_ratio = %params.cash_ratio,
                    fmv_after_merger = %params.fmv_after_merger,
                    "refined merger parameters"
                );
                Ok(params)
            }
            (None, None) => Ok(MergerParameters::default()),
            (None, Some(_)) | (Some(_), None) => {
                Err("--cash-share and --stock-share must be given together".into())
            }
        }
    }
}

/// Arguments for the merger parameter summary
#[derive(Args)]
pub struct ParamsArgs {
    #[command(flatten)]
    pub merger: MergerArgs,
}

pub fn run_params(args: ParamsArgs) -> Result<CommandOutput, Box<dyn std::error::Error>> {
    let params = args.merger.parameters()?;
    Ok(CommandOutput {
        value: serde_json::to_value(params)?,
        report: Some(render_parameters(&params)),
        csv: None,
    })
}
