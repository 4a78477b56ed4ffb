use clap::Args;
use serde_json::Value;

use ifrs16_core::measurement::LeaseContractParameters;
use ifrs16_core::portfolio;

use crate::input;

/// Arguments for a portfolio summary
#[derive(Args)]
pub struct PortfolioArgs {
    /// Path to a JSON or YAML file holding an array of contracts
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_portfolio(args: PortfolioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let contracts: Vec<LeaseContractParameters> = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <contracts.json> or stdin required for portfolio summary".into());
    };
    let output = portfolio::summarize_portfolio(&contracts)?;
    Ok(serde_json::to_value(output)?)
}
