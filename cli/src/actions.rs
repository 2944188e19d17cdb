use msgs::cli::{BurnTokens, Cli, TreasuryStateRequest};
use msgs::Message;
use rust_decimal::Decimal;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
pub enum Action {
    BurnTokens {
        #[structopt(short = "c", long = "contract")]
        contract_address: Option<String>,
        #[structopt(short = "o", long = "owner")]
        owner_address: String,
        #[structopt(short = "a", long = "amount")]
        amount: Decimal,
    },
    GetTreasuryState,
}

impl Action {
    pub fn into_request(self) -> Message {
        match self {
            Self::BurnTokens {
                contract_address,
                owner_address,
                amount,
            } => Message::Cli(Cli::BurnTokens(BurnTokens {
                contract_address,
                owner_address,
                amount,
            })),
            Self::GetTreasuryState => Message::Cli(Cli::TreasuryStateRequest(TreasuryStateRequest {})),
        }
    }
}
