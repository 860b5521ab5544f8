pub mod amount;
pub mod report;

pub use amount::{AmountError, base_units, human_units};
pub use report::{ActionReport, AuctionReport, AwardReport, RankedBid, RunReport, Summary};
