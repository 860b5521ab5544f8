pub mod auction;
pub mod registry;

pub use auction::{AuctionEnded, AuctionRegistered, BidPlaced, BiddingRefund, PrizeAwarded};
pub use registry::IPrizeRegistry;
