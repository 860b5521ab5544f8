pub mod action;
pub mod auction;
pub mod bidding;
pub mod config;
pub mod event;
pub mod primitives;

pub use action::*;
pub use auction::*;
pub use bidding::*;
pub use config::*;
pub use event::*;
pub use primitives::*;
