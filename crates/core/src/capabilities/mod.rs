pub mod memory;
pub mod policy;
pub mod traits;

pub use memory::{ManualClock, PrizeVault, Treasury};
pub use policy::{OpenRegistration, SingleAdmin};
pub use traits::{AdminPolicy, Clock, PrizeTransfer, ValueTransfer};
