use alloy::primitives::Address;

use crate::{
    error::{AuthError, TransferError},
    types::{
        action::Award,
        primitives::{BlockNumber, CurrencyAmount, PrizeItem},
    },
};

/// Source of the current block height. Only ever compared against stored
/// auction bounds.
pub trait Clock {
    fn current_block(&self) -> BlockNumber;
}

/// Native value custody.
///
/// The value attached to a bid arrives with the call, so `credit` cannot fail;
/// it is only invoked once the bid is certain to be accepted. `refund` is the
/// single fallible step of a bid and runs before any ledger state changes.
pub trait ValueTransfer {
    fn credit(&mut self, from: Address, amount: CurrencyAmount);

    fn refund(&mut self, recipient: Address, amount: CurrencyAmount)
    -> Result<(), TransferError>;
}

/// Prize custody, one item at a time.
pub trait PrizeTransfer {
    /// Holder of every prize not yet awarded.
    fn custodian(&self) -> Address;

    fn transfer(&mut self, item: PrizeItem, recipient: Address) -> Result<(), TransferError>;

    /// Moves every award or none of them.
    ///
    /// Awards are applied in rank order. When one fails, the items already
    /// moved are sent back to the custodian, newest first, and the original
    /// failure is returned. Collaborators that can validate a whole batch up
    /// front may override this.
    fn transfer_batch(&mut self, awards: &[Award]) -> Result<(), TransferError> {
        let custodian = self.custodian();

        for (applied, award) in awards.iter().enumerate() {
            let Err(cause) = self.transfer(award.item, award.winner) else {
                continue;
            };

            for moved in awards[..applied].iter().rev() {
                if let Err(err) = self.transfer(moved.item, custodian) {
                    return Err(TransferError::Rollback {
                        item: moved.item,
                        cause: cause.to_string(),
                        reason: err.to_string(),
                    });
                }
            }
            return Err(cause);
        }

        Ok(())
    }
}

/// Decides who may register auctions.
pub trait AdminPolicy: Send + Sync {
    fn authorize(&self, caller: Address) -> Result<(), AuthError>;
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use alloy::primitives::address;

    use super::*;
    use crate::types::primitives::BidId;

    const CUSTODY: Address = address!("0x00000000000000000000000000000000000000ff");
    const ALICE: Address = address!("0x0000000000000000000000000000000000000001");
    const BOB: Address = address!("0x0000000000000000000000000000000000000002");

    /// Registry that only knows single transfers.
    #[derive(Default)]
    struct Registry {
        owners: HashMap<PrizeItem, Address>,
        locked: HashSet<PrizeItem>,
        refuse_returns: bool,
    }

    impl Registry {
        fn holding(items: impl IntoIterator<Item = u64>) -> Self {
            Self {
                owners: items
                    .into_iter()
                    .map(|item| (PrizeItem::from(item), CUSTODY))
                    .collect(),
                ..Default::default()
            }
        }
    }

    impl PrizeTransfer for Registry {
        fn custodian(&self) -> Address {
            CUSTODY
        }

        fn transfer(&mut self, item: PrizeItem, recipient: Address) -> Result<(), TransferError> {
            let reject = |reason: &str| TransferError::Prize {
                item,
                recipient,
                reason: reason.to_string(),
            };
            if self.locked.contains(&item) {
                return Err(reject("locked"));
            }
            if recipient == CUSTODY && self.refuse_returns {
                return Err(reject("returns disabled"));
            }
            self.owners.insert(item, recipient);
            Ok(())
        }
    }

    fn award(rank: u32, item: u64, winner: Address) -> Award {
        Award {
            rank,
            item: PrizeItem::from(item),
            winner,
            bid_id: BidId::new(rank as u64),
        }
    }

    #[test]
    fn failed_batch_returns_moved_items() {
        let mut registry = Registry::holding([0, 1, 2]);
        registry.locked.insert(PrizeItem::from(2));
        let awards = [award(0, 0, ALICE), award(1, 1, BOB), award(2, 2, ALICE)];

        let err = registry.transfer_batch(&awards).unwrap_err();
        assert!(matches!(err, TransferError::Prize { item, .. } if item == PrizeItem::from(2)));
        assert!(registry.owners.values().all(|owner| *owner == CUSTODY));

        registry.locked.clear();
        registry.transfer_batch(&awards).unwrap();
        assert_eq!(registry.owners[&PrizeItem::from(1)], BOB);
    }

    #[test]
    fn failed_return_is_reported() {
        let mut registry = Registry::holding([0, 1]);
        registry.locked.insert(PrizeItem::from(1));
        registry.refuse_returns = true;

        let err = registry
            .transfer_batch(&[award(0, 0, ALICE), award(1, 1, BOB)])
            .unwrap_err();
        assert!(matches!(err, TransferError::Rollback { item, .. } if item == PrizeItem::from(0)));
        assert_eq!(registry.owners[&PrizeItem::from(0)], ALICE);
    }
}
