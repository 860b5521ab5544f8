use alloy::primitives::Address;

use crate::{capabilities::traits::AdminPolicy, error::AuthError};

/// Only one administrator may register auctions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleAdmin {
    admin: Address,
}

impl SingleAdmin {
    pub fn new(admin: Address) -> Self {
        Self { admin }
    }
}

impl AdminPolicy for SingleAdmin {
    fn authorize(&self, caller: Address) -> Result<(), AuthError> {
        if caller == self.admin {
            Ok(())
        } else {
            Err(AuthError::Unauthorized { caller })
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OpenRegistration;

impl AdminPolicy for OpenRegistration {
    fn authorize(&self, _caller: Address) -> Result<(), AuthError> {
        Ok(())
    }
}
