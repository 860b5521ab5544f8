use super::primitives::CurrencyAmount;

/// One tenth of a currency with 18 decimals.
pub const DEFAULT_INCREMENT: CurrencyAmount = CurrencyAmount::from_u128(100_000_000_000_000_000);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AdmissionRule {
    /// `amount > minimum_bid`
    #[default]
    Strict,
    /// `amount >= minimum_bid`
    AtLeast,
}

impl AdmissionRule {
    pub fn admits(&self, amount: CurrencyAmount, minimum_bid: CurrencyAmount) -> bool {
        match self {
            AdmissionRule::Strict => amount > minimum_bid,
            AdmissionRule::AtLeast => amount >= minimum_bid,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Step applied around the lowest ranked amount when recomputing the
    /// admission threshold.
    pub increment: CurrencyAmount,
    pub admission: AdmissionRule,
}

impl EngineConfig {
    pub fn new(increment: CurrencyAmount, admission: AdmissionRule) -> Self {
        Self {
            increment,
            admission,
        }
    }

    pub fn with_increment(mut self, increment: CurrencyAmount) -> Self {
        self.increment = increment;
        self
    }

    pub fn with_admission(mut self, admission: AdmissionRule) -> Self {
        self.admission = admission;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            increment: DEFAULT_INCREMENT,
            admission: AdmissionRule::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;

    #[test]
    fn strict_rejects_equal_amount() {
        let min = CurrencyAmount::from(10u128);
        assert!(!AdmissionRule::Strict.admits(min, min));
        assert!(AdmissionRule::AtLeast.admits(min, min));
        assert!(AdmissionRule::Strict.admits(CurrencyAmount::from(11u128), min));
    }

    #[test]
    fn default_increment_is_a_tenth_of_a_unit() {
        let unit = U256::from(10u64).pow(U256::from(18u64));
        assert_eq!(
            EngineConfig::default().increment.as_u256() * U256::from(10u64),
            unit
        );
    }
}
