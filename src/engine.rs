use rust_decimal::RoundingStrategy;

use crate::domain::{Error, TimeDeposit};
use crate::strategy::StrategyRegistry;

/// Applies one accrual cycle to a batch of deposits.
pub struct InterestCalculator {
    registry: StrategyRegistry,
}

impl InterestCalculator {
    pub fn new(registry: StrategyRegistry) -> Self {
        Self { registry }
    }

    /// Adds one month of interest to every deposit, in input order.
    ///
    /// Interest is rounded half-up to 2 fractional digits before being added;
    /// withdrawals and every other field are left untouched. The batch stops
    /// at the first unresolvable plan type, and deposits before the failing
    /// record keep their updated balances.
    pub fn update_balances(&self, deposits: &mut [TimeDeposit]) -> Result<(), Error> {
        for deposit in deposits.iter_mut() {
            let strategy = self.registry.resolve(&deposit.plan_type)?;
            let interest = strategy.monthly_interest(deposit.balance, deposit.days);
            deposit.balance +=
                interest.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        }
        Ok(())
    }
}
