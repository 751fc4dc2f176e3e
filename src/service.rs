use tracing::info;

use crate::domain::{DepositRepository, Error, TimeDeposit};
use crate::engine::InterestCalculator;

/// Use-case layer tying the repository port to the accrual engine.
pub struct DepositService<R: DepositRepository> {
    repository: R,
    calculator: InterestCalculator,
}

impl<R: DepositRepository> DepositService<R> {
    pub fn new(repository: R, calculator: InterestCalculator) -> Self {
        Self {
            repository,
            calculator,
        }
    }

    /// Read-only listing; never invokes the engine.
    pub fn get_all_deposits(&self) -> Result<Vec<TimeDeposit>, Error> {
        self.repository.find_all()
    }

    /// Loads every deposit, applies one month of interest and persists the
    /// whole batch. Nothing is saved when accrual fails partway. Each call
    /// compounds on top of the previous one.
    pub fn update_balances(&mut self) -> Result<(), Error> {
        let mut deposits = self.repository.find_all()?;
        self.calculator.update_balances(&mut deposits)?;
        self.repository.save_all(&deposits)?;
        info!(count = deposits.len(), "updated deposit balances");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::strategy::StrategyRegistry;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    /// In-memory stand-in for the CSV store.
    struct MemoryRepository {
        deposits: Vec<TimeDeposit>,
        saves: usize,
    }

    impl DepositRepository for MemoryRepository {
        fn find_all(&self) -> Result<Vec<TimeDeposit>, Error> {
            Ok(self.deposits.clone())
        }

        fn save_all(&mut self, deposits: &[TimeDeposit]) -> Result<(), Error> {
            self.deposits = deposits.to_vec();
            self.saves += 1;
            Ok(())
        }
    }

    fn service(deposits: Vec<TimeDeposit>) -> DepositService<MemoryRepository> {
        DepositService::new(
            MemoryRepository {
                deposits,
                saves: 0,
            },
            InterestCalculator::new(StrategyRegistry::builtin()),
        )
    }

    #[test]
    fn get_all_does_not_touch_balances() {
        let service = service(vec![TimeDeposit::new(1, "premium", 60, dec("20000.00"))]);

        let deposits = service.get_all_deposits().unwrap();
        assert_eq!(deposits[0].balance, dec("20000.00"));

        // still unchanged on a second read
        let deposits = service.get_all_deposits().unwrap();
        assert_eq!(deposits[0].balance, dec("20000.00"));
    }

    #[test]
    fn update_balances_accrues_and_persists_the_batch() {
        let mut service = service(vec![
            TimeDeposit::new(1, "basic", 45, dec("10000.00")),
            TimeDeposit::new(2, "student", 90, dec("5000.00")),
        ]);

        service.update_balances().unwrap();

        let deposits = service.get_all_deposits().unwrap();
        assert_eq!(deposits[0].balance, dec("10008.33"));
        assert_eq!(deposits[1].balance, dec("5012.50"));
        assert_eq!(service.repository.saves, 1);
    }

    #[test]
    fn failed_accrual_persists_nothing() {
        let mut service = service(vec![
            TimeDeposit::new(1, "basic", 45, dec("10000.00")),
            TimeDeposit::new(2, "gold", 45, dec("10000.00")),
        ]);

        let err = service.update_balances().unwrap_err();
        assert!(matches!(err, Error::UnknownPlanType(_)));

        // the saved state never saw the partial mutation
        let deposits = service.get_all_deposits().unwrap();
        assert_eq!(deposits[0].balance, dec("10000.00"));
        assert_eq!(service.repository.saves, 0);
    }
}
