use rust_decimal::Decimal;

use crate::domain::{Error, TimeDeposit};

/// Monthly interest rule for one plan type.
///
/// Implementations are stateless pure functions of (balance, elapsed days).
/// The returned amount is kept at internal precision; final rounding to the
/// balance scale happens in the engine.
pub trait InterestStrategy: Send + Sync {
    fn plan_type(&self) -> &'static str;

    fn monthly_interest(&self, balance: Decimal, days: u32) -> Decimal;
}

/// Port to whatever persists the deposits.
///
/// Both operations are whole-batch: `find_all` loads every deposit with its
/// withdrawals attached, `save_all` persists the entire batch.
pub trait DepositRepository {
    fn find_all(&self) -> Result<Vec<TimeDeposit>, Error>;

    fn save_all(&mut self, deposits: &[TimeDeposit]) -> Result<(), Error>;
}
