pub mod deposit;
pub mod error;
pub mod traits;

pub use deposit::{TimeDeposit, Withdrawal};
pub use error::Error;
pub use traits::{DepositRepository, InterestStrategy};
