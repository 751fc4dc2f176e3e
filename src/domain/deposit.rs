use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct Withdrawal {
    pub id: u32,
    pub time_deposit_id: u32,
    pub amount: Decimal,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeDeposit {
    pub id: u32,
    pub plan_type: String,
    pub days: u32,
    pub balance: Decimal, // canonical scale: 2 fractional digits
    pub withdrawals: Vec<Withdrawal>,
}

impl TimeDeposit {
    pub fn new(id: u32, plan_type: impl Into<String>, days: u32, balance: Decimal) -> Self {
        Self {
            id,
            plan_type: plan_type.into(),
            days,
            balance,
            withdrawals: Vec::new(),
        }
    }
}
