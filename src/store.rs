use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{DepositRepository, Error, TimeDeposit, Withdrawal};

/// Repository over two CSV files in a data directory: `deposits.csv` and
/// `withdrawals.csv`. Withdrawals are attached to their parent deposit on
/// load; saving rewrites the deposit file in full (balances are the only
/// field the engine changes) and leaves the withdrawal file alone.
pub struct CsvStore {
    deposits_path: PathBuf,
    withdrawals_path: PathBuf,
}

/// Internal shapes used only for CSV (de)serialization.
#[derive(Debug, Serialize, Deserialize)]
struct DepositRow {
    id: u32,
    plan_type: String,
    days: u32,
    balance: Decimal,
}

#[derive(Debug, Deserialize)]
struct WithdrawalRow {
    id: u32,
    time_deposit_id: u32,
    amount: Decimal,
    date: NaiveDate,
}

impl CsvStore {
    pub fn open(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        Self {
            deposits_path: dir.join("deposits.csv"),
            withdrawals_path: dir.join("withdrawals.csv"),
        }
    }

    fn read_withdrawals(&self) -> Result<Vec<Withdrawal>, Error> {
        let file = match File::open(&self.withdrawals_path) {
            Ok(f) => f,
            // an absent withdrawal file reads as an empty history
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut withdrawals = Vec::new();
        for row in rdr.deserialize::<WithdrawalRow>() {
            let row = row.map_err(|e| Error::Store(format!("withdrawal row: {}", e)))?;
            withdrawals.push(Withdrawal {
                id: row.id,
                time_deposit_id: row.time_deposit_id,
                amount: row.amount,
                date: row.date,
            });
        }
        Ok(withdrawals)
    }
}

impl DepositRepository for CsvStore {
    fn find_all(&self) -> Result<Vec<TimeDeposit>, Error> {
        let file = File::open(&self.deposits_path)?;
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut deposits = Vec::new();
        for row in rdr.deserialize::<DepositRow>() {
            let row = row.map_err(|e| Error::Store(format!("deposit row: {}", e)))?;
            deposits.push(TimeDeposit::new(row.id, row.plan_type, row.days, row.balance));
        }

        for withdrawal in self.read_withdrawals()? {
            let parent = deposits
                .iter_mut()
                .find(|d| d.id == withdrawal.time_deposit_id)
                .ok_or_else(|| {
                    Error::Store(format!(
                        "withdrawal {} references unknown deposit {}",
                        withdrawal.id, withdrawal.time_deposit_id
                    ))
                })?;
            parent.withdrawals.push(withdrawal);
        }

        Ok(deposits)
    }

    fn save_all(&mut self, deposits: &[TimeDeposit]) -> Result<(), Error> {
        let file = File::create(&self.deposits_path)?;
        let mut wtr = csv::Writer::from_writer(file);
        for deposit in deposits {
            wtr.serialize(DepositRow {
                id: deposit.id,
                plan_type: deposit.plan_type.clone(),
                days: deposit.days,
                balance: deposit.balance,
            })
            .map_err(|e| Error::Store(format!("deposit row: {}", e)))?;
        }
        wtr.flush()?;
        Ok(())
    }
}
