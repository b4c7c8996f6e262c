use crate::admin::AdminModule;
use crate::types::{Error, Fundraiser};
use soroban_sdk::{log, token, Address, Env};

/// Pooled balance of a fundraiser. Both milestone releases and multi-sig
/// withdrawals draw on it, so every debit goes through `debit_*` on the same
/// `Fundraiser` record that was checked.
pub struct Pool;

pub enum Debit {
    Release,
    Withdrawal,
}

impl Pool {
    pub fn ensure_positive(amount: i128) -> Result<(), Error> {
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        Ok(())
    }

    pub fn credit(fundraiser: &mut Fundraiser, amount: i128) -> Result<(), Error> {
        fundraiser.raised_amount = fundraiser
            .raised_amount
            .checked_add(amount)
            .ok_or(Error::AmountOverflow)?;
        Ok(())
    }

    /// Debit the pool in place. Leaves the record untouched on failure.
    pub fn debit(
        env: &Env,
        fundraiser: &mut Fundraiser,
        amount: i128,
        kind: Debit,
    ) -> Result<(), Error> {
        let available = fundraiser.available();
        if available < amount {
            log!(
                env,
                "pool {} short: available {}, requested {}",
                fundraiser.id,
                available,
                amount
            );
            return Err(Error::InsufficientPool);
        }

        match kind {
            Debit::Release => {
                fundraiser.released_amount = fundraiser
                    .released_amount
                    .checked_add(amount)
                    .ok_or(Error::AmountOverflow)?;
            }
            Debit::Withdrawal => {
                fundraiser.withdrawn_amount = fundraiser
                    .withdrawn_amount
                    .checked_add(amount)
                    .ok_or(Error::AmountOverflow)?;
            }
        }
        log!(
            env,
            "pool {} debited {}, remaining {}",
            fundraiser.id,
            amount,
            fundraiser.available()
        );
        Ok(())
    }

    // Transfer tokens to contract
    pub fn transfer_in(env: &Env, from: &Address, amount: i128) -> Result<(), Error> {
        let config = AdminModule::config(env)?;
        token::Client::new(env, &config.token).transfer(
            from,
            &env.current_contract_address(),
            &amount,
        );
        Ok(())
    }

    // Transfer tokens from contract
    pub fn transfer_out(env: &Env, to: &Address, amount: i128) -> Result<(), Error> {
        let config = AdminModule::config(env)?;
        token::Client::new(env, &config.token).transfer(
            &env.current_contract_address(),
            to,
            &amount,
        );
        Ok(())
    }
}
