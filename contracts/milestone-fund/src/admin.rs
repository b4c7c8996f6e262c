use crate::milestones::MilestoneLedger;
use crate::multisig::OwnerSet;
use crate::types::{Config, DataKey, Error};
use soroban_sdk::{log, Address, Env, Symbol, Vec};

pub struct AdminModule;

impl AdminModule {
    /// Initialize the contract with an admin, the payout token, the multi-sig
    /// owner set and both quorum thresholds.
    pub fn init(
        env: &Env,
        admin: &Address,
        token: &Address,
        owners: &Vec<Address>,
        required: u32,
        required_validations: u32,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Config) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        if required_validations == 0 {
            return Err(Error::InvalidThreshold);
        }
        OwnerSet::validate(owners, required)?;

        let config = Config {
            admin: admin.clone(),
            token: token.clone(),
            required,
            required_validations,
        };
        env.storage().instance().set(&DataKey::Config, &config);
        env.storage().instance().set(&DataKey::Owners, owners);
        env.storage()
            .instance()
            .set(&DataKey::Validators, &Vec::<Address>::new(env));
        env.storage().instance().set(&DataKey::FundraiserCount, &0u32);
        env.storage().instance().set(&DataKey::WithdrawalCount, &0u32);
        env.storage().instance().set(&DataKey::AuditCount, &0u32);

        env.events().publish(
            (Symbol::new(env, "contract_initialized"),),
            (admin.clone(), token.clone(), required, required_validations),
        );

        Ok(())
    }

    pub fn config(env: &Env) -> Result<Config, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(Error::NotInitialized)
    }

    pub(crate) fn save_config(env: &Env, config: &Config) {
        env.storage().instance().set(&DataKey::Config, config);
    }

    /// Checks that `caller` is the stored admin and has signed the call.
    pub fn verify_admin(env: &Env, caller: &Address) -> Result<Config, Error> {
        caller.require_auth();
        let config = Self::config(env)?;
        if &config.admin != caller {
            return Err(Error::Unauthorized);
        }
        Ok(config)
    }

    pub fn is_admin(env: &Env, address: &Address) -> Result<bool, Error> {
        Ok(&Self::config(env)?.admin == address)
    }

    pub fn transfer_admin(env: &Env, admin: &Address, new_admin: &Address) -> Result<(), Error> {
        let mut config = Self::verify_admin(env, admin)?;
        config.admin = new_admin.clone();
        Self::save_config(env, &config);

        env.events().publish(
            (Symbol::new(env, "admin_transferred"),),
            (admin.clone(), new_admin.clone()),
        );
        Ok(())
    }

    /// Update the number of yes votes a milestone needs before it is approved.
    /// Milestones that already reached the old threshold stay approved. When
    /// the threshold drops, pending milestones that now meet it are approved.
    pub fn set_required_validations(
        env: &Env,
        admin: &Address,
        required_validations: u32,
    ) -> Result<(), Error> {
        let mut config = Self::verify_admin(env, admin)?;
        if required_validations == 0 {
            return Err(Error::InvalidThreshold);
        }
        let lowered = required_validations < config.required_validations;
        config.required_validations = required_validations;
        Self::save_config(env, &config);

        if lowered {
            let approved = MilestoneLedger::reevaluate_quorum(env, admin, required_validations);
            log!(env, "{} pending milestones approved", approved);
        }

        log!(env, "required validations set to {}", required_validations);
        env.events().publish(
            (Symbol::new(env, "validations_updated"),),
            required_validations,
        );
        Ok(())
    }
}
