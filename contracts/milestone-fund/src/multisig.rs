use crate::admin::AdminModule;
use crate::audit::AuditFeed;
use crate::pool::{Debit, Pool};
use crate::registry::FundraiserRegistry;
use crate::types::*;
use soroban_sdk::{log, Address, Env, String, Symbol, Vec};

/// Multi-sig owners and the `required` threshold.
pub struct OwnerSet;

impl OwnerSet {
    /// Owners must be unique and satisfy `1 <= required <= owners.len()`.
    pub fn validate(owners: &Vec<Address>, required: u32) -> Result<(), Error> {
        for (i, owner) in owners.iter().enumerate() {
            if let Some(first) = owners.first_index_of(&owner) {
                if first as usize != i {
                    return Err(Error::DuplicateOwner);
                }
            }
        }
        if required == 0 || required > owners.len() {
            return Err(Error::InvalidThreshold);
        }
        Ok(())
    }

    pub fn get_owners(env: &Env) -> Vec<Address> {
        env.storage()
            .instance()
            .get(&DataKey::Owners)
            .unwrap_or_else(|| Vec::new(env))
    }

    pub fn is_owner(env: &Env, address: &Address) -> bool {
        Self::get_owners(env).contains(address)
    }

    pub fn required(env: &Env) -> Result<u32, Error> {
        Ok(AdminModule::config(env)?.required)
    }

    pub fn add_owner(env: &Env, admin: &Address, owner: &Address) -> Result<(), Error> {
        AdminModule::verify_admin(env, admin)?;

        let mut owners = Self::get_owners(env);
        if owners.contains(owner) {
            return Err(Error::DuplicateOwner);
        }
        owners.push_back(owner.clone());
        env.storage().instance().set(&DataKey::Owners, &owners);

        env.events()
            .publish((Symbol::new(env, "owner_added"),), owner.clone());
        Ok(())
    }

    pub fn remove_owner(env: &Env, admin: &Address, owner: &Address) -> Result<(), Error> {
        let config = AdminModule::verify_admin(env, admin)?;

        let mut owners = Self::get_owners(env);
        let index = owners.first_index_of(owner).ok_or(Error::OwnerNotFound)?;
        if owners.len() - 1 < config.required {
            return Err(Error::InvalidThreshold);
        }
        owners.remove(index);
        env.storage().instance().set(&DataKey::Owners, &owners);

        env.events()
            .publish((Symbol::new(env, "owner_removed"),), owner.clone());
        Ok(())
    }

    pub fn set_required(env: &Env, admin: &Address, required: u32) -> Result<(), Error> {
        let mut config = AdminModule::verify_admin(env, admin)?;
        Self::validate(&Self::get_owners(env), required)?;

        config.required = required;
        AdminModule::save_config(env, &config);

        env.events()
            .publish((Symbol::new(env, "required_updated"),), required);
        Ok(())
    }
}

/// N-of-M approval workflow for transfers out of a fundraiser's pool,
/// independent of the milestone ledger.
pub struct WithdrawalMultiSig;

impl WithdrawalMultiSig {
    pub fn create_request(
        env: &Env,
        proposer: &Address,
        fundraiser_id: u32,
        to: &Address,
        amount: i128,
        reason: String,
    ) -> Result<u32, Error> {
        AdminModule::config(env)?;
        if !OwnerSet::is_owner(env, proposer) {
            return Err(Error::Unauthorized);
        }
        FundraiserRegistry::get(env, fundraiser_id)?;
        Pool::ensure_positive(amount)?;
        if reason.len() == 0 {
            return Err(Error::EmptyText);
        }
        if reason.len() > MAX_TEXT_LEN {
            return Err(Error::TextTooLong);
        }

        let id = Self::count(env);
        let request = WithdrawalRequest {
            id,
            fundraiser_id,
            proposer: proposer.clone(),
            to: to.clone(),
            amount,
            reason,
            approvers: Vec::new(env),
            executed: false,
            created_at: env.ledger().timestamp(),
            executed_at: 0,
        };
        Self::save(env, &request);
        env.storage()
            .instance()
            .set(&DataKey::WithdrawalCount, &(id + 1));

        AuditFeed::record(env, proposer, FeedEvent::WithdrawalRequested(id, fundraiser_id, amount));
        Ok(id)
    }

    pub fn approve(env: &Env, owner: &Address, request_id: u32) -> Result<(), Error> {
        if !OwnerSet::is_owner(env, owner) {
            return Err(Error::Unauthorized);
        }
        let mut request = Self::get(env, request_id)?;
        if request.executed {
            return Err(Error::AlreadyExecuted);
        }
        if request.approvers.contains(owner) {
            return Err(Error::AlreadyApproved);
        }

        request.approvers.push_back(owner.clone());
        Self::save(env, &request);

        let approvals = request.approvers.len();
        log!(env, "withdrawal {} approvals {}", request_id, approvals);
        AuditFeed::record(env, owner, FeedEvent::WithdrawalApproved(request_id, approvals));
        Ok(())
    }

    /// Execute once enough current owners have approved. The linked
    /// fundraiser's pool is debited in the same call as the transfer.
    pub fn execute(env: &Env, caller: &Address, request_id: u32) -> Result<(), Error> {
        let config = AdminModule::config(env)?;
        let owners = OwnerSet::get_owners(env);
        if !owners.contains(caller) {
            return Err(Error::Unauthorized);
        }
        let mut request = Self::get(env, request_id)?;
        if request.executed {
            return Err(Error::AlreadyExecuted);
        }
        if Self::valid_approvals(&request, &owners) < config.required {
            return Err(Error::InsufficientApprovals);
        }

        let mut fundraiser = FundraiserRegistry::get(env, request.fundraiser_id)?;
        Pool::debit(env, &mut fundraiser, request.amount, Debit::Withdrawal)?;

        request.executed = true;
        request.executed_at = env.ledger().timestamp();
        Self::save(env, &request);
        FundraiserRegistry::save(env, &fundraiser);

        Pool::transfer_out(env, &request.to, request.amount)?;

        AuditFeed::record(
            env,
            caller,
            FeedEvent::WithdrawalExecuted(request_id, request.to.clone(), request.amount),
        );
        Ok(())
    }

    /// Approvals from addresses that have since been removed as owners do
    /// not count.
    fn valid_approvals(request: &WithdrawalRequest, owners: &Vec<Address>) -> u32 {
        request
            .approvers
            .iter()
            .filter(|approver| owners.contains(approver))
            .count() as u32
    }

    pub fn count(env: &Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::WithdrawalCount)
            .unwrap_or(0u32)
    }

    pub fn get(env: &Env, request_id: u32) -> Result<WithdrawalRequest, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Withdrawal(request_id))
            .ok_or(Error::WithdrawalNotFound)
    }

    pub fn get_approvers(env: &Env, request_id: u32) -> Result<Vec<Address>, Error> {
        Ok(Self::get(env, request_id)?.approvers)
    }

    fn save(env: &Env, request: &WithdrawalRequest) {
        env.storage()
            .persistent()
            .set(&DataKey::Withdrawal(request.id), request);
    }
}
