use crate::types::{AuditEntry, DataKey, Error, FeedEvent, MAX_AUDIT_PAGE};
use soroban_sdk::{Address, Env, Symbol, Vec};

/// Append-only record of committed state transitions. Observers read it; the
/// contract itself never branches on it.
pub struct AuditFeed;

impl AuditFeed {
    /// Append an entry and publish it as a contract event.
    pub fn record(env: &Env, actor: &Address, event: FeedEvent) -> u32 {
        let seq = Self::count(env);
        let entry = AuditEntry {
            seq,
            actor: actor.clone(),
            event,
            timestamp: env.ledger().timestamp(),
            ledger: env.ledger().sequence(),
        };

        env.storage()
            .persistent()
            .set(&DataKey::AuditEntry(seq), &entry);
        env.storage()
            .instance()
            .set(&DataKey::AuditCount, &(seq + 1));

        env.events()
            .publish((Self::topic(env, &entry.event), seq), entry);

        seq
    }

    pub fn count(env: &Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::AuditCount)
            .unwrap_or(0u32)
    }

    pub fn get_entry(env: &Env, seq: u32) -> Result<AuditEntry, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::AuditEntry(seq))
            .ok_or(Error::AuditEntryNotFound)
    }

    /// Page through the feed. Out of range starts yield an empty page.
    pub fn get_log(env: &Env, start: u32, limit: u32) -> Vec<AuditEntry> {
        let count = Self::count(env);
        let mut entries = Vec::new(env);
        if start >= count {
            return entries;
        }

        let end = start.saturating_add(limit.min(MAX_AUDIT_PAGE)).min(count);
        for seq in start..end {
            if let Some(entry) = env
                .storage()
                .persistent()
                .get::<_, AuditEntry>(&DataKey::AuditEntry(seq))
            {
                entries.push_back(entry);
            }
        }
        entries
    }

    fn topic(env: &Env, event: &FeedEvent) -> Symbol {
        let name = match event {
            FeedEvent::FundraiserCreated(..) => "FundraiserCreated",
            FeedEvent::DonationReceived(..) => "DonationReceived",
            FeedEvent::MilestoneCreated(..) => "MilestoneCreated",
            FeedEvent::ProofSubmitted(..) => "ProofSubmitted",
            FeedEvent::MilestoneVoted(..) => "MilestoneVoted",
            FeedEvent::MilestoneApproved(..) => "MilestoneApproved",
            FeedEvent::FundsReleased(..) => "FundsReleased",
            FeedEvent::WithdrawalRequested(..) => "WithdrawalRequested",
            FeedEvent::WithdrawalApproved(..) => "WithdrawalApproved",
            FeedEvent::WithdrawalExecuted(..) => "WithdrawalExecuted",
            FeedEvent::FundraiserStatusChanged(..) => "FundraiserStatusChanged",
        };
        Symbol::new(env, name)
    }
}
