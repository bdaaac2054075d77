//! The governance ledger.
//!
//! Owns the proposal and vote collections. Every mutation is one
//! load -> modify -> save cycle over the whole dataset, serialized by a
//! ledger-wide lock so concurrent writers never lose an update.

use crate::error::GovernanceError;
use crate::rules::VotingRules;
use chrono::Utc;
use parking_lot::Mutex;
use tourism_storage::GovernanceStore;
use tourism_types::{
    GovernanceDataset, GovernanceSummary, NewProposal, NewVote, Proposal, ProposalStatus, Vote,
};
use tracing::{debug, info};

/// Proposal and vote bookkeeping over a [`GovernanceStore`].
pub struct GovernanceLedger<S> {
    store: S,
    rules: VotingRules,
    write_lock: Mutex<()>,
}

impl<S: GovernanceStore> GovernanceLedger<S> {
    /// Create a ledger with the default voting rules.
    pub fn new(store: S) -> Self {
        Self::with_rules(store, VotingRules::default())
    }

    pub fn with_rules(store: S, rules: VotingRules) -> Self {
        Self {
            store,
            rules,
            write_lock: Mutex::new(()),
        }
    }

    pub fn rules(&self) -> &VotingRules {
        &self.rules
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All proposals, in creation order.
    pub fn list_proposals(&self) -> Result<Vec<Proposal>, GovernanceError> {
        let data = self.store.load()?;
        debug!(count = data.proposals.len(), "Listing proposals");
        Ok(data.proposals)
    }

    pub fn get_proposal(&self, proposal_id: &str) -> Result<Proposal, GovernanceError> {
        let data = self.store.load()?;
        data.proposal(proposal_id)
            .cloned()
            .ok_or_else(|| GovernanceError::ProposalNotFound(proposal_id.to_string()))
    }

    /// Create a new active proposal with empty tallies.
    ///
    /// `quorum_percentage` and `duration_days` are stored as given.
    pub fn create_proposal(&self, input: NewProposal) -> Result<Proposal, GovernanceError> {
        let proposal = self.mutate(|data| {
            let proposal = Proposal::new(data.next_proposal_id(), input, Utc::now());
            data.proposals.push(proposal.clone());
            Ok(proposal)
        })?;

        info!(
            proposal_id = %proposal.id,
            category = %proposal.category,
            quorum_percentage = proposal.quorum_percentage,
            "Proposal created"
        );
        Ok(proposal)
    }

    /// Record a vote and update the proposal's tallies and quorum flag.
    pub fn vote_on_proposal(&self, cast: NewVote) -> Result<Vote, GovernanceError> {
        let rules = &self.rules;
        let (vote, total_votes, quorum_met) = self.mutate(|data| {
            let proposal = data
                .proposal(&cast.proposal_id)
                .ok_or_else(|| GovernanceError::ProposalNotFound(cast.proposal_id.clone()))?;

            if !proposal.status.is_active() {
                return Err(GovernanceError::not_active());
            }

            if rules.one_vote_per_voter
                && data
                    .votes_for_proposal(&cast.proposal_id)
                    .any(|v| v.voter_id == cast.voter_id)
            {
                return Err(GovernanceError::DuplicateVote {
                    proposal_id: cast.proposal_id.clone(),
                    voter_id: cast.voter_id.clone(),
                });
            }

            let now = Utc::now();
            let vote = Vote::new(data.next_vote_id(), cast, now);

            let proposal = data
                .proposal_mut(&vote.proposal_id)
                .ok_or_else(|| GovernanceError::ProposalNotFound(vote.proposal_id.clone()))?;
            proposal.tally(vote.vote_type, now);
            // Tallies only grow while active, so quorum once met stays met.
            if rules.quorum_reached(proposal.total_votes, proposal.quorum_percentage) {
                proposal.quorum_met = true;
            }
            let outcome = (proposal.total_votes, proposal.quorum_met);

            data.votes.push(vote.clone());
            Ok((vote, outcome.0, outcome.1))
        })?;

        info!(
            proposal_id = %vote.proposal_id,
            vote_id = %vote.id,
            vote_type = %vote.vote_type,
            total_votes,
            quorum_met,
            "Vote recorded"
        );
        Ok(vote)
    }

    /// Votes cast on a proposal, in cast order. Unknown IDs yield no votes.
    pub fn list_votes(&self, proposal_id: &str) -> Result<Vec<Vote>, GovernanceError> {
        let data = self.store.load()?;
        let votes: Vec<Vote> = data.votes_for_proposal(proposal_id).cloned().collect();
        debug!(proposal_id, count = votes.len(), "Listing votes");
        Ok(votes)
    }

    /// Decide a proposal's outcome from its tally.
    ///
    /// Already-finalized proposals are re-evaluated rather than refused.
    pub fn finalize_proposal(&self, proposal_id: &str) -> Result<Proposal, GovernanceError> {
        let rules = &self.rules;
        let (proposal, previous) = self.mutate(|data| {
            let proposal = data
                .proposal_mut(proposal_id)
                .ok_or_else(|| GovernanceError::ProposalNotFound(proposal_id.to_string()))?;

            let previous = proposal.status;
            proposal.status = rules.decide(proposal);
            proposal.updated_at = Utc::now();
            Ok((proposal.clone(), previous))
        })?;

        if previous != ProposalStatus::Active {
            debug!(proposal_id, %previous, "Re-finalizing a closed proposal");
        }
        info!(
            proposal_id = %proposal.id,
            status = %proposal.status,
            votes_for = proposal.votes_for,
            votes_against = proposal.votes_against,
            quorum_met = proposal.quorum_met,
            "Proposal finalized"
        );
        Ok(proposal)
    }

    /// Counts and turnout across all proposals.
    pub fn governance_summary(&self) -> Result<GovernanceSummary, GovernanceError> {
        let data = self.store.load()?;
        let active_proposals = data.count_by_status(ProposalStatus::Active);
        let voter_turnout = self.rules.turnout(data.total_votes());
        debug!(
            total = data.proposals.len(),
            active = active_proposals,
            voter_turnout,
            "Computed governance summary"
        );

        Ok(GovernanceSummary {
            total_proposals: data.proposals.len(),
            active_proposals,
            voter_turnout,
            proposals: data.proposals,
        })
    }

    /// Run one read-modify-write cycle. Nothing is saved if `f` fails.
    fn mutate<T>(
        &self,
        f: impl FnOnce(&mut GovernanceDataset) -> Result<T, GovernanceError>,
    ) -> Result<T, GovernanceError> {
        let _guard = self.write_lock.lock();
        let mut data = self.store.load()?;
        let out = f(&mut data)?;
        self.store.save(&data)?;
        Ok(out)
    }
}
