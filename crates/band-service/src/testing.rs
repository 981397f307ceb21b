//! In-memory store for service tests
//!
//! One mutex-guarded state implements every repository port plus the unit of
//! work, with the same uniqueness and pending-only rules as the SQL schema.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use band_common::JwtService;
use band_core::{
    Account, AccountRepository, Band, BandRepository, DomainError, Invitation,
    InvitationRepository, InvitationStatus, Member, MemberRepository, Paging, RepoResult,
    Snowflake, SnowflakeGenerator, UnitOfWork,
};
use parking_lot::Mutex;

use crate::services::ServiceContext;

#[derive(Default)]
struct State {
    accounts: HashMap<Snowflake, (Account, String)>,
    /// Bands are kept without their roster; it is assembled on read
    bands: HashMap<Snowflake, Band>,
    members: HashMap<Snowflake, Member>,
    invitations: HashMap<Snowflake, Invitation>,
    member_writes: usize,
}

impl State {
    fn with_roster(&self, band: &Band) -> Band {
        let mut band = band.clone();
        band.members = self
            .members
            .values()
            .filter(|m| m.band_id == band.id)
            .cloned()
            .collect();
        band
    }

    fn has_pending(&self, band_id: Snowflake, invited_id: Snowflake) -> bool {
        self.invitations
            .values()
            .any(|i| i.band_id == band_id && i.invited_id == invited_id && i.is_pending())
    }

    fn insert_member(&mut self, member: &Member) -> RepoResult<()> {
        let taken = self
            .members
            .values()
            .any(|m| m.band_id == member.band_id && m.account_id == member.account_id);
        if taken {
            return Err(DomainError::AlreadyMember);
        }
        self.members.insert(member.id, member.clone());
        self.member_writes += 1;
        Ok(())
    }

    fn resolve_invitation(&mut self, invitation: &Invitation) -> RepoResult<()> {
        let stored = self
            .invitations
            .get_mut(&invitation.id)
            .ok_or(DomainError::InvitationNotFound(invitation.id))?;
        if !stored.is_pending() {
            return Err(DomainError::InvitationResolved(stored.status));
        }
        *stored = invitation.clone();
        Ok(())
    }
}

pub(crate) struct MemoryStore {
    state: Mutex<State>,
    ids: Arc<SnowflakeGenerator>,
}

impl MemoryStore {
    pub(crate) fn shared() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(State::default()),
            ids: Arc::new(SnowflakeGenerator::new(1)),
        })
    }

    pub(crate) fn context(self: &Arc<Self>) -> ServiceContext {
        ServiceContext::builder()
            .account_repo(self.clone())
            .band_repo(self.clone())
            .member_repo(self.clone())
            .invitation_repo(self.clone())
            .unit_of_work(self.clone())
            .jwt_service(Arc::new(JwtService::new(
                "memory-store-secret-for-tests",
                "Playliter API",
                3600,
            )))
            .snowflake_generator(self.ids.clone())
            .build()
            .expect("every dependency is provided")
    }

    pub(crate) fn add_account(&self, username: &str) -> Account {
        let account = Account::new(
            self.ids.generate(),
            format!("{username}@example.com"),
            username.to_string(),
            username.to_string(),
        );
        self.put_account(account.clone());
        account
    }

    pub(crate) fn put_account(&self, account: Account) {
        self.state
            .lock()
            .accounts
            .insert(account.id, (account, "unused".to_string()));
    }

    pub(crate) fn invitation_statuses(
        &self,
        band_id: Snowflake,
        invited_id: Snowflake,
    ) -> Vec<InvitationStatus> {
        self.state
            .lock()
            .invitations
            .values()
            .filter(|i| i.band_id == band_id && i.invited_id == invited_id)
            .map(|i| i.status)
            .collect()
    }

    pub(crate) fn member_count(&self, band_id: Snowflake) -> usize {
        self.state
            .lock()
            .members
            .values()
            .filter(|m| m.band_id == band_id)
            .count()
    }

    /// Number of member rows inserted, updated or deleted so far
    pub(crate) fn member_writes(&self) -> usize {
        self.state.lock().member_writes
    }
}

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Account>> {
        Ok(self.state.lock().accounts.get(&id).map(|(a, _)| a.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Account>> {
        Ok(self
            .state
            .lock()
            .accounts
            .values()
            .find(|(a, _)| a.email.eq_ignore_ascii_case(email))
            .map(|(a, _)| a.clone()))
    }

    async fn find_by_username_or_email(&self, login: &str) -> RepoResult<Option<Account>> {
        // Email match wins, same as the SQL ordering
        let state = self.state.lock();
        let accounts = &state.accounts;
        Ok(accounts
            .values()
            .find(|(a, _)| a.email.eq_ignore_ascii_case(login))
            .or_else(|| {
                accounts
                    .values()
                    .find(|(a, _)| a.username.eq_ignore_ascii_case(login))
            })
            .map(|(a, _)| a.clone()))
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        Ok(self
            .state
            .lock()
            .accounts
            .values()
            .any(|(a, _)| a.username.eq_ignore_ascii_case(username)))
    }

    async fn create(&self, account: &Account, password_hash: &str) -> RepoResult<()> {
        self.state
            .lock()
            .accounts
            .insert(account.id, (account.clone(), password_hash.to_string()));
        Ok(())
    }

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        Ok(self.state.lock().accounts.get(&id).map(|(_, h)| h.clone()))
    }
}

#[async_trait]
impl BandRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Band>> {
        let state = self.state.lock();
        Ok(state.bands.get(&id).map(|b| state.with_roster(b)))
    }

    async fn find_by_account(
        &self,
        account_id: Snowflake,
        paging: Paging,
    ) -> RepoResult<Vec<Band>> {
        let state = self.state.lock();
        let mut bands: Vec<Band> = state
            .bands
            .values()
            .map(|b| state.with_roster(b))
            .filter(|b| b.can_view(account_id))
            .collect();
        bands.sort_by(|a, b| b.id.cmp(&a.id));

        let offset = usize::try_from(paging.offset).unwrap_or(0);
        let limit = usize::try_from(paging.limit).unwrap_or(0);
        Ok(bands.into_iter().skip(offset).take(limit).collect())
    }

    async fn create(&self, band: &Band) -> RepoResult<()> {
        let mut band = band.clone();
        band.members.clear();
        self.state.lock().bands.insert(band.id, band);
        Ok(())
    }

    async fn update(&self, band: &Band) -> RepoResult<()> {
        let mut state = self.state.lock();
        let stored = state
            .bands
            .get_mut(&band.id)
            .ok_or(DomainError::BandNotFound(band.id))?;
        stored.title.clone_from(&band.title);
        stored.description.clone_from(&band.description);
        stored.logo.clone_from(&band.logo);
        stored.updated_at = band.updated_at;
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state.bands.remove(&id).is_none() {
            return Err(DomainError::BandNotFound(id));
        }
        state.members.retain(|_, m| m.band_id != id);
        state.invitations.retain(|_, i| i.band_id != id);
        Ok(())
    }
}

#[async_trait]
impl MemberRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Member>> {
        Ok(self.state.lock().members.get(&id).cloned())
    }

    async fn create(&self, member: &Member) -> RepoResult<()> {
        self.state.lock().insert_member(member)
    }

    async fn update(&self, member: &Member) -> RepoResult<()> {
        let mut state = self.state.lock();
        let stored = state
            .members
            .get_mut(&member.id)
            .ok_or(DomainError::MemberNotFound(member.id))?;
        stored.role = member.role;
        state.member_writes += 1;
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state.members.remove(&id).is_none() {
            return Err(DomainError::MemberNotFound(id));
        }
        state.member_writes += 1;
        Ok(())
    }
}

#[async_trait]
impl InvitationRepository for MemoryStore {
    async fn find_pending_by_id(&self, id: Snowflake) -> RepoResult<Option<Invitation>> {
        Ok(self
            .state
            .lock()
            .invitations
            .get(&id)
            .filter(|i| i.is_pending())
            .cloned())
    }

    async fn find_pending(
        &self,
        band_id: Snowflake,
        invited_id: Snowflake,
    ) -> RepoResult<Option<Invitation>> {
        Ok(self
            .state
            .lock()
            .invitations
            .values()
            .find(|i| i.band_id == band_id && i.invited_id == invited_id && i.is_pending())
            .cloned())
    }

    async fn find_pending_by_account(
        &self,
        invited_id: Snowflake,
        paging: Paging,
    ) -> RepoResult<Vec<Invitation>> {
        let state = self.state.lock();
        let mut pending: Vec<Invitation> = state
            .invitations
            .values()
            .filter(|i| i.invited_id == invited_id && i.is_pending())
            .cloned()
            .collect();
        pending.sort_by(|a, b| b.id.cmp(&a.id));

        let offset = usize::try_from(paging.offset).unwrap_or(0);
        let limit = usize::try_from(paging.limit).unwrap_or(0);
        Ok(pending.into_iter().skip(offset).take(limit).collect())
    }

    async fn create(&self, invitation: &Invitation) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state.has_pending(invitation.band_id, invitation.invited_id) {
            return Err(DomainError::AlreadyInvited);
        }
        state.invitations.insert(invitation.id, invitation.clone());
        Ok(())
    }

    async fn update(&self, invitation: &Invitation) -> RepoResult<()> {
        self.state.lock().resolve_invitation(invitation)
    }
}

#[async_trait]
impl UnitOfWork for MemoryStore {
    async fn accept_invitation(&self, invitation: &Invitation, member: &Member) -> RepoResult<()> {
        let mut state = self.state.lock();

        // Validate both writes before applying either
        match state.invitations.get(&invitation.id) {
            None => return Err(DomainError::InvitationNotFound(invitation.id)),
            Some(stored) if !stored.is_pending() => {
                return Err(DomainError::InvitationResolved(stored.status));
            }
            Some(_) => {}
        }
        let taken = state
            .members
            .values()
            .any(|m| m.band_id == member.band_id && m.account_id == member.account_id);
        if taken {
            return Err(DomainError::AlreadyMember);
        }

        state.resolve_invitation(invitation)?;
        state.insert_member(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_accept_is_all_or_nothing() {
        let store = MemoryStore::shared();
        let owner = store.add_account("owner");
        let guest = store.add_account("guest");
        let band = Band::new(Snowflake::new(1), "B".into(), "Desc".into(), owner.id);
        BandRepository::create(store.as_ref(), &band).await.unwrap();

        // Guest already on the roster: the member insert would fail
        let existing = Member::new(Snowflake::new(2), band.id, guest.id);
        MemberRepository::create(store.as_ref(), &existing).await.unwrap();

        let mut invitation = Invitation::new(Snowflake::new(3), band.id, guest.id);
        InvitationRepository::create(store.as_ref(), &invitation).await.unwrap();
        invitation
            .respond(band.id, guest.id, InvitationStatus::Accepted)
            .unwrap();

        let member = Member::new(Snowflake::new(4), band.id, guest.id);
        assert!(matches!(
            store.accept_invitation(&invitation, &member).await,
            Err(DomainError::AlreadyMember)
        ));
        assert_eq!(
            store.invitation_statuses(band.id, guest.id),
            vec![InvitationStatus::Pending]
        );
    }
}
