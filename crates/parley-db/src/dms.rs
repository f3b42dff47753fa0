use std::collections::HashSet;

use parley_types::api::{DmDetailsResponse, DmMessagesResponse};
use parley_types::models::{DmId, DmSummary, UserId};

use crate::error::{Error, Result};
use crate::models::{DataStore, DmRow};

/// Maximum number of messages returned by one call to [`DataStore::dm_messages`].
pub const PAGE_SIZE: usize = 50;

// -- Membership --

impl DmRow {
    pub fn is_member(&self, user_id: UserId) -> bool {
        self.all_members.contains(&user_id)
    }

    /// Only the creator, recorded at index 0, counts as owner. Leaving does
    /// not update this.
    pub fn is_owner(&self, user_id: UserId) -> bool {
        self.owner_members.first() == Some(&user_id)
    }
}

/// Handles sorted ascending and joined with `", "`, so the same participants
/// always produce the same name.
pub fn dm_name<'a>(handles: impl IntoIterator<Item = &'a str>) -> String {
    let mut handles: Vec<&str> = handles.into_iter().collect();
    handles.sort_unstable();
    handles.join(", ")
}

impl DataStore {
    pub fn dm(&self, dm_id: DmId) -> Option<&DmRow> {
        self.dms.iter().find(|dm| dm.id == dm_id)
    }

    pub(crate) fn dm_mut(&mut self, dm_id: DmId) -> Option<&mut DmRow> {
        self.dms.iter_mut().find(|dm| dm.id == dm_id)
    }

    /// The DM and the resolved caller, provided the caller is a current member.
    fn member_dm(&self, token: &str, dm_id: DmId) -> Result<(UserId, &DmRow)> {
        let user_id = self.authenticate(token)?;
        let dm = self.dm(dm_id).ok_or(Error::UnknownDm(dm_id))?;
        if !dm.is_member(user_id) {
            return Err(Error::NotMember);
        }
        Ok((user_id, dm))
    }

    // -- DM manager --

    /// Create a DM owned by the caller with `member_ids` as the other members.
    pub fn create_dm(&mut self, token: &str, member_ids: &[UserId]) -> Result<DmId> {
        let creator = self.authenticate(token)?;

        if let Some(&unknown) = member_ids.iter().find(|id| !self.user_exists(**id)) {
            return Err(Error::UnknownUser(unknown));
        }

        // The creator is seeded so listing yourself also counts as a duplicate.
        let mut seen = HashSet::from([creator]);
        if let Some(&dup) = member_ids.iter().find(|id| !seen.insert(**id)) {
            return Err(Error::DuplicateMember(dup));
        }

        let name = dm_name(
            std::iter::once(creator)
                .chain(member_ids.iter().copied())
                .filter_map(|id| self.handle_of(id)),
        );

        let mut all_members = Vec::with_capacity(member_ids.len() + 1);
        all_members.push(creator);
        all_members.extend_from_slice(member_ids);

        let id = self.next_dm_id();
        self.dms.push(DmRow {
            id,
            name,
            owner_members: vec![creator],
            all_members,
            messages: Vec::new(),
        });

        Ok(id)
    }

    /// Every DM the caller is currently in, in creation order.
    pub fn list_dms(&self, token: &str) -> Result<Vec<DmSummary>> {
        let user_id = self.authenticate(token)?;

        Ok(self
            .dms
            .iter()
            .filter(|dm| dm.is_member(user_id))
            .map(|dm| DmSummary {
                dm_id: dm.id,
                name: dm.name.clone(),
            })
            .collect())
    }

    pub fn dm_details(&self, token: &str, dm_id: DmId) -> Result<DmDetailsResponse> {
        let (_, dm) = self.member_dm(token, dm_id)?;

        let members = dm
            .all_members
            .iter()
            .filter_map(|id| self.user(*id))
            .map(|u| u.to_user())
            .collect();

        Ok(DmDetailsResponse {
            name: dm.name.clone(),
            members,
        })
    }

    /// Delete the DM and its whole log. Owner only.
    pub fn remove_dm(&mut self, token: &str, dm_id: DmId) -> Result<()> {
        let user_id = self.authenticate(token)?;
        let dm = self.dm(dm_id).ok_or(Error::UnknownDm(dm_id))?;
        if !dm.is_owner(user_id) {
            return Err(Error::NotOwner);
        }
        if !dm.is_member(user_id) {
            return Err(Error::NotMember);
        }

        self.dms.retain(|dm| dm.id != dm_id);
        Ok(())
    }

    /// Drop the caller from the member list. The DM itself stays, even when
    /// it ends up empty or the owner is the one leaving.
    pub fn leave_dm(&mut self, token: &str, dm_id: DmId) -> Result<()> {
        let (user_id, _) = self.member_dm(token, dm_id)?;

        if let Some(dm) = self.dm_mut(dm_id) {
            dm.all_members.retain(|id| *id != user_id);
        }
        Ok(())
    }

    // -- Message pager --

    /// Up to [`PAGE_SIZE`] messages starting at `start`, oldest first.
    ///
    /// `end` is `start + PAGE_SIZE` while more messages remain, otherwise -1.
    /// `start == len` is valid and returns an empty, final page.
    pub fn dm_messages(&self, user_id: UserId, dm_id: DmId, start: i64) -> Result<DmMessagesResponse> {
        let dm = self.dm(dm_id).ok_or(Error::UnknownDm(dm_id))?;
        if !self.user_exists(user_id) {
            return Err(Error::UnknownUser(user_id));
        }

        let len = dm.messages.len();
        let offset = usize::try_from(start)
            .ok()
            .filter(|offset| *offset <= len)
            .ok_or(Error::OutOfRangeStart(start))?;

        if !dm.is_member(user_id) {
            return Err(Error::NotMember);
        }

        let (window, end) = if offset + PAGE_SIZE >= len {
            (&dm.messages[offset..], -1)
        } else {
            (&dm.messages[offset..offset + PAGE_SIZE], start + PAGE_SIZE as i64)
        };

        Ok(DmMessagesResponse {
            messages: window.iter().map(|m| m.to_message()).collect(),
            start,
            end,
        })
    }
}
