//! Server-authoritative presence roster.
//!
//! The client holds no independent membership state: every
//! `online_users_update` snapshot replaces the whole roster, and the
//! displayed count is the server's integer verbatim, never recomputed from
//! the entry list.

use banter_proto::{RosterUpdate, RosterUser};

/// The displayed presence roster.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    users: Vec<RosterUser>,
    count: usize,
}

impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire roster with a server snapshot.
    pub fn replace(&mut self, update: RosterUpdate) {
        self.users = update.users;
        self.count = update.count;
    }

    /// Present users, in server order.
    pub fn users(&self) -> &[RosterUser] {
        &self.users
    }

    /// Presence count as reported by the server.
    pub fn count(&self) -> usize {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> RosterUser {
        RosterUser { username: name.to_string(), user_id: None }
    }

    #[test]
    fn snapshot_replaces_everything() {
        let mut roster = Roster::new();
        roster.replace(RosterUpdate { users: vec![user("alice"), user("bob")], count: 2 });
        assert_eq!(roster.users().len(), 2);

        roster.replace(RosterUpdate { users: vec![user("carol")], count: 1 });
        assert_eq!(roster.users().len(), 1);
        assert_eq!(roster.users()[0].username, "carol");
        assert_eq!(roster.count(), 1);
    }

    #[test]
    fn identical_snapshot_is_idempotent() {
        let mut roster = Roster::new();
        let update = RosterUpdate { users: vec![user("alice")], count: 1 };
        roster.replace(update.clone());
        let before = roster.clone();
        roster.replace(update);

        assert_eq!(roster.users(), before.users());
        assert_eq!(roster.count(), before.count());
    }

    #[test]
    fn count_is_displayed_verbatim() {
        // The server's integer wins even when it disagrees with the list;
        // consistency is the server's contract, not ours.
        let mut roster = Roster::new();
        roster.replace(RosterUpdate { users: vec![user("alice")], count: 7 });
        assert_eq!(roster.count(), 7);
    }
}
