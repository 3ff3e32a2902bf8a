use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::api::ApiConfig;

// --- Typed IDs ---

macro_rules! typed_id {
    ($name:ident) => {
        #[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

typed_id!(UserId);
typed_id!(CardId);

// --- Server entities ---

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub avatar: String,
}

/// Users inside a card payload arrive either populated or as a bare id.
#[derive(Deserialize)]
#[serde(untagged)]
enum UserRef {
    Id(UserId),
    Profile(UserProfile),
}

impl From<UserRef> for UserProfile {
    fn from(value: UserRef) -> Self {
        match value {
            UserRef::Id(id) => UserProfile {
                id,
                ..UserProfile::default()
            },
            UserRef::Profile(profile) => profile,
        }
    }
}

fn user_ref<'de, D: Deserializer<'de>>(deserializer: D) -> Result<UserProfile, D::Error> {
    UserRef::deserialize(deserializer).map(Into::into)
}

fn user_refs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<UserProfile>, D::Error> {
    Vec::<UserRef>::deserialize(deserializer).map(|refs| refs.into_iter().map(Into::into).collect())
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Card {
    #[serde(rename = "_id")]
    pub id: CardId,
    pub name: String,
    pub link: String,
    #[serde(deserialize_with = "user_ref")]
    pub owner: UserProfile,
    #[serde(default, deserialize_with = "user_refs")]
    pub likes: Vec<UserProfile>,
    #[serde(default, rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Card {
    #[must_use]
    pub fn is_liked_by(&self, user_id: &UserId) -> bool {
        self.likes.iter().any(|user| &user.id == user_id)
    }

    #[must_use]
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner.id == user_id
    }
}

// --- UI state ---

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Popups {
    pub edit_avatar: bool,
    pub edit_profile: bool,
    pub add_place: bool,
    pub delete_confirm: bool,
}

impl Popups {
    #[must_use]
    pub fn any_open(&self) -> bool {
        self.edit_avatar || self.edit_profile || self.add_place || self.delete_confirm
    }

    pub fn close_all(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitKind {
    Profile,
    Avatar,
    Place,
}

/// Proof that a form submission is in flight. Not `Clone`: the response
/// event carries it and [`Model::finish_submit`] consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct SubmitTicket {
    id: u64,
    kind: SubmitKind,
}

impl SubmitTicket {
    #[must_use]
    pub fn kind(&self) -> SubmitKind {
        self.kind
    }
}

#[derive(Debug, Default)]
struct Submission {
    next_id: u64,
    active: Option<(u64, SubmitKind)>,
}

/// Progress of the combined `(user, cards)` startup fetch.
#[derive(Debug, Default, PartialEq, Eq)]
pub enum InitialLoad {
    #[default]
    Idle,
    Pending {
        user: Option<UserProfile>,
        cards: Option<Vec<Card>>,
    },
    Failed,
    Done,
}

#[derive(Debug, Default)]
pub struct Model {
    pub config: ApiConfig,

    pub current_user: Option<UserProfile>,
    pub cards: Vec<Card>,

    pub popups: Popups,
    pub selected_card: Option<Card>,
    pub pending_delete: Option<CardId>,

    pub initial_load: InitialLoad,
    submission: Submission,
}

impl Model {
    #[must_use]
    pub fn find_card(&self, card_id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|card| &card.id == card_id)
    }

    /// Whether the current user is among the card's likers. Always false
    /// before the profile is loaded.
    #[must_use]
    pub fn is_liked(&self, card: &Card) -> bool {
        self.current_user
            .as_ref()
            .is_some_and(|user| card.is_liked_by(&user.id))
    }

    #[must_use]
    pub fn is_owned(&self, card: &Card) -> bool {
        self.current_user
            .as_ref()
            .is_some_and(|user| card.is_owned_by(&user.id))
    }

    /// Swaps in the server's copy of a card, keeping its position.
    pub fn replace_card(&mut self, card: Card) -> bool {
        match self.cards.iter_mut().find(|c| c.id == card.id) {
            Some(slot) => {
                *slot = card;
                true
            }
            None => false,
        }
    }

    pub fn remove_card(&mut self, card_id: &CardId) -> Option<Card> {
        let index = self.cards.iter().position(|card| &card.id == card_id)?;
        Some(self.cards.remove(index))
    }

    pub fn prepend_card(&mut self, card: Card) {
        self.cards.insert(0, card);
    }

    pub fn close_all_popups(&mut self) {
        self.popups.close_all();
        self.selected_card = None;
        self.pending_delete = None;
    }

    // --- Loading flag ---

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.submission.active.is_some()
    }

    #[must_use]
    pub fn submitting(&self) -> Option<SubmitKind> {
        self.submission.active.map(|(_, kind)| kind)
    }

    /// Raises the loading flag. Returns `None` while another submission is
    /// still in flight.
    pub fn begin_submit(&mut self, kind: SubmitKind) -> Option<SubmitTicket> {
        if self.submission.active.is_some() {
            return None;
        }
        let id = self.submission.next_id;
        self.submission.next_id = self.submission.next_id.wrapping_add(1);
        self.submission.active = Some((id, kind));
        Some(SubmitTicket { id, kind })
    }

    /// Lowers the loading flag if `ticket` belongs to the active submission.
    pub fn finish_submit(&mut self, ticket: SubmitTicket) -> bool {
        match self.submission.active {
            Some((id, _)) if id == ticket.id => {
                self.submission.active = None;
                true
            }
            _ => false,
        }
    }

    // --- Initial load ---

    /// Returns false when a load is already in flight.
    pub fn begin_initial_load(&mut self) -> bool {
        if matches!(self.initial_load, InitialLoad::Pending { .. }) {
            return false;
        }
        self.initial_load = InitialLoad::Pending {
            user: None,
            cards: None,
        };
        true
    }

    /// Stores the user half of the initial fetch. Returns true once both
    /// halves have arrived and were committed to the model.
    pub fn record_initial_user(&mut self, profile: UserProfile) -> bool {
        if let InitialLoad::Pending { user, .. } = &mut self.initial_load {
            *user = Some(profile);
        }
        self.commit_initial_load()
    }

    pub fn record_initial_cards(&mut self, list: Vec<Card>) -> bool {
        if let InitialLoad::Pending { cards, .. } = &mut self.initial_load {
            *cards = Some(list);
        }
        self.commit_initial_load()
    }

    /// Drops whatever half already arrived. The other half, when it lands,
    /// is ignored.
    pub fn fail_initial_load(&mut self) {
        if matches!(self.initial_load, InitialLoad::Pending { .. }) {
            self.initial_load = InitialLoad::Failed;
        }
    }

    fn commit_initial_load(&mut self) -> bool {
        if !matches!(
            self.initial_load,
            InitialLoad::Pending {
                user: Some(_),
                cards: Some(_)
            }
        ) {
            return false;
        }

        if let InitialLoad::Pending {
            user: Some(user),
            cards: Some(cards),
        } = std::mem::replace(&mut self.initial_load, InitialLoad::Done)
        {
            self.current_user = Some(user);
            self.cards = cards;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn user(id: &str) -> UserProfile {
        UserProfile {
            id: UserId::new(id),
            name: format!("user {id}"),
            ..UserProfile::default()
        }
    }

    fn card(id: &str) -> Card {
        Card {
            id: CardId::new(id),
            name: format!("card {id}"),
            link: format!("https://images.example.com/{id}.jpg"),
            owner: user("owner"),
            likes: Vec::new(),
            created_at: None,
        }
    }

    #[test]
    fn card_parses_populated_users() {
        let json = serde_json::json!({
            "_id": "c1",
            "name": "Архыз",
            "link": "https://images.example.com/arkhyz.jpg",
            "owner": {"_id": "u2", "name": "Жак", "about": "Исследователь", "avatar": "https://a/b.png"},
            "likes": [{"_id": "u1", "name": "Кто-то"}],
            "createdAt": "2024-01-01T00:00:00.000Z"
        });

        let card: Card = serde_json::from_value(json).unwrap();
        assert_eq!(card.owner.name, "Жак");
        assert!(card.is_liked_by(&UserId::new("u1")));
        assert!(card.is_owned_by(&UserId::new("u2")));
        assert_eq!(card.created_at.as_deref(), Some("2024-01-01T00:00:00.000Z"));
    }

    #[test]
    fn card_parses_bare_user_ids() {
        let json = serde_json::json!({
            "_id": "c1",
            "name": "Байкал",
            "link": "https://images.example.com/baikal.jpg",
            "owner": "u2",
            "likes": ["u1", "u3"]
        });

        let card: Card = serde_json::from_value(json).unwrap();
        assert_eq!(card.owner.id, UserId::new("u2"));
        assert_eq!(card.likes.len(), 2);
        assert!(card.is_liked_by(&UserId::new("u3")));
        assert!(!card.is_liked_by(&UserId::new("u2")));
    }

    #[test]
    fn card_without_likes_defaults_to_empty() {
        let json = serde_json::json!({
            "_id": "c1", "name": "n", "link": "https://x.example/y.png", "owner": "u1"
        });
        let card: Card = serde_json::from_value(json).unwrap();
        assert!(card.likes.is_empty());
    }

    #[test]
    fn is_liked_requires_loaded_user() {
        let mut model = Model::default();
        let mut liked = card("c1");
        liked.likes.push(user("u1"));

        assert!(!model.is_liked(&liked));
        model.current_user = Some(user("u1"));
        assert!(model.is_liked(&liked));
    }

    #[test]
    fn close_all_is_idempotent() {
        let mut model = Model::default();
        model.close_all_popups();
        assert_eq!(model.popups, Popups::default());
        assert!(model.selected_card.is_none());

        model.popups.edit_profile = true;
        model.selected_card = Some(card("c1"));
        model.pending_delete = Some(CardId::new("c1"));
        model.close_all_popups();
        model.close_all_popups();
        assert!(!model.popups.any_open());
        assert!(model.selected_card.is_none());
        assert!(model.pending_delete.is_none());
    }

    #[test]
    fn submit_ticket_blocks_second_submission() {
        let mut model = Model::default();
        let ticket = model.begin_submit(SubmitKind::Profile).unwrap();
        assert!(model.is_loading());
        assert_eq!(model.submitting(), Some(SubmitKind::Profile));
        assert!(model.begin_submit(SubmitKind::Avatar).is_none());

        assert!(model.finish_submit(ticket));
        assert!(!model.is_loading());

        let next = model.begin_submit(SubmitKind::Avatar).unwrap();
        assert_eq!(next.kind(), SubmitKind::Avatar);
    }

    #[test]
    fn stale_ticket_does_not_clear_newer_submission() {
        let mut model = Model::default();
        let first = model.begin_submit(SubmitKind::Profile).unwrap();
        let forged = SubmitTicket {
            id: first.id + 1,
            kind: SubmitKind::Profile,
        };
        assert!(!model.finish_submit(forged));
        assert!(model.is_loading());
        assert!(model.finish_submit(first));
    }

    #[test]
    fn initial_load_commits_only_when_both_halves_arrive() {
        let mut model = Model::default();
        assert!(model.begin_initial_load());
        assert!(!model.begin_initial_load());

        assert!(!model.record_initial_cards(vec![card("c1")]));
        assert!(model.current_user.is_none());
        assert!(model.cards.is_empty());

        assert!(model.record_initial_user(user("u1")));
        assert_eq!(model.current_user, Some(user("u1")));
        assert_eq!(model.cards, vec![card("c1")]);
        assert_eq!(model.initial_load, InitialLoad::Done);
    }

    #[test]
    fn failed_initial_load_discards_arrived_half() {
        let mut model = Model::default();
        model.begin_initial_load();
        model.record_initial_user(user("u1"));
        model.fail_initial_load();

        assert!(!model.record_initial_cards(vec![card("c1")]));
        assert!(model.current_user.is_none());
        assert!(model.cards.is_empty());
        assert_eq!(model.initial_load, InitialLoad::Failed);
    }

    fn ids() -> impl Strategy<Value = Vec<String>> {
        prop::collection::hash_set("[a-f0-9]{6}", 1..20).prop_map(|set| set.into_iter().collect())
    }

    proptest! {
        #[test]
        fn remove_card_drops_exactly_one_and_keeps_order(ids in ids(), pick in any::<prop::sample::Index>()) {
            let mut model = Model::default();
            model.cards = ids.iter().map(|id| card(id)).collect();
            let target = CardId::new(pick.get(&ids).clone());

            let removed = model.remove_card(&target);

            prop_assert_eq!(removed.map(|c| c.id), Some(target.clone()));
            let expected: Vec<CardId> = ids
                .iter()
                .filter(|id| id.as_str() != target.as_str())
                .map(|id| CardId::new(id.clone()))
                .collect();
            let actual: Vec<CardId> = model.cards.iter().map(|c| c.id.clone()).collect();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn replace_card_touches_only_matching_entry(ids in ids(), pick in any::<prop::sample::Index>()) {
            let mut model = Model::default();
            model.cards = ids.iter().map(|id| card(id)).collect();
            let before = model.cards.clone();
            let index = pick.index(ids.len());

            let mut updated = before[index].clone();
            updated.likes.push(user("u1"));
            prop_assert!(model.replace_card(updated.clone()));

            for (i, (old, new)) in before.iter().zip(&model.cards).enumerate() {
                if i == index {
                    prop_assert_eq!(new, &updated);
                } else {
                    prop_assert_eq!(new, old);
                }
            }
        }

        #[test]
        fn replace_unknown_card_is_a_no_op(ids in ids()) {
            let mut model = Model::default();
            model.cards = ids.iter().map(|id| card(id)).collect();
            let before = model.cards.clone();

            prop_assert!(!model.replace_card(card("not-a-hex-id")));
            prop_assert_eq!(model.cards, before);
        }
    }
}
