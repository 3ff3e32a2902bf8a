use crate::api::ApiConfig;
use crate::capabilities::HttpResult;
use crate::forms::{AvatarForm, PlaceForm, ProfileForm};
use crate::model::{CardId, SubmitTicket};

#[derive(Debug)]
pub enum Event {
    // Lifecycle
    Configured(Box<ApiConfig>),
    Started,

    // Popups
    EditAvatarClicked,
    EditProfileClicked,
    AddPlaceClicked,
    CardClicked {
        card_id: CardId,
    },
    CloseAllPopups,

    // Card actions
    CardLikeClicked {
        card_id: CardId,
    },
    CardDeleteClicked {
        card_id: CardId,
    },
    DeleteConfirmRequested {
        card_id: CardId,
    },
    DeleteConfirmed,

    // Form submissions
    ProfileSubmitted(ProfileForm),
    AvatarSubmitted(AvatarForm),
    PlaceSubmitted(PlaceForm),

    // Capability responses (boxed to keep enum size small)
    UserInfoResponse(Box<HttpResult>),
    InitialCardsResponse(Box<HttpResult>),
    LikeResponse {
        card_id: CardId,
        result: Box<HttpResult>,
    },
    DeleteResponse {
        card_id: CardId,
        result: Box<HttpResult>,
    },
    SubmitResponse {
        ticket: SubmitTicket,
        result: Box<HttpResult>,
    },
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Configured(_) => "configured",
            Self::Started => "started",
            Self::EditAvatarClicked => "edit_avatar_clicked",
            Self::EditProfileClicked => "edit_profile_clicked",
            Self::AddPlaceClicked => "add_place_clicked",
            Self::CardClicked { .. } => "card_clicked",
            Self::CloseAllPopups => "close_all_popups",
            Self::CardLikeClicked { .. } => "card_like_clicked",
            Self::CardDeleteClicked { .. } => "card_delete_clicked",
            Self::DeleteConfirmRequested { .. } => "delete_confirm_requested",
            Self::DeleteConfirmed => "delete_confirmed",
            Self::ProfileSubmitted(_) => "profile_submitted",
            Self::AvatarSubmitted(_) => "avatar_submitted",
            Self::PlaceSubmitted(_) => "place_submitted",
            Self::UserInfoResponse(_) => "user_info_response",
            Self::InitialCardsResponse(_) => "initial_cards_response",
            Self::LikeResponse { .. } => "like_response",
            Self::DeleteResponse { .. } => "delete_response",
            Self::SubmitResponse { .. } => "submit_response",
        }
    }
}
