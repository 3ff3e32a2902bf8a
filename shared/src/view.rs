//! The read-only snapshot the shell renders: profile header, card grid and
//! the five popups.

use serde::{Deserialize, Serialize};

use crate::forms::{AvatarForm, FieldKind, FieldSpec, PlaceForm, ProfileForm};
use crate::model::{Card, Model, SubmitKind};

/// UI copy.
pub mod labels {
    pub const EDIT_PROFILE_TITLE: &str = "Редактировать профиль";
    pub const EDIT_AVATAR_TITLE: &str = "Обновить аватар";
    pub const ADD_PLACE_TITLE: &str = "Новое место";
    pub const DELETE_CONFIRM_TITLE: &str = "Вы уверены?";

    pub const SAVE: &str = "Сохранить";
    pub const CREATE: &str = "Создать";
    pub const CONFIRM: &str = "Да";
    pub const SAVING: &str = "Сохранение...";
    pub const CLOSE: &str = "Закрыть";

    pub const PLACEHOLDER_NAME: &str = "Имя";
    pub const PLACEHOLDER_ABOUT: &str = "О себе";
    pub const PLACEHOLDER_PLACE_NAME: &str = "Название";
    pub const PLACEHOLDER_LINK: &str = "Ссылка на картинку";
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FieldView {
    pub name: String,
    pub kind: FieldKind,
    pub placeholder: String,
    pub value: String,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl FieldView {
    fn new(spec: &FieldSpec, value: impl Into<String>) -> Self {
        Self {
            name: spec.name.to_string(),
            kind: spec.kind,
            placeholder: spec.placeholder.to_string(),
            value: value.into(),
            required: spec.required,
            min_length: spec.min_length,
            max_length: spec.max_length,
        }
    }

    fn empty(spec: &FieldSpec) -> Self {
        Self::new(spec, String::new())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PopupView {
    /// Stable identifier the shell can use for styling, e.g. `edit-profile`.
    pub name: String,
    pub title: String,
    pub button_label: String,
    pub close_label: String,
    pub is_open: bool,
    pub fields: Vec<FieldView>,
}

impl PopupView {
    fn new(name: &str, title: &str, button_label: &str, is_open: bool, fields: Vec<FieldView>) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            button_label: button_label.to_string(),
            close_label: labels::CLOSE.to_string(),
            is_open,
            fields,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ImagePopupView {
    pub is_open: bool,
    pub name: String,
    pub link: String,
    pub close_label: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ProfileView {
    pub name: String,
    pub about: String,
    pub avatar: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CardView {
    pub id: String,
    pub name: String,
    pub link: String,
    pub like_count: usize,
    pub is_liked: bool,
    pub is_deletable: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ViewModel {
    /// `None` until the initial fetch has completed.
    pub profile: Option<ProfileView>,
    pub cards: Vec<CardView>,
    pub edit_profile: PopupView,
    pub edit_avatar: PopupView,
    pub add_place: PopupView,
    pub delete_confirm: PopupView,
    pub image: ImagePopupView,
    pub is_loading: bool,
}

fn button_label(model: &Model, kind: SubmitKind, idle: &str) -> String {
    if model.submitting() == Some(kind) {
        labels::SAVING.to_string()
    } else {
        idle.to_string()
    }
}

fn card_view(model: &Model, card: &Card) -> CardView {
    CardView {
        id: card.id.to_string(),
        name: card.name.clone(),
        link: card.link.clone(),
        like_count: card.likes.len(),
        is_liked: model.is_liked(card),
        is_deletable: model.is_owned(card),
    }
}

#[must_use]
pub fn build(model: &Model) -> ViewModel {
    let profile = model.current_user.as_ref().map(|user| ProfileView {
        name: user.name.clone(),
        about: user.about.clone(),
        avatar: user.avatar.clone(),
    });

    let (current_name, current_about) = model
        .current_user
        .as_ref()
        .map(|user| (user.name.as_str(), user.about.as_str()))
        .unwrap_or_default();

    let [name_spec, about_spec] = &ProfileForm::FIELDS;
    let edit_profile = PopupView::new(
        "edit-profile",
        labels::EDIT_PROFILE_TITLE,
        &button_label(model, SubmitKind::Profile, labels::SAVE),
        model.popups.edit_profile,
        vec![
            FieldView::new(name_spec, current_name),
            FieldView::new(about_spec, current_about),
        ],
    );

    let edit_avatar = PopupView::new(
        "edit-avatar",
        labels::EDIT_AVATAR_TITLE,
        &button_label(model, SubmitKind::Avatar, labels::SAVE),
        model.popups.edit_avatar,
        AvatarForm::FIELDS.iter().map(FieldView::empty).collect(),
    );

    let add_place = PopupView::new(
        "add-place",
        labels::ADD_PLACE_TITLE,
        &button_label(model, SubmitKind::Place, labels::CREATE),
        model.popups.add_place,
        PlaceForm::FIELDS.iter().map(FieldView::empty).collect(),
    );

    let delete_confirm = PopupView::new(
        "delete",
        labels::DELETE_CONFIRM_TITLE,
        labels::CONFIRM,
        model.popups.delete_confirm,
        Vec::new(),
    );

    let image = match &model.selected_card {
        Some(card) => ImagePopupView {
            is_open: !card.name.is_empty(),
            name: card.name.clone(),
            link: card.link.clone(),
            close_label: labels::CLOSE.to_string(),
        },
        None => ImagePopupView {
            is_open: false,
            name: String::new(),
            link: String::new(),
            close_label: labels::CLOSE.to_string(),
        },
    };

    ViewModel {
        profile,
        cards: model.cards.iter().map(|card| card_view(model, card)).collect(),
        edit_profile,
        edit_avatar,
        add_place,
        delete_confirm,
        image,
        is_loading: model.is_loading(),
    }
}
