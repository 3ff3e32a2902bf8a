use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::view::labels;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Url,
}

/// An input of a popup form together with the constraints the browser
/// enforces on it (`required`, `minlength`, `maxlength`, `type="url"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub placeholder: &'static str,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("field '{field}' is required")]
    Missing { field: &'static str },

    #[error("field '{field}' is too short ({len} < {min})")]
    TooShort {
        field: &'static str,
        len: usize,
        min: usize,
    },

    #[error("field '{field}' is too long ({len} > {max})")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("field '{field}' is not a valid URL")]
    InvalidUrl { field: &'static str },
}

impl FieldSpec {
    pub fn check(&self, value: &str) -> Result<(), FormError> {
        if value.is_empty() {
            return if self.required {
                Err(FormError::Missing { field: self.name })
            } else {
                Ok(())
            };
        }

        let len = value.chars().count();
        if let Some(min) = self.min_length {
            if len < min {
                return Err(FormError::TooShort {
                    field: self.name,
                    len,
                    min,
                });
            }
        }
        if let Some(max) = self.max_length {
            if len > max {
                return Err(FormError::TooLong {
                    field: self.name,
                    len,
                    max,
                });
            }
        }

        if self.kind == FieldKind::Url && Url::parse(value).is_err() {
            return Err(FormError::InvalidUrl { field: self.name });
        }

        Ok(())
    }
}

pub const PROFILE_NAME: FieldSpec = FieldSpec {
    name: "name",
    kind: FieldKind::Text,
    placeholder: labels::PLACEHOLDER_NAME,
    required: true,
    min_length: Some(2),
    max_length: Some(40),
};

pub const PROFILE_ABOUT: FieldSpec = FieldSpec {
    name: "about",
    kind: FieldKind::Text,
    placeholder: labels::PLACEHOLDER_ABOUT,
    required: true,
    min_length: Some(2),
    max_length: Some(200),
};

pub const AVATAR_LINK: FieldSpec = FieldSpec {
    name: "avatar",
    kind: FieldKind::Url,
    placeholder: labels::PLACEHOLDER_LINK,
    required: true,
    min_length: None,
    max_length: None,
};

pub const PLACE_NAME: FieldSpec = FieldSpec {
    name: "placename",
    kind: FieldKind::Text,
    placeholder: labels::PLACEHOLDER_PLACE_NAME,
    required: true,
    min_length: Some(2),
    max_length: Some(30),
};

pub const PLACE_LINK: FieldSpec = FieldSpec {
    name: "placelink",
    kind: FieldKind::Url,
    placeholder: labels::PLACEHOLDER_LINK,
    required: true,
    min_length: None,
    max_length: None,
};

/// Body of `PATCH /users/me`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub about: String,
}

impl ProfileForm {
    pub const FIELDS: [FieldSpec; 2] = [PROFILE_NAME, PROFILE_ABOUT];

    pub fn validate(&self) -> Result<(), FormError> {
        PROFILE_NAME.check(&self.name)?;
        PROFILE_ABOUT.check(&self.about)
    }
}

/// Body of `PATCH /users/me/avatar`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AvatarForm {
    pub avatar: String,
}

impl AvatarForm {
    pub const FIELDS: [FieldSpec; 1] = [AVATAR_LINK];

    pub fn validate(&self) -> Result<(), FormError> {
        AVATAR_LINK.check(&self.avatar)
    }
}

/// Body of `POST /cards`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PlaceForm {
    pub name: String,
    pub link: String,
}

impl PlaceForm {
    pub const FIELDS: [FieldSpec; 2] = [PLACE_NAME, PLACE_LINK];

    pub fn validate(&self) -> Result<(), FormError> {
        PLACE_NAME.check(&self.name)?;
        PLACE_LINK.check(&self.link)
    }
}
