//! Headless core of the Mesto photo-gallery client.
//!
//! The shell renders [`ViewModel`], forwards user actions as [`Event`]s and
//! executes the HTTP requests the core asks for. All state lives in
//! [`Model`] and changes only inside [`App`]'s `update`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::missing_errors_doc)]

pub mod api;
pub mod app;
pub mod capabilities;
pub mod event;
pub mod forms;
pub mod model;
pub mod view;

pub use api::{Api, ApiConfig, ApiError};
pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use event::Event;
pub use forms::{AvatarForm, FieldKind, FieldSpec, FormError, PlaceForm, ProfileForm};
pub use model::{
    Card, CardId, InitialLoad, Model, Popups, SubmitKind, SubmitTicket, UserId, UserProfile,
};
pub use view::ViewModel;
