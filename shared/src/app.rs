use tracing::{debug, error, info, warn};

use crate::api::{self, Api, ApiError};
use crate::capabilities::{Capabilities, HttpResult, RequestBuilder};
use crate::event::Event;
use crate::model::{Card, CardId, Model, SubmitKind, SubmitTicket, UserProfile};
use crate::view::{self, ViewModel};

#[derive(Default)]
pub struct App;

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Self::Event, model: &mut Self::Model, caps: &Self::Capabilities) {
        debug!(event = event.name(), "update");

        match event {
            Event::Configured(config) => {
                info!(base_url = %config.base_url, "api configured");
                model.config = *config;
            }
            Event::Started => Self::start_initial_load(model, caps),

            Event::EditAvatarClicked => {
                model.popups.edit_avatar = true;
                caps.render.render();
            }
            Event::EditProfileClicked => {
                model.popups.edit_profile = true;
                caps.render.render();
            }
            Event::AddPlaceClicked => {
                model.popups.add_place = true;
                caps.render.render();
            }
            Event::CardClicked { card_id } => match model.find_card(&card_id).cloned() {
                Some(card) => {
                    model.selected_card = Some(card);
                    caps.render.render();
                }
                None => warn!(%card_id, "clicked card is not in the list"),
            },
            Event::CloseAllPopups => {
                model.close_all_popups();
                caps.render.render();
            }

            Event::CardLikeClicked { card_id } => Self::toggle_like(card_id, model, caps),
            Event::CardDeleteClicked { card_id } => Self::delete_card(card_id, model, caps),
            Event::DeleteConfirmRequested { card_id } => {
                if model.find_card(&card_id).is_none() {
                    warn!(%card_id, "delete requested for unknown card");
                    return;
                }
                model.pending_delete = Some(card_id);
                model.popups.delete_confirm = true;
                caps.render.render();
            }
            Event::DeleteConfirmed => match model.pending_delete.clone() {
                Some(card_id) => Self::delete_card(card_id, model, caps),
                None => warn!("delete confirmed with no card pending"),
            },

            Event::ProfileSubmitted(form) => {
                if let Err(e) = form.validate() {
                    warn!(error = %e, "profile form rejected");
                    return;
                }
                let request = Api::new(&model.config, &caps.http).edit_user_info(&form);
                Self::submit(SubmitKind::Profile, request, model, caps);
            }
            Event::AvatarSubmitted(form) => {
                if let Err(e) = form.validate() {
                    warn!(error = %e, "avatar form rejected");
                    return;
                }
                let request = Api::new(&model.config, &caps.http).edit_user_avatar(&form);
                Self::submit(SubmitKind::Avatar, request, model, caps);
            }
            Event::PlaceSubmitted(form) => {
                if let Err(e) = form.validate() {
                    warn!(error = %e, "place form rejected");
                    return;
                }
                let request = Api::new(&model.config, &caps.http).add_card(&form);
                Self::submit(SubmitKind::Place, request, model, caps);
            }

            Event::UserInfoResponse(result) => {
                match api::decode::<UserProfile>(*result) {
                    Ok(user) => {
                        if model.record_initial_user(user) {
                            info!(cards = model.cards.len(), "initial data loaded");
                        }
                    }
                    Err(e) => {
                        error!(error = %e, "failed to load user info");
                        model.fail_initial_load();
                    }
                }
                caps.render.render();
            }
            Event::InitialCardsResponse(result) => {
                match api::decode::<Vec<Card>>(*result) {
                    Ok(cards) => {
                        if model.record_initial_cards(cards) {
                            info!(cards = model.cards.len(), "initial data loaded");
                        }
                    }
                    Err(e) => {
                        error!(error = %e, "failed to load cards");
                        model.fail_initial_load();
                    }
                }
                caps.render.render();
            }
            Event::LikeResponse { card_id, result } => match api::decode::<Card>(*result) {
                Ok(card) => {
                    if !model.replace_card(card) {
                        debug!(%card_id, "liked card no longer in the list");
                    }
                    caps.render.render();
                }
                Err(e) => error!(%card_id, error = %e, "failed to change like status"),
            },
            Event::DeleteResponse { card_id, result } => match api::expect_success(*result) {
                Ok(()) => {
                    model.remove_card(&card_id);
                    if model.pending_delete.as_ref() == Some(&card_id) {
                        model.close_all_popups();
                    }
                    caps.render.render();
                }
                Err(e) => error!(%card_id, error = %e, "failed to delete card"),
            },
            Event::SubmitResponse { ticket, result } => {
                Self::complete_submit(ticket, *result, model, caps);
            }
        }
    }

    fn view(&self, model: &Self::Model) -> Self::ViewModel {
        view::build(model)
    }
}

impl App {
    fn start_initial_load(model: &mut Model, caps: &Capabilities) {
        let api = Api::new(&model.config, &caps.http);
        let (user_request, cards_request) = match (api.user_info(), api.initial_cards()) {
            (Ok(user), Ok(cards)) => (user, cards),
            (Err(e), _) | (_, Err(e)) => {
                error!(error = %e, "failed to build initial requests");
                return;
            }
        };

        if !model.begin_initial_load() {
            warn!("initial load already in flight");
            return;
        }

        user_request.send(|result| Event::UserInfoResponse(Box::new(result)));
        cards_request.send(|result| Event::InitialCardsResponse(Box::new(result)));
    }

    fn toggle_like(card_id: CardId, model: &Model, caps: &Capabilities) {
        let Some(card) = model.find_card(&card_id) else {
            warn!(%card_id, "like toggled on unknown card");
            return;
        };
        let like = !model.is_liked(card);

        match Api::new(&model.config, &caps.http).change_like_status(&card_id, like) {
            Ok(request) => request.send(move |result| Event::LikeResponse {
                card_id,
                result: Box::new(result),
            }),
            Err(e) => error!(%card_id, error = %e, "failed to build like request"),
        }
    }

    fn delete_card(card_id: CardId, model: &Model, caps: &Capabilities) {
        if model.find_card(&card_id).is_none() {
            warn!(%card_id, "delete requested for unknown card");
            return;
        }

        match Api::new(&model.config, &caps.http).remove_card(&card_id) {
            Ok(request) => request.send(move |result| Event::DeleteResponse {
                card_id,
                result: Box::new(result),
            }),
            Err(e) => error!(%card_id, error = %e, "failed to build delete request"),
        }
    }

    fn submit(
        kind: SubmitKind,
        request: Result<RequestBuilder<Event>, ApiError>,
        model: &mut Model,
        caps: &Capabilities,
    ) {
        if model.is_loading() {
            warn!(?kind, "submission already in flight");
            return;
        }
        let request = match request {
            Ok(request) => request,
            Err(e) => {
                error!(?kind, error = %e, "failed to build submit request");
                return;
            }
        };
        let Some(ticket) = model.begin_submit(kind) else {
            return;
        };

        request.send(move |result| Event::SubmitResponse {
            ticket,
            result: Box::new(result),
        });
        caps.render.render();
    }

    fn complete_submit(
        ticket: SubmitTicket,
        result: HttpResult,
        model: &mut Model,
        caps: &Capabilities,
    ) {
        let kind = ticket.kind();
        if !model.finish_submit(ticket) {
            warn!(?kind, "response for a submission that is no longer active");
        }

        match kind {
            SubmitKind::Profile | SubmitKind::Avatar => match api::decode::<UserProfile>(result) {
                Ok(user) => {
                    model.current_user = Some(user);
                    model.close_all_popups();
                }
                Err(e) => error!(?kind, error = %e, "failed to update profile"),
            },
            SubmitKind::Place => match api::decode::<Card>(result) {
                Ok(card) => {
                    model.prepend_card(card);
                    model.close_all_popups();
                }
                Err(e) => error!(error = %e, "failed to add card"),
            },
        }

        caps.render.render();
    }
}
