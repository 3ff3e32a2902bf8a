#![allow(dead_code)]

use crux_core::testing::AppTester;
use crux_core::Request;
use crux_http::protocol::{HttpRequest, HttpResponse, HttpResult};
use mesto_core::{ApiConfig, App, Card, Effect, Event, Model, UserProfile};
use serde_json::{json, Value};

pub const BASE_URL: &str = "https://mesto.example.com/v1/cohort-0";
pub const TOKEN: &str = "c56e30dc-2883-4270-a59e-b2f7bae969c6";

pub fn tester() -> AppTester<App, Effect> {
    AppTester::default()
}

pub fn configured_model(app: &AppTester<App, Effect>) -> Model {
    let mut model = Model::default();
    let _ = app.update(
        Event::Configured(Box::new(ApiConfig::new(BASE_URL).with_token(TOKEN))),
        &mut model,
    );
    model
}

pub fn http_requests(effects: Vec<Effect>) -> Vec<Request<HttpRequest>> {
    effects
        .into_iter()
        .filter_map(|effect| match effect {
            Effect::Http(request) => Some(request),
            _ => None,
        })
        .collect()
}

pub fn single_http(effects: Vec<Effect>) -> Request<HttpRequest> {
    let mut requests = http_requests(effects);
    assert_eq!(requests.len(), 1, "expected exactly one HTTP request");
    requests.remove(0)
}

pub fn renders(effects: &[Effect]) -> bool {
    effects.iter().any(|effect| matches!(effect, Effect::Render(_)))
}

pub fn method(request: &Request<HttpRequest>) -> String {
    request.operation.method.to_uppercase()
}

pub fn path(request: &Request<HttpRequest>) -> String {
    request
        .operation
        .url
        .trim_start_matches(BASE_URL)
        .to_string()
}

pub fn header<'a>(request: &'a Request<HttpRequest>, name: &str) -> Option<&'a str> {
    request
        .operation
        .headers
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case(name))
        .map(|h| h.value.as_str())
}

pub fn body_json(request: &Request<HttpRequest>) -> Value {
    serde_json::from_slice(&request.operation.body).expect("json body")
}

pub fn ok_json(body: Value) -> HttpResponse {
    respond(200, &body)
}

pub fn respond(status: u16, body: &Value) -> HttpResponse {
    HttpResponse::status(status)
        .body(serde_json::to_vec(body).expect("serializable body"))
        .build()
}

/// Resolves a pending request and feeds the resulting events back into the
/// app, returning the effects those events produced.
pub fn resolve(
    app: &AppTester<App, Effect>,
    request: &mut Request<HttpRequest>,
    response: HttpResponse,
    model: &mut Model,
) -> Vec<Effect> {
    let update = app.resolve(request, HttpResult::Ok(response)).expect("request resolves");
    let mut effects = Vec::new();
    for event in update.events {
        effects.extend(app.update(event, model).effects);
    }
    effects
}

pub fn user_json(id: &str, name: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "about": "Исследователь океана",
        "avatar": format!("https://images.example.com/{id}.png"),
        "cohort": "cohort-0"
    })
}

pub fn card_json(id: &str, owner: &str, likes: &[&str]) -> Value {
    json!({
        "_id": id,
        "name": format!("Место {id}"),
        "link": format!("https://images.example.com/{id}.jpg"),
        "owner": user_json(owner, "Владелец"),
        "likes": likes.iter().map(|liker| user_json(liker, "Поклонник")).collect::<Vec<_>>(),
        "createdAt": "2024-03-01T10:00:00.000Z"
    })
}

pub fn user(id: &str, name: &str) -> UserProfile {
    serde_json::from_value(user_json(id, name)).expect("valid user")
}

pub fn card(id: &str, owner: &str, likes: &[&str]) -> Card {
    serde_json::from_value(card_json(id, owner, likes)).expect("valid card")
}

/// A configured model as it looks after a successful initial load.
pub fn loaded_model(app: &AppTester<App, Effect>, me: &str, cards: Vec<Card>) -> Model {
    let mut model = configured_model(app);
    model.current_user = Some(user(me, "Жак-Ив Кусто"));
    model.cards = cards;
    model
}

/// Removes the request addressed to `target` (path relative to the base URL).
pub fn take_request(requests: &mut Vec<Request<HttpRequest>>, target: &str) -> Request<HttpRequest> {
    let index = requests
        .iter()
        .position(|request| path(request) == target)
        .unwrap_or_else(|| panic!("no request for {target}"));
    requests.remove(index)
}
