//! Fake DaslSimulate service for tests

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const SIMULATE_PATH: &str = "/api/Linter/DaslSimulate";

/// What the fake service does with a request
#[derive(Debug, Clone, Copy)]
pub enum Behaviour {
    /// Answer with a simulated history
    Simulate,
    /// Answer with a simulated history missing `newbalance` on the last state
    DropNewBalance,
    /// 500 with a plain text body
    ServerError,
    /// 200 with a plain text body
    PlainText,
    /// Never answer in time
    Hang,
}

/// Request observed by the fake service
#[derive(Debug, Clone)]
pub struct Captured {
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct AppState {
    behaviour: Behaviour,
    captured: Arc<Mutex<Vec<Captured>>>,
}

/// A running fake service
pub struct FakeService {
    pub url: String,
    captured: Arc<Mutex<Vec<Captured>>>,
}

impl FakeService {
    pub async fn start(behaviour: Behaviour) -> Self {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let state = AppState {
            behaviour,
            captured: captured.clone(),
        };
        let router = Router::new()
            .route(SIMULATE_PATH, post(simulate))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            url: format!("http://{}{}", addr, SIMULATE_PATH),
            captured,
        }
    }

    pub fn requests(&self) -> Vec<Captured> {
        self.captured.lock().unwrap().clone()
    }
}

async fn simulate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.captured.lock().unwrap().push(Captured {
        content_type,
        body: body.clone(),
    });

    match state.behaviour {
        Behaviour::Simulate => Json(simulated_history(&body, false)).into_response(),
        Behaviour::DropNewBalance => Json(simulated_history(&body, true)).into_response(),
        Behaviour::ServerError => {
            (StatusCode::INTERNAL_SERVER_ERROR, "An error has occurred.").into_response()
        }
        Behaviour::PlainText => "An error has occurred.".into_response(),
        Behaviour::Hang => {
            tokio::time::sleep(Duration::from_secs(30)).await;
            StatusCode::OK.into_response()
        }
    }
}

/// Answer the way the service does: echo each state with the rule outputs,
/// enums as ordinals and a few fields the client does not model
fn simulated_history(request: &Value, drop_last_new_balance: bool) -> Value {
    let events = request["history"]["events"].as_array().cloned().unwrap_or_default();
    let last = events.len().saturating_sub(1);

    let out: Vec<Value> = events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            let price = event["values"]
                .as_array()
                .and_then(|vals| vals.iter().find(|v| v["name"] == "price"))
                .cloned()
                .unwrap_or(Value::Null);
            let first = i == 0;
            let warming_up = i < 8;
            let sterling = if first { Value::Null } else { json!([100.0]) };
            let settling = i < 2;
            let average3 = if settling { Value::Null } else { json!([1.25]) };
            let average9 = if warming_up { Value::Null } else { json!([1.24, 1.25, 1.26]) };
            let trade = if i % 2 == 0 { "buy" } else { "hold" };

            let mut values = vec![
                price,
                json!({"name": "sterling", "unknown": first, "weight": 1.0,
                       "values": sterling, "dataType": 0, "Value": "", "approximate": false}),
                json!({"name": "tradingrules.average3", "unknown": settling,
                       "values": average3, "dataType": 0}),
                json!({"name": "tradingrules.average9", "unknown": warming_up,
                       "values": average9, "dataType": 0, "approximate": true}),
                json!({"name": "trade", "dataType": 1, "categories": {"buy": 1.0},
                       "Value": trade}),
                json!({"name": "tradingsim.transact", "dataType": 1,
                       "categories": {"open": 1.0}, "Value": "open"}),
            ];
            if !(drop_last_new_balance && i == last) {
                let balance = 10_000.0 + i as f64;
                values.push(json!({"name": "newbalance", "unknown": false,
                                   "values": [balance], "dataType": 0,
                                   "Value": balance.to_string()}));
            }

            json!({"timeStamp": event["timeStamp"], "values": values, "source": "sim"})
        })
        .collect();

    json!({
        "events": out,
        "sampleTime": request["history"]["sampleTime"],
        "description": "simulated",
        "elapsed": 0.42
    })
}
