use crate::gui_bridge::model::SummaryModel;
use crate::workflow::config::PassParams;
use crate::workflow::runner::Runner;
use anyhow::Context;
use serde_json::json;
use shotcore::telemetry::MetricsRecorder;
use shotcore::{CoreError, ShotTable};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

pub fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

/// Shared by every request. The table is never written after load.
#[derive(Clone)]
pub struct BridgeState {
    table: Arc<ShotTable>,
    metrics: Arc<MetricsRecorder>,
}

impl BridgeState {
    pub fn new(table: ShotTable) -> Self {
        Self {
            table: Arc::new(table),
            metrics: Arc::new(MetricsRecorder::new()),
        }
    }
}

fn status_for(err: &anyhow::Error) -> StatusCode {
    match err.downcast_ref::<CoreError>() {
        Some(CoreError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_reply(
    err: anyhow::Error,
    state: &BridgeState,
) -> warp::reply::WithStatus<warp::reply::Json> {
    let status = status_for(&err);
    if status == StatusCode::BAD_REQUEST {
        state.metrics.record_rejected();
        log::warn!("rejected pass: {:#}", err);
    } else {
        log::error!("pass failed: {:#}", err);
    }
    warp::reply::with_status(
        warp::reply::json(&json!({ "status": "error", "error": format!("{:#}", err) })),
        status,
    )
}

async fn summary(params: PassParams, state: BridgeState) -> Result<impl Reply, Infallible> {
    let runner = Runner::new(params);
    match runner.execute(&state.table) {
        Ok(result) => {
            state.metrics.record_pass(result.shots.len());
            Ok(warp::reply::with_status(
                warp::reply::json(&SummaryModel::from(&result)),
                StatusCode::OK,
            ))
        }
        Err(err) => Ok(error_reply(err, &state)),
    }
}

async fn render(params: PassParams, state: BridgeState) -> Result<Box<dyn Reply>, Infallible> {
    let runner = Runner::new(params);
    let png = runner.execute(&state.table).and_then(|result| {
        state.metrics.record_pass(result.shots.len());
        runner.render(&result)
    });
    match png {
        Ok(bytes) => {
            state.metrics.record_render();
            Ok(Box::new(warp::reply::with_header(
                bytes,
                "content-type",
                "image/png",
            )))
        }
        Err(err) => Ok(Box::new(error_reply(err, &state))),
    }
}

pub fn routes(
    state: BridgeState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let with_state = warp::any().map(move || state.clone());

    let summary_route = warp::path("summary")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state.clone())
        .and_then(summary);

    let render_route = warp::path("render")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state.clone())
        .and_then(render);

    let health_route = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_state)
        .map(|state: BridgeState| {
            warp::reply::json(&json!({
                "status": "ok",
                "shots": state.table.len(),
                "metrics": state.metrics.snapshot(),
            }))
        });

    summary_route.or(render_route).or(health_route)
}

/// Serves the bridge until Ctrl+C.
pub async fn serve(state: BridgeState, addr: SocketAddr) -> anyhow::Result<()> {
    let (bound, server) = warp::serve(routes(state))
        .try_bind_with_graceful_shutdown(addr, async {
            if let Err(err) = signal::ctrl_c().await {
                log::error!("failed to listen for Ctrl+C: {}", err);
            }
        })
        .with_context(|| format!("binding HTTP bridge to {}", addr))?;
    log::info!("HTTP bridge listening on {}", bound);
    server.await;
    log::info!("HTTP bridge stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::build_shot_table;
    use crate::workflow::runner::EMPTY_MESSAGE;
    use serde_json::Value;
    use warp::test::request;

    fn state() -> BridgeState {
        BridgeState::new(build_shot_table(2097, 11).unwrap())
    }

    #[tokio::test]
    async fn summary_route_returns_rows() {
        let filter = routes(state());
        let resp = request()
            .method("POST")
            .path("/summary")
            .json(&PassParams::default())
            .reply(&filter)
            .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["player_id"], 2097);
        assert!(body["message"].is_null());
        assert!(!body["summary"].as_array().unwrap().is_empty());
        assert_eq!(body["overview"]["seasons"]["first"], 2014);
    }

    #[tokio::test]
    async fn empty_pass_carries_the_message() {
        let filter = routes(state());
        let params = PassParams {
            start_year: 1990,
            end_year: 1991,
            ..Default::default()
        };
        let resp = request()
            .method("POST")
            .path("/summary")
            .json(&params)
            .reply(&filter)
            .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["shots"], 0);
        assert_eq!(body["message"], EMPTY_MESSAGE);
    }

    #[tokio::test]
    async fn unknown_player_is_a_bad_request() {
        let state = state();
        let filter = routes(state.clone());
        let params = PassParams {
            player_id: 1,
            ..Default::default()
        };
        let resp = request()
            .method("POST")
            .path("/summary")
            .json(&params)
            .reply(&filter)
            .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.metrics.snapshot().rejected, 1);
    }

    #[tokio::test]
    async fn render_route_returns_png() {
        let state = state();
        let filter = routes(state.clone());
        let resp = request()
            .method("POST")
            .path("/render")
            .json(&PassParams::default())
            .reply(&filter)
            .await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "image/png");
        assert!(resp.body().starts_with(&[0x89, b'P', b'N', b'G']));
        let counts = state.metrics.snapshot();
        assert_eq!((counts.passes, counts.empty, counts.renders), (1, 0, 1));
    }

    #[tokio::test]
    async fn empty_render_returns_bare_pitch() {
        let filter = routes(state());
        let params = PassParams {
            start_year: 1990,
            end_year: 1991,
            ..Default::default()
        };
        let resp = request()
            .method("POST")
            .path("/render")
            .json(&params)
            .reply(&filter)
            .await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.body().starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[tokio::test]
    async fn health_reports_counts() {
        let state = state();
        let filter = routes(state.clone());
        request()
            .method("POST")
            .path("/summary")
            .json(&PassParams::default())
            .reply(&filter)
            .await;
        let resp = request().method("GET").path("/health").reply(&filter).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["shots"], 3 * 7 * 40);
        assert_eq!(body["metrics"]["passes"], 1);
    }
}
