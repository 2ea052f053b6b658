use axum::{
    Router,
    extract::{Json, Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, patch, put},
};
use chrono::{Datelike, Local};
use clap::Parser;
use log::info;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use crate::core::{
    ChartPoint, Params, Project, Projection, chart_age_ticks, run_projection_for_year,
};
use crate::store::{ProjectStore, ProjectUpdate};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectionPayload {
    current_age: Option<u32>,
    retirement_age: Option<u32>,
    desired_income: Option<f64>,
    other_incomes: Option<f64>,
    monthly_investment: Option<f64>,
    accumulation_rate: Option<f64>,
    post_retirement_rate: Option<f64>,

    base_year: Option<i32>,
    projects: Option<Vec<Project>>,
}

#[derive(Parser, Debug)]
#[command(
    name = "futuro",
    about = "Retirement wealth projector (net worth trajectory, life projects, contribution goal)"
)]
struct Cli {
    #[arg(long, default_value_t = 22, help = "Current age in years")]
    current_age: u32,
    #[arg(long, default_value_t = 51, help = "Planned retirement age")]
    retirement_age: u32,
    #[arg(
        long,
        default_value_t = 5700.0,
        help = "Desired monthly income in retirement"
    )]
    desired_income: f64,
    #[arg(
        long,
        default_value_t = 1300.0,
        help = "Other expected monthly income in retirement (pensions, rents)"
    )]
    other_incomes: f64,
    #[arg(
        long,
        default_value_t = 1060.0,
        help = "Monthly investment during accumulation"
    )]
    monthly_investment: f64,
    #[arg(
        long,
        default_value_t = 6.0,
        help = "Expected annual return before retirement in percent, e.g. 6"
    )]
    accumulation_rate: f64,
    #[arg(
        long,
        default_value_t = 4.0,
        help = "Expected annual return after retirement in percent, e.g. 4"
    )]
    post_retirement_rate: f64,
}

#[derive(Debug)]
struct ProjectionOptions {
    base_year: Option<i32>,
    projects: Option<Vec<Project>>,
}

#[derive(Debug)]
struct ApiRequest {
    params: Params,
    options: ProjectionOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionResponse {
    params: Params,
    base_year: i32,
    ideal_retirement_capital: f64,
    monthly_contribution_needed: f64,
    final_patrimony: f64,
    target_age: u32,
    age_ticks: Vec<u32>,
    series: Vec<ChartPoint>,
}

#[derive(Debug, Serialize)]
struct DeleteResponse {
    deleted: bool,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_params(cli: Cli) -> Result<Params, String> {
    if cli.current_age > 100 {
        return Err("--current-age must be <= 100".to_string());
    }

    if cli.retirement_age < cli.current_age {
        return Err("--retirement-age must be >= --current-age".to_string());
    }

    for (name, value) in [
        ("--desired-income", cli.desired_income),
        ("--other-incomes", cli.other_incomes),
        ("--monthly-investment", cli.monthly_investment),
    ] {
        if !(0.0..=1_000_000_000.0).contains(&value) {
            return Err(format!("{name} must be >= 0 and <= 1000000000"));
        }
    }

    for (name, rate) in [
        ("--accumulation-rate", cli.accumulation_rate),
        ("--post-retirement-rate", cli.post_retirement_rate),
    ] {
        if !rate.is_finite() || rate <= -100.0 || rate > 100.0 {
            return Err(format!("{name} must be > -100 and <= 100"));
        }
    }

    Ok(Params {
        current_age: cli.current_age,
        retirement_age: cli.retirement_age,
        desired_income: cli.desired_income,
        other_incomes: cli.other_incomes,
        monthly_investment: cli.monthly_investment,
        accumulation_rate: cli.accumulation_rate,
        post_retirement_rate: cli.post_retirement_rate,
    })
}

fn default_cli_for_api() -> Cli {
    Cli {
        current_age: 22,
        retirement_age: 51,
        desired_income: 5_700.0,
        other_incomes: 1_300.0,
        monthly_investment: 1_060.0,
        accumulation_rate: 6.0,
        post_retirement_rate: 4.0,
    }
}

#[derive(Clone)]
struct AppState {
    store: Arc<Mutex<ProjectStore>>,
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let state = AppState {
        store: Arc::new(Mutex::new(ProjectStore::new())),
    };
    let app = Router::new()
        .route(
            "/api/projection",
            get(projection_get_handler).post(projection_post_handler),
        )
        .route(
            "/api/projects",
            get(list_projects_handler).post(create_project_handler),
        )
        .route(
            "/api/projects/:id",
            put(update_project_handler).delete(delete_project_handler),
        )
        .route("/api/projects/toggle/:id", patch(toggle_project_handler))
        .fallback(not_found_handler)
        .with_state(state);

    let listener = TcpListener::bind(addr).await?;
    println!("Futuro HTTP API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/");
    info!("listening on {addr}");

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn projection_get_handler(
    State(state): State<AppState>,
    Query(payload): Query<ProjectionPayload>,
) -> Response {
    projection_handler_impl(state, payload).await
}

async fn projection_post_handler(
    State(state): State<AppState>,
    Json(payload): Json<ProjectionPayload>,
) -> Response {
    projection_handler_impl(state, payload).await
}

async fn projection_handler_impl(state: AppState, payload: ProjectionPayload) -> Response {
    let request = match api_request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => return error_response(StatusCode::BAD_REQUEST, &msg),
    };

    let base_year = request
        .options
        .base_year
        .unwrap_or_else(|| Local::now().year());
    let projects = match request.options.projects {
        Some(projects) => projects,
        None => {
            let store = state.store.lock().expect("store lock poisoned");
            store.list().to_vec()
        }
    };

    let projection = run_projection_for_year(&request.params, &projects, base_year);
    json_response(
        StatusCode::OK,
        build_projection_response(request.params, base_year, projection),
    )
}

async fn list_projects_handler(State(state): State<AppState>) -> Response {
    let store = state.store.lock().expect("store lock poisoned");
    json_response(StatusCode::OK, store.list())
}

async fn create_project_handler(
    State(state): State<AppState>,
    Json(project): Json<Project>,
) -> Response {
    if let Err(msg) = validate_project(&project) {
        return error_response(StatusCode::BAD_REQUEST, &msg);
    }

    let mut store = state.store.lock().expect("store lock poisoned");
    let stored = store.add(project);
    info!("project {} created", stored.id);
    json_response(StatusCode::CREATED, stored)
}

async fn update_project_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<ProjectUpdate>,
) -> Response {
    if let Err(msg) = validate_update(&update) {
        return error_response(StatusCode::BAD_REQUEST, &msg);
    }

    let mut store = state.store.lock().expect("store lock poisoned");
    match store.update(&id, update) {
        Some(project) => {
            info!("project {id} updated");
            json_response(StatusCode::OK, project)
        }
        None => error_response(StatusCode::NOT_FOUND, "Project not found"),
    }
}

async fn toggle_project_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let mut store = state.store.lock().expect("store lock poisoned");
    match store.toggle_active(&id) {
        Some(project) => {
            info!("project {id} active={}", project.is_active);
            json_response(StatusCode::OK, project)
        }
        None => error_response(StatusCode::NOT_FOUND, "Project not found"),
    }
}

async fn delete_project_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let mut store = state.store.lock().expect("store lock poisoned");
    if store.remove(&id) {
        info!("project {id} removed");
        json_response(StatusCode::OK, DeleteResponse { deleted: true })
    } else {
        error_response(StatusCode::NOT_FOUND, "Project not found")
    }
}

fn validate_project(project: &Project) -> Result<(), String> {
    if project.name.trim().is_empty() {
        return Err("project name must not be empty".to_string());
    }
    if !project.total_value.is_finite() || project.total_value < 0.0 {
        return Err("project totalValue must be >= 0".to_string());
    }
    Ok(())
}

fn validate_update(update: &ProjectUpdate) -> Result<(), String> {
    if let Some(name) = &update.name {
        if name.trim().is_empty() {
            return Err("project name must not be empty".to_string());
        }
    }
    if let Some(total_value) = update.total_value {
        if !total_value.is_finite() || total_value < 0.0 {
            return Err("project totalValue must be >= 0".to_string());
        }
    }
    Ok(())
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<ApiRequest, String> {
    let payload = serde_json::from_str::<ProjectionPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    api_request_from_payload(payload)
}

fn api_request_from_payload(payload: ProjectionPayload) -> Result<ApiRequest, String> {
    if let Some(base_year) = payload.base_year {
        if !(1900..=9999).contains(&base_year) {
            return Err("baseYear must be between 1900 and 9999".to_string());
        }
    }
    if let Some(projects) = &payload.projects {
        for project in projects {
            validate_project(project)?;
        }
    }

    let mut cli = default_cli_for_api();
    let options = ProjectionOptions {
        base_year: payload.base_year,
        projects: payload.projects,
    };

    if let Some(v) = payload.current_age {
        cli.current_age = v;
    }
    if let Some(v) = payload.retirement_age {
        cli.retirement_age = v;
    }
    if let Some(v) = payload.desired_income {
        cli.desired_income = v;
    }
    if let Some(v) = payload.other_incomes {
        cli.other_incomes = v;
    }
    if let Some(v) = payload.monthly_investment {
        cli.monthly_investment = v;
    }
    if let Some(v) = payload.accumulation_rate {
        cli.accumulation_rate = v;
    }
    if let Some(v) = payload.post_retirement_rate {
        cli.post_retirement_rate = v;
    }

    let params = build_params(cli)?;
    Ok(ApiRequest { params, options })
}

fn build_projection_response(
    params: Params,
    base_year: i32,
    projection: Projection,
) -> ProjectionResponse {
    ProjectionResponse {
        base_year,
        ideal_retirement_capital: projection.ideal_retirement_capital,
        monthly_contribution_needed: projection.monthly_contribution_needed,
        final_patrimony: projection.final_patrimony,
        target_age: projection.target_age,
        age_ticks: chart_age_ticks(params.current_age),
        series: projection.series,
        params,
    }
}
