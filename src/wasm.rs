//! Browser bindings. Same catalog and resolver as the native build; these
//! functions only marshal values across the JS boundary.

use wasm_bindgen::prelude::*;

use crate::boundary;
use crate::calendar::{parse_date, CalendarGate};
use crate::catalog::mishnah;
use crate::config::ScheduleConfig;
use crate::error::PathError;
use crate::planner::PlanReport;
use crate::resolver;
use crate::state::UserPositionState;

fn to_js(err: PathError) -> JsValue {
    let body = serde_json::to_string(&err).unwrap_or_else(|_| err.to_string());
    JsValue::from_str(&body)
}

#[wasm_bindgen(js_name = totalItems)]
pub fn total_items() -> u32 {
    mishnah().total_items()
}

#[wasm_bindgen(js_name = catalogFingerprint)]
pub fn catalog_fingerprint() -> String {
    mishnah().fingerprint()
}

#[wasm_bindgen(js_name = contentRef)]
pub fn content_ref(position: u32) -> Result<String, JsValue> {
    resolver::content_ref(mishnah(), position).map_err(to_js)
}

#[wasm_bindgen(js_name = hebrewLabel)]
pub fn hebrew_label(position: u32) -> Result<String, JsValue> {
    resolver::resolve(mishnah(), position)
        .map(|r| r.hebrew_label())
        .map_err(to_js)
}

#[wasm_bindgen(js_name = isChapterEnd)]
pub fn is_chapter_end(position: u32) -> Result<bool, JsValue> {
    boundary::is_chapter_end(mishnah(), position).map_err(to_js)
}

#[wasm_bindgen(js_name = isSectionEnd)]
pub fn is_section_end(position: u32) -> Result<bool, JsValue> {
    boundary::is_section_end(mishnah(), position).map_err(to_js)
}

/// Plan `horizon_days` study days for a user record given as JSON.
/// `config_toml` overrides the default schedule settings.
#[wasm_bindgen(js_name = planJson)]
pub fn plan_json(
    state_json: &str,
    from: &str,
    horizon_days: u32,
    config_toml: Option<String>,
) -> Result<String, JsValue> {
    let catalog = mishnah();
    let config = match config_toml {
        Some(toml) => ScheduleConfig::from_toml_str(&toml).map_err(to_js)?,
        None => ScheduleConfig::default(),
    };
    let state = UserPositionState::from_json(state_json).map_err(to_js)?;
    let start_date = parse_date(from).map_err(to_js)?;
    let policy = state.policy(catalog, &config).map_err(to_js)?;
    let cursor = state.start_cursor(catalog, &policy).map_err(to_js)?;
    let gate = CalendarGate::from_config(&config);

    let report = PlanReport::build(catalog, cursor, start_date, horizon_days, &policy, &gate);
    serde_json::to_string(&report).map_err(|e| to_js(e.into()))
}

/// Reviews due on `on` and over the following `days` calendar days.
#[wasm_bindgen(js_name = reviewsJson)]
pub fn reviews_json(
    state_json: &str,
    on: &str,
    days: u32,
    config_toml: Option<String>,
) -> Result<String, JsValue> {
    let catalog = mishnah();
    let config = match config_toml {
        Some(toml) => ScheduleConfig::from_toml_str(&toml).map_err(to_js)?,
        None => ScheduleConfig::default(),
    };
    let state = UserPositionState::from_json(state_json).map_err(to_js)?;
    let date = parse_date(on).map_err(to_js)?;
    let policy = state.policy(catalog, &config).map_err(to_js)?;
    let learned = state.learned_count(catalog).map_err(to_js)?;
    let gate = CalendarGate::from_config(&config);

    let schedule = state.review_schedule(catalog, policy, &gate);
    let body = serde_json::json!({
        "today": schedule.todays_content(learned),
        "due": schedule.reviews_due(learned, date),
        "upcoming": schedule.reviews_by_date(learned, date, days),
    });
    serde_json::to_string(&body).map_err(|e| to_js(e.into()))
}
