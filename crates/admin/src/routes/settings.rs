//! General settings.
//!
//! One settings record shared by every session.

use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use tower_sessions::Session;
use tracing::instrument;

use crate::components::ShellView;
use crate::db::settings::{
    CURRENCIES, DATE_FORMATS, GeneralSettings, LOW_STOCK_THRESHOLD_RANGE, THEMES, TIMEZONES,
};
use crate::error::AppError;
use crate::filters;
use crate::flash::Flash;
use crate::forms::{
    FieldErrors, FieldSpec, FieldView, FormData, InputKind, Validator, field_views,
};
use crate::middleware::RequireIdentity;
use crate::models::Identity;
use crate::state::AppState;

use super::{page, shell};

const SETTINGS_PATH: &str = "/settings";

fn timezones() -> Vec<(&'static str, &'static str)> {
    TIMEZONES.to_vec()
}

fn date_formats() -> Vec<(&'static str, &'static str)> {
    DATE_FORMATS.to_vec()
}

fn currencies() -> Vec<(&'static str, &'static str)> {
    CURRENCIES.to_vec()
}

fn themes() -> Vec<(&'static str, &'static str)> {
    THEMES.to_vec()
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("company_name", "Company Name", InputKind::Text),
    FieldSpec::required("timezone", "Timezone", InputKind::Select(timezones)),
    FieldSpec::required("date_format", "Date Format", InputKind::Select(date_formats)),
    FieldSpec::required("currency", "Currency", InputKind::Select(currencies)),
    FieldSpec::required("theme", "Theme", InputKind::Select(themes)),
    FieldSpec::required(
        "low_stock_threshold",
        "Low Stock Alert Threshold",
        InputKind::Number { min: "1", step: "1" },
    ),
];

/// Settings page template.
#[derive(Template)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub shell: ShellView,
    pub fields: Vec<FieldView>,
    pub has_errors: bool,
}

/// Build the settings router.
pub fn router() -> Router<AppState> {
    Router::new().route(SETTINGS_PATH, get(settings_page).post(update_settings))
}

fn form_data(settings: &GeneralSettings) -> FormData {
    FormData::new()
        .with("company_name", &settings.company_name)
        .with("timezone", &settings.timezone)
        .with("date_format", &settings.date_format)
        .with("currency", &settings.currency)
        .with("theme", &settings.theme)
        .with("low_stock_threshold", settings.low_stock_threshold)
}

/// Validate the settings form.
fn parse(form: &FormData) -> Result<GeneralSettings, FieldErrors> {
    let mut v = Validator::new(form);
    let company_name = v.required("company_name", "Company name");
    let timezone = v.option("timezone", "Timezone", TIMEZONES);
    let date_format = v.option("date_format", "Date format", DATE_FORMATS);
    let currency = v.option("currency", "Currency", CURRENCIES);
    let theme = v.option("theme", "Theme", THEMES);
    let low_stock_threshold = v.integer(
        "low_stock_threshold",
        "Low stock alert threshold",
        LOW_STOCK_THRESHOLD_RANGE,
    );

    let (
        Some(company_name),
        Some(timezone),
        Some(date_format),
        Some(currency),
        Some(theme),
        Some(low_stock_threshold),
    ) = (company_name, timezone, date_format, currency, theme, low_stock_threshold)
    else {
        return Err(v.into_errors());
    };

    Ok(GeneralSettings {
        company_name,
        timezone,
        date_format,
        currency,
        theme,
        low_stock_threshold,
    })
}

async fn render(
    state: &AppState,
    session: &Session,
    identity: &Identity,
    form: &FormData,
    errors: &FieldErrors,
    status: StatusCode,
) -> Response {
    let template = SettingsTemplate {
        shell: shell(state, session, identity, SETTINGS_PATH).await,
        fields: field_views(FIELDS, form, errors),
        has_errors: !errors.is_empty(),
    };
    page(status, &template)
}

/// Settings page.
///
/// GET /settings
async fn settings_page(
    RequireIdentity(identity): RequireIdentity,
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let settings = state.settings().get()?;
    Ok(render(
        &state,
        &session,
        &identity,
        &form_data(&settings),
        &FieldErrors::default(),
        StatusCode::OK,
    )
    .await)
}

/// Save settings.
///
/// POST /settings
#[instrument(skip_all)]
async fn update_settings(
    RequireIdentity(identity): RequireIdentity,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<FormData>,
) -> Result<Response, AppError> {
    match parse(&form) {
        Ok(settings) => {
            state.settings().update(settings)?;
            Flash::success("Settings saved", "Your settings have been updated")
                .push(&session)
                .await;
            Ok(Redirect::to(SETTINGS_PATH).into_response())
        }
        Err(errors) => Ok(render(
            &state,
            &session,
            &identity,
            &form,
            &errors,
            StatusCode::UNPROCESSABLE_ENTITY,
        )
        .await),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_round_trip_through_form() {
        let defaults = GeneralSettings::default();
        assert_eq!(parse(&form_data(&defaults)).unwrap(), defaults);
    }

    #[test]
    fn test_company_name_required() {
        let form = form_data(&GeneralSettings::default()).with("company_name", "   ");
        let errors = parse(&form).unwrap_err();
        assert_eq!(errors.get("company_name"), Some("Company name is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_options_must_come_from_lists() {
        let form = form_data(&GeneralSettings::default())
            .with("timezone", "utc+14")
            .with("theme", "neon");
        let errors = parse(&form).unwrap_err();
        assert_eq!(errors.get("timezone"), Some("Select a valid timezone"));
        assert_eq!(errors.get("theme"), Some("Select a valid theme"));
    }

    #[test]
    fn test_threshold_bounds() {
        let base = form_data(&GeneralSettings::default());
        let errors = parse(&base.clone().with("low_stock_threshold", "0")).unwrap_err();
        assert_eq!(
            errors.get("low_stock_threshold"),
            Some("Low stock alert threshold must be at least 1")
        );
        let errors = parse(&base.with("low_stock_threshold", "1001")).unwrap_err();
        assert_eq!(
            errors.get("low_stock_threshold"),
            Some("Low stock alert threshold must be at most 1000")
        );
    }
}
