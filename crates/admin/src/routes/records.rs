//! Generic record screens.
//!
//! Each record kind implements [`RecordScreen`]; [`router`] turns it into a
//! table page plus create, edit and delete routes. Every screen shares the
//! same handlers and templates, so they differ only in their columns and
//! form schema.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::components::{Column, DataTableConfig, RecordTable, ShellView, TableQuery, TableView};
use crate::db::{Record, RecordRepository, RepositoryError};
use crate::error::AppError;
use crate::filters;
use crate::flash::Flash;
use crate::forms::{FieldErrors, FieldSpec, FieldView, FormData, field_views};
use crate::middleware::{RequireIdentity, RequireManager};
use crate::models::Identity;
use crate::state::AppState;

use super::{page, shell};

/// A record kind with its own table screen and create/edit forms.
pub trait RecordScreen: Send + Sync + 'static {
    type Row: Record;

    /// Base path, e.g. `/inventory`.
    const PATH: &'static str;
    /// Page title.
    const TITLE: &'static str;
    /// Line under the title.
    const SUBTITLE: &'static str;
    /// Heading above the table.
    const HEADING: &'static str;
    /// Singular noun used in buttons and notifications, e.g. `Product`.
    const NOUN: &'static str;
    /// Plural noun used in the record count, e.g. `items`.
    const COUNT_NOUN: &'static str;
    /// Label of the create button.
    const ADD_LABEL: &'static str;
    /// Key of the column searched by the search box.
    const SEARCH_KEY: &'static str;
    /// Form fields, in display order.
    const FIELDS: &'static [FieldSpec];

    fn repository(state: &AppState) -> &dyn RecordRepository<Self::Row>;

    fn columns() -> Vec<Column<Self::Row>>;

    /// Search box and empty state presentation.
    fn table_config() -> DataTableConfig;

    /// Short human name of a row for notifications.
    fn label(row: &Self::Row) -> String;

    /// Initial values of the create form.
    fn blank_form() -> FormData {
        FormData::new()
    }

    /// Values of the edit form for `row`.
    fn form_data(row: &Self::Row) -> FormData;

    /// Validate a submitted form.
    ///
    /// `existing` is the row being edited, if any. The id of the returned
    /// row is ignored on create.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages when any field is invalid.
    fn parse(form: &FormData, existing: Option<&Self::Row>) -> Result<Self::Row, FieldErrors>;
}

/// Routes for screen `S`.
pub fn router<S: RecordScreen>() -> Router<AppState> {
    Router::new()
        .route(S::PATH, get(index::<S>).post(create::<S>))
        .route(&format!("{}/new", S::PATH), get(new_form::<S>))
        .route(&format!("{}/{{id}}", S::PATH), post(update::<S>))
        .route(&format!("{}/{{id}}/edit", S::PATH), get(edit_form::<S>))
        .route(&format!("{}/{{id}}/delete", S::PATH), post(delete::<S>))
}

// =============================================================================
// Templates
// =============================================================================

/// Record table page.
#[derive(Template)]
#[template(path = "records/index.html")]
pub struct RecordIndexTemplate {
    pub shell: ShellView,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub heading: &'static str,
    pub count_text: String,
    pub add_label: &'static str,
    pub base_path: &'static str,
    pub can_manage: bool,
    pub config: DataTableConfig,
    pub table: TableView,
}

/// Create or edit form page.
#[derive(Template)]
#[template(path = "records/form.html")]
pub struct RecordFormTemplate {
    pub shell: ShellView,
    pub title: &'static str,
    pub heading: String,
    pub action: String,
    pub submit_label: &'static str,
    pub cancel_href: &'static str,
    pub fields: Vec<FieldView>,
    pub has_errors: bool,
}

impl RecordFormTemplate {
    fn for_screen<S: RecordScreen>(
        shell: ShellView,
        editing: Option<&<S::Row as Record>::Id>,
        form: &FormData,
        errors: &FieldErrors,
    ) -> Self {
        let (heading, action, submit_label) = match editing {
            Some(id) => (
                format!("Edit {}", S::NOUN),
                format!("{}/{}", S::PATH, urlencoding::encode(id.as_ref())),
                "Save Changes",
            ),
            None => (S::ADD_LABEL.to_string(), S::PATH.to_string(), "Create"),
        };
        Self {
            shell,
            title: S::TITLE,
            heading,
            action,
            submit_label,
            cancel_href: S::PATH,
            fields: field_views(S::FIELDS, form, errors),
            has_errors: !errors.is_empty(),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Table page.
#[instrument(skip_all, fields(screen = S::PATH))]
async fn index<S: RecordScreen>(
    RequireIdentity(identity): RequireIdentity,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<TableQuery>,
) -> Result<Response, AppError> {
    let records = S::repository(&state).list()?;
    let columns = S::columns();
    let table = RecordTable::new(&columns, S::SEARCH_KEY)
        .page_size(state.config().page_size)
        .row_key(|row: &S::Row| row.id().to_string())
        .render(&records, &query, S::PATH);

    let template = RecordIndexTemplate {
        shell: shell(&state, &session, &identity, S::PATH).await,
        title: S::TITLE,
        subtitle: S::SUBTITLE,
        heading: S::HEADING,
        count_text: format!("{} {} in total", records.len(), S::COUNT_NOUN),
        add_label: S::ADD_LABEL,
        base_path: S::PATH,
        can_manage: identity.can_manage_records(),
        config: S::table_config(),
        table,
    };
    Ok(page(StatusCode::OK, &template))
}

/// Render the form page with `status`.
async fn form_page<S: RecordScreen>(
    state: &AppState,
    session: &Session,
    identity: &Identity,
    editing: Option<&<S::Row as Record>::Id>,
    form: &FormData,
    errors: &FieldErrors,
    status: StatusCode,
) -> Response {
    let shell = shell(state, session, identity, S::PATH).await;
    page(
        status,
        &RecordFormTemplate::for_screen::<S>(shell, editing, form, errors),
    )
}

/// Map a uniqueness conflict to a field error; anything else is an
/// application error.
pub(super) fn conflict_errors(error: RepositoryError) -> Result<FieldErrors, AppError> {
    match error {
        RepositoryError::Conflict { field, value } => {
            let mut errors = FieldErrors::default();
            errors.add(field, format!("{value} is already in use"));
            Ok(errors)
        }
        other => Err(other.into()),
    }
}

/// Empty create form.
#[instrument(skip_all, fields(screen = S::PATH))]
async fn new_form<S: RecordScreen>(
    RequireManager(identity): RequireManager,
    State(state): State<AppState>,
    session: Session,
) -> Response {
    form_page::<S>(
        &state,
        &session,
        &identity,
        None,
        &S::blank_form(),
        &FieldErrors::default(),
        StatusCode::OK,
    )
    .await
}

/// Create a record.
#[instrument(skip_all, fields(screen = S::PATH))]
async fn create<S: RecordScreen>(
    RequireManager(identity): RequireManager,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<FormData>,
) -> Result<Response, AppError> {
    let errors = match S::parse(&form, None) {
        Ok(draft) => match S::repository(&state).create(draft) {
            Ok(created) => {
                Flash::success(
                    format!("{} added", S::NOUN),
                    format!("{} was added successfully", S::label(&created)),
                )
                .push(&session)
                .await;
                return Ok(Redirect::to(S::PATH).into_response());
            }
            Err(e) => conflict_errors(e)?,
        },
        Err(errors) => errors,
    };

    Ok(form_page::<S>(
        &state,
        &session,
        &identity,
        None,
        &form,
        &errors,
        StatusCode::UNPROCESSABLE_ENTITY,
    )
    .await)
}

/// Prefilled edit form.
#[instrument(skip_all, fields(screen = S::PATH))]
async fn edit_form<S: RecordScreen>(
    RequireManager(identity): RequireManager,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = <S::Row as Record>::Id::from(id);
    let row = S::repository(&state).get(&id)?;

    Ok(form_page::<S>(
        &state,
        &session,
        &identity,
        Some(&id),
        &S::form_data(&row),
        &FieldErrors::default(),
        StatusCode::OK,
    )
    .await)
}

/// Update a record.
#[instrument(skip_all, fields(screen = S::PATH))]
async fn update<S: RecordScreen>(
    RequireManager(identity): RequireManager,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<FormData>,
) -> Result<Response, AppError> {
    let id = <S::Row as Record>::Id::from(id);
    let repository = S::repository(&state);
    let existing = repository.get(&id)?;

    let errors = match S::parse(&form, Some(&existing)) {
        Ok(row) => match repository.update(&id, row) {
            Ok(updated) => {
                Flash::success(
                    format!("{} updated", S::NOUN),
                    format!("{} was updated successfully", S::label(&updated)),
                )
                .push(&session)
                .await;
                return Ok(Redirect::to(S::PATH).into_response());
            }
            Err(e) => conflict_errors(e)?,
        },
        Err(errors) => errors,
    };

    Ok(form_page::<S>(
        &state,
        &session,
        &identity,
        Some(&id),
        &form,
        &errors,
        StatusCode::UNPROCESSABLE_ENTITY,
    )
    .await)
}

/// Delete a record.
#[instrument(skip_all, fields(screen = S::PATH))]
async fn delete<S: RecordScreen>(
    RequireManager(_identity): RequireManager,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let id = <S::Row as Record>::Id::from(id);
    let removed = S::repository(&state).delete(&id)?;

    Flash::success(
        format!("{} deleted", S::NOUN),
        format!("{} was deleted", S::label(&removed)),
    )
    .push(&session)
    .await;
    Ok(Redirect::to(S::PATH))
}
