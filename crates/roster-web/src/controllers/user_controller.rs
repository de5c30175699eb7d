//! User management controller.

use crate::{
    extractors::{
        ListQuery, PageForm, PageMultiForm, PageMultiQuery, PagePath, PageQuery, UserIdQuery,
        UserIdsParams,
    },
    flash::{self, Notice},
    responses::{ok, page, WebResult},
    state::AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use axum_extra::extract::CookieJar;
use roster_core::{RosterError, User, UserId};
use roster_service::{DeleteOutcome, UserForm};
use tracing::{error, info, warn};

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/register", get(register_form).post(register_user))
        .route("/edit/:id", get(edit_form))
        .route("/update", post(update_user))
        .route("/confirm-delete", get(confirm_delete))
        .route("/delete", post(delete_user))
        .route("/show", get(show_users))
        .route("/bulk-delete", post(bulk_delete))
}

/// List all users or search by last name.
async fn list_users(
    State(state): State<AppState>,
    jar: CookieJar,
    PageQuery(query): PageQuery<ListQuery>,
) -> WebResult {
    info!("Fetching users with last name: {}", query.last_name);

    let users = state
        .user_service
        .search_users_by_last_name(&query.last_name)
        .await?;

    let (jar, notice) = flash::take(jar);
    let html = state.views.user_list(&users, &query.last_name, notice);
    Ok((jar, ok(html)).into_response())
}

/// Display the user registration form.
async fn register_form(State(state): State<AppState>) -> WebResult {
    info!("Displaying user registration form.");
    Ok(ok(state.views.register(&UserForm::default(), &[])))
}

/// Handle user registration.
async fn register_user(
    State(state): State<AppState>,
    jar: CookieJar,
    PageForm(form): PageForm<UserForm>,
) -> WebResult {
    info!("Registering new user: {} {}", form.first_name, form.last_name);

    match state.user_service.register_user(User::from(form.clone())).await {
        Ok(_) => Ok(flash::redirect_with(jar, Notice::UserRegistered).into_response()),
        Err(RosterError::InvalidFields(errors)) => Ok(page(
            StatusCode::UNPROCESSABLE_ENTITY,
            state.views.register(&form, &errors),
        )),
        Err(e) => Err(e.into()),
    }
}

/// Display the user edit form.
async fn edit_form(
    State(state): State<AppState>,
    jar: CookieJar,
    PagePath(id): PagePath<i64>,
) -> WebResult {
    info!("Displaying edit form for user with id: {}", id);

    match state.user_service.get_user_by_id(UserId(id)).await? {
        Some(user) => Ok(ok(state.views.edit(&UserForm::from(user), &[]))),
        None => {
            warn!("User with id {} not found.", id);
            Ok(flash::redirect_with(jar, Notice::UserNotFound).into_response())
        }
    }
}

/// Handle user update.
async fn update_user(
    State(state): State<AppState>,
    jar: CookieJar,
    PageForm(form): PageForm<UserForm>,
) -> WebResult {
    let Some(id) = form.id else {
        error!("Attempted to update user with null ID.");
        return Ok(flash::redirect_with(jar, Notice::NoUserSelected).into_response());
    };

    info!("Updating user with id: {}", id);

    match state.user_service.update_user(User::from(form.clone())).await {
        Ok(_) => Ok(flash::redirect_with(jar, Notice::UserUpdated).into_response()),
        Err(RosterError::InvalidFields(errors)) => Ok(page(
            StatusCode::UNPROCESSABLE_ENTITY,
            state.views.edit(&form, &errors),
        )),
        Err(RosterError::NotFound { .. }) => {
            warn!("User with id {} not found for update.", id);
            Ok(flash::redirect_with(jar, Notice::UserNotFound).into_response())
        }
        Err(RosterError::MissingIdentifier(_)) => {
            Ok(flash::redirect_with(jar, Notice::NoUserSelected).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Show the confirmation page before deleting a user.
async fn confirm_delete(
    State(state): State<AppState>,
    jar: CookieJar,
    PageQuery(query): PageQuery<UserIdQuery>,
) -> WebResult {
    info!(
        "Displaying confirmation page for deletion of user with id: {}",
        query.user_id
    );

    match state.user_service.get_user_by_id(query.user_id).await? {
        Some(user) => Ok(ok(state.views.confirm_delete(&user))),
        None => {
            warn!("User with id {} not found for deletion.", query.user_id);
            Ok(flash::redirect_with(jar, Notice::UserNotFound).into_response())
        }
    }
}

/// Handle user deletion.
async fn delete_user(
    State(state): State<AppState>,
    jar: CookieJar,
    PageQuery(query): PageQuery<UserIdQuery>,
) -> WebResult {
    info!("Deleting user with id: {}", query.user_id);

    let notice = match state.user_service.delete_user(query.user_id).await? {
        DeleteOutcome::Deleted => Notice::UserDeleted,
        DeleteOutcome::NotFound => {
            warn!("User with id {} not found for deletion.", query.user_id);
            Notice::UserNotFound
        }
    };

    Ok(flash::redirect_with(jar, notice).into_response())
}

/// Show the selected users, one row per requested id.
async fn show_users(
    State(state): State<AppState>,
    PageMultiQuery(params): PageMultiQuery<UserIdsParams>,
) -> WebResult {
    let ids = params.parse()?;
    if ids.is_empty() {
        return Err(RosterError::validation("Required parameter 'userIds' is missing").into());
    }

    info!("Fetching users with IDs: {:?}", ids);

    let users = state.user_service.get_users_by_ids(&ids).await?;
    let rows: Vec<(UserId, Option<User>)> = ids.into_iter().zip(users).collect();

    Ok(ok(state.views.show(&rows)))
}

/// Delete every selected user.
async fn bulk_delete(
    State(state): State<AppState>,
    jar: CookieJar,
    PageMultiForm(params): PageMultiForm<UserIdsParams>,
) -> WebResult {
    let ids = params.parse()?;
    if ids.is_empty() {
        warn!("No users selected for bulk delete.");
        return Ok(flash::redirect_with(jar, Notice::NoUsersSelected).into_response());
    }

    info!("Bulk deleting users with IDs: {:?}", ids);
    let removed = state.user_service.delete_users_by_ids(&ids).await?;
    info!("Bulk delete removed {} users", removed);

    Ok(flash::redirect_with(jar, Notice::UsersDeleted).into_response())
}
