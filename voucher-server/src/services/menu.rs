//! Menu item management (admin)

use serde_json::json;
use shared::error::{AppError, ErrorCode};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};

use super::audit;
use crate::auth::CurrentUser;
use crate::db;
use crate::error::{ServiceResult, on_unique};
use crate::state::AppState;

fn menu_item_not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::MenuItemNotFound).with_detail("menu_item_id", id)
}

fn clean(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

pub async fn create(
    state: &AppState,
    user: &CurrentUser,
    req: MenuItemCreate,
) -> ServiceResult<MenuItem> {
    req.validate()?;
    let description = clean(req.description);

    let item = db::menu::create(
        &state.pool,
        req.category.trim(),
        req.name.trim(),
        description.as_deref(),
        req.price_sedati,
        req.price_tawangsari,
    )
    .await
    .map_err(on_unique(ErrorCode::MenuItemNameExists))?;

    tracing::info!(menu_item_id = item.id, name = %item.name, user = %user.username, "Menu item created");
    audit(
        &state.pool,
        Some(user.id),
        "menu_item_created",
        json!({ "menu_item_id": item.id, "name": item.name }),
        None,
    )
    .await;

    Ok(item)
}

pub async fn update(
    state: &AppState,
    user: &CurrentUser,
    id: i64,
    patch: MenuItemUpdate,
) -> ServiceResult<MenuItem> {
    let mut tx = state.pool.begin().await?;
    let current = db::menu::find(&mut *tx, id)
        .await?
        .ok_or_else(|| menu_item_not_found(id))?;

    let mut item = patch.apply(current)?;
    item.description = clean(item.description);
    let item = db::menu::update(&mut *tx, &item)
        .await
        .map_err(on_unique(ErrorCode::MenuItemNameExists))?;
    tx.commit().await?;

    tracing::info!(menu_item_id = id, user = %user.username, "Menu item updated");
    audit(
        &state.pool,
        Some(user.id),
        "menu_item_updated",
        json!({ "menu_item_id": id, "name": item.name }),
        None,
    )
    .await;

    Ok(item)
}

pub async fn delete(state: &AppState, user: &CurrentUser, id: i64) -> ServiceResult<()> {
    let deleted = db::menu::delete(&state.pool, id).await?;
    if !deleted {
        return Err(menu_item_not_found(id).into());
    }

    tracing::info!(menu_item_id = id, user = %user.username, "Menu item deleted");
    audit(&state.pool, Some(user.id), "menu_item_deleted", json!({ "menu_item_id": id }), None).await;
    Ok(())
}
