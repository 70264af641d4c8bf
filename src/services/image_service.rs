use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set};
use tokio::fs;
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::destinations::DestinationList,
    dto::images::ImageList,
    entity::{
        destination_images::{ActiveModel as ImageActive, Column as ImageCol, Entity as DestinationImages},
        destinations::{Column as DestCol, Entity as Destinations},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::DestinationImage,
    response::{ApiResponse, Meta},
    services::destination_service::{destination_from_entity, image_from_entity},
    state::AppState,
};

const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Extension check, case-insensitive on the extension only.
pub fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Strip any path components a client smuggled into the filename.
fn sanitize_filename(filename: &str) -> &str {
    filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
}

/// Pick the name to store under. An existing file is never overwritten; on
/// collision the name gains a random suffix before the extension.
fn dedupe_filename(filename: &str, exists: bool) -> String {
    if !exists {
        return filename.to_string();
    }
    let id = Uuid::new_v4().simple().to_string();
    let suffix = &id[..8];
    match filename.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}-{suffix}.{ext}"),
        None => format!("{filename}-{suffix}"),
    }
}

pub async fn list_destinations_admin(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<DestinationList>> {
    ensure_admin(user)?;
    let items = Destinations::find()
        .order_by_asc(DestCol::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(destination_from_entity)
        .collect();

    let data = DestinationList { items };
    Ok(ApiResponse::success("Admin: Destinations", data, None))
}

pub async fn list_images(
    state: &AppState,
    user: &AuthUser,
    destination_id: Uuid,
) -> AppResult<ApiResponse<ImageList>> {
    ensure_admin(user)?;
    require_destination(state, destination_id).await?;

    let items = DestinationImages::find()
        .filter(ImageCol::DestinationId.eq(destination_id))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(image_from_entity)
        .collect();

    let data = ImageList { items };
    Ok(ApiResponse::success("Gallery", data, None))
}

pub async fn upload_image(
    state: &AppState,
    user: &AuthUser,
    destination_id: Uuid,
    filename: &str,
    bytes: &[u8],
) -> AppResult<ApiResponse<DestinationImage>> {
    ensure_admin(user)?;
    require_destination(state, destination_id).await?;

    let filename = sanitize_filename(filename);
    if !allowed_file(filename) {
        return Err(AppError::BadRequest("Invalid file type".into()));
    }

    fs::create_dir_all(&state.upload_dir)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;

    let exists = fs::try_exists(state.upload_dir.join(filename))
        .await
        .unwrap_or(false);
    let stored_name = dedupe_filename(filename, exists);

    let filepath = state.upload_dir.join(&stored_name);
    fs::write(&filepath, bytes)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;

    let active = ImageActive {
        id: Set(Uuid::new_v4()),
        destination_id: Set(destination_id),
        filename: Set(stored_name.clone()),
        is_primary: Set(false),
    };
    let image = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "image_upload",
        Some("destination_images"),
        Some(serde_json::json!({ "image_id": image.id, "filename": stored_name })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Image uploaded",
        image_from_entity(image),
        Some(Meta::empty()),
    ))
}

/// Remove the backing file first, then the row. A missing file is fine (a
/// crash between the two steps leaves a dangling row the gallery already
/// tolerates).
pub async fn delete_image(
    state: &AppState,
    user: &AuthUser,
    destination_id: Uuid,
    image_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;

    let image = DestinationImages::find_by_id(image_id)
        .filter(ImageCol::DestinationId.eq(destination_id))
        .one(&state.orm)
        .await?;
    let image = match image {
        Some(img) => img,
        None => return Err(AppError::NotFound),
    };

    let filepath = state.upload_dir.join(&image.filename);
    if let Err(err) = fs::remove_file(&filepath).await {
        if err.kind() != std::io::ErrorKind::NotFound {
            return Err(AppError::Internal(anyhow::anyhow!(err)));
        }
    }

    image.delete(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "image_delete",
        Some("destination_images"),
        Some(serde_json::json!({ "image_id": image_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Image deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

async fn require_destination(state: &AppState, destination_id: Uuid) -> AppResult<()> {
    let destination = Destinations::find_by_id(destination_id)
        .one(&state.orm)
        .await?;
    if destination.is_none() {
        return Err(AppError::NotFound);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_file_accepts_whitelisted_extensions() {
        assert!(allowed_file("kathmandu.png"));
        assert!(allowed_file("pokhara.JPG"));
        assert!(allowed_file("lake.jpeg"));
        assert!(allowed_file("prayer-flags.gif"));
    }

    #[test]
    fn allowed_file_rejects_everything_else() {
        assert!(!allowed_file("malware.exe"));
        assert!(!allowed_file("notes.txt"));
        assert!(!allowed_file("noextension"));
        assert!(!allowed_file(".png"));
    }

    #[test]
    fn sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd.png"), "passwd.png");
        assert_eq!(sanitize_filename("c:\\tmp\\shot.jpg"), "shot.jpg");
        assert_eq!(sanitize_filename("plain.gif"), "plain.gif");
    }

    #[test]
    fn dedupe_keeps_name_when_free() {
        assert_eq!(dedupe_filename("view.png", false), "view.png");
    }

    #[test]
    fn dedupe_suffixes_before_extension_on_collision() {
        let name = dedupe_filename("view.png", true);
        assert_ne!(name, "view.png");
        assert!(name.starts_with("view-"));
        assert!(name.ends_with(".png"));
    }
}
