use axum_travel_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    entity::{destinations::ActiveModel as DestinationActive, users::ActiveModel as UserActive},
    middleware::auth::AuthUser,
    state::AppState,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, Statement};
use uuid::Uuid;

// Tests in one binary run concurrently but share the database; hold this
// for the duration of each test.
static DB_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

/// Connect, migrate and truncate. Returns None (with a notice) when no
/// database is configured, so the suite can be run without one.
pub async fn setup_state()
-> anyhow::Result<Option<(AppState, tokio::sync::MutexGuard<'static, ()>)>> {
    let guard = DB_LOCK.lock().await;
    let database_url =
        match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
            Ok(url) => url,
            Err(_) => {
                eprintln!(
                    "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
                );
                return Ok(None);
            }
        };

    let pool = create_pool(&database_url).await?;
    let orm = create_orm_conn(&database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE itinerary_items, itineraries, reviews, destination_images, audit_logs, destinations, users RESTART IDENTITY CASCADE",
    ))
    .await?;

    let upload_dir = std::env::temp_dir().join(format!("travel-uploads-{}", Uuid::new_v4()));

    Ok(Some((
        AppState {
            pool,
            orm,
            upload_dir,
        },
        guard,
    )))
}

pub async fn create_user(
    state: &AppState,
    name: &str,
    email: &str,
    is_admin: bool,
) -> anyhow::Result<AuthUser> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        password_hash: Set("dummy".into()),
        is_admin: Set(is_admin),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(AuthUser {
        user_id: user.id,
        is_admin,
    })
}

pub async fn create_destination(
    state: &AppState,
    name: &str,
    region: &str,
    category: &str,
    description: &str,
) -> anyhow::Result<Uuid> {
    let destination = DestinationActive {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        region: Set(Some(region.to_string())),
        category: Set(Some(category.to_string())),
        description: Set(Some(description.to_string())),
        latitude: Set(None),
        longitude: Set(None),
        image_url: Set(None),
        highlights: Set(None),
    }
    .insert(&state.orm)
    .await?;

    Ok(destination.id)
}
