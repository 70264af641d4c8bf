use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum_travel_api::{
    config::AppConfig,
    db::{create_orm_conn, create_pool, run_migrations},
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let pool = create_pool(&config.database_url).await?;

    let admin_id = ensure_user(&pool, "Site Admin", "admin@example.com", "admin123", true).await?;
    let user_id = ensure_user(&pool, "Demo Traveller", "user@example.com", "user123", false).await?;
    seed_destinations(&pool).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    name: &str,
    email: &str,
    password: &str,
    is_admin: bool,
) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let row: Option<(Uuid,)> = sqlx::query_as(
        r#"
        INSERT INTO users (id, name, email, password_hash, is_admin)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO UPDATE SET is_admin = EXCLUDED.is_admin
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(is_admin)
    .fetch_optional(pool)
    .await?;

    let user_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (Uuid,) = sqlx::query_as("SELECT id FROM users WHERE email = $1")
                .bind(email)
                .fetch_one(pool)
                .await?;
            existing.0
        }
    };

    println!("Ensured user {email} (admin={is_admin})");
    Ok(user_id)
}

async fn seed_destinations(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let destinations = vec![
        (
            "Pokhara",
            "Gandaki",
            "Lakes",
            "Lakeside city beneath the Annapurna range",
            28.2096,
            83.9856,
            "Phewa Lake boating, World Peace Pagoda, Sarangkot sunrise",
        ),
        (
            "Everest Base Camp",
            "Koshi",
            "Trekking",
            "The classic high-altitude trek through Khumbu",
            28.0043,
            86.8571,
            "Namche Bazaar, Tengboche Monastery, Kala Patthar viewpoint",
        ),
        (
            "Kathmandu Durbar Square",
            "Bagmati",
            "Heritage",
            "Medieval palace square of the old kingdom",
            27.7045,
            85.3076,
            "Hanuman Dhoka, Kumari Ghar, Taleju Temple",
        ),
        (
            "Chitwan National Park",
            "Narayani",
            "Wildlife",
            "Subtropical lowland jungle and river plains",
            27.5291,
            84.3542,
            "Rhino safaris, Rapti river canoeing, Tharu villages",
        ),
        (
            "Lumbini",
            "Lumbini",
            "Heritage",
            "Birthplace of the Buddha and monastic zone",
            27.4833,
            83.2767,
            "Maya Devi Temple, Ashoka Pillar, monastery gardens",
        ),
        (
            "Rara Lake",
            "Karnali",
            "Lakes",
            "Remote alpine lake in the far northwest",
            29.5261,
            82.0885,
            "Rara National Park, boat rides, ridge hikes",
        ),
    ];

    for (name, region, category, description, lat, lng, highlights) in destinations {
        sqlx::query(
            r#"
            INSERT INTO destinations (id, name, region, category, description, latitude, longitude, highlights)
            SELECT $1, $2, $3, $4, $5, $6, $7, $8
            WHERE NOT EXISTS (SELECT 1 FROM destinations WHERE name = $2)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(region)
        .bind(category)
        .bind(description)
        .bind(lat)
        .bind(lng)
        .bind(highlights)
        .execute(pool)
        .await?;
    }

    println!("Seeded destinations");
    Ok(())
}
