//! User Repository Implementation
//!
//! PostgreSQL implementation of the UserRepository trait.
//! Maps between the database schema and the domain User entity, including
//! the `user_roles` join for role loading and replacement.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Role, User, UserLocation, UserRepository};
use crate::shared::error::AppError;

/// Database row representation matching the actual users table schema.
/// Roles live in a join table and are loaded with a second query.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    biography: String,
    subscription: String,
    agreed_to_terms: bool,
    reset_token: Option<String>,
    two_factor_code: Option<i32>,
    continent: Option<String>,
    country: Option<String>,
    country_flag_url: Option<String>,
    city: Option<String>,
    ip: Option<String>,
    registration_date: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct RoleRow {
    id: i64,
    name: String,
}

#[derive(Debug, sqlx::FromRow)]
struct UserRoleRow {
    user_id: i64,
    id: i64,
    name: String,
}

const USER_COLUMNS: &str = "id, username, email, password_hash, biography, subscription, \
     agreed_to_terms, reset_token, two_factor_code, continent, country, \
     country_flag_url, city, ip, registration_date";

impl UserRow {
    /// Convert database row to domain User entity with the given roles.
    fn into_user(self, roles: Vec<Role>) -> User {
        // Location columns are nullable as a group; a partially resolved
        // lookup is treated as no location.
        let location = match (self.continent, self.country, self.city, self.ip) {
            (Some(continent), Some(country), Some(city), Some(ip)) => Some(UserLocation {
                continent,
                country,
                country_flag_url: self.country_flag_url.unwrap_or_default(),
                city,
                ip,
            }),
            _ => None,
        };

        User {
            id: self.id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            biography: self.biography,
            subscription: self.subscription,
            agreed_to_terms: self.agreed_to_terms,
            reset_token: self.reset_token,
            two_factor_code: self.two_factor_code,
            location,
            registration_date: self.registration_date,
            roles,
        }
    }
}

/// PostgreSQL user repository implementation.
///
/// Provides CRUD operations for users against a PostgreSQL database.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the role set for a single user.
    async fn load_roles(&self, user_id: i64) -> Result<Vec<Role>, AppError> {
        let rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT r.id, r.name
            FROM roles r
            JOIN user_roles ur ON ur.role_id = r.id
            WHERE ur.user_id = $1
            ORDER BY r.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| Role { id: r.id, name: r.name }).collect())
    }

    /// Attach roles (matched by name) to a user.
    async fn attach_roles(&self, user_id: i64, role_names: &[String]) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO user_roles (user_id, role_id)
            SELECT $1, id FROM roles WHERE name = ANY($2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(role_names)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn fetch_one_with_roles(&self, row: Option<UserRow>) -> Result<Option<User>, AppError> {
        match row {
            Some(row) => {
                let roles = self.load_roles(row.id).await?;
                Ok(Some(row.into_user(roles)))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        self.fetch_one_with_roles(row).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        self.fetch_one_with_roles(row).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        self.fetch_one_with_roles(row).await
    }

    async fn find_by_reset_token(&self, token_digest: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE reset_token = $1"
        ))
        .bind(token_digest)
        .fetch_optional(&self.pool)
        .await?;

        self.fetch_one_with_roles(row).await
    }

    /// Fetch every user with roles loaded in a single join query, avoiding
    /// one role query per user.
    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        let role_rows = sqlx::query_as::<_, UserRoleRow>(
            r#"
            SELECT ur.user_id, r.id, r.name
            FROM user_roles ur
            JOIN roles r ON r.id = ur.role_id
            ORDER BY ur.user_id, r.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut roles_by_user: std::collections::HashMap<i64, Vec<Role>> =
            std::collections::HashMap::new();
        for r in role_rows {
            roles_by_user
                .entry(r.user_id)
                .or_default()
                .push(Role { id: r.id, name: r.name });
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let roles = roles_by_user.remove(&row.id).unwrap_or_default();
                row.into_user(roles)
            })
            .collect())
    }

    async fn create(&self, user: &User) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (username, email, password_hash, biography, subscription,
                               agreed_to_terms, reset_token, two_factor_code,
                               continent, country, country_flag_url, city, ip)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.biography)
        .bind(&user.subscription)
        .bind(user.agreed_to_terms)
        .bind(&user.reset_token)
        .bind(user.two_factor_code)
        .bind(user.location.as_ref().map(|l| l.continent.clone()))
        .bind(user.location.as_ref().map(|l| l.country.clone()))
        .bind(user.location.as_ref().map(|l| l.country_flag_url.clone()))
        .bind(user.location.as_ref().map(|l| l.city.clone()))
        .bind(user.location.as_ref().map(|l| l.ip.clone()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("User with this email or username already exists".to_string())
            }
            _ => AppError::Database(e),
        })?;

        let role_names: Vec<String> = user.roles.iter().map(|r| r.name.clone()).collect();
        self.attach_roles(row.id, &role_names).await?;
        let roles = self.load_roles(row.id).await?;

        Ok(row.into_user(roles))
    }

    async fn update(&self, user: &User) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2,
                biography = $3,
                subscription = $4,
                agreed_to_terms = $5,
                reset_token = $6,
                two_factor_code = $7,
                continent = $8,
                country = $9,
                country_flag_url = $10,
                city = $11,
                ip = $12
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.password_hash)
        .bind(&user.biography)
        .bind(&user.subscription)
        .bind(user.agreed_to_terms)
        .bind(&user.reset_token)
        .bind(user.two_factor_code)
        .bind(user.location.as_ref().map(|l| l.continent.clone()))
        .bind(user.location.as_ref().map(|l| l.country.clone()))
        .bind(user.location.as_ref().map(|l| l.country_flag_url.clone()))
        .bind(user.location.as_ref().map(|l| l.city.clone()))
        .bind(user.location.as_ref().map(|l| l.ip.clone()))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        Ok(())
    }

    async fn replace_roles(&self, user_id: i64, roles: &[Role]) -> Result<(), AppError> {
        sqlx::query("DELETE FROM user_roles WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        let role_names: Vec<String> = roles.iter().map(|r| r.name.clone()).collect();
        self.attach_roles(user_id, &role_names).await
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn username_exists(&self, username: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn two_factor_code_exists(&self, code: i32) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE two_factor_code = $1)")
                .bind(code)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}
