//! Admin Repository

use chrono::Utc;
use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Admin, AdminCreate, AdminRole};

const TABLE: &str = "admin";

#[derive(Debug, Deserialize)]
struct CountRow {
    count: i64,
}

#[derive(Clone)]
pub struct AdminRepository {
    base: BaseRepository,
}

impl AdminRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Number of admin accounts
    pub async fn count(&self) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() AS count FROM admin GROUP ALL")
            .await?;
        let rows: Vec<CountRow> = result.take(0)?;
        Ok(rows.into_iter().next().map(|row| row.count).unwrap_or(0))
    }

    /// Find admin by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Admin>> {
        let record_id = parse_record_id(TABLE, id);
        let admin: Option<Admin> = self.base.db().select(record_id).await?;
        Ok(admin)
    }

    /// Find admin by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Admin>> {
        let email = email.to_lowercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM admin WHERE email = $email LIMIT 1")
            .bind(("email", email))
            .await?;
        let admins: Vec<Admin> = result.take(0)?;
        Ok(admins.into_iter().next())
    }

    /// Create a new admin account
    pub async fn create(&self, data: AdminCreate) -> RepoResult<Admin> {
        let email = data.email.to_lowercase();
        if self.find_by_email(&email).await?.is_some() {
            return Err(RepoError::Duplicate("Email already registered".to_string()));
        }

        let password_hash = Admin::hash_password(&data.password)
            .map_err(|e| RepoError::Validation(format!("Could not hash password: {}", e)))?;

        let admin = Admin {
            id: None,
            name: data.name,
            email,
            password_hash,
            role: data.role.unwrap_or(AdminRole::Admin),
            is_active: true,
            last_login: None,
            created_at: Utc::now(),
        };

        let created: Option<Admin> = self.base.db().create(TABLE).content(admin).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create admin".to_string()))
    }

    /// Stamp the last successful login
    pub async fn touch_last_login(&self, id: &str) -> RepoResult<()> {
        let record_id = parse_record_id(TABLE, id);
        self.base
            .db()
            .query("UPDATE $admin SET lastLogin = $now")
            .bind(("admin", record_id))
            .bind(("now", Utc::now()))
            .await?;
        Ok(())
    }

    /// Replace the stored password hash
    pub async fn update_password(&self, id: &str, password_hash: String) -> RepoResult<()> {
        let record_id = parse_record_id(TABLE, id);
        self.base
            .db()
            .query("UPDATE $admin SET passwordHash = $hash")
            .bind(("admin", record_id))
            .bind(("hash", password_hash))
            .await?;
        Ok(())
    }
}
