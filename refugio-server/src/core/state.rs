use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::db::models::AdminCreate;
use crate::db::repository::AdminRepository;
use crate::orders::OrderService;

/// Server state: the shared handles behind every request
///
/// Cloning is cheap: the database handle and JWT service are shared
/// references.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT token service
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Initialize the server state
    ///
    /// 1. Ensure the work-dir layout exists
    /// 2. Open the database (work_dir/database/refugio.db)
    /// 3. Seed the default admin on an empty admin table
    ///
    /// # Panics
    ///
    /// Panics when the database cannot be initialized.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("refugio.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        let state = Self {
            config: config.clone(),
            db: db_service.db,
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
        };

        state.seed_default_admin().await;
        state
    }

    /// In-memory state for tests
    pub async fn initialize_in_memory(config: &Config) -> Self {
        let db_service = DbService::new_in_memory()
            .await
            .expect("Failed to initialize in-memory database");

        Self {
            config: config.clone(),
            db: db_service.db,
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
        }
    }

    /// Create the default admin account if no admin exists yet
    ///
    /// Without ADMIN_PASSWORD the database stays empty and the admin panel
    /// is unreachable; warn loudly instead of inventing a credential.
    pub async fn seed_default_admin(&self) {
        let repo = AdminRepository::new(self.db.clone());

        match repo.count().await {
            Ok(0) => match &self.config.default_admin_password {
                Some(password) => {
                    let created = repo
                        .create(AdminCreate {
                            name: "Administrador".to_string(),
                            email: self.config.default_admin_email.clone(),
                            password: password.clone(),
                            role: Some(crate::db::models::AdminRole::SuperAdmin),
                        })
                        .await;
                    match created {
                        Ok(admin) => {
                            tracing::info!(email = %admin.email, "Default admin account created")
                        }
                        Err(e) => tracing::error!(error = %e, "Failed to seed default admin"),
                    }
                }
                None => {
                    tracing::warn!(
                        "No admin account exists and ADMIN_PASSWORD is not set; \
                         admin endpoints will be unreachable"
                    );
                }
            },
            Ok(_) => {}
            Err(e) => tracing::error!(error = %e, "Failed to check admin accounts"),
        }
    }

    /// Database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// JWT service handle
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Order lifecycle service bound to this state
    pub fn order_service(&self) -> OrderService {
        OrderService::new(self.db.clone(), self.config.frontend_url.clone())
    }
}
