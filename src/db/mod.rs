use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::product::{NewProduct, Product, ProductPatch};
pub use repositories::user::User;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn product_repo(&self) -> repositories::product::ProductRepository {
        repositories::product::ProductRepository::new(self.conn.clone())
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn get_user_by_username_with_hash(
        &self,
        username: &str,
    ) -> Result<Option<(User, String)>> {
        self.user_repo().get_by_username_with_hash(username).await
    }

    pub async fn get_user_by_id(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_repo().list_all().await
    }

    pub async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        auth: &str,
    ) -> Result<User> {
        self.user_repo().create(username, password_hash, auth).await
    }

    pub async fn set_user_blocked(&self, id: i32, blocked: bool) -> Result<bool> {
        self.user_repo().set_blocked(id, blocked).await
    }

    pub async fn update_user_password_hash(&self, id: i32, password_hash: &str) -> Result<()> {
        self.user_repo().update_password_hash(id, password_hash).await
    }

    // ========================================================================
    // Products
    // ========================================================================

    pub async fn add_product(&self, product: &NewProduct) -> Result<Product> {
        self.product_repo().add(product).await
    }

    pub async fn get_product_by_slug(&self, slug: &str) -> Result<Option<Product>> {
        self.product_repo().get_by_slug(slug).await
    }

    pub async fn get_product_by_id(&self, id: i32) -> Result<Option<Product>> {
        self.product_repo().get_by_id(id).await
    }

    pub async fn list_products(&self) -> Result<Vec<Product>> {
        self.product_repo().list_all().await
    }

    pub async fn update_product(
        &self,
        slug: &str,
        patch: &ProductPatch,
    ) -> Result<Option<Product>> {
        self.product_repo().update(slug, patch).await
    }

    pub async fn delete_product(&self, slug: &str) -> Result<Option<Product>> {
        self.product_repo().delete(slug).await
    }
}
