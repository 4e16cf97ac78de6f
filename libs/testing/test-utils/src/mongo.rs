//! MongoDB test infrastructure
//!
//! Provides a `TestMongo` helper backed by a throwaway MongoDB container.

use mongodb::{Client, Database};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::mongo::Mongo;

/// Test MongoDB wrapper that ensures proper cleanup
///
/// The container is stopped and removed when this struct is dropped. Each
/// instance hands out its own database, so tests never share documents.
///
/// ```no_run
/// use test_utils::TestMongo;
///
/// # async fn example() {
/// let mongo = TestMongo::new().await;
/// let users = mongo.database().collection::<mongodb::bson::Document>("users");
/// users.insert_one(mongodb::bson::doc! { "username": "ana" }).await.unwrap();
/// # }
/// ```
pub struct TestMongo {
    #[allow(dead_code)]
    container: ContainerAsync<Mongo>,
    client: Client,
    database: Database,
    pub connection_string: String,
}

impl TestMongo {
    /// Start a MongoDB 7 container and connect to it.
    pub async fn new() -> Self {
        Self::with_database("accounts_test").await
    }

    pub async fn with_database(name: &str) -> Self {
        let container = Mongo::default()
            .with_tag("7")
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let host_port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");

        let connection_string = format!("mongodb://127.0.0.1:{}", host_port);

        let client = Client::with_uri_str(&connection_string)
            .await
            .expect("Failed to create MongoDB client");

        let database = client.database(name);

        tracing::info!(port = host_port, database = name, "Test MongoDB ready (mongo:7)");

        Self {
            container,
            client,
            database,
            connection_string,
        }
    }

    pub fn client(&self) -> Client {
        self.client.clone()
    }

    pub fn database(&self) -> Database {
        self.database.clone()
    }

    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }
}

impl Drop for TestMongo {
    fn drop(&mut self) {
        tracing::debug!("Cleaning up test MongoDB container");
    }
}
