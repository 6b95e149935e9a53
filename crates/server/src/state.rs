use std::sync::Arc;

use configs::IntegrationsConfig;
use sea_orm::DatabaseConnection;
use service::integration::{HttpBookingClient, HttpJokeClient, IntegrationError};
use service::student::repo::SeaOrmStudentRepository;
use service::StudentService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct ServerState {
    pub students: StudentService,
}

impl ServerState {
    pub fn new(students: StudentService) -> Self { Self { students } }

    /// Production wiring: SeaORM repository plus HTTP integrations.
    pub fn from_parts(db: DatabaseConnection, integrations: &IntegrationsConfig) -> Result<Self, IntegrationError> {
        let repo = Arc::new(SeaOrmStudentRepository { db });
        let jokes = Arc::new(HttpJokeClient::new(&integrations.joke)?);
        let bookings = Arc::new(HttpBookingClient::new(&integrations.booking)?);
        Ok(Self::new(StudentService::new(repo, jokes, bookings)))
    }
}
