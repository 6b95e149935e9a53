use std::sync::Arc;

use common::pagination::Pagination;
use tracing::{debug, info, instrument};

use super::domain::{EnrichedStudent, NewStudent, Student};
use super::repository::StudentRepository;
use crate::errors::ServiceError;
use crate::integration::{BookingClient, JokeClient};

/// Student business service independent of web framework.
///
/// Every operation is a linear sequence: at most one repository read, the
/// integrations (add only), then at most one repository write.
#[derive(Clone)]
pub struct StudentService {
    repo: Arc<dyn StudentRepository>,
    jokes: Arc<dyn JokeClient>,
    bookings: Arc<dyn BookingClient>,
}

impl StudentService {
    pub fn new(
        repo: Arc<dyn StudentRepository>,
        jokes: Arc<dyn JokeClient>,
        bookings: Arc<dyn BookingClient>,
    ) -> Self {
        Self { repo, jokes, bookings }
    }

    /// Fetch a student by id.
    #[instrument(skip(self))]
    pub async fn get_student(&self, id: i64) -> Result<Student, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::student_not_found(id))
    }

    /// Register a student, attaching a joke and a booking id.
    ///
    /// The email is trimmed; a registered email is rejected before either
    /// integration is called.
    /// If an integration fails the error propagates unchanged; nothing has
    /// been written at that point.
    ///
    /// # Examples
    /// ```
    /// use service::integration::mock::{FixedBookingClient, FixedJokeClient};
    /// use service::student::{repository::mock::MockStudentRepository, Gender, NewStudent, StudentService};
    /// use std::sync::Arc;
    /// let svc = StudentService::new(
    ///     Arc::new(MockStudentRepository::default()),
    ///     Arc::new(FixedJokeClient::new("a joke")),
    ///     Arc::new(FixedBookingClient::new(7)),
    /// );
    /// let input = NewStudent { name: "A".into(), email: "x@mail.com".into(), gender: Gender::Other };
    /// let student = tokio_test::block_on(svc.add_student(input)).unwrap();
    /// assert_eq!(student.joke, "a joke");
    /// assert_eq!(student.booking_id, 7);
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn add_student(&self, mut input: NewStudent) -> Result<Student, ServiceError> {
        // Stored and compared trimmed so padded duplicates hit the uniqueness check
        input.email = input.email.trim().to_string();
        models::student::validate_name(&input.name)?;
        models::student::validate_email(&input.email)?;

        if self.repo.exists_by_email(&input.email).await? {
            debug!("email already registered");
            return Err(ServiceError::BadRequest(format!("email {} taken", input.email)));
        }

        let joke = self.jokes.get_joke().await?;
        let booking_id = self.bookings.create_booking(&input.name).await?;

        let created = self.repo.insert(EnrichedStudent::new(input, joke.text, booking_id)).await?;
        info!(student_id = created.id, booking_id, "student_added");
        Ok(created)
    }

    /// Delete a student by id.
    #[instrument(skip(self))]
    pub async fn delete_student(&self, id: i64) -> Result<(), ServiceError> {
        if !self.repo.exists_by_id(id).await? {
            return Err(ServiceError::student_not_found(id));
        }
        self.repo.delete_by_id(id).await?;
        info!(student_id = id, "student_deleted");
        Ok(())
    }

    pub async fn list_students(&self, page: Pagination) -> Result<Vec<Student>, ServiceError> {
        self.repo.list(page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::mock::{FixedBookingClient, FixedJokeClient};
    use crate::integration::{HttpBookingClient, IntegrationError};
    use configs::HttpClientConfig;
    use crate::student::domain::Gender;
    use crate::student::repository::mock::MockStudentRepository;

    fn gnome(id: i64) -> Student {
        Student {
            id,
            name: "Gnome".into(),
            email: "javaGnome@mail.com".into(),
            gender: Gender::Other,
            joke: String::new(),
            booking_id: 0,
            created_at: chrono::Utc::now().into(),
        }
    }

    fn new_gnome() -> NewStudent {
        NewStudent { name: "Gnome".into(), email: "javaGnome@mail.com".into(), gender: Gender::Other }
    }

    struct Fixture {
        repo: Arc<MockStudentRepository>,
        jokes: Arc<FixedJokeClient>,
        bookings: Arc<FixedBookingClient>,
        svc: StudentService,
    }

    fn fixture(repo: MockStudentRepository, jokes: FixedJokeClient, bookings: FixedBookingClient) -> Fixture {
        let repo = Arc::new(repo);
        let jokes = Arc::new(jokes);
        let bookings = Arc::new(bookings);
        let svc = StudentService::new(repo.clone(), jokes.clone(), bookings.clone());
        Fixture { repo, jokes, bookings, svc }
    }

    fn default_fixture(repo: MockStudentRepository) -> Fixture {
        fixture(repo, FixedJokeClient::new(""), FixedBookingClient::new(1))
    }

    #[tokio::test]
    async fn get_returns_existing_student() {
        let expected = gnome(1);
        let f = default_fixture(MockStudentRepository::with_students([expected.clone()]));

        let actual = f.svc.get_student(1).await.unwrap();
        assert_eq!(actual, expected);
    }

    #[tokio::test]
    async fn get_missing_student_is_not_found() {
        let f = default_fixture(MockStudentRepository::default());

        let err = f.svc.get_student(1).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn add_new_student_attaches_joke_and_booking() {
        let f = fixture(
            MockStudentRepository::default(),
            FixedJokeClient::new("Chuck Norris can divide by zero."),
            FixedBookingClient::new(1),
        );

        let created = f.svc.add_student(new_gnome()).await.unwrap();
        assert_eq!(created.joke, "Chuck Norris can divide by zero.");
        assert_eq!(created.booking_id, 1);
        assert_eq!(f.bookings.names(), vec!["Gnome".to_string()]);
        assert_eq!(f.jokes.calls(), 1);
        assert_eq!(f.repo.writes(), 1);
    }

    #[tokio::test]
    async fn added_student_can_be_fetched_back() {
        let f = fixture(MockStudentRepository::default(), FixedJokeClient::new("j"), FixedBookingClient::new(9));

        let input = NewStudent { name: "A".into(), email: "x@mail.com".into(), gender: Gender::Other };
        let created = f.svc.add_student(input).await.unwrap();
        let fetched = f.svc.get_student(created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "A");
        assert_eq!(fetched.joke, "j");
        assert_eq!(fetched.booking_id, 9);
    }

    #[tokio::test]
    async fn add_with_registered_email_is_bad_request_without_side_effects() {
        let f = default_fixture(MockStudentRepository::with_students([gnome(1)]));

        let err = f.svc.add_student(new_gnome()).await.unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));
        assert_eq!(f.repo.writes(), 0);
        assert_eq!(f.repo.len(), 1);
        assert_eq!(f.jokes.calls(), 0);
        assert_eq!(f.bookings.calls(), 0);
    }

    #[tokio::test]
    async fn padded_duplicate_email_is_bad_request() {
        let f = default_fixture(MockStudentRepository::default());

        let first = NewStudent { name: "A".into(), email: "x@mail.com".into(), gender: Gender::Other };
        f.svc.add_student(first).await.unwrap();

        let padded = NewStudent { name: "B".into(), email: " x@mail.com ".into(), gender: Gender::Other };
        let err = f.svc.add_student(padded).await.unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));
        assert_eq!(f.repo.writes(), 1);
        assert_eq!(f.jokes.calls(), 1);
    }

    #[tokio::test]
    async fn stored_email_is_trimmed() {
        let f = default_fixture(MockStudentRepository::default());

        let padded = NewStudent { name: "A".into(), email: "  x@mail.com\n".into(), gender: Gender::Other };
        let created = f.svc.add_student(padded).await.unwrap();
        assert_eq!(created.email, "x@mail.com");
    }

    #[tokio::test]
    async fn booking_timeout_is_an_integration_error_and_nothing_is_stored() {
        let base_url = crate::test_support::stalled_http_endpoint().await;
        let bookings = HttpBookingClient::new(&HttpClientConfig { base_url, timeout_secs: 1 }).unwrap();
        let repo = Arc::new(MockStudentRepository::default());
        let jokes = Arc::new(FixedJokeClient::new("j"));
        let svc = StudentService::new(repo.clone(), jokes.clone(), Arc::new(bookings));

        let err = svc.add_student(new_gnome()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Integration(IntegrationError::Timeout)));
        assert_eq!(jokes.calls(), 1);
        assert_eq!(repo.writes(), 0);
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn add_with_invalid_input_is_bad_request() {
        let f = default_fixture(MockStudentRepository::default());

        let blank_name = NewStudent { name: " ".into(), email: "x@mail.com".into(), gender: Gender::Male };
        assert!(matches!(f.svc.add_student(blank_name).await, Err(ServiceError::BadRequest(_))));

        let bad_email = NewStudent { name: "A".into(), email: "nope".into(), gender: Gender::Female };
        assert!(matches!(f.svc.add_student(bad_email).await, Err(ServiceError::BadRequest(_))));

        assert_eq!(f.jokes.calls(), 0);
        assert!(f.repo.is_empty());
    }

    #[tokio::test]
    async fn joke_failure_propagates_and_nothing_is_stored() {
        let f = fixture(MockStudentRepository::default(), FixedJokeClient::failing(), FixedBookingClient::new(1));

        let err = f.svc.add_student(new_gnome()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Integration(IntegrationError::Network(_))));
        assert_eq!(f.bookings.calls(), 0);
        assert_eq!(f.repo.writes(), 0);
    }

    #[tokio::test]
    async fn booking_failure_propagates_and_nothing_is_stored() {
        let f = fixture(MockStudentRepository::default(), FixedJokeClient::new("j"), FixedBookingClient::failing());

        let err = f.svc.add_student(new_gnome()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Integration(IntegrationError::Status { status: 503, .. })));
        assert_eq!(f.jokes.calls(), 1);
        assert_eq!(f.repo.writes(), 0);
    }

    #[tokio::test]
    async fn delete_existing_student() {
        let f = default_fixture(MockStudentRepository::with_students([gnome(1)]));

        f.svc.delete_student(1).await.unwrap();
        assert!(f.repo.is_empty());
        assert!(matches!(f.svc.get_student(1).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_missing_student_is_not_found() {
        let f = default_fixture(MockStudentRepository::default());

        let err = f.svc.delete_student(1).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(f.repo.writes(), 0);
    }

    #[tokio::test]
    async fn list_pages_through_students() {
        let students = (1..=5).map(|id| Student { email: format!("s{id}@mail.com"), ..gnome(id) });
        let f = default_fixture(MockStudentRepository::with_students(students));

        let first = f.svc.list_students(Pagination { page: 1, per_page: 2 }).await.unwrap();
        assert_eq!(first.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 2]);

        let last = f.svc.list_students(Pagination { page: 3, per_page: 2 }).await.unwrap();
        assert_eq!(last.iter().map(|s| s.id).collect::<Vec<_>>(), vec![5]);

        let beyond = f.svc.list_students(Pagination { page: 4, per_page: 2 }).await.unwrap();
        assert!(beyond.is_empty());
    }
}
