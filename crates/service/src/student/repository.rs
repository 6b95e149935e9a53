use async_trait::async_trait;
use common::pagination::Pagination;

use super::domain::{EnrichedStudent, Student};
use crate::errors::ServiceError;

/// Repository abstraction for student persistence.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, ServiceError>;
    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError>;
    async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError>;
    async fn insert(&self, student: EnrichedStudent) -> Result<Student, ServiceError>;
    async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError>;
    /// Page of students ordered by id.
    async fn list(&self, page: Pagination) -> Result<Vec<Student>, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    pub struct MockStudentRepository {
        rows: Mutex<BTreeMap<i64, Student>>, // key: student id
        writes: AtomicUsize,
    }

    impl MockStudentRepository {
        /// Pre-populate the store; seeding does not count as a write.
        pub fn with_students(students: impl IntoIterator<Item = Student>) -> Self {
            let rows = students.into_iter().map(|s| (s.id, s)).collect();
            Self { rows: Mutex::new(rows), writes: AtomicUsize::new(0) }
        }

        /// Number of inserts and deletes performed through the trait.
        pub fn writes(&self) -> usize { self.writes.load(Ordering::SeqCst) }

        pub fn len(&self) -> usize { self.rows.lock().map(|r| r.len()).unwrap_or_default() }

        pub fn is_empty(&self) -> bool { self.len() == 0 }

        fn rows(&self) -> Result<MutexGuard<'_, BTreeMap<i64, Student>>, ServiceError> {
            self.rows.lock().map_err(|_| ServiceError::Db("mock repository lock poisoned".into()))
        }
    }

    #[async_trait]
    impl StudentRepository for MockStudentRepository {
        async fn find_by_id(&self, id: i64) -> Result<Option<Student>, ServiceError> {
            Ok(self.rows()?.get(&id).cloned())
        }

        async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            Ok(self.rows()?.contains_key(&id))
        }

        async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError> {
            Ok(self.rows()?.values().any(|s| s.email == email))
        }

        async fn insert(&self, student: EnrichedStudent) -> Result<Student, ServiceError> {
            let mut rows = self.rows()?;
            if rows.values().any(|s| s.email == student.email) {
                return Err(ServiceError::BadRequest("email already registered".into()));
            }
            let id = rows.keys().next_back().copied().unwrap_or(0) + 1;
            let created = Student {
                id,
                name: student.name,
                email: student.email,
                gender: student.gender,
                joke: student.joke,
                booking_id: student.booking_id,
                created_at: chrono::Utc::now().into(),
            };
            rows.insert(id, created.clone());
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(created)
        }

        async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
            self.rows()?.remove(&id);
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn list(&self, page: Pagination) -> Result<Vec<Student>, ServiceError> {
            let (idx, per_page) = page.normalize();
            Ok(self
                .rows()?
                .values()
                .skip((idx * per_page) as usize)
                .take(per_page as usize)
                .cloned()
                .collect())
        }
    }
}
