pub mod seaorm;

pub use seaorm::SeaOrmStudentRepository;
