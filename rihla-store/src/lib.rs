pub mod app_config;
pub mod database;
pub mod submission_repo;

pub use database::DbClient;
pub use submission_repo::PgSubmissionRepository;
