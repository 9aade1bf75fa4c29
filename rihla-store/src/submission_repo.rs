use async_trait::async_trait;
use rihla_core::{StorageError, SubmissionRecord, SubmissionRepository};
use sqlx::PgPool;

/// Postgres-backed submission store: one insert-only table per kind.
/// `created_at` and row ids are assigned by the database.
pub struct PgSubmissionRepository {
    pub pool: PgPool,
}

impl PgSubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionRepository for PgSubmissionRepository {
    #[tracing::instrument(name = "Insert submission", skip(self, record), fields(kind = record.kind().as_str()))]
    async fn insert(&self, record: &SubmissionRecord) -> Result<(), StorageError> {
        let result = match record {
            SubmissionRecord::Contact(c) => {
                sqlx::query(
                    r#"
                    INSERT INTO contact_inquiries (name, email, phone, subject, message)
                    VALUES ($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(&c.name)
                .bind(c.email.as_ref().map(|e| e.as_ref().as_str()))
                .bind(c.phone.as_ref())
                .bind(&c.subject)
                .bind(&c.message)
                .execute(&self.pool)
                .await
            }
            SubmissionRecord::FlightInquiry(f) => {
                sqlx::query(
                    r#"
                    INSERT INTO flight_inquiries
                        (departure_city, arrival_city, departure_date, return_date,
                         adults, children, infants,
                         contact_name, contact_phone, contact_email)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                    "#,
                )
                .bind(&f.departure_city)
                .bind(&f.arrival_city)
                .bind(&f.departure_date)
                .bind(f.return_date.as_deref())
                .bind(f.adults)
                .bind(f.children)
                .bind(f.infants)
                .bind(&f.contact_name)
                .bind(f.contact_phone.as_ref())
                .bind(f.contact_email.as_ref().map(|e| e.as_ref().as_str()))
                .execute(&self.pool)
                .await
            }
            SubmissionRecord::CustomPackage(p) => {
                sqlx::query(
                    r#"
                    INSERT INTO custom_package_requests
                        (name, phone_no, email, departure_city, budget, details)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    "#,
                )
                .bind(&p.name)
                .bind(p.phone_no.as_ref())
                .bind(p.email.as_ref().map(|e| e.as_ref().as_str()))
                .bind(&p.departure_city)
                .bind(p.budget.as_deref())
                .bind(p.details.as_deref())
                .execute(&self.pool)
                .await
            }
        };

        result
            .map(|_| ())
            .map_err(|e| StorageError::Backend(e.to_string()))
    }
}
