//! Review Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Review, ReviewCreate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "review";

#[derive(Clone)]
pub struct ReviewRepository {
    base: BaseRepository,
}

impl ReviewRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Active reviews for a service, newest first
    pub async fn find_by_service(&self, service_id: &str) -> RepoResult<Vec<Review>> {
        let service = BaseRepository::parse_id(service_id)?;
        let reviews: Vec<Review> = self
            .base
            .db()
            .query(
                "SELECT * FROM review WHERE service = $service AND is_active = true \
                 ORDER BY data DESC",
            )
            .bind(("service", service))
            .await?
            .take(0)?;
        Ok(reviews)
    }

    /// Create a review. Rating is held in 1..=5.
    pub async fn create(&self, data: ReviewCreate) -> RepoResult<Review> {
        if !(1..=5).contains(&data.rating) {
            return Err(RepoError::Validation(format!(
                "Rating must be within 1..=5, got {}",
                data.rating
            )));
        }
        let review = Review {
            id: None,
            service: data.service,
            author: data.author,
            text: data.text,
            rating: data.rating,
            data: chrono::Utc::now(),
            is_active: true,
        };
        let created: Option<Review> = self.base.db().create(TABLE).content(review).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create review".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::ServiceCreate;
    use crate::db::open_mem;
    use crate::db::repository::ServiceRepository;

    #[tokio::test]
    async fn create_and_list_by_service() {
        let db = open_mem().await.unwrap();
        let services = ServiceRepository::new(db.clone());
        let repo = ReviewRepository::new(db);

        let service = services
            .create(ServiceCreate {
                name: "Gala".into(),
                description: None,
                photo: None,
                discount: 0,
                date_from: None,
                date_to: None,
                comment: None,
            })
            .await
            .unwrap();
        let service_id = service.id.unwrap();

        repo.create(ReviewCreate {
            service: service_id.clone(),
            author: None,
            text: "Lovely".into(),
            rating: 5,
        })
        .await
        .unwrap();

        let err = repo
            .create(ReviewCreate {
                service: service_id.clone(),
                author: None,
                text: "Broken".into(),
                rating: 0,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));

        let reviews = repo.find_by_service(&service_id.to_string()).await.unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].rating, 5);
    }
}
