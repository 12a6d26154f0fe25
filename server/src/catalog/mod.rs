//! Catalog Query Service
//!
//! Read side of the catalog: service listings and detail composition,
//! cities, establishment search and reviews. Sorting is restricted to
//! whitelisted keys and filters only ever narrow the active set.

use crate::db::models::{
    City, Establishment, Review, ReviewCreate, Service, ServiceDetail, ServiceSummary,
};
use crate::db::repository::{
    CityRepository, EstablishmentRepository, ReviewRepository, ServiceRepository,
    establishment::EstablishmentFilter,
};
use crate::pricing;
use crate::utils::{AppError, AppResult};
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct CatalogService {
    services: ServiceRepository,
    cities: CityRepository,
    establishments: EstablishmentRepository,
    reviews: ReviewRepository,
}

impl CatalogService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            services: ServiceRepository::new(db.clone()),
            cities: CityRepository::new(db.clone()),
            establishments: EstablishmentRepository::new(db.clone()),
            reviews: ReviewRepository::new(db),
        }
    }

    /// Active service summaries, optionally sorted by name, discount or
    /// publish date
    pub async fn list_services(&self, sort: Option<&str>) -> AppResult<Vec<ServiceSummary>> {
        Ok(self.services.find_all_sorted(sort).await?)
    }

    /// Full service detail with line items and the computed display price
    pub async fn service_detail(&self, id: &str) -> AppResult<ServiceDetail> {
        let mut detail = self
            .services
            .find_detail(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Service {} not found", id)))?;
        detail.price = pricing::display_price(pricing::compute_price(&detail));
        Ok(detail)
    }

    /// All cities, optionally sorted by name
    pub async fn list_cities(&self, sort: Option<&str>) -> AppResult<Vec<City>> {
        Ok(self.cities.find_all_sorted(sort).await?)
    }

    /// Active establishments matching every supplied filter
    pub async fn list_establishments(
        &self,
        filter: EstablishmentFilter,
    ) -> AppResult<Vec<Establishment>> {
        Ok(self.establishments.find_filtered(filter).await?)
    }

    /// Reviews of a service, newest first
    pub async fn list_reviews(&self, service_id: &str) -> AppResult<Vec<Review>> {
        self.require_service(service_id).await?;
        Ok(self.reviews.find_by_service(service_id).await?)
    }

    /// Attach a review to a service
    pub async fn create_review(
        &self,
        service_id: &str,
        author: RecordId,
        text: String,
        rating: u8,
    ) -> AppResult<Review> {
        let service = self.require_service(service_id).await?;
        let service_id = service
            .id
            .ok_or_else(|| AppError::Internal("Service record without id".to_string()))?;
        let review = self
            .reviews
            .create(ReviewCreate {
                service: service_id,
                author: Some(author),
                text,
                rating,
            })
            .await?;
        Ok(review)
    }

    async fn require_service(&self, id: &str) -> AppResult<Service> {
        self.services
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Service {} not found", id)))
    }
}
