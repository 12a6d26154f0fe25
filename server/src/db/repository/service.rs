//! Service Repository
//!
//! Covers the service aggregate and its line-item tables (flowers,
//! establishments, dishes, taxis, decorations).

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{
    Decoration, DecorationCreate, Dish, DishCreate, EstablishmentWithDishes, Flowers,
    FlowersCreate, Image, ImageCreate, Service, ServiceCreate, ServiceDetail, ServiceSummary,
    Taxi, TaxiCreate,
};
use rust_decimal::Decimal;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "service";

/// Sort keys accepted by [`ServiceRepository::find_all_sorted`]
pub const SERVICE_SORT_KEYS: &[&str] = &["name", "discount", "publish"];

#[derive(Clone)]
pub struct ServiceRepository {
    base: BaseRepository,
}

impl ServiceRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active services as listing summaries, optionally sorted by a
    /// whitelisted key. Internal columns are dropped at deserialization.
    pub async fn find_all_sorted(&self, sort: Option<&str>) -> RepoResult<Vec<ServiceSummary>> {
        let query = match sort {
            None => "SELECT * FROM service WHERE is_active = true".to_string(),
            Some(key) if SERVICE_SORT_KEYS.contains(&key) => {
                format!("SELECT * FROM service WHERE is_active = true ORDER BY {key}")
            }
            Some(key) => {
                return Err(RepoError::Validation(format!("Unknown sort key: {key}")));
            }
        };
        let services: Vec<ServiceSummary> = self.base.db().query(query).await?.take(0)?;
        Ok(services)
    }

    /// Find service by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Service>> {
        let thing = BaseRepository::parse_id(id)?;
        let service: Option<Service> = self.base.db().select(thing).await?;
        Ok(service)
    }

    /// Eager-load a service with all of its active line items.
    ///
    /// The price field comes back zero; the pricing engine fills it in.
    pub async fn find_detail(&self, id: &str) -> RepoResult<Option<ServiceDetail>> {
        let thing = BaseRepository::parse_id(id)?;
        let Some(service) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut result = self
            .base
            .db()
            .query("SELECT * FROM flowers WHERE service = $service AND is_active = true")
            .query("SELECT * FROM establishment WHERE service = $service AND is_active = true")
            .query("SELECT * FROM taxi WHERE service = $service AND is_active = true")
            .query("SELECT * FROM decoration WHERE service = $service AND is_active = true")
            .bind(("service", thing))
            .await?;

        let flowers: Vec<Flowers> = result.take(0)?;
        let establishments: Vec<crate::db::models::Establishment> = result.take(1)?;
        let taxis: Vec<Taxi> = result.take(2)?;
        let decorations: Vec<Decoration> = result.take(3)?;

        let mut with_dishes = Vec::with_capacity(establishments.len());
        for establishment in establishments {
            let dishes = match &establishment.id {
                Some(est_id) => self.find_dishes(est_id).await?,
                None => Vec::new(),
            };
            with_dishes.push(EstablishmentWithDishes {
                establishment,
                dishes,
            });
        }

        Ok(Some(ServiceDetail {
            service,
            flowers,
            establishments: with_dishes,
            taxis,
            decorations,
            price: Decimal::ZERO,
        }))
    }

    /// Create a new service. Discount outside [0, 100] is rejected here so
    /// no out-of-range value ever reaches storage.
    pub async fn create(&self, data: ServiceCreate) -> RepoResult<Service> {
        if data.discount > 100 {
            return Err(RepoError::Validation(format!(
                "Discount must be within 0..=100, got {}",
                data.discount
            )));
        }
        let service = Service {
            id: None,
            name: data.name,
            description: data.description,
            photo: data.photo,
            discount: data.discount,
            date_from: data.date_from,
            date_to: data.date_to,
            comment: data.comment,
            is_active: true,
            publish: chrono::Utc::now(),
        };
        let created: Option<Service> = self.base.db().create(TABLE).content(service).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create service".to_string()))
    }

    /// Attach a flowers line item
    pub async fn add_flowers(&self, data: FlowersCreate) -> RepoResult<Flowers> {
        let flowers = Flowers {
            id: None,
            service: data.service,
            name: data.name,
            description: data.description,
            photo: data.photo,
            count: data.count,
            price: data.price,
            comment: data.comment,
            is_active: true,
            publish: chrono::Utc::now(),
        };
        let created: Option<Flowers> = self.base.db().create("flowers").content(flowers).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create flowers".to_string()))
    }

    /// Attach a taxi line item. Price falls back to 15.00 when omitted.
    pub async fn add_taxi(&self, data: TaxiCreate) -> RepoResult<Taxi> {
        let taxi = Taxi {
            id: None,
            service: data.service,
            boarding_address: data.boarding_address,
            dropoff_address: data.dropoff_address,
            date_time: data.date_time,
            price: data.price.unwrap_or_else(|| Decimal::new(1500, 2)),
            comment: data.comment,
            is_active: true,
            publish: chrono::Utc::now(),
        };
        let created: Option<Taxi> = self.base.db().create("taxi").content(taxi).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create taxi".to_string()))
    }

    /// Attach a decoration line item
    pub async fn add_decoration(&self, data: DecorationCreate) -> RepoResult<Decoration> {
        let decoration = Decoration {
            id: None,
            service: data.service,
            name: data.name,
            description: data.description,
            photo: data.photo,
            price: data.price,
            comment: data.comment,
            is_active: true,
            publish: chrono::Utc::now(),
        };
        let created: Option<Decoration> = self
            .base
            .db()
            .create("decoration")
            .content(decoration)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create decoration".to_string()))
    }

    /// Store an image reference; its id goes into the photo field of other
    /// records
    pub async fn add_image(&self, data: ImageCreate) -> RepoResult<Image> {
        let image = Image {
            id: None,
            src: data.src,
            alt: data.alt,
        };
        let created: Option<Image> = self.base.db().create("image").content(image).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create image".to_string()))
    }

    /// Attach a dish to an establishment
    pub async fn add_dish(&self, data: DishCreate) -> RepoResult<Dish> {
        let dish = Dish {
            id: None,
            establishment: data.establishment,
            name: data.name,
            description: data.description,
            photo: data.photo,
            count: data.count,
            price: data.price,
            comment: data.comment,
            is_active: true,
            publish: chrono::Utc::now(),
        };
        let created: Option<Dish> = self.base.db().create("dish").content(dish).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create dish".to_string()))
    }

    async fn find_dishes(&self, establishment: &RecordId) -> RepoResult<Vec<Dish>> {
        let dishes: Vec<Dish> = self
            .base
            .db()
            .query("SELECT * FROM dish WHERE establishment = $est AND is_active = true")
            .bind(("est", establishment.clone()))
            .await?
            .take(0)?;
        Ok(dishes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_mem;
    use crate::db::repository::EstablishmentRepository;
    use crate::db::models::EstablishmentCreate;

    fn service_create(name: &str, discount: u32) -> ServiceCreate {
        ServiceCreate {
            name: name.into(),
            description: None,
            photo: None,
            discount,
            date_from: None,
            date_to: None,
            comment: None,
        }
    }

    #[tokio::test]
    async fn sort_whitelist_enforced() {
        let db = open_mem().await.unwrap();
        let repo = ServiceRepository::new(db);
        repo.create(service_create("Wedding", 10)).await.unwrap();
        repo.create(service_create("Birthday", 0)).await.unwrap();

        let sorted = repo.find_all_sorted(Some("name")).await.unwrap();
        assert_eq!(sorted[0].name, "Birthday");

        // listing summaries never expose internal columns
        let json = serde_json::to_value(&sorted[0]).unwrap();
        assert!(json.get("is_active").is_none());
        assert!(json.get("publish").is_none());

        let err = repo.find_all_sorted(Some("hash_pass")).await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[tokio::test]
    async fn discount_out_of_range_rejected() {
        let db = open_mem().await.unwrap();
        let repo = ServiceRepository::new(db);
        let err = repo.create(service_create("Bad", 101)).await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[tokio::test]
    async fn detail_loads_line_items_grouped_by_establishment() {
        let db = open_mem().await.unwrap();
        let repo = ServiceRepository::new(db.clone());
        let est_repo = EstablishmentRepository::new(db);

        let service = repo.create(service_create("Gala", 0)).await.unwrap();
        let service_id = service.id.clone().unwrap();

        let photo = repo
            .add_image(ImageCreate {
                src: "/media/roses.jpg".into(),
                alt: "Roses".into(),
            })
            .await
            .unwrap();

        repo.add_flowers(FlowersCreate {
            service: service_id.clone(),
            name: "Roses".into(),
            description: None,
            photo: photo.id,
            count: Some(12),
            price: Decimal::new(2550, 2),
            comment: None,
        })
        .await
        .unwrap();

        let est = est_repo
            .create(EstablishmentCreate {
                service: service_id.clone(),
                name: "Cafe Sol".into(),
                description: None,
                photo: None,
                address: "Main St 1".into(),
                comment: None,
                city: None,
                start_date: chrono::Utc::now(),
                end_date: None,
                total_tables: 10,
                opening_time: None,
                closing_time: None,
            })
            .await
            .unwrap();

        repo.add_dish(DishCreate {
            establishment: est.id.clone().unwrap(),
            name: "Paella".into(),
            description: None,
            photo: None,
            count: 2,
            price: Decimal::new(1200, 2),
            comment: None,
        })
        .await
        .unwrap();

        let detail = repo
            .find_detail(&service_id.to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(detail.flowers.len(), 1);
        assert!(detail.flowers[0].photo.is_some());
        assert_eq!(detail.establishments.len(), 1);
        assert_eq!(detail.establishments[0].dishes.len(), 1);
        assert_eq!(detail.establishments[0].establishment.opening_time, "10:00");

        let missing = repo.find_detail("service:missing").await.unwrap();
        assert!(missing.is_none());
    }
}
