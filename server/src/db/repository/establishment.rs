//! Establishment Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Establishment, EstablishmentCreate};
use chrono::{DateTime, Utc};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "establishment";

const DEFAULT_OPENING: &str = "10:00";
const DEFAULT_CLOSING: &str = "22:00";

/// Optional conjunctive filters for the establishment listing
#[derive(Debug, Clone, Default)]
pub struct EstablishmentFilter {
    pub city: Option<String>,
    pub service: Option<String>,
    /// Only establishments opening on or after this instant
    pub date_from: Option<DateTime<Utc>>,
    /// Only establishments closing on or before this instant.
    /// Open-ended establishments never match.
    pub date_to: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct EstablishmentRepository {
    base: BaseRepository,
}

impl EstablishmentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find establishment by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Establishment>> {
        let thing = BaseRepository::parse_id(id)?;
        let establishment: Option<Establishment> = self.base.db().select(thing).await?;
        Ok(establishment)
    }

    /// List active establishments matching every supplied filter
    pub async fn find_filtered(
        &self,
        filter: EstablishmentFilter,
    ) -> RepoResult<Vec<Establishment>> {
        let mut query = String::from("SELECT * FROM establishment WHERE is_active = true");
        if filter.city.is_some() {
            query.push_str(" AND city = $city");
        }
        if filter.service.is_some() {
            query.push_str(" AND service = $service");
        }
        if filter.date_from.is_some() {
            query.push_str(" AND start_date >= $date_from");
        }
        if filter.date_to.is_some() {
            query.push_str(" AND end_date != NONE AND end_date <= $date_to");
        }
        query.push_str(" ORDER BY name");

        let mut q = self.base.db().query(query);
        if let Some(city) = filter.city {
            q = q.bind(("city", BaseRepository::parse_id(&city)?));
        }
        if let Some(service) = filter.service {
            q = q.bind(("service", BaseRepository::parse_id(&service)?));
        }
        // Timestamps are stored in chrono's serde form; bind the same
        // representation so the range comparisons stay apples-to-apples.
        if let Some(date_from) = filter.date_from {
            q = q.bind((
                "date_from",
                date_from.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true),
            ));
        }
        if let Some(date_to) = filter.date_to {
            q = q.bind((
                "date_to",
                date_to.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true),
            ));
        }

        let establishments: Vec<Establishment> = q.await?.take(0)?;
        Ok(establishments)
    }

    /// Create a new establishment, applying the opening-hours defaults
    pub async fn create(&self, data: EstablishmentCreate) -> RepoResult<Establishment> {
        let establishment = Establishment {
            id: None,
            service: data.service,
            name: data.name,
            description: data.description,
            photo: data.photo,
            address: data.address,
            comment: data.comment,
            city: data.city,
            is_active: true,
            publish: chrono::Utc::now(),
            start_date: data.start_date,
            end_date: data.end_date,
            total_tables: data.total_tables,
            opening_time: data.opening_time.unwrap_or_else(|| DEFAULT_OPENING.into()),
            closing_time: data.closing_time.unwrap_or_else(|| DEFAULT_CLOSING.into()),
        };
        let created: Option<Establishment> =
            self.base.db().create(TABLE).content(establishment).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create establishment".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{CityCreate, ServiceCreate};
    use crate::db::open_mem;
    use crate::db::repository::{CityRepository, ServiceRepository};
    use chrono::TimeZone;

    async fn seed() -> (EstablishmentRepository, String, String) {
        let db = open_mem().await.unwrap();
        let services = ServiceRepository::new(db.clone());
        let cities = CityRepository::new(db.clone());
        let repo = EstablishmentRepository::new(db);

        let service = services
            .create(ServiceCreate {
                name: "Wedding".into(),
                description: None,
                photo: None,
                discount: 0,
                date_from: None,
                date_to: None,
                comment: None,
            })
            .await
            .unwrap();
        let city = cities
            .create(CityCreate {
                name: "Madrid".into(),
            })
            .await
            .unwrap();

        let service_id = service.id.unwrap();
        let city_id = city.id.unwrap();

        for (name, with_city, start_year, end) in [
            ("Alpha", true, 2020, None),
            (
                "Beta",
                false,
                2022,
                Some(chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            ),
        ] {
            repo.create(EstablishmentCreate {
                service: service_id.clone(),
                name: name.into(),
                description: None,
                photo: None,
                address: "Somewhere 1".into(),
                comment: None,
                city: with_city.then(|| city_id.clone()),
                start_date: chrono::Utc.with_ymd_and_hms(start_year, 1, 1, 0, 0, 0).unwrap(),
                end_date: end,
                total_tables: 5,
                opening_time: None,
                closing_time: None,
            })
            .await
            .unwrap();
        }

        (repo, service_id.to_string(), city_id.to_string())
    }

    #[tokio::test]
    async fn filters_are_conjunctive() {
        let (repo, service_id, city_id) = seed().await;

        let all = repo.find_filtered(EstablishmentFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);

        let by_city = repo
            .find_filtered(EstablishmentFilter {
                city: Some(city_id.clone()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_city.len(), 1);
        assert_eq!(by_city[0].name, "Alpha");

        // only Beta starts after 2021
        let by_from = repo
            .find_filtered(EstablishmentFilter {
                date_from: Some(chrono::Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_from.len(), 1);
        assert_eq!(by_from[0].name, "Beta");

        // open-ended Alpha never satisfies an upper bound
        let by_to = repo
            .find_filtered(EstablishmentFilter {
                date_to: Some(chrono::Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_to.len(), 1);
        assert_eq!(by_to[0].name, "Beta");

        let by_all = repo
            .find_filtered(EstablishmentFilter {
                city: Some(city_id),
                service: Some(service_id),
                date_from: Some(chrono::Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap()),
                date_to: None,
            })
            .await
            .unwrap();
        assert_eq!(by_all.len(), 1);
        assert_eq!(by_all[0].name, "Alpha");
    }

    #[tokio::test]
    async fn invalid_filter_id_rejected() {
        let (repo, _, _) = seed().await;
        let err = repo
            .find_filtered(EstablishmentFilter {
                city: Some("not a record id".into()),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }
}
