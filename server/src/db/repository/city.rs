//! City Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{City, CityCreate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "city";

/// Sort keys accepted by [`CityRepository::find_all_sorted`]
pub const CITY_SORT_KEYS: &[&str] = &["name"];

#[derive(Clone)]
pub struct CityRepository {
    base: BaseRepository,
}

impl CityRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all cities, optionally sorted by a whitelisted key
    pub async fn find_all_sorted(&self, sort: Option<&str>) -> RepoResult<Vec<City>> {
        let query = match sort {
            None => "SELECT * FROM city".to_string(),
            Some(key) if CITY_SORT_KEYS.contains(&key) => {
                format!("SELECT * FROM city ORDER BY {key}")
            }
            Some(key) => {
                return Err(RepoError::Validation(format!("Unknown sort key: {key}")));
            }
        };
        let cities: Vec<City> = self.base.db().query(query).await?.take(0)?;
        Ok(cities)
    }

    /// Create a new city
    pub async fn create(&self, data: CityCreate) -> RepoResult<City> {
        let city = City {
            id: None,
            name: data.name,
        };
        let created: Option<City> = self.base.db().create(TABLE).content(city).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create city".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_mem;

    #[tokio::test]
    async fn sorted_listing_and_rejected_key() {
        let db = open_mem().await.unwrap();
        let repo = CityRepository::new(db);
        for name in ["Valencia", "Alicante", "Madrid"] {
            repo.create(CityCreate { name: name.into() }).await.unwrap();
        }

        let cities = repo.find_all_sorted(Some("name")).await.unwrap();
        let names: Vec<&str> = cities.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Alicante", "Madrid", "Valencia"]);

        let err = repo.find_all_sorted(Some("id; DROP")).await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }
}
