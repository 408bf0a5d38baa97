use std::sync::{Arc, Mutex, PoisonError};

use diesel::prelude::*;

use crate::models::{Dish, Restaurant};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Query(#[from] diesel::result::Error),
    #[error("query worker failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Read-only access to the catalog tables over a single shared
/// connection. SQLite serializes statement execution, so the mutex is
/// the only coordination needed.
#[derive(Clone)]
pub struct CatalogStore {
    conn: Arc<Mutex<SqliteConnection>>,
}

impl CatalogStore {
    pub fn new(conn: SqliteConnection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    async fn run<T, F>(&self, query: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut SqliteConnection) -> QueryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let rows = tokio::task::spawn_blocking(move || {
            let mut conn = conn.lock().unwrap_or_else(PoisonError::into_inner);
            query(&mut conn)
        })
        .await??;
        Ok(rows)
    }

    pub async fn list_restaurants(&self) -> Result<Vec<Restaurant>, StoreError> {
        self.run(|conn| {
            use crate::schema::restaurants::dsl::*;
            restaurants.select(Restaurant::as_select()).load(conn)
        })
        .await
    }

    pub async fn restaurant_by_id(
        &self,
        restaurant_id: i32,
    ) -> Result<Option<Restaurant>, StoreError> {
        self.run(move |conn| {
            use crate::schema::restaurants::dsl::*;
            restaurants
                .find(restaurant_id)
                .select(Restaurant::as_select())
                .first(conn)
                .optional()
        })
        .await
    }

    pub async fn restaurants_by_cuisine(
        &self,
        wanted: &str,
    ) -> Result<Vec<Restaurant>, StoreError> {
        let wanted = wanted.to_owned();
        self.run(move |conn| {
            use crate::schema::restaurants::dsl::*;
            restaurants
                .filter(cuisine.eq(wanted))
                .select(Restaurant::as_select())
                .load(conn)
        })
        .await
    }

    /// All three flags must match at once.
    pub async fn restaurants_by_flags(
        &self,
        veg: bool,
        outdoor_seating: bool,
        luxury: bool,
    ) -> Result<Vec<Restaurant>, StoreError> {
        self.run(move |conn| {
            use crate::schema::restaurants::dsl::*;
            restaurants
                .filter(is_veg.eq(veg))
                .filter(has_outdoor_seating.eq(outdoor_seating))
                .filter(is_luxury.eq(luxury))
                .select(Restaurant::as_select())
                .load(conn)
        })
        .await
    }

    pub async fn restaurants_by_rating(&self) -> Result<Vec<Restaurant>, StoreError> {
        self.run(|conn| {
            use crate::schema::restaurants::dsl::*;
            restaurants
                .order(rating.desc())
                .select(Restaurant::as_select())
                .load(conn)
        })
        .await
    }

    pub async fn list_dishes(&self) -> Result<Vec<Dish>, StoreError> {
        self.run(|conn| {
            use crate::schema::dishes::dsl::*;
            dishes.select(Dish::as_select()).load(conn)
        })
        .await
    }

    pub async fn dish_by_id(&self, dish_id: i32) -> Result<Option<Dish>, StoreError> {
        self.run(move |conn| {
            use crate::schema::dishes::dsl::*;
            dishes
                .find(dish_id)
                .select(Dish::as_select())
                .first(conn)
                .optional()
        })
        .await
    }

    pub async fn dishes_by_veg(&self, veg: bool) -> Result<Vec<Dish>, StoreError> {
        self.run(move |conn| {
            use crate::schema::dishes::dsl::*;
            dishes
                .filter(is_veg.eq(veg))
                .select(Dish::as_select())
                .load(conn)
        })
        .await
    }

    pub async fn dishes_by_price(&self) -> Result<Vec<Dish>, StoreError> {
        self.run(|conn| {
            use crate::schema::dishes::dsl::*;
            dishes.order(price.asc()).select(Dish::as_select()).load(conn)
        })
        .await
    }
}
