use diesel::prelude::*;

use crate::schema::{dishes, restaurants};

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub cuisine: String,
    pub rating: f64,
    pub is_veg: bool,
    pub has_outdoor_seating: bool,
    pub is_luxury: bool,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = dishes)]
pub struct Dish {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub is_veg: bool,
}
