//! Request handlers for product CRUD.

pub mod product;
