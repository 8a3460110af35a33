//! Integration tests: HTTP over the in-memory store, and the PostgreSQL
//! store when `DATABASE_URL` is set.

mod authority_test;
mod directory_test;
mod helpers;
mod postgres_test;
