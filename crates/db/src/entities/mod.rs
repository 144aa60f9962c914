//! `SeaORM` entity definitions.

pub mod photos;
