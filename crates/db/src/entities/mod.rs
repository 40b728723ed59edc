//! `SeaORM` entities.

pub mod prelude;

pub mod fee_assignments;
pub mod sea_orm_active_enums;
pub mod users;
