//! Route handlers organized by resource

pub mod gods;
pub mod health;
pub mod mythologies;
