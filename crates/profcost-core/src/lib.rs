//! Core types for profession leveling cost estimation.
//!
//! Provides the reagent data model ([`model::RequirementSet`] as an OR of
//! AND-groups), the per-step and per-profession cost records, the market
//! price catalog ([`catalog::PriceCatalog`]), and TOML configuration.

pub mod catalog;
pub mod config;
pub mod model;
