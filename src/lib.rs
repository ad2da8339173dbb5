//! Client core of the food-delivery administration dashboard.
//!
//! Each backend resource is served by a [`ResourceGateway`](actor_framework::ResourceGateway)
//! task; typed clients in [`clients`] send it requests over a channel. The
//! order-status workflow lives in [`workflow`], the interactive status control
//! in [`controls`], and the filter/sort/paginate list views in [`views`].

pub mod actor_framework;
pub mod api;
pub mod app_system;
pub mod clients;
pub mod controls;
pub mod domain;
pub mod error;
pub mod resources;
pub mod views;
pub mod workflow;

#[cfg(test)]
mod mock_framework;
