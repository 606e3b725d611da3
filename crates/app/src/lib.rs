//! `dispatch-app`: application layer for the delivery domain.
//!
//! Sequences the domain calls (create → assign → move* → complete) over
//! id-indexed repositories, and hosts the grid simulator.

pub mod commands;
pub mod config;
pub mod journal;
pub mod service;
pub mod simulation;

pub use commands::{AssignOrder, CreateOrder, RegisterCourier};
pub use config::SimConfig;
pub use journal::{DeliveryEvent, Journal};
pub use service::{DispatchError, DispatchService};
pub use simulation::{SimulationReport, run_simulation};
