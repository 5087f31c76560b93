#![allow(non_camel_case_types)]

pub mod configuration;
pub mod controller;
pub mod csv_response;
pub mod dao;
pub mod error;
pub mod helpers;
pub mod model;
pub mod provider;
pub mod report;
pub mod server;
