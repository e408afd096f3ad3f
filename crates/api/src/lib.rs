//! HTTP surface: server wiring, routing, form parsing and HTML views.

pub mod app;
