//! Integration test suite for Sundown.
//!
//! These tests exercise the update loop end to end: keyboard input,
//! background sync, reminders, and bulk import, all driven through the
//! same `Message` / `Command` surface the logic thread uses.
//!
//! # Test Categories
//!
//! - `dashboard_e2e`: Board navigation, mutations, workspaces, import
//! - `sync_and_reminders`: Simulator cycles and reminder alerts
//!
//! # CI Compatibility
//!
//! No terminal, network, or timer dependencies; everything runs against
//! in-memory state (plus tempfile for import payloads).

mod fixtures;

mod dashboard_e2e;
mod sync_and_reminders;
