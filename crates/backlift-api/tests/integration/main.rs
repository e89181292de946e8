//! Integration tests for backlift-api
//!
//! Uses wiremock to simulate the Backlift service and verifies
//! end-to-end behavior of the bulk upload, response classification,
//! and the provisioning flows.

mod common;

mod test_provision;
mod test_upload;
