// Library root
// -----------
// This crate exposes a small library surface for the `rfid-lookup` CLI.
// The binary (`main.rs`) wires these modules together.
//
// Module responsibilities:
// - `env`, `config`: resolve the API URL and key pair from explicit values
//   or the environment.
// - `api`: the `UserLookup` capability and its blocking HTTP client.
// - `models`: request/response payloads.
// - `ui`: prompt for an RFID and print the answer.
// - `error`: the error type shared by the above.
pub mod api;
pub mod config;
pub mod env;
pub mod error;
pub mod models;
pub mod ui;

pub use api::{ApiClient, UserLookup};
pub use config::{ClientConfig, ClientOptions};
pub use error::ApiError;
pub use models::{RfidLookup, UserId, UserRecord};
pub use ui::LookupOutcome;
