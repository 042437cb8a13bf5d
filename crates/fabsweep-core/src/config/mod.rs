//! Unified configuration layer.
//!
//! All environment variable reads are centralized here; the rest of the code
//! accesses structured config instead of calling `std::env::var` directly.
//!
//! - `loader`: `env_or`, `env_optional`, `env_bool` helpers plus `.env` loading
//! - `schema`: `SetupFlags`, `ObservabilityConfig`
//! - `env_keys`: key constants

pub mod env_keys;
pub mod loader;
pub mod schema;

pub use loader::{env_bool, env_optional, env_or, load_dotenv};
pub use loader::{remove_env_var, set_env_var};
pub use schema::{ObservabilityConfig, SetupFlags};
