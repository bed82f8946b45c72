pub mod error;
pub mod paths;
pub mod run_context;
pub mod settings;

pub use error::*;
pub use paths::*;
pub use run_context::*;
pub use settings::*;
