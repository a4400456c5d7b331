pub mod host;
pub mod parameter;
pub mod store;

pub use host::{HostError, ParameterHost};
pub use parameter::Parameter;
pub use store::ParameterStore;
