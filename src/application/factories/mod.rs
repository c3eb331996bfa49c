/// Factories selecting infrastructure adapters from configuration
mod presenter_factory;
mod storage_factory;

pub use presenter_factory::{PresenterFactory, PresenterType};
pub use storage_factory::StorageFactory;
