/// License text adapters
mod directory_provider;
mod map_provider;

pub use directory_provider::DirectoryLicenseTextProvider;
pub use map_provider::MapLicenseTextProvider;
