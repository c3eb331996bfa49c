/// Notice generation core - identity model, findings and aggregation rules
///
/// Nothing in here performs I/O; storage, scanning and archiving live
/// behind the ports in `crate::ports`.
pub mod domain;
pub mod policies;
pub mod services;
