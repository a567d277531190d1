// Core module - Service seams, resolution, metrics merge and release checks
pub mod confirm;
pub mod metrics;
pub mod release;
pub mod resolve;
pub mod sdk;

pub use confirm::{AutoConfirm, Confirmer, Gate};
pub use release::{NoopPackager, Packager};
pub use sdk::ManagementSdk;
