// Domain layer - switchgear devices, severity tiers and telemetry types
pub mod device;
pub mod error;
pub mod severity;
pub mod telemetry;
