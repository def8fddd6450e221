pub mod guard;

pub use guard::{decide, is_exempt, route_guard, GuardDecision};
