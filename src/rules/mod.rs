pub mod family;
pub mod set;

pub use family::Family;
pub use set::{Rule, RuleSet, Verdict};
