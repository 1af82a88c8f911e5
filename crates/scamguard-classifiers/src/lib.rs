//! ScamGuard Classifiers
//!
//! The classifier side of the evaluation harness.
//!
//! - [`ClassifierPort`] is the narrow contract the harness drives: text in,
//!   label, confidence and model id out.
//! - [`ModelRegistry`] implements the port over any number of named
//!   [`ScamModel`] variants, one of which is the default.
//! - [`KeywordModel`] and [`RuleModel`] are lightweight built-in variants so
//!   the harness can be exercised without an external model.

pub mod classifier;
pub mod config;
pub mod patterns;
pub mod registry;
pub mod rules;

pub use classifier::{ClassifierPort, ModelVerdict, ScamModel};
pub use config::{KeywordSpec, ModelSpec, ModelsConfig};
pub use patterns::KeywordModel;
pub use registry::ModelRegistry;
pub use rules::RuleModel;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{ClassifierPort, ModelVerdict, ScamModel};
    pub use crate::patterns::KeywordModel;
    pub use crate::registry::ModelRegistry;
    pub use crate::rules::RuleModel;
}
