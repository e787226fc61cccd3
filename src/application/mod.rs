//! Application layer: the classification/extraction pipeline behind the
//! session protocol.

pub mod classifier;
pub mod extractor;
pub mod gateway;
pub mod registry;

pub use classifier::IntentClassifier;
pub use extractor::SlotExtractor;
pub use gateway::{ModelGateway, ModelTier};
pub use registry::{PromptProgram, PromptRegistry};
