//! Consumer-psychology analyzers. Each analyzer owns its lexicon and
//! thresholds; none are shared with `marketing::review`.

pub mod emotion;
pub mod persona;
pub mod price;

pub use emotion::{analyze_emotions, Emotion, EmotionAnalysis};
pub use persona::{map_sns_personas, Persona, PersonaMap, SnsPost};
pub use price::{analyze_price_resistance, PriceResistanceInput, PriceResistanceReport, ResistanceLevel};
