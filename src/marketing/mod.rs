pub mod review;

pub use review::{analyze_reviews, Review, ReviewAnalysis};
