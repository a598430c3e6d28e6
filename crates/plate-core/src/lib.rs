pub mod combinator;
pub mod dict;
pub mod facet;
pub mod generator;
pub mod pattern;
pub mod render;
pub mod segmenter;
pub mod settings;
pub mod stats;
pub mod text;
