pub mod builder;
pub mod extractors;
pub mod segmenter;

pub use builder::ResumeParser;
