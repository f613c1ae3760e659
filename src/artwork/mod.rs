pub mod compose;
pub mod embed;
pub mod fetcher;

pub use compose::{compose, CompositeArtifact, FrameTemplate, ARTIFACT_FILENAME, OUTPUT_SIZE};
pub use embed::EmbeddableImage;
pub use fetcher::fetch_embeddable;
