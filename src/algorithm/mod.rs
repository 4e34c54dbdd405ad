/// Request pipeline tying masks, generation, placement and rendering together
pub mod executor;
/// Jittered-grid placement inside a mask
pub mod placement;

pub use executor::{CollageOutcome, CollagePipeline, PipelineConfig};
pub use placement::{PlacementEngine, TargetImage};
