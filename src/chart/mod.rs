// Chart module
// Note types, the direction transition graph, the pattern library, and the
// chart synthesizer

pub mod directions;
pub mod patterns;
pub mod synth;
pub mod types;

pub use directions::transitions;
pub use patterns::{catalogue, quantize_gap, Pattern, PatternKind, PatternNote};
pub use synth::{adjusted_time, ChartSynthesizer};
pub use types::{ColorChannel, CutDirection, Note};
