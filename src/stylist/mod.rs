pub mod editor;
pub mod encoder;
mod session;
mod state;
pub mod suggestions;
mod types;

pub use editor::StyleEditor;
pub use session::Stylist;
pub use state::{GenerationState, StylistPhase};
pub use suggestions::SuggestionGenerator;
pub use types::{ImageUpload, StyleRequest, StyledImage, SuggestionBundle};
