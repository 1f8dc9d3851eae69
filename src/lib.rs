pub mod core;
pub mod export;
pub mod extract;
pub mod pipeline;
pub mod resolve;

pub use crate::core::error::MineError;
pub use crate::core::model::{RecordRow, Token, TokenDocument, TokenPage, Transcript};
pub use crate::core::template::TranscriptTemplate;
