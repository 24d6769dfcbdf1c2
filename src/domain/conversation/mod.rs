//! Conversation domain - stored turns, retention and prompt assembly inputs.

mod history;
mod image_directive;
mod instructions;
mod turn;

pub use history::{ConversationHistory, RetentionPolicy};
pub use image_directive::ImageDirective;
pub use instructions::{SystemInstructions, DISSERTATION_PERSONA, IMAGE_DIRECTIVE_INSTRUCTION};
pub use turn::{Turn, TurnRole};
