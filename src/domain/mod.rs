pub mod dialogue;
pub mod editor;
pub mod pronunciation;
pub mod recommendation;
pub mod scenario;
pub mod shared;
pub mod tts;
pub mod user;
