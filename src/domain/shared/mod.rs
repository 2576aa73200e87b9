pub mod bilingual;
pub mod utterance;

pub use bilingual::{parse_model_json, BilingualDraft, BilingualText, ModelOutputError};
pub use utterance::{CandidateResponse, Speaker, Utterance};
