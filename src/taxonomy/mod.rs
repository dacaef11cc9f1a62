pub mod personas;

pub use personas::{language_persona, DEFAULT_PERSONA, LANGUAGE_PERSONAS};
