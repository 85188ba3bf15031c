/// Text-to-speech collaborator used for "play pronunciation".
pub trait Pronouncer {
    /// Speak `text` in the given BCP 47 language, e.g. `en-US`.
    fn speak(&self, text: &str, language: &str);
}
