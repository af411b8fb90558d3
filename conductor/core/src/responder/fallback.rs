//! Fallback Templates
//!
//! Generic replies used when no rule group matches. Two of them echo part of
//! the raw (not lowercased) user text back.

/// How many characters of the input the excerpt template echoes
pub const EXCERPT_CHARS: usize = 20;

/// Reply substituted when the responder fails
pub const RECOVERY_REPLY: &str = "अच्छा सवाल! मैं आपकी मदद करने की कोशिश करूंगा।";

/// A generic reply
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackTemplate {
    /// Echoes the first [`EXCERPT_CHARS`] characters of the input
    Excerpt,
    /// Echoes the first whitespace-delimited word of the input
    FirstWord,
    /// A canned reply
    Fixed(&'static str),
}

/// The five fallbacks, drawn uniformly
pub const STANDARD_FALLBACKS: [FallbackTemplate; 5] = [
    FallbackTemplate::Excerpt,
    FallbackTemplate::FirstWord,
    FallbackTemplate::Fixed(RECOVERY_REPLY),
    FallbackTemplate::Fixed("मुझे यह सुनकर खुशी हुई। क्या आप और कुछ जानना चाहेंगे?"),
    FallbackTemplate::Fixed("दिलचस्प! मुझे बताइए और क्या जानना है।"),
];

impl FallbackTemplate {
    /// Render against the raw user text
    ///
    /// Short or empty input yields whatever is available; this never panics.
    pub fn render(&self, raw: &str) -> String {
        match self {
            Self::Excerpt => {
                let excerpt: String = raw.chars().take(EXCERPT_CHARS).collect();
                format!(
                    "यह एक दिलचस्प सवाल है! मुझे लगता है कि {excerpt}... के बारे में और जानकारी होनी चाहिए।"
                )
            }
            Self::FirstWord => {
                let word = raw.split_whitespace().next().unwrap_or("");
                format!("समझ गया! आप {word} के बारे में जानना चाहते हैं।")
            }
            Self::Fixed(text) => (*text).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_truncates_to_twenty_chars() {
        let reply = FallbackTemplate::Excerpt.render("Quantum Computing Explained Simply");
        assert!(reply.contains("Quantum Computing Ex..."));
        assert!(!reply.contains("Explained"));
    }

    #[test]
    fn test_excerpt_counts_characters_not_bytes() {
        // multi-byte code points; a byte slice at 20 would split one
        let raw = "भारतीय संस्कृति के बारे";
        let reply = FallbackTemplate::Excerpt.render(raw);
        let expected: String = raw.chars().take(EXCERPT_CHARS).collect();
        assert!(reply.contains(&format!("{expected}...")));
    }

    #[test]
    fn test_excerpt_short_and_empty_input() {
        assert!(FallbackTemplate::Excerpt.render("Rust").contains("कि Rust..."));
        assert!(FallbackTemplate::Excerpt.render("").contains("कि ..."));
    }

    #[test]
    fn test_first_word_keeps_original_case() {
        let reply = FallbackTemplate::FirstWord.render("Cricket scores please");
        assert_eq!(reply, "समझ गया! आप Cricket के बारे में जानना चाहते हैं।");
    }

    #[test]
    fn test_first_word_skips_leading_whitespace() {
        let reply = FallbackTemplate::FirstWord.render("   Mumbai weather");
        assert!(reply.contains("आप Mumbai के"));
    }

    #[test]
    fn test_first_word_empty_input() {
        assert_eq!(
            FallbackTemplate::FirstWord.render("   "),
            "समझ गया! आप  के बारे में जानना चाहते हैं।"
        );
    }

    #[test]
    fn test_fixed_ignores_input() {
        assert_eq!(STANDARD_FALLBACKS[2].render("anything"), RECOVERY_REPLY);
    }
}
