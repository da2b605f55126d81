//! Fixed denylist backing the automod profanity check.
//!
//! Matching is case-insensitive substring containment, so entries are kept
//! four characters or longer to limit false positives inside ordinary words.

use once_cell::sync::Lazy;

static BAD_WORDS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Common profanity
        "fuck", "fucking", "fucker", "motherfucker", "shit", "bullshit", "asshole", "dumbass",
        "jackass", "bitch", "bitches", "cunt", "cock", "cocksucker", "dickhead", "pussy",
        "bastard", "whore", "slut", "twat", "wanker", "bollocks", "prick",
        // Slurs and hate speech
        "nigger", "nigga", "faggot", "retard", "retarded", "spic", "chink", "kike", "wetback",
        "beaner", "tranny", "dyke",
        // Leetspeak evasion
        "f4ck", "fvck", "sh1t", "b1tch", "n1gger", "n1gga", "f4gg0t", "r3tard",
    ]
});

/// First denylist entry contained in the text, if any
pub fn find_profanity(text: &str) -> Option<&'static str> {
    let lowered = text.to_lowercase();

    BAD_WORDS.iter().copied().find(|word| lowered.contains(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_passes() {
        assert!(find_profanity("good morning everyone").is_none());
        assert!(find_profanity("let's grab lunch").is_none());
    }

    #[test]
    fn matches_are_case_insensitive() {
        assert_eq!(find_profanity("FUCK this"), Some("fuck"));
        assert_eq!(find_profanity("what a BiTcH move"), Some("bitch"));
    }

    #[test]
    fn matches_inside_compound_words() {
        assert!(find_profanity("absolute bullshittery").is_some());
    }
}
