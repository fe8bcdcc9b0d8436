//! Prompt construction for story generation.

/// Build the instruction string sent to the language model.
///
/// The genre clause is included only when `genre` is present and not
/// blank/whitespace-only.
pub fn build_prompt(words: &str, genre: Option<&str>) -> String {
    let mut prompt = format!("Write a creative short story using these words: {words}");
    if let Some(genre) = genre.filter(|genre| !genre.trim().is_empty()) {
        prompt.push_str(". Genre: ");
        prompt.push_str(genre);
    }
    prompt.push_str(". Keep it readable and engaging.");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_prompt_with_genre() {
        assert_eq!(
            build_prompt("cat, moon", Some("fantasy")),
            "Write a creative short story using these words: cat, moon. \
             Genre: fantasy. Keep it readable and engaging."
        );
    }

    #[test]
    fn test_build_prompt_without_genre() {
        assert_eq!(
            build_prompt("cat", None),
            "Write a creative short story using these words: cat. \
             Keep it readable and engaging."
        );
    }

    #[test]
    fn test_blank_genre_is_omitted() {
        assert_eq!(build_prompt("cat", Some("")), build_prompt("cat", None));
        assert_eq!(build_prompt("cat", Some("   ")), build_prompt("cat", None));
    }

    #[test]
    fn test_empty_words_still_produce_a_prompt() {
        assert_eq!(
            build_prompt("", None),
            "Write a creative short story using these words: . \
             Keep it readable and engaging."
        );
    }
}
