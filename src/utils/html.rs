use ammonia;

/// Clean rich-text question content using the ammonia library.
///
/// Questions, passages and answer options come from the admin editor as
/// HTML. Safe formatting tags (<b>, <p>, <sub>, ...) are kept, while
/// <script>/<style> blocks and event-handler attributes are stripped.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}

/// Visible text of `input` with every tag removed, for keyword matching.
pub fn plain_text(input: &str) -> String {
    ammonia::Builder::empty().clean(input).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_formatting_and_drops_scripts() {
        assert_eq!(clean_html("x<sup>2</sup>"), "x<sup>2</sup>");
        assert_eq!(clean_html("<script>steal()</script>ok"), "ok");
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(clean_html("What is 2 + 2?"), "What is 2 + 2?");
    }

    #[test]
    fn plain_text_drops_all_tags() {
        assert_eq!(plain_text("<p>Solve <b>x</b><sup>2</sup></p>"), "Solve x2");
    }
}
