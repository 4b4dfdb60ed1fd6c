// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_wiki_content(size: usize) -> String {
    let base = "* Title\n\n** Section\n\nParagraph with some content and a [[Link]].\nA continuation line with [[https://example.org][display text]].\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_nested_headers(sections: usize, depth: usize) -> String {
    let mut content = String::new();
    for section in 0..sections {
        for level in 1..=depth {
            content.push_str(&format!(
                "{} Section {} level {}\n",
                "*".repeat(level),
                section,
                level
            ));
            content.push_str("Some paragraph content with multiple sentences. ");
            content.push_str("It links to [[Page ");
            content.push_str(&section.to_string());
            content.push_str("]] for realism.\n\n");
        }
    }
    content
}
