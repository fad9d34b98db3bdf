// hub-core/src/domain/catalog/rewriter.rs

/// Fixed textual substitutions turning a web (browsing) URL into a
/// raw-content URL. No URL parsing happens here.
#[derive(Debug)]
pub struct RawUrlRewriter {
    rules: &'static [(&'static str, &'static str)],
}

/// GitHub: `github.com/<org>/<repo>/tree/<ref>/<path>` ->
/// `raw.githubusercontent.com/<org>/<repo>/<ref>/<path>`.
pub static GITHUB_RAW: RawUrlRewriter = RawUrlRewriter::new(&[
    ("github.com", "raw.githubusercontent.com"),
    ("/tree/", "/"),
]);

impl RawUrlRewriter {
    pub const fn new(rules: &'static [(&'static str, &'static str)]) -> Self {
        Self { rules }
    }

    /// Single left-to-right pass. At each position the rules are tried in
    /// declaration order, the first match is replaced and scanning resumes
    /// after it, so replacements never overlap or cascade.
    pub fn rewrite(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len() + 16);
        let mut rest = input;

        'scan: while !rest.is_empty() {
            for (pattern, replacement) in self.rules {
                if !pattern.is_empty() && rest.starts_with(pattern) {
                    out.push_str(replacement);
                    rest = &rest[pattern.len()..];
                    continue 'scan;
                }
            }

            let mut chars = rest.chars();
            if let Some(ch) = chars.next() {
                out.push(ch);
            }
            rest = chars.as_str();
        }

        out
    }
}
