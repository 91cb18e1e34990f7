/// Rewrites escape sequences that arrive URL-encoded before an expression is validated.
pub struct RequestSanitizer {
    mappings: Vec<(String, String)>,
}

impl Default for RequestSanitizer {
    fn default() -> Self {
        RequestSanitizer::new([("%5E", "^"), ("%20", " ")])
    }
}

impl RequestSanitizer {
    pub fn new<'a>(mappings: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        RequestSanitizer {
            mappings: mappings
                .into_iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }

    /// Applies every mapping in order, each over the whole input.
    pub fn sanitize(&self, input: &str) -> String {
        self.mappings
            .iter()
            .fold(input.to_string(), |out, (from, to)| out.replace(from.as_str(), to))
    }
}
