use umlscribe_core::Dialect;

/// One diagram generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    transcript: String,
    dialect: Dialect,
    keywords: Vec<String>,
    summary: Option<String>,
}

impl GenerationRequest {
    /// Creates a request with no keywords and no summary.
    pub fn new(transcript: impl Into<String>, dialect: Dialect) -> Self {
        Self {
            transcript: transcript.into(),
            dialect,
            keywords: Vec::new(),
            summary: None,
        }
    }

    /// Sets the keywords that guide the model.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Sets a summary of the transcript.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let request = GenerationRequest::new("We talked about orders.", Dialect::Class)
            .with_keywords(["order", "customer"])
            .with_summary("Orders belong to customers.");

        assert_eq!(request.dialect(), Dialect::Class);
        assert_eq!(request.keywords(), ["order", "customer"]);
        assert_eq!(request.summary(), Some("Orders belong to customers."));
    }
}
