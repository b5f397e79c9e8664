use serde::Serialize;

/// Which heuristic produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// video / iframe / embed / object / source element
    Direct,
    /// anchor href
    Link,
    /// inline script text
    Script,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamCandidate {
    pub url: String,
    pub name: String,
    pub kind: SourceKind,
}

impl StreamCandidate {
    pub fn new(url: impl Into<String>, name: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
            kind,
        }
    }
}

const FALLBACK_SAMPLES: &[(&str, &str)] = &[
    ("https://example.com/live/sample1.m3u8", "Sample Channel 1"),
    ("https://example.com/live/sample2.m3u8", "Sample Channel 2"),
    ("https://example.com/live/sample3.m3u8", "Sample Channel 3"),
];

/// Placeholder channels used when `EmptyPolicy::UseFallbackSamples` is set.
pub fn fallback_samples() -> Vec<StreamCandidate> {
    FALLBACK_SAMPLES
        .iter()
        .map(|(url, name)| StreamCandidate::new(*url, *name, SourceKind::Fallback))
        .collect()
}
