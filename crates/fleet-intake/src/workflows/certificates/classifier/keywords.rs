use regex::Regex;

/// How a single keyword is located inside the uppercase search buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyword {
    /// Plain substring, for multi-word phrases.
    Phrase(String),
    /// Abbreviation or regulatory code bounded by `\b` on both sides.
    Code(String),
    /// Code that must be preceded by start/whitespace or followed by whitespace/end.
    Spaced(String),
}

impl Keyword {
    pub fn phrase(value: &str) -> Self {
        Self::Phrase(value.to_uppercase())
    }

    pub fn code(value: &str) -> Self {
        Self::Code(value.to_uppercase())
    }

    pub fn spaced(value: &str) -> Self {
        Self::Spaced(value.to_uppercase())
    }

    fn compile(self) -> Result<Matcher, regex::Error> {
        match self {
            Keyword::Phrase(phrase) => Ok(Matcher::Phrase(phrase)),
            Keyword::Code(code) => {
                let regex = Regex::new(&format!(r"\b{}\b", regex::escape(&code)))?;
                Ok(Matcher::Pattern {
                    keyword: code,
                    regex,
                })
            }
            Keyword::Spaced(code) => {
                let escaped = regex::escape(&code);
                let regex = Regex::new(&format!(r"(?:^|\s){escaped}|{escaped}(?:\s|$)"))?;
                Ok(Matcher::Pattern {
                    keyword: code,
                    regex,
                })
            }
        }
    }
}

#[derive(Debug, Clone)]
enum Matcher {
    Phrase(String),
    Pattern { keyword: String, regex: Regex },
}

impl Matcher {
    fn keyword(&self) -> &str {
        match self {
            Matcher::Phrase(phrase) => phrase,
            Matcher::Pattern { keyword, .. } => keyword,
        }
    }

    fn is_match(&self, buffer: &str) -> bool {
        match self {
            Matcher::Phrase(phrase) => buffer.contains(phrase.as_str()),
            Matcher::Pattern { regex, .. } => regex.is_match(buffer),
        }
    }
}

/// Ordered keyword list; the first keyword present in the buffer is reported.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    matchers: Vec<Matcher>,
}

impl KeywordSet {
    pub fn new(keywords: Vec<Keyword>) -> Result<Self, regex::Error> {
        let matchers = keywords
            .into_iter()
            .map(Keyword::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { matchers })
    }

    /// Expects `buffer` to be uppercased already.
    pub fn first_hit(&self, buffer: &str) -> Option<&str> {
        self.matchers
            .iter()
            .find(|matcher| matcher.is_match(buffer))
            .map(Matcher::keyword)
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}
