//! Grouping of joined tokens.

use crate::Token;

/// A maximal run of tokens where every token after the first is [`Token::joined`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compound {
    /// Tokens in position order. Never empty.
    tokens: Vec<Token>,
}

impl Compound {
    /// The tokens in this compound.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of tokens in the compound.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always false; a compound holds at least one token.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Consumes the compound, returning the token texts in order.
    pub fn into_texts(self) -> Vec<String> {
        self.tokens.into_iter().map(|t| t.text).collect()
    }
}

/// Splits a token sequence into compounds.
///
/// A new compound starts at every token that is not joined to its predecessor.
pub fn compounds<I>(tokens: I) -> Vec<Compound>
where
    I: IntoIterator<Item = Token>,
{
    let mut groups: Vec<Compound> = Vec::new();

    for token in tokens {
        match groups.last_mut() {
            Some(current) if token.joined => current.tokens.push(token),
            _ => groups.push(Compound {
                tokens: vec![token],
            }),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize;

    fn grouped(text: &str) -> Vec<Vec<String>> {
        compounds(tokenize("text", text))
            .into_iter()
            .map(Compound::into_texts)
            .collect()
    }

    #[test]
    fn separate_words() {
        assert_eq!(grouped("foo bar"), [vec!["foo"], vec!["bar"]]);
    }

    #[test]
    fn hyphenated_pair() {
        assert_eq!(grouped("foo-bar"), [vec!["foo", "bar"]]);
    }

    #[test]
    fn mixed_sequence() {
        assert_eq!(
            grouped("state-of-the-art design, e-mail"),
            [
                vec!["state", "of", "the", "art"],
                vec!["design"],
                vec!["e", "mail"]
            ]
        );
    }

    #[test]
    fn empty_sequence() {
        assert!(grouped("").is_empty());
        assert!(grouped("?!").is_empty());
    }

    #[test]
    fn compound_accessors() {
        let groups = compounds(tokenize("text", "x-y"));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 2);
        assert!(!groups[0].is_empty());
        assert_eq!(groups[0].tokens()[1].text, "y");
    }
}
