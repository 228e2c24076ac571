//! Parsing of positions and moves as typed on the command line
//!
//! Both grammars are a few numbers separated by single characters, so [`Parser`] only knows how
//! to read a number and a symbol. Whitespace in front of either is skipped.

/// Implement [`std::str::FromStr`], and serde through the string form, for a type with a
/// `parse` method. `$expected` describes the accepted format in error messages.
macro_rules! impl_from_str_via_parser {
    ($t:ident, $expected:literal) => {
        impl std::str::FromStr for $t {
            type Err = &'static str;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match $t::parse($crate::parsing::Parser::new(s)) {
                    Some((p, value)) if p.is_done() => Ok(value),
                    Some(_) => Err(concat!("Unexpected input after ", $expected)),
                    None => Err(concat!("Expected ", $expected)),
                }
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $t {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.collect_str(self)
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $t {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse::<$t>().map_err(serde::de::Error::custom)
            }
        }
    };
}
pub(crate) use impl_from_str_via_parser;

/// Remaining input of a parse
#[must_use]
#[derive(Debug, Clone, Copy)]
pub struct Parser<'s> {
    input: &'s str,
}

impl<'s> Parser<'s> {
    /// Start parsing `input`
    #[inline]
    pub const fn new(input: &'s str) -> Parser<'s> {
        Parser { input }
    }

    /// Check if only whitespace is left
    pub fn is_done(self) -> bool {
        self.input.trim().is_empty()
    }

    /// Consume `expected`
    pub fn symbol(self, expected: char) -> Option<Parser<'s>> {
        let input = self.input.trim_start().strip_prefix(expected)?;
        Some(Parser { input })
    }

    /// Consume `expected` if it is next, reporting whether it was there
    pub fn optional_symbol(self, expected: char) -> (Parser<'s>, bool) {
        match self.symbol(expected) {
            Some(p) => (p, true),
            None => (self, false),
        }
    }

    /// Read a decimal number. Fails on missing digits and on overflow
    pub fn number(self) -> Option<(Parser<'s>, u32)> {
        let input = self.input.trim_start();
        let end = input
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(input.len());
        let (digits, rest) = input.split_at(end);
        let value = digits.parse().ok()?;
        Some((Parser { input: rest }, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_stops_at_non_digit() {
        let (p, n) = Parser::new("  357,1").number().unwrap();
        assert_eq!(n, 357);
        assert_eq!(p.input, ",1");
        assert!(Parser::new(",1").number().is_none());
        assert!(Parser::new("+1").number().is_none());
        assert!(Parser::new("99999999999").number().is_none());
    }

    #[test]
    fn symbols() {
        assert_eq!(Parser::new(" :2").symbol(':').unwrap().input, "2");
        assert!(Parser::new("2").symbol(':').is_none());

        let (p, found) = Parser::new("(3").optional_symbol('(');
        assert!(found);
        assert_eq!(p.input, "3");
        let (p, found) = p.optional_symbol('(');
        assert!(!found);
        assert_eq!(p.input, "3");
    }

    #[test]
    fn trailing_whitespace_is_done() {
        assert!(Parser::new(" \n").is_done());
        assert!(!Parser::new(" x").is_done());
    }
}
