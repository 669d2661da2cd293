/*!
The token catalog and the format string tokenizer.

A format string is a sequence of literal text and tokens. Tokenization is
greedy: at every position the longest spelling in the catalog that matches
wins, so `YYYY` is one 4-digit year token and never two 2-digit ones.
Anything that matches no spelling is literal text and is copied through
verbatim.
*/

/// A formatting token, named for the field it renders rather than its
/// spelling.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Token {
    /// `YYYY`, the 4-digit zero-padded year.
    YearFull,
    /// `YY`, the last two digits of the year.
    Year2,
    /// `MMMM`, the full month name.
    MonthNameFull,
    /// `MMM`, the abbreviated month name.
    MonthNameAbbrev,
    /// `MM`, the 2-digit zero-padded month number.
    Month2,
    /// `M`, the unpadded month number.
    Month1,
    /// `DDD`, the full weekday name.
    WeekdayFull,
    /// `DD`, the abbreviated weekday name.
    WeekdayAbbrev,
    /// `D`, the minimal weekday name.
    WeekdayMin,
    /// `dd`, the 2-digit zero-padded day of the month.
    Day2,
    /// `d`, the unpadded day of the month.
    Day1,
    /// `HH`, the 2-digit zero-padded 24-hour clock hour.
    Hour24Two,
    /// `H`, the unpadded 24-hour clock hour.
    Hour24One,
    /// `hh`, the 2-digit zero-padded 12-hour clock hour.
    Hour12Two,
    /// `h`, the unpadded 12-hour clock hour.
    Hour12One,
    /// `mm`, the 2-digit zero-padded minute.
    Minute2,
    /// `m`, the unpadded minute.
    Minute1,
    /// `ss`, the 2-digit zero-padded second.
    Second2,
    /// `s`, the unpadded second.
    Second1,
    /// `ff`, the 3-digit zero-padded millisecond.
    MillisPadded,
    /// `f`, the fractional second at its supplied precision, unpadded.
    Millis,
    /// `A`, the meridiem marker in upper case.
    MeridiemUpper,
    /// `a`, the meridiem marker in lower case.
    MeridiemLower,
    /// `Z`, the UTC offset as `±HH:mm`.
    OffsetColon,
    /// `ZZ`, the UTC offset as `±HHmm`.
    OffsetBasic,
}

/// Every token spelling, ordered by descending spelling length.
///
/// The tokenizer tries these in order, so the ordering is what makes
/// matching greedy. A test asserts the ordering invariant.
pub(crate) const CATALOG: &[(&str, Token)] = &[
    ("YYYY", Token::YearFull),
    ("MMMM", Token::MonthNameFull),
    ("MMM", Token::MonthNameAbbrev),
    ("DDD", Token::WeekdayFull),
    ("YY", Token::Year2),
    ("MM", Token::Month2),
    ("DD", Token::WeekdayAbbrev),
    ("dd", Token::Day2),
    ("HH", Token::Hour24Two),
    ("hh", Token::Hour12Two),
    ("mm", Token::Minute2),
    ("ss", Token::Second2),
    ("ff", Token::MillisPadded),
    ("ZZ", Token::OffsetBasic),
    ("M", Token::Month1),
    ("D", Token::WeekdayMin),
    ("d", Token::Day1),
    ("H", Token::Hour24One),
    ("h", Token::Hour12One),
    ("m", Token::Minute1),
    ("s", Token::Second1),
    ("f", Token::Millis),
    ("A", Token::MeridiemUpper),
    ("a", Token::MeridiemLower),
    ("Z", Token::OffsetColon),
];

/// One piece of a tokenized format string.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Segment<'f> {
    /// A run of literal text, copied through verbatim.
    Literal(&'f str),
    /// A formatting token.
    Token(Token),
}

/// An iterator over the segments of a format string.
///
/// Consecutive characters that match no token spelling are yielded as one
/// `Literal` segment.
#[derive(Debug)]
pub(crate) struct Tokenizer<'f> {
    format: &'f str,
}

impl<'f> Tokenizer<'f> {
    pub(crate) fn new(format: &'f str) -> Tokenizer<'f> {
        Tokenizer { format }
    }

    /// Returns the longest token spelling that prefixes the remaining
    /// input, if any.
    fn lookup(&self) -> Option<(usize, Token)> {
        for &(spelling, token) in CATALOG {
            if self.format.starts_with(spelling) {
                return Some((spelling.len(), token));
            }
        }
        None
    }
}

impl<'f> Iterator for Tokenizer<'f> {
    type Item = Segment<'f>;

    fn next(&mut self) -> Option<Segment<'f>> {
        if self.format.is_empty() {
            return None;
        }
        if let Some((len, token)) = self.lookup() {
            self.format = &self.format[len..];
            return Some(Segment::Token(token));
        }
        // Accumulate literal characters until the next token match. The
        // format string is UTF-8, so stepping goes by char boundary.
        let mut end = 0;
        while end < self.format.len() {
            let rest = Tokenizer { format: &self.format[end..] };
            if rest.lookup().is_some() {
                break;
            }
            let mut next = end + 1;
            while !self.format.is_char_boundary(next) {
                next += 1;
            }
            end = next;
        }
        let literal = &self.format[..end];
        self.format = &self.format[end..];
        Some(Segment::Literal(literal))
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec::Vec};

    use super::*;

    fn segments(format: &str) -> Vec<Segment<'_>> {
        Tokenizer::new(format).collect()
    }

    #[test]
    fn catalog_is_ordered_by_descending_length() {
        for window in CATALOG.windows(2) {
            assert!(
                window[0].0.len() >= window[1].0.len(),
                "{:?} sorts before {:?}",
                window[0].0,
                window[1].0,
            );
        }
    }

    #[test]
    fn catalog_has_no_duplicate_spellings() {
        for (i, &(spelling, _)) in CATALOG.iter().enumerate() {
            for &(other, _) in &CATALOG[i + 1..] {
                assert_ne!(spelling, other);
            }
        }
    }

    #[test]
    fn greedy_matching() {
        assert_eq!(
            segments("YYYY"),
            alloc::vec![Segment::Token(Token::YearFull)],
        );
        // Longest match first, then the remainder on its own.
        assert_eq!(
            segments("YYYYYY"),
            alloc::vec![
                Segment::Token(Token::YearFull),
                Segment::Token(Token::Year2),
            ],
        );
        assert_eq!(
            segments("MMMM MMM MM M"),
            alloc::vec![
                Segment::Token(Token::MonthNameFull),
                Segment::Literal(" "),
                Segment::Token(Token::MonthNameAbbrev),
                Segment::Literal(" "),
                Segment::Token(Token::Month2),
                Segment::Literal(" "),
                Segment::Token(Token::Month1),
            ],
        );
    }

    #[test]
    fn literal_runs_are_single_segments() {
        assert_eq!(
            segments("YYYY-MM-dd"),
            alloc::vec![
                Segment::Token(Token::YearFull),
                Segment::Literal("-"),
                Segment::Token(Token::Month2),
                Segment::Literal("-"),
                Segment::Token(Token::Day2),
            ],
        );
        // Unknown characters pass through untouched, including non-ASCII.
        assert_eq!(
            segments("à HH°"),
            alloc::vec![
                Segment::Literal("à "),
                Segment::Token(Token::Hour24Two),
                Segment::Literal("°"),
            ],
        );
    }

    #[test]
    fn empty_format_yields_nothing() {
        assert_eq!(segments(""), Vec::new());
    }

    quickcheck::quickcheck! {
        // Reassembling the segments always reproduces the format string.
        fn prop_segments_reassemble(format: String) -> bool {
            let mut reassembled = String::new();
            for segment in Tokenizer::new(&format) {
                match segment {
                    Segment::Literal(text) => reassembled.push_str(text),
                    Segment::Token(token) => {
                        let spelling = CATALOG
                            .iter()
                            .find(|&&(_, t)| t == token)
                            .map(|&(s, _)| s)
                            .unwrap();
                        reassembled.push_str(spelling);
                    }
                }
            }
            reassembled == format
        }
    }
}
