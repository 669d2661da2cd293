/*!
Token-based datetime formatting.

This module is the rendering engine behind [`Formatter`]. A format string
is scanned greedily for the token spellings below; the longest spelling
wins at every position, and any text that matches no spelling is copied
through verbatim.

# Tokens

| Token | Example | Description |
| ----- | ------- | ----------- |
| `YYYY` | `2024` | The year, 4-digit zero-padded. |
| `YY` | `24` | The last two digits of the year, zero-padded. |
| `MMMM` | `January` | The full month name from the active locale. |
| `MMM` | `Jan` | The abbreviated month name. |
| `MM` | `01` | The month number, 2-digit zero-padded. |
| `M` | `1` | The month number, unpadded. |
| `DDD` | `Saturday` | The full weekday name from the active locale. |
| `DD` | `Sat` | The abbreviated weekday name. |
| `D` | `Sa` | The minimal weekday name. |
| `dd` | `06` | The day of the month, 2-digit zero-padded. |
| `d` | `6` | The day of the month, unpadded. |
| `HH` | `15` | The hour on a 24-hour clock, 2-digit zero-padded. |
| `H` | `15` | The hour on a 24-hour clock, unpadded. |
| `hh` | `03` | The hour on a 12-hour clock, 2-digit zero-padded. |
| `h` | `3` | The hour on a 12-hour clock, unpadded. |
| `mm` | `05` | The minute, 2-digit zero-padded. |
| `m` | `5` | The minute, unpadded. |
| `ss` | `20` | The second, 2-digit zero-padded. |
| `s` | `20` | The second, unpadded. |
| `ff` | `034` | The millisecond, 3-digit zero-padded. |
| `f` | `34` | The fractional second at its supplied precision, unpadded. |
| `A` | `PM` | The meridiem marker, forced to upper case. |
| `a` | `pm` | The meridiem marker, forced to lower case. |
| `Z` | `-05:00` | The UTC offset, extended form. |
| `ZZ` | `-0500` | The UTC offset, basic form. |

On a 12-hour clock, midnight and noon both render as `12`. The meridiem
flips to `pm` exactly at hour 12.

The `f` token renders the fraction the caller actually supplied: an
ISO-8601 string with `.1` renders as `1`, while `.100` renders as `100`.
Instants built any other way carry millisecond precision.
*/

use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
};

use crate::{
    error::{Error, FormatError, IntoError},
    fmt::{
        print::print_token,
        token::{Segment, Tokenizer},
    },
    instant::DateArg,
    locale::Locale,
};

mod print;
mod token;
pub(crate) mod util;

/// A datetime formatter with pluggable locales and named formats.
///
/// A `Formatter` owns all the state rendering needs: the registered
/// locales, the active language and the registry of named formats. There
/// is no global registry; two formatters never observe each other's
/// configuration, and mutating one requires `&mut` access.
///
/// A freshly created formatter knows the `en` locale, starts with it
/// active and has no named formats.
///
/// # Example
///
/// ```
/// use datefmt::Formatter;
///
/// let mut f = Formatter::new();
/// assert_eq!(
///     f.render("DDD, d MMMM YYYY", "2024-01-06")?,
///     "Saturday, 6 January 2024",
/// );
///
/// f.register("longDate", "d MMMM");
/// assert_eq!(f.render("longDate", "2024-01-06")?, "6 January");
///
/// # Ok::<(), datefmt::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Formatter {
    locales: BTreeMap<String, Locale>,
    lang: String,
    formats: BTreeMap<String, String>,
}

impl Formatter {
    /// Creates a new formatter with the built-in `en` locale active.
    pub fn new() -> Formatter {
        let mut locales = BTreeMap::new();
        locales.insert(String::from("en"), Locale::english());
        Formatter {
            locales,
            lang: String::from("en"),
            formats: BTreeMap::new(),
        }
    }

    /// Renders `date` according to `format`.
    ///
    /// When `format` is the name of a registered format, its token string
    /// is substituted first. Otherwise `format` is the token string
    /// itself. The date argument is anything that converts into a
    /// [`DateArg`]: an [`Instant`](crate::Instant), a Unix millisecond
    /// timestamp or an ISO-8601 string.
    ///
    /// # Errors
    ///
    /// This returns an error when `format` is empty or when the date
    /// argument cannot be coerced into an `Instant`. An unknown token
    /// spelling is not an error; it renders as literal text.
    pub fn render(
        &self,
        format: &str,
        date: impl Into<DateArg>,
    ) -> Result<String, Error> {
        if format.is_empty() {
            return Err(FormatError::Empty.into_error());
        }
        // Named formats expand once. The expansion is a token string and
        // is never itself looked up as a name.
        let tokens = match self.formats.get(format) {
            Some(expansion) => expansion.as_str(),
            None => format,
        };
        let tm = date.into().coerce()?;
        let locale = self
            .locales
            .get(&self.lang)
            .expect("active language is always registered");
        let mut wtr = String::with_capacity(tokens.len() + 8);
        for segment in Tokenizer::new(tokens) {
            match segment {
                Segment::Literal(text) => wtr.push_str(text),
                Segment::Token(token) => {
                    print_token(token, &tm, locale, &mut wtr)
                }
            }
        }
        Ok(wtr)
    }

    /// Renders the current time according to `format`, in UTC.
    ///
    /// This is [`Formatter::render`] with [`Instant::now`](crate::Instant::now)
    /// as the date argument.
    #[cfg(feature = "std")]
    pub fn render_now(&self, format: &str) -> Result<String, Error> {
        self.render(format, crate::instant::Instant::now())
    }

    /// Returns the active language code.
    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Switches the active language and returns the code now active.
    ///
    /// An unknown code is not an error: the active language is left
    /// unchanged, so the returned code is the previous one. Every
    /// formatter knows `en`, and more languages join via
    /// [`Formatter::register_locale`].
    ///
    /// # Example
    ///
    /// ```
    /// use datefmt::Formatter;
    ///
    /// let mut f = Formatter::new();
    /// assert_eq!(f.set_lang("kryptonian"), "en");
    /// ```
    pub fn set_lang(&mut self, code: &str) -> &str {
        if self.locales.contains_key(code) {
            debug!("switching active language to {code:?}");
            self.lang = String::from(code);
        } else {
            warn!(
                "unknown language code {code:?}, staying on {lang:?}",
                lang = self.lang,
            );
        }
        &self.lang
    }

    /// Registers a locale under the given language code.
    ///
    /// Registering does not switch the active language; call
    /// [`Formatter::set_lang`] afterwards. Registering over an existing
    /// code replaces its tables.
    pub fn register_locale(&mut self, code: &str, locale: Locale) {
        debug!("registering locale {code:?}");
        self.locales.insert(String::from(code), locale);
    }

    /// Registers a named format.
    ///
    /// A registered name can be passed to [`Formatter::render`] in place
    /// of its token string. Registering an existing name replaces its
    /// token string.
    pub fn register(&mut self, name: &str, tokens: &str) {
        debug!("registering format {name:?} as {tokens:?}");
        self.formats.insert(name.to_string(), tokens.to_string());
    }

    /// Returns the names of all registered formats, in sorted order.
    pub fn formatters(&self) -> impl Iterator<Item = &str> {
        self.formats.keys().map(String::as_str)
    }
}

impl Default for Formatter {
    fn default() -> Formatter {
        Formatter::new()
    }
}

#[cfg(test)]
mod tests {
    use alloc::{vec::Vec, string::ToString};

    use crate::instant::Instant;

    use super::*;

    fn saturday_afternoon() -> Instant {
        Instant::new(2024, 1, 6, 15, 5, 20, 34)
            .unwrap()
            .with_offset(-300)
            .unwrap()
    }

    #[test]
    fn full_formats() {
        let f = Formatter::new();
        let tm = saturday_afternoon();
        insta::assert_snapshot!(
            f.render("YYYY-MM-dd", tm).unwrap(),
            @"2024-01-06",
        );
        insta::assert_snapshot!(
            f.render("DDD, d MMMM YYYY h:mm:ss a", tm).unwrap(),
            @"Saturday, 6 January 2024 3:05:20 pm",
        );
        insta::assert_snapshot!(
            f.render("YYYY-MM-ddTHH:mm:ss.ffZ", tm).unwrap(),
            @"2024-01-06T15:05:20.034-05:00",
        );
        insta::assert_snapshot!(
            f.render("dd.MM.YY", tm).unwrap(),
            @"06.01.24",
        );
    }

    #[test]
    fn accepts_every_date_argument_shape() {
        let f = Formatter::new();
        // 2024-01-06T12:35:21Z as an instant, a timestamp and a string.
        let tm = Instant::new(2024, 1, 6, 12, 35, 21, 0).unwrap();
        let rendered = f.render("YYYY-MM-dd HH:mm:ss", tm).unwrap();
        assert_eq!(rendered, "2024-01-06 12:35:21");
        assert_eq!(
            f.render("YYYY-MM-dd HH:mm:ss", 1_704_544_521_000i64).unwrap(),
            rendered,
        );
        assert_eq!(
            f.render("YYYY-MM-dd HH:mm:ss", "2024-01-06T12:35:21Z").unwrap(),
            rendered,
        );
    }

    #[test]
    fn literal_text_passes_through() {
        let f = Formatter::new();
        let tm = saturday_afternoon();
        insta::assert_snapshot!(
            f.render("[YYYY]", tm).unwrap(),
            @"[2024]",
        );
        // A lone 'Y' is not a token.
        insta::assert_snapshot!(
            f.render("YYY", tm).unwrap(),
            @"24Y",
        );
        // Every character here is inert, so the text passes through.
        insta::assert_snapshot!(
            f.render("10:30, no, never", tm).unwrap(),
            @"10:30, no, never",
        );
        // Letters that spell tokens are tokens even inside words.
        insta::assert_snapshot!(
            f.render("today", tm).unwrap(),
            @"to6pmy",
        );
    }

    #[test]
    fn named_formats() {
        let mut f = Formatter::new();
        assert_eq!(f.formatters().count(), 0);

        f.register("longDate", "d MMMM");
        f.register("iso", "YYYY-MM-ddTHH:mm:ssZ");
        let tm = saturday_afternoon();
        assert_eq!(f.render("longDate", tm).unwrap(), "6 January");
        // A name renders exactly like the token string it expands to.
        assert_eq!(
            f.render("longDate", tm).unwrap(),
            f.render("d MMMM", tm).unwrap(),
        );
        assert_eq!(
            f.render("iso", tm).unwrap(),
            "2024-01-06T15:05:20-05:00",
        );

        let names = f.formatters().collect::<Vec<_>>();
        assert_eq!(names, alloc::vec!["iso", "longDate"]);

        // Re-registering a name replaces its token string.
        f.register("longDate", "MMMM d, YYYY");
        assert_eq!(f.render("longDate", tm).unwrap(), "January 6, 2024");
    }

    #[test]
    fn named_formats_expand_once() {
        let mut f = Formatter::new();
        // A format whose expansion happens to spell another name stays a
        // token string. 'DDD' here renders a weekday, not the 'DDD'
        // format.
        f.register("DDD", "YYYY");
        f.register("viaName", "DDD");
        let tm = saturday_afternoon();
        assert_eq!(f.render("DDD", tm).unwrap(), "2024");
        assert_eq!(f.render("viaName", tm).unwrap(), "Saturday");
    }

    #[test]
    fn language_fallback() {
        let mut f = Formatter::new();
        assert_eq!(f.lang(), "en");
        // Unknown codes leave the active language untouched.
        assert_eq!(f.set_lang("kryptonian"), "en");
        assert_eq!(f.lang(), "en");
    }

    #[test]
    fn registered_locale_takes_effect() {
        let mut f = Formatter::new();
        f.register_locale(
            "x-upper",
            Locale::new(
                [
                    "JANUARY", "FEBRUARY", "MARCH", "APRIL", "MAY", "JUNE",
                    "JULY", "AUGUST", "SEPTEMBER", "OCTOBER", "NOVEMBER",
                    "DECEMBER",
                ],
                [
                    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG",
                    "SEP", "OCT", "NOV", "DEC",
                ],
                [
                    "SUNDAY", "MONDAY", "TUESDAY", "WEDNESDAY", "THURSDAY",
                    "FRIDAY", "SATURDAY",
                ],
                ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"],
                ["SU", "MO", "TU", "WE", "TH", "FR", "SA"],
                "AM",
                "PM",
            ),
        );
        // Registration alone does not switch.
        let tm = saturday_afternoon();
        assert_eq!(f.render("MMMM", tm).unwrap(), "January");

        assert_eq!(f.set_lang("x-upper"), "x-upper");
        assert_eq!(f.render("MMMM DDD", tm).unwrap(), "JANUARY SATURDAY");

        assert_eq!(f.set_lang("en"), "en");
        assert_eq!(f.render("MMMM DDD", tm).unwrap(), "January Saturday");
    }

    #[test]
    fn err_empty_format() {
        let f = Formatter::new();
        let err = f.render("", 0i64).unwrap_err();
        assert!(err.is_invalid_format());
        assert_eq!(err.to_string(), "format must be a non-empty string");
    }

    #[test]
    fn err_invalid_date() {
        let f = Formatter::new();
        let err = f.render("YYYY", "never oclock").unwrap_err();
        assert!(err.is_invalid_date());
        assert!(!err.is_invalid_format());

        let err = f
            .render("YYYY", i64::MAX)
            .unwrap_err();
        assert!(err.is_invalid_date());
    }

    #[test]
    fn empty_format_reported_before_the_date() {
        // Both arguments are bad, but the format check runs first.
        let f = Formatter::new();
        let err = f.render("", "never oclock").unwrap_err();
        assert!(err.is_invalid_format());
    }

    #[cfg(feature = "std")]
    #[test]
    fn render_now_uses_the_active_locale() {
        let f = Formatter::new();
        let month = f.render_now("MMMM").unwrap();
        let en = Locale::english();
        assert!((1..=12).any(|m| en.month_long(m) == month));
    }
}
