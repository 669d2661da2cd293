use alloc::string::String;

use crate::{
    error::{err, DateError, Error, ErrorContext},
    util::civil::{days_in_month, CivilDate, EpochDay},
};

/// The minimum supported Unix millisecond timestamp, `0000-01-01T00:00:00Z`.
const MIN_UNIX_MILLIS: i64 = -62_167_219_200_000;

/// The maximum supported Unix millisecond timestamp,
/// `9999-12-31T23:59:59.999Z`.
const MAX_UNIX_MILLIS: i64 = 253_402_300_799_999;

/// An immutable snapshot of the calendar fields for one point in time,
/// along with its UTC offset.
///
/// An `Instant` is what the rendering engine reads from. It is not a
/// datetime type one does arithmetic on; this crate only renders instants,
/// it never computes them. Use one of the validating constructors, coerce
/// one out of a [`DateArg`], or grab the current time with
/// [`Instant::now`].
///
/// # Example
///
/// ```
/// use datefmt::Instant;
///
/// let tm = Instant::new(2024, 1, 6, 15, 30, 5, 250)?;
/// assert_eq!(tm.year(), 2024);
/// // Weekdays are derived. 2024-01-06 was a Saturday.
/// assert_eq!(tm.weekday(), 6);
///
/// # Ok::<(), datefmt::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Instant {
    year: i16,
    month: i8,
    day: i8,
    weekday: i8,
    hour: i8,
    minute: i8,
    second: i8,
    millisecond: i16,
    offset_minutes: i16,
    subsec_digits: u8,
}

impl Instant {
    /// Creates a new instant from its calendar fields, in UTC.
    ///
    /// The weekday is derived from the date. To attach a UTC offset, use
    /// [`Instant::with_offset`].
    ///
    /// # Errors
    ///
    /// This returns an error when any field is out of range. The supported
    /// year range is `0..=9999`, so that a year always fits the 4-digit
    /// `YYYY` token.
    pub fn new(
        year: i16,
        month: i8,
        day: i8,
        hour: i8,
        minute: i8,
        second: i8,
        millisecond: i16,
    ) -> Result<Instant, Error> {
        if !(0..=9999).contains(&year) {
            return Err(Error::range("year", year, 0, 9999));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::range("month", month, 1, 12));
        }
        let last_day = days_in_month(year, month);
        if !(1..=last_day).contains(&day) {
            return Err(Error::range("day", day, 1, last_day));
        }
        if !(0..=23).contains(&hour) {
            return Err(Error::range("hour", hour, 0, 23));
        }
        if !(0..=59).contains(&minute) {
            return Err(Error::range("minute", minute, 0, 59));
        }
        if !(0..=59).contains(&second) {
            return Err(Error::range("second", second, 0, 59));
        }
        if !(0..=999).contains(&millisecond) {
            return Err(Error::range("millisecond", millisecond, 0, 999));
        }
        let weekday = CivilDate { year, month, day }.to_epoch_day().weekday();
        Ok(Instant {
            year,
            month,
            day,
            weekday,
            hour,
            minute,
            second,
            millisecond,
            offset_minutes: 0,
            subsec_digits: 3,
        })
    }

    /// Returns this instant with the given UTC offset attached, in minutes.
    ///
    /// Positive offsets are east of UTC. The calendar fields are left
    /// untouched; an `Instant` is already local to its offset.
    ///
    /// # Errors
    ///
    /// This returns an error when the offset is not in `-1439..=1439`.
    pub fn with_offset(self, minutes: i16) -> Result<Instant, Error> {
        if !(-1439..=1439).contains(&minutes) {
            return Err(Error::range("offset", minutes, -1439, 1439));
        }
        Ok(Instant { offset_minutes: minutes, ..self })
    }

    /// Converts a Unix millisecond timestamp to an instant, in UTC.
    ///
    /// # Errors
    ///
    /// This returns an error when the timestamp falls outside the supported
    /// year range of `0..=9999`.
    ///
    /// # Example
    ///
    /// ```
    /// use datefmt::Instant;
    ///
    /// let tm = Instant::from_unix_millis(0)?;
    /// assert_eq!(tm.year(), 1970);
    /// // The epoch was a Thursday.
    /// assert_eq!(tm.weekday(), 4);
    ///
    /// # Ok::<(), datefmt::Error>(())
    /// ```
    pub fn from_unix_millis(millis: i64) -> Result<Instant, Error> {
        if !(MIN_UNIX_MILLIS..=MAX_UNIX_MILLIS).contains(&millis) {
            return Err(Error::range(
                "unix millisecond timestamp",
                millis,
                MIN_UNIX_MILLIS,
                MAX_UNIX_MILLIS,
            ));
        }
        let seconds = millis.div_euclid(1_000);
        let millisecond = millis.rem_euclid(1_000) as i16;
        // The range check above guarantees the day count fits in an i32.
        let days = seconds.div_euclid(86_400) as i32;
        let mut second = seconds.rem_euclid(86_400) as i32;

        let date = EpochDay { days }.to_civil();
        let hour = (second / 3_600) as i8;
        second %= 3_600;
        let minute = (second / 60) as i8;
        let second = (second % 60) as i8;
        Instant::new(
            date.year,
            date.month,
            date.day,
            hour,
            minute,
            second,
            millisecond,
        )
    }

    /// Parses an ISO-8601 datetime string.
    ///
    /// The accepted shape is `YYYY-MM-DD`, optionally followed by `T` (or a
    /// space) and `HH:MM`, optional `:SS`, an optional fractional second of
    /// up to nine digits, and an optional UTC offset (`Z`, `±HH:MM` or
    /// `±HHMM`). A missing time means midnight and a missing offset means
    /// UTC.
    ///
    /// Fractional digits beyond millisecond precision are truncated, and
    /// the number of digits actually supplied (capped at three) decides how
    /// the unpadded `f` token renders. See the
    /// [`fmt`](crate::fmt#tokens) module docs.
    ///
    /// # Example
    ///
    /// ```
    /// use datefmt::Instant;
    ///
    /// let tm = Instant::from_iso("2024-01-06T15:30:05.250+02:00")?;
    /// assert_eq!(tm.hour(), 15);
    /// assert_eq!(tm.millisecond(), 250);
    /// assert_eq!(tm.offset_minutes(), 120);
    ///
    /// let midnight = Instant::from_iso("2024-01-06")?;
    /// assert_eq!(midnight.hour(), 0);
    ///
    /// # Ok::<(), datefmt::Error>(())
    /// ```
    pub fn from_iso(string: &str) -> Result<Instant, Error> {
        let parser = IsoParser { input: string.as_bytes() };
        parser
            .parse()
            .with_context(|| err!("invalid ISO-8601 date string {string:?}"))
    }

    /// Returns the current time as an instant, in UTC.
    ///
    /// This crate carries no time zone database, so the current instant is
    /// always reported with a zero offset.
    #[cfg(feature = "std")]
    pub fn now() -> Instant {
        let now = std::time::SystemTime::now();
        let millis = match now.duration_since(std::time::UNIX_EPOCH) {
            Ok(elapsed) => elapsed.as_millis() as i128,
            Err(err) => -(err.duration().as_millis() as i128),
        };
        let millis = millis
            .clamp(i128::from(MIN_UNIX_MILLIS), i128::from(MAX_UNIX_MILLIS))
            as i64;
        Instant::from_unix_millis(millis)
            .expect("clamped timestamp is always in range")
    }

    /// The year, `0..=9999`.
    pub fn year(&self) -> i16 {
        self.year
    }

    /// The month, `1..=12`.
    pub fn month(&self) -> i8 {
        self.month
    }

    /// The day of the month, `1..=31`.
    pub fn day(&self) -> i8 {
        self.day
    }

    /// The day of the week, where Sunday is `0` and Saturday is `6`.
    pub fn weekday(&self) -> i8 {
        self.weekday
    }

    /// The hour on a 24-hour clock, `0..=23`.
    pub fn hour(&self) -> i8 {
        self.hour
    }

    /// The minute, `0..=59`.
    pub fn minute(&self) -> i8 {
        self.minute
    }

    /// The second, `0..=59`.
    pub fn second(&self) -> i8 {
        self.second
    }

    /// The millisecond, `0..=999`.
    pub fn millisecond(&self) -> i16 {
        self.millisecond
    }

    /// The UTC offset in minutes, positive east of UTC.
    pub fn offset_minutes(&self) -> i16 {
        self.offset_minutes
    }

    /// The fractional second precision supplied by the caller, `1..=3`.
    pub(crate) fn subsec_digits(&self) -> u8 {
        self.subsec_digits
    }
}

/// A date argument, before coercion into an [`Instant`].
///
/// This is the crate's rendition of "accept a date, a timestamp or a
/// string": a tagged union with one exhaustive coercion function, instead
/// of duck typing. `From` impls exist for each accepted shape, so render
/// call sites can pass any of them directly:
///
/// ```
/// use datefmt::Formatter;
///
/// let f = Formatter::new();
/// assert_eq!(f.render("YYYY", "2024-01-13")?, "2024");
/// assert_eq!(f.render("YYYY", 1_705_100_000_000i64)?, "2024");
///
/// # Ok::<(), datefmt::Error>(())
/// ```
#[derive(Clone, Debug)]
pub enum DateArg {
    /// An already coerced instant, used as-is.
    Instant(Instant),
    /// Milliseconds since the Unix epoch, converted in UTC.
    UnixMillis(i64),
    /// An ISO-8601 datetime string.
    Iso(String),
}

impl DateArg {
    /// Coerces this argument into an instant.
    ///
    /// Every failure is wrapped in the invalid-date-argument error so the
    /// caller always sees the full contract in the message.
    pub(crate) fn coerce(self) -> Result<Instant, Error> {
        match self {
            DateArg::Instant(tm) => Ok(tm),
            DateArg::UnixMillis(millis) => {
                trace!("coercing unix millisecond timestamp {millis}");
                Instant::from_unix_millis(millis)
                    .context(DateError::Argument)
            }
            DateArg::Iso(ref string) => {
                trace!("coercing ISO-8601 date string {string:?}");
                Instant::from_iso(string).context(DateError::Argument)
            }
        }
    }
}

impl From<Instant> for DateArg {
    fn from(tm: Instant) -> DateArg {
        DateArg::Instant(tm)
    }
}

impl From<i64> for DateArg {
    fn from(millis: i64) -> DateArg {
        DateArg::UnixMillis(millis)
    }
}

impl From<&str> for DateArg {
    fn from(string: &str) -> DateArg {
        DateArg::Iso(String::from(string))
    }
}

impl From<String> for DateArg {
    fn from(string: String) -> DateArg {
        DateArg::Iso(string)
    }
}

/// A parser over the byte representation of an ISO-8601 datetime string.
struct IsoParser<'s> {
    input: &'s [u8],
}

impl<'s> IsoParser<'s> {
    fn parse(mut self) -> Result<Instant, Error> {
        let year = self.digits(4, "year")? as i16;
        self.expect(b'-')?;
        let month = self.digits(2, "month")? as i8;
        self.expect(b'-')?;
        let day = self.digits(2, "day")? as i8;

        let mut hour = 0i8;
        let mut minute = 0i8;
        let mut second = 0i8;
        let mut millisecond = 0i16;
        let mut subsec_digits = 3u8;
        let mut offset_minutes = 0i16;
        if !self.input.is_empty() {
            match self.input[0] {
                b'T' | b't' | b' ' => self.input = &self.input[1..],
                found => {
                    return Err(err!(
                        "expected 'T' or ' ' to begin a clock time, \
                         but found {found:?}",
                        found = char::from(found),
                    ));
                }
            }
            hour = self.digits(2, "hour")? as i8;
            self.expect(b':')?;
            minute = self.digits(2, "minute")? as i8;
            if self.input.first() == Some(&b':') {
                self.input = &self.input[1..];
                second = self.digits(2, "second")? as i8;
                if matches!(self.input.first(), Some(b'.' | b',')) {
                    self.input = &self.input[1..];
                    (millisecond, subsec_digits) = self.fraction()?;
                }
            }
            if !self.input.is_empty() {
                offset_minutes = self.offset()?;
            }
        }
        if !self.input.is_empty() {
            return Err(err!("unparsed input remains after the offset"));
        }
        let tm = Instant::new(
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond,
        )?
        .with_offset(offset_minutes)?;
        Ok(Instant { subsec_digits, ..tm })
    }

    /// Parses exactly `want` ASCII digits into an integer.
    fn digits(&mut self, want: usize, what: &'static str) -> Result<i32, Error> {
        if self.input.len() < want
            || !self.input[..want].iter().all(u8::is_ascii_digit)
        {
            return Err(err!("expected {want} digits for the {what}"));
        }
        let mut value = 0i32;
        for &byte in &self.input[..want] {
            value = value * 10 + i32::from(byte - b'0');
        }
        self.input = &self.input[want..];
        Ok(value)
    }

    fn expect(&mut self, want: u8) -> Result<(), Error> {
        if self.input.first() != Some(&want) {
            return Err(err!(
                "expected {want:?} separator",
                want = char::from(want),
            ));
        }
        self.input = &self.input[1..];
        Ok(())
    }

    /// Parses a fractional second of one to nine digits.
    ///
    /// Returns the value truncated to milliseconds along with the number of
    /// digits actually supplied, capped at three. The digit count is what
    /// the unpadded `f` token renders by.
    fn fraction(&mut self) -> Result<(i16, u8), Error> {
        let len = self
            .input
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count();
        if !(1..=9).contains(&len) {
            return Err(err!(
                "expected 1 to 9 fractional second digits, found {len}",
            ));
        }
        let significant = len.min(3);
        let mut millisecond = 0i16;
        for &byte in &self.input[..significant] {
            millisecond = millisecond * 10 + i16::from(byte - b'0');
        }
        // A short fraction still names milliseconds: ".1" is 100ms.
        for _ in significant..3 {
            millisecond *= 10;
        }
        self.input = &self.input[len..];
        Ok((millisecond, significant as u8))
    }

    /// Parses a UTC offset: `Z`, `±HH:MM` or `±HHMM`.
    fn offset(&mut self) -> Result<i16, Error> {
        let sign = match self.input.first() {
            Some(&b'Z') | Some(&b'z') => {
                self.input = &self.input[1..];
                return Ok(0);
            }
            Some(&b'+') => 1i16,
            Some(&b'-') => -1i16,
            _ => {
                return Err(err!(
                    "expected 'Z', '+' or '-' to begin a UTC offset",
                ));
            }
        };
        self.input = &self.input[1..];
        let hours = self.digits(2, "offset hours")? as i16;
        if self.input.first() == Some(&b':') {
            self.input = &self.input[1..];
        }
        let minutes = self.digits(2, "offset minutes")? as i16;
        if !(0..=23).contains(&hours) {
            return Err(Error::range("offset hours", hours, 0, 23));
        }
        if !(0..=59).contains(&minutes) {
            return Err(Error::range("offset minutes", minutes, 0, 59));
        }
        Ok(sign * (hours * 60 + minutes))
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Instant {
    fn arbitrary(g: &mut quickcheck::Gen) -> Instant {
        let year = i16::arbitrary(g).rem_euclid(10_000);
        let month = i8::arbitrary(g).rem_euclid(12) + 1;
        let day =
            i8::arbitrary(g).rem_euclid(days_in_month(year, month)) + 1;
        let hour = i8::arbitrary(g).rem_euclid(24);
        let minute = i8::arbitrary(g).rem_euclid(60);
        let second = i8::arbitrary(g).rem_euclid(60);
        let millisecond = i16::arbitrary(g).rem_euclid(1_000);
        let offset = i16::arbitrary(g).rem_euclid(2 * 1439 + 1) - 1439;
        Instant::new(year, month, day, hour, minute, second, millisecond)
            .unwrap()
            .with_offset(offset)
            .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn ok_new() {
        let tm = Instant::new(2024, 1, 6, 3, 5, 21, 0).unwrap();
        assert_eq!(tm.weekday(), 6);
        assert_eq!(tm.offset_minutes(), 0);
        assert_eq!(tm.subsec_digits(), 3);

        let tm = tm.with_offset(-300).unwrap();
        assert_eq!(tm.offset_minutes(), -300);
    }

    #[test]
    fn err_new() {
        assert!(Instant::new(10_000, 1, 1, 0, 0, 0, 0).unwrap_err().is_range());
        assert!(Instant::new(-1, 1, 1, 0, 0, 0, 0).unwrap_err().is_range());
        assert!(Instant::new(2024, 13, 1, 0, 0, 0, 0).unwrap_err().is_range());
        assert!(Instant::new(2024, 0, 1, 0, 0, 0, 0).unwrap_err().is_range());
        // 2023 was not a leap year.
        assert!(Instant::new(2023, 2, 29, 0, 0, 0, 0).unwrap_err().is_range());
        assert!(Instant::new(2024, 2, 29, 0, 0, 0, 0).is_ok());
        assert!(Instant::new(2024, 1, 1, 24, 0, 0, 0).unwrap_err().is_range());
        assert!(Instant::new(2024, 1, 1, 0, 60, 0, 0).unwrap_err().is_range());
        assert!(
            Instant::new(2024, 1, 1, 0, 0, 0, 1_000).unwrap_err().is_range()
        );
        let err = Instant::new(2024, 1, 1, 0, 0, 0, 0)
            .unwrap()
            .with_offset(1_440)
            .unwrap_err();
        assert!(err.is_range());
    }

    #[test]
    fn ok_from_unix_millis() {
        let tm = Instant::from_unix_millis(0).unwrap();
        assert_eq!((tm.year(), tm.month(), tm.day()), (1970, 1, 1));
        assert_eq!(tm.weekday(), 4);

        // 2024-01-06T12:35:21.340Z
        let tm = Instant::from_unix_millis(1_704_544_521_340).unwrap();
        assert_eq!((tm.year(), tm.month(), tm.day()), (2024, 1, 6));
        assert_eq!((tm.hour(), tm.minute(), tm.second()), (12, 35, 21));
        assert_eq!(tm.millisecond(), 340);

        // Negative timestamps land before the epoch.
        let tm = Instant::from_unix_millis(-1).unwrap();
        assert_eq!((tm.year(), tm.month(), tm.day()), (1969, 12, 31));
        assert_eq!((tm.hour(), tm.minute(), tm.second()), (23, 59, 59));
        assert_eq!(tm.millisecond(), 999);
    }

    #[test]
    fn err_from_unix_millis() {
        assert!(Instant::from_unix_millis(MAX_UNIX_MILLIS).is_ok());
        assert!(Instant::from_unix_millis(MIN_UNIX_MILLIS).is_ok());
        assert!(
            Instant::from_unix_millis(MAX_UNIX_MILLIS + 1)
                .unwrap_err()
                .is_range()
        );
        assert!(
            Instant::from_unix_millis(MIN_UNIX_MILLIS - 1)
                .unwrap_err()
                .is_range()
        );
    }

    #[test]
    fn ok_from_iso() {
        let tm = Instant::from_iso("2024-01-06").unwrap();
        assert_eq!((tm.year(), tm.month(), tm.day()), (2024, 1, 6));
        assert_eq!((tm.hour(), tm.minute(), tm.second()), (0, 0, 0));
        assert_eq!(tm.offset_minutes(), 0);

        let tm = Instant::from_iso("2024-01-13 13:05").unwrap();
        assert_eq!((tm.hour(), tm.minute(), tm.second()), (13, 5, 0));

        let tm = Instant::from_iso("2024-01-13T13:05:21").unwrap();
        assert_eq!((tm.hour(), tm.minute(), tm.second()), (13, 5, 21));

        let tm = Instant::from_iso("2024-01-13T13:05:21Z").unwrap();
        assert_eq!(tm.offset_minutes(), 0);

        let tm = Instant::from_iso("2024-01-13T13:05:21+05:30").unwrap();
        assert_eq!(tm.offset_minutes(), 330);

        let tm = Instant::from_iso("2024-01-13T13:05:21-0800").unwrap();
        assert_eq!(tm.offset_minutes(), -480);
    }

    #[test]
    fn ok_from_iso_fraction() {
        let tm = Instant::from_iso("2024-01-13T15:05:20.1").unwrap();
        assert_eq!(tm.millisecond(), 100);
        assert_eq!(tm.subsec_digits(), 1);

        let tm = Instant::from_iso("2024-01-13T15:05:20.034").unwrap();
        assert_eq!(tm.millisecond(), 34);
        assert_eq!(tm.subsec_digits(), 3);

        // Digits beyond millisecond precision are truncated.
        let tm = Instant::from_iso("2024-01-13T15:05:20.123456789").unwrap();
        assert_eq!(tm.millisecond(), 123);
        assert_eq!(tm.subsec_digits(), 3);
    }

    #[test]
    fn err_from_iso() {
        let invalid = [
            "",
            "not a date",
            "2024",
            "2024-01",
            "2024-1-6",
            "2024-01-06x",
            "2024-13-01",
            "2024-02-30",
            "2024-01-13T25:00",
            "2024-01-13T13",
            "2024-01-13T13:05:21.",
            "2024-01-13T13:05:21.1234567890",
            "2024-01-13T13:05:21+24:00",
            "2024-01-13T13:05:21+05:30extra",
        ];
        for string in invalid {
            let err = Instant::from_iso(string).unwrap_err();
            assert!(
                err.to_string()
                    .starts_with("invalid ISO-8601 date string"),
                "unexpected error for {string:?}: {err}",
            );
        }
    }

    #[test]
    fn coerce_agreement() {
        // The same instant through both coercion paths.
        let via_iso =
            DateArg::from("2024-01-06T12:35:21.340Z").coerce().unwrap();
        let via_millis =
            DateArg::from(1_704_544_521_340i64).coerce().unwrap();
        assert_eq!(via_iso, via_millis);
    }

    #[test]
    fn coerce_failure_names_the_contract() {
        let err = DateArg::from("nope").coerce().unwrap_err();
        assert!(err.is_invalid_date());
        assert!(err.to_string().starts_with(
            "date must be an Instant, a Unix millisecond timestamp \
             or an ISO-8601 date string",
        ));
    }

    #[cfg(feature = "std")]
    #[test]
    fn now_is_in_range() {
        let tm = Instant::now();
        assert!((2020..=9999).contains(&tm.year()));
        assert_eq!(tm.offset_minutes(), 0);
    }

    quickcheck::quickcheck! {
        fn prop_unix_millis_roundtrip(millis: i64) -> quickcheck::TestResult {
            if !(MIN_UNIX_MILLIS..=MAX_UNIX_MILLIS).contains(&millis) {
                return quickcheck::TestResult::discard();
            }
            let tm = Instant::from_unix_millis(millis).unwrap();
            let date = CivilDate {
                year: tm.year(),
                month: tm.month(),
                day: tm.day(),
            };
            let back = i64::from(date.to_epoch_day().days) * 86_400_000
                + i64::from(tm.hour()) * 3_600_000
                + i64::from(tm.minute()) * 60_000
                + i64::from(tm.second()) * 1_000
                + i64::from(tm.millisecond());
            quickcheck::TestResult::from_bool(back == millis)
        }
    }
}
