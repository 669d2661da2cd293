use alloc::string::String;

/// Language-specific name tables for months, weekdays and meridiem markers.
///
/// A locale is pure data: twelve month names (long and short), seven weekday
/// names (long, short and minimal) and the two meridiem strings. The fixed
/// arities are part of the type, so a locale can never be registered with a
/// missing or short table.
///
/// Weekday tables are indexed with Sunday first, matching
/// [`Instant::weekday`](crate::Instant::weekday).
///
/// With the `serde` crate feature enabled, `Locale` can be (de)serialized.
/// The field names use camelCase (`monthsLong`, `daysMin`, ...), so locale
/// tables can be kept as JSON documents:
///
/// ```json
/// {
///   "monthsLong": ["January", "..."],
///   "monthsShort": ["Jan", "..."],
///   "daysLong": ["Sunday", "..."],
///   "daysShort": ["Sun", "..."],
///   "daysMin": ["Su", "..."],
///   "am": "AM",
///   "pm": "PM"
/// }
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Locale {
    months_long: [String; 12],
    months_short: [String; 12],
    days_long: [String; 7],
    days_short: [String; 7],
    days_min: [String; 7],
    am: String,
    pm: String,
}

impl Locale {
    /// Creates a new locale from the given name tables.
    ///
    /// The weekday tables must start with Sunday.
    ///
    /// # Example
    ///
    /// ```
    /// use datefmt::Locale;
    ///
    /// let nautical = Locale::new(
    ///     ["JAN", "FEB", "MAR", "APR", "MAY", "JUN",
    ///      "JUL", "AUG", "SEP", "OCT", "NOV", "DEC"],
    ///     ["JAN", "FEB", "MAR", "APR", "MAY", "JUN",
    ///      "JUL", "AUG", "SEP", "OCT", "NOV", "DEC"],
    ///     ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"],
    ///     ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"],
    ///     ["SU", "MO", "TU", "WE", "TH", "FR", "SA"],
    ///     "AM",
    ///     "PM",
    /// );
    /// # drop(nautical);
    /// ```
    pub fn new(
        months_long: [&str; 12],
        months_short: [&str; 12],
        days_long: [&str; 7],
        days_short: [&str; 7],
        days_min: [&str; 7],
        am: &str,
        pm: &str,
    ) -> Locale {
        Locale {
            months_long: months_long.map(String::from),
            months_short: months_short.map(String::from),
            days_long: days_long.map(String::from),
            days_short: days_short.map(String::from),
            days_min: days_min.map(String::from),
            am: String::from(am),
            pm: String::from(pm),
        }
    }

    /// The built-in English locale. This is what a
    /// [`Formatter`](crate::Formatter) starts with.
    pub fn english() -> Locale {
        Locale::new(
            [
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ],
            [
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug",
                "Sep", "Oct", "Nov", "Dec",
            ],
            [
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ],
            ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
            "AM",
            "PM",
        )
    }

    /// Returns the "full" name of the given month, where `month` is `1..=12`.
    pub(crate) fn month_long(&self, month: i8) -> &str {
        &self.months_long[usize::from(month as u8) - 1]
    }

    /// Returns the abbreviated name of the given month.
    pub(crate) fn month_short(&self, month: i8) -> &str {
        &self.months_short[usize::from(month as u8) - 1]
    }

    /// Returns the "full" name of the given weekday, where Sunday is `0`.
    pub(crate) fn day_long(&self, weekday: i8) -> &str {
        &self.days_long[usize::from(weekday as u8)]
    }

    /// Returns the abbreviated name of the given weekday.
    pub(crate) fn day_short(&self, weekday: i8) -> &str {
        &self.days_short[usize::from(weekday as u8)]
    }

    /// Returns the minimal name of the given weekday.
    pub(crate) fn day_min(&self, weekday: i8) -> &str {
        &self.days_min[usize::from(weekday as u8)]
    }

    pub(crate) fn am(&self) -> &str {
        &self.am
    }

    pub(crate) fn pm(&self) -> &str {
        &self.pm
    }
}
