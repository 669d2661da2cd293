/*!
Resolvers that turn one token into text.

Everything in here is infallible. By the time a token reaches a resolver,
the instant has already been validated and the locale looked up, so
rendering is pure field access plus ASCII integer formatting.
*/

use alloc::string::String;

use crate::{
    fmt::{token::Token, util::DecimalFormatter},
    instant::Instant,
    locale::Locale,
};

/// Appends the rendition of `token` for `tm` to `wtr`.
pub(crate) fn print_token(
    token: Token,
    tm: &Instant,
    locale: &Locale,
    wtr: &mut String,
) {
    match token {
        Token::YearFull => write_int(4, i64::from(tm.year()), wtr),
        Token::Year2 => write_int(2, i64::from(tm.year() % 100), wtr),
        Token::MonthNameFull => wtr.push_str(locale.month_long(tm.month())),
        Token::MonthNameAbbrev => {
            wtr.push_str(locale.month_short(tm.month()))
        }
        Token::Month2 => write_int(2, i64::from(tm.month()), wtr),
        Token::Month1 => write_int(0, i64::from(tm.month()), wtr),
        Token::WeekdayFull => wtr.push_str(locale.day_long(tm.weekday())),
        Token::WeekdayAbbrev => wtr.push_str(locale.day_short(tm.weekday())),
        Token::WeekdayMin => wtr.push_str(locale.day_min(tm.weekday())),
        Token::Day2 => write_int(2, i64::from(tm.day()), wtr),
        Token::Day1 => write_int(0, i64::from(tm.day()), wtr),
        Token::Hour24Two => write_int(2, i64::from(tm.hour()), wtr),
        Token::Hour24One => write_int(0, i64::from(tm.hour()), wtr),
        Token::Hour12Two => write_int(2, i64::from(hour12(tm.hour())), wtr),
        Token::Hour12One => write_int(0, i64::from(hour12(tm.hour())), wtr),
        Token::Minute2 => write_int(2, i64::from(tm.minute()), wtr),
        Token::Minute1 => write_int(0, i64::from(tm.minute()), wtr),
        Token::Second2 => write_int(2, i64::from(tm.second()), wtr),
        Token::Second1 => write_int(0, i64::from(tm.second()), wtr),
        Token::MillisPadded => {
            write_int(3, i64::from(tm.millisecond()), wtr)
        }
        Token::Millis => {
            // Render at the precision the caller actually supplied, so a
            // tenth of a second stays "1" and not "100".
            let divisor = match tm.subsec_digits() {
                1 => 100,
                2 => 10,
                _ => 1,
            };
            write_int(0, i64::from(tm.millisecond() / divisor), wtr);
        }
        Token::MeridiemUpper => {
            let marker =
                if tm.hour() < 12 { locale.am() } else { locale.pm() };
            wtr.extend(marker.chars().flat_map(char::to_uppercase));
        }
        Token::MeridiemLower => {
            let marker =
                if tm.hour() < 12 { locale.am() } else { locale.pm() };
            wtr.extend(marker.chars().flat_map(char::to_lowercase));
        }
        Token::OffsetColon => write_offset(tm.offset_minutes(), true, wtr),
        Token::OffsetBasic => write_offset(tm.offset_minutes(), false, wtr),
    }
}

/// Appends `value` as zero-padded decimal ASCII. `padding` of zero means
/// unpadded.
fn write_int(padding: u8, value: i64, wtr: &mut String) {
    let formatter = DecimalFormatter::new().padding(padding);
    wtr.push_str(formatter.format(value).as_str());
}

/// Maps a 24-hour clock hour to a 12-hour clock hour.
///
/// Midnight and noon both render as 12.
fn hour12(hour: i8) -> i8 {
    match hour {
        0 => 12,
        1..=12 => hour,
        _ => hour - 12,
    }
}

/// Appends a UTC offset as `±HH:mm` (extended) or `±HHmm` (basic).
///
/// The sign always appears, with UTC itself rendering as a positive zero
/// offset.
fn write_offset(minutes: i16, colon: bool, wtr: &mut String) {
    wtr.push(if minutes < 0 { '-' } else { '+' });
    let minutes = minutes.unsigned_abs();
    write_int(2, i64::from(minutes / 60), wtr);
    if colon {
        wtr.push(':');
    }
    write_int(2, i64::from(minutes % 60), wtr);
}
