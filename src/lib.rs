/*!
datefmt is a small token-based datetime formatting library with pluggable
locales and a registry of named formats.

The one entry point is a [`Formatter`]. It renders a format string like
`YYYY-MM-dd` against a date argument, where the date argument can be an
[`Instant`], a Unix millisecond timestamp or an ISO-8601 string. Month,
weekday and meridiem names come from the active [`Locale`], and frequently
used format strings can be registered under a name.

The full token catalog lives in the [`fmt`] module docs.

# Example

```
use datefmt::Formatter;

let mut f = Formatter::new();
assert_eq!(f.render("YYYY-MM-dd", "2024-01-06")?, "2024-01-06");
assert_eq!(
    f.render("DDD, d MMMM YYYY h:mm a", 1_704_544_521_000i64)?,
    "Saturday, 6 January 2024 12:35 pm",
);

f.register("longDate", "d MMMM");
assert_eq!(f.render("longDate", "2024-01-06")?, "6 January");

# Ok::<(), datefmt::Error>(())
```

# What this crate is not

This is a formatting library, not a datetime library. There is no
arithmetic, no parsing of arbitrary datetime layouts and no time zone
database; offsets are carried through as given and "now" is always UTC.
For all of that, reach for a full datetime crate and hand its output to a
[`Formatter`] as a timestamp.

# Crate features

* **std** (enabled by default) -
  Enables [`Instant::now`] and [`Formatter::render_now`], plus the
  standard library `Error` trait impl. Disabling it makes the crate
  `no_std` (with `alloc`).
* **serde** -
  Implements `Serialize` and `Deserialize` for [`Locale`], so locale
  tables can be kept as JSON documents.
* **logging** -
  Emits trace level messages about date coercion and debug/warn level
  messages about locale registration and language switching, via the
  `log` crate.
*/

#![no_std]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

#[macro_use]
mod logging;

pub use crate::{
    error::Error,
    fmt::Formatter,
    instant::{DateArg, Instant},
    locale::Locale,
};

mod error;
pub mod fmt;
mod instant;
mod locale;
mod util;
