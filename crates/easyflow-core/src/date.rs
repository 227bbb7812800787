use jiff::civil::Date;
use jiff::Zoned;

/// Format used for the `fecha` placeholder (`16/10/26`).
pub const DATE_FORMAT: &str = "%d/%m/%y";

pub fn format_date(date: Date) -> String {
    date.strftime(DATE_FORMAT).to_string()
}

/// Today's date in the local time zone, formatted for templates.
pub fn today() -> String {
    format_date(Zoned::now().date())
}
