use std::{fmt, str::FromStr};

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;

use crate::error::Error;

/// Product vertical selected by the dashboard tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Lottery,
    Baccarat,
    HorseRacing,
    FootballArea,
}

const LOTTERY_TEAMS: &[&str] = &["สาวอ้อย", "อลิน", "อัญญาC", "อัญญาD"];
const BACCARAT_TEAMS: &[&str] = &["สเปชบาร์", "บาล้าน"];
const HORSE_RACING_TEAMS: &[&str] = &[];
const FOOTBALL_AREA_TEAMS: &[&str] = &["ฟุตบอลแอร์เรีย", "ฟุตบอลแอร์เรีย(ฮารุ)"];

impl Vertical {
    pub const ALL: [Vertical; 4] = [
        Vertical::Lottery,
        Vertical::Baccarat,
        Vertical::HorseRacing,
        Vertical::FootballArea,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Vertical::Lottery => "lottery",
            Vertical::Baccarat => "baccarat",
            Vertical::HorseRacing => "horse-racing",
            Vertical::FootballArea => "football-area",
        }
    }

    /// Team labels aggregated under this vertical, in chart order.
    pub fn teams(&self) -> &'static [&'static str] {
        match self {
            Vertical::Lottery => LOTTERY_TEAMS,
            Vertical::Baccarat => BACCARAT_TEAMS,
            Vertical::HorseRacing => HORSE_RACING_TEAMS,
            Vertical::FootballArea => FOOTBALL_AREA_TEAMS,
        }
    }
}

impl fmt::Display for Vertical {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Vertical {
    type Err = Error;

    fn from_str(value: &str) -> Result<Vertical, Self::Err> {
        match value {
            "lottery" => Ok(Vertical::Lottery),
            "baccarat" => Ok(Vertical::Baccarat),
            "horse-racing" => Ok(Vertical::HorseRacing),
            "football-area" | "football" => Ok(Vertical::FootballArea),
            v => Err(Error::InvalidOption {
                option: format!(
                    "tab '{}'. Valid options: lottery, baccarat, horse-racing, football-area",
                    v
                ),
            }),
        }
    }
}

/// Grouping dimension of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Team,
    Adser,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            View::Team => write!(f, "team"),
            View::Adser => write!(f, "adser"),
        }
    }
}

impl FromStr for View {
    type Err = Error;

    fn from_str(value: &str) -> Result<View, Self::Err> {
        match value {
            "team" => Ok(View::Team),
            "adser" | "operator" => Ok(View::Adser),
            v => Err(Error::InvalidOption {
                option: format!("view '{}'. Valid options: team, adser", v),
            }),
        }
    }
}

/// Bucket granularity of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Daily,
    Monthly,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Period::Daily => write!(f, "daily"),
            Period::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(value: &str) -> Result<Period, Self::Err> {
        match value {
            "daily" => Ok(Period::Daily),
            "monthly" => Ok(Period::Monthly),
            v => Err(Error::InvalidOption {
                option: format!(
                    "period '{}'. Valid options: daily, monthly",
                    v
                ),
            }),
        }
    }
}

/// Accepts `yyyy-MM-dd` or an RFC 3339 timestamp; the latter is reduced to
/// its calendar date in `offset`.
pub fn parse_date(value: &str, offset: &FixedOffset) -> Result<NaiveDate, Error> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }

    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(offset).date_naive())
        .map_err(|_| Error::DecodeDateTimeError(value.to_owned()))
}

/// Parses `+HH:MM` / `-HH:MM` (or `Z`).
pub fn parse_utc_offset(value: &str) -> Result<FixedOffset, Error> {
    let value = value.trim();
    let invalid =
        || Error::ConfigurationError(format!("Invalid UTC offset {}", value));

    if value == "Z" {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, rest) = if let Some(rest) = value.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = value.strip_prefix('-') {
        (-1, rest)
    } else {
        return Err(invalid());
    };

    let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
    let hours: i32 = hours.parse()?;
    let minutes: i32 = minutes.parse()?;

    if hours > 23 || !(0..60).contains(&minutes) {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(invalid)
}

// Enough fraction digits to print any finite f64 exactly.
const EXACT_FRACTION_DIGITS: usize = 1100;

/// Rounds the exact decimal value of `value` half away from zero at
/// `places` fraction digits. `0.015` is stored as `0.01499…` and rounds to
/// `0.01`, while a true tie such as `0.125` rounds to `0.13`.
pub fn round_to(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let Some((whole, fraction)) = exact.split_once('.') else {
        return value;
    };

    let mut digits: Vec<char> =
        whole.chars().chain(fraction.chars().take(places)).collect();
    let next = fraction.chars().nth(places).unwrap_or('0');

    if next >= '5' {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == '9' {
                *digit = '0';
            } else {
                *digit = char::from(*digit as u8 + 1);
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, '1');
        }
    }

    let split = digits.len() - places;
    let mut text: String = digits[..split].iter().collect();
    if places > 0 {
        text.push('.');
        text.extend(&digits[split..]);
    }

    text.parse::<f64>()
        .map(|rounded| rounded.copysign(value))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_from_str() {
        assert_eq!(Vertical::from_str("lottery").unwrap(), Vertical::Lottery);
        assert_eq!(
            Vertical::from_str("football").unwrap(),
            Vertical::FootballArea
        );
        assert!(Vertical::from_str("poker").is_err());
        for vertical in Vertical::ALL {
            assert_eq!(Vertical::from_str(vertical.as_str()).unwrap(), vertical);
        }
    }

    #[test]
    fn test_vertical_teams() {
        assert_eq!(Vertical::Lottery.teams().len(), 4);
        assert_eq!(Vertical::Baccarat.teams(), &["สเปชบาร์", "บาล้าน"]);
        assert!(Vertical::HorseRacing.teams().is_empty());
    }

    #[test]
    fn test_view_and_period_from_str() {
        assert_eq!(View::from_str("adser").unwrap(), View::Adser);
        assert_eq!(View::from_str("operator").unwrap(), View::Adser);
        assert!(View::from_str("teams").is_err());
        assert_eq!(Period::from_str("monthly").unwrap(), Period::Monthly);
        assert!(Period::from_str("weekly").is_err());
        assert_eq!(View::default(), View::Team);
        assert_eq!(Period::default(), Period::Daily);
    }

    #[test]
    fn test_parse_date() {
        let offset = FixedOffset::east_opt(7 * 3600).unwrap();
        assert_eq!(
            parse_date("2024-03-05", &offset).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
        );
        // 20:30 UTC is already the next day at +07:00
        assert_eq!(
            parse_date("2024-03-05T20:30:00Z", &offset).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 6).unwrap()
        );
        assert!(matches!(
            parse_date("05/03/2024", &offset),
            Err(Error::DecodeDateTimeError(_))
        ));
    }

    #[test]
    fn test_parse_utc_offset() {
        assert_eq!(parse_utc_offset("+07:00").unwrap().local_minus_utc(), 25200);
        assert_eq!(parse_utc_offset("-03:30").unwrap().local_minus_utc(), -12600);
        assert_eq!(parse_utc_offset("Z").unwrap().local_minus_utc(), 0);
        assert!(parse_utc_offset("07:00").is_err());
        assert!(parse_utc_offset("+25:00").is_err());
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(2.0, 2), 2.0);
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(200.0 / 35.0 / 100.0, 4), 0.0571);
    }

    #[test]
    fn test_round_to_half_cents_follow_stored_value() {
        // stored just below the tie
        assert_eq!(round_to(0.09 / 2.0, 2), 0.04);
        assert_eq!(round_to(0.15 / 2.0, 2), 0.07);
        assert_eq!(round_to(0.03 / 2.0, 2), 0.01);
        assert_eq!(round_to(1.005, 2), 1.0);
        assert_eq!(round_to(9.995, 2), 9.99);

        // exact ties round up
        assert_eq!(round_to(0.125, 2), 0.13);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-0.125, 2), -0.13);

        // carry through the integer part
        assert_eq!(round_to(0.99999, 2), 1.0);
        assert_eq!(round_to(99.996, 2), 100.0);
    }
}
