//! Datetime-to-string routines, and reading strings back again.
//!
//! Patterns are made of literal text and fields in curly braces, such as
//! `{:Y}-{>02:n}-{>02:D}`. Inside the braces, the part before the colon
//! gives the alignment (`<`, `^`, `>`), a `0` to pad with zeros, and a
//! width; the letter after it picks the field. Braces are escaped by
//! doubling them.

use std::str::CharIndices;

use num_traits::{PrimInt, Signed};
use pad::{Alignment, PadStr};
use thiserror::Error;

use crate::cal::{DatePiece, TimePiece};
use crate::cal::datetime::{Error as DateTimeError, LocalDate, LocalDateTime, LocalTime, Month, Weekday};
use crate::cal::fmt::ISO;
use crate::cal::offset::{OffsetDateTime, ZoneOffset};
use crate::cal::parse::leading_offset;
use crate::cal::zone::{ZoneId, ZonedDateTime};
use crate::util::RangeExt;


#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Field<'a> {
    Literal(&'a str),

    Year(NumArguments),
    YearOfCentury(NumArguments),

    MonthNumber(NumArguments),
    MonthName(bool, TextArguments),

    Day(NumArguments),
    WeekdayName(bool, TextArguments),

    Hour(NumArguments),
    Minute(NumArguments),
    Second(NumArguments),
    Fraction(NumArguments),

    Offset(TextArguments),
    Zone(TextArguments),
}


/// The parts of a value that a pattern can refer to. A value only answers
/// for the parts it has; a pattern that asks for anything else can’t be
/// used with it.
pub trait Fields {
    fn date(&self) -> Option<LocalDate> { None }
    fn time(&self) -> Option<LocalTime> { None }
    fn offset(&self) -> Option<ZoneOffset> { None }
    fn zone(&self) -> Option<ZoneId> { None }
}

impl Fields for LocalDate {
    fn date(&self) -> Option<LocalDate> { Some(*self) }
}

impl Fields for LocalTime {
    fn time(&self) -> Option<LocalTime> { Some(*self) }
}

impl Fields for LocalDateTime {
    fn date(&self) -> Option<LocalDate> { Some(LocalDateTime::date(self)) }
    fn time(&self) -> Option<LocalTime> { Some(LocalDateTime::time(self)) }
}

impl Fields for OffsetDateTime {
    fn date(&self) -> Option<LocalDate> { Some(self.local.date()) }
    fn time(&self) -> Option<LocalTime> { Some(self.local.time()) }
    fn offset(&self) -> Option<ZoneOffset> { Some(self.offset) }
}

impl Fields for ZonedDateTime {
    fn date(&self) -> Option<LocalDate> { Some(self.local().date()) }
    fn time(&self) -> Option<LocalTime> { Some(self.local().time()) }
    fn offset(&self) -> Option<ZoneOffset> { Some(ZonedDateTime::offset(self)) }
    fn zone(&self) -> Option<ZoneId> { Some(ZonedDateTime::zone(self)) }
}


impl<'a> Field<'a> {
    fn format<T>(&self, when: &T, w: &mut String, locale: &locale::Time) -> Result<(), FormatError> where T: Fields {
        let date   = || when.date().ok_or(FormatError::Unsupported { part: "date" });
        let time   = || when.time().ok_or(FormatError::Unsupported { part: "time" });
        let offset = || when.offset().ok_or(FormatError::Unsupported { part: "offset" });
        let zone   = || when.zone().ok_or(FormatError::Unsupported { part: "zone" });

        match *self {
            Field::Literal(s)             => w.push_str(s),
            Field::Year(a)                => a.format(w, date()?.year()),
            Field::YearOfCentury(a)       => a.format(w, date()?.year_of_century()),
            Field::MonthNumber(a)         => a.format(w, date()?.month() as i8),
            Field::MonthName(true, a)     => a.format(w, &locale.long_month_name(date()?.month().months_from_january())),
            Field::MonthName(false, a)    => a.format(w, &locale.short_month_name(date()?.month().months_from_january())),
            Field::Day(a)                 => a.format(w, date()?.day()),
            Field::WeekdayName(true, a)   => a.format(w, &locale.long_day_name(date()?.weekday() as usize)),
            Field::WeekdayName(false, a)  => a.format(w, &locale.short_day_name(date()?.weekday() as usize)),
            Field::Hour(a)                => a.format(w, time()?.hour()),
            Field::Minute(a)              => a.format(w, time()?.minute()),
            Field::Second(a)              => a.format(w, time()?.second()),
            Field::Fraction(a)            => a.format_fraction(w, time()?.nanosecond()),
            Field::Offset(a)              => a.format(w, &offset()?.iso().to_string()),
            Field::Zone(a)                => a.format(w, zone()?.id()),
        }

        Ok(())
    }
}


#[derive(PartialEq, Eq, Clone, Debug)]
pub struct DateFormat<'a> {
    pub fields: Vec<Field<'a>>,
}


#[derive(PartialEq, Eq, Clone, Debug, Copy, Error)]
pub enum FormatError {
    #[error("unexpected character {c:?} at position {pos}")]
    InvalidChar { c: char, colon: bool, pos: Pos },

    #[error("unclosed brace at position {open_pos}")]
    OpenCurlyBrace { open_pos: Pos },

    #[error("unmatched closing brace at position {close_pos}")]
    CloseCurlyBrace { close_pos: Pos },

    #[error("no field between positions {open_pos} and {close_pos}")]
    MissingField { open_pos: Pos, close_pos: Pos },

    #[error("alignment given twice in the field at position {open_pos}")]
    DoubleAlignment { open_pos: Pos, current_alignment: Alignment },

    #[error("width given twice in the field at position {open_pos}")]
    DoubleWidth { open_pos: Pos, current_width: Width },

    #[error("width too large in the field at position {open_pos}")]
    WidthOverflow { open_pos: Pos },

    /// The pattern refers to a part the value doesn’t have.
    #[error("the value has no {part} to format")]
    Unsupported { part: &'static str },
}

pub type Width = usize;
pub type Pos = usize;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Arguments {
    pub alignment: Option<Alignment>,
    pub width:     Option<Width>,
    pub pad_char:  Option<char>,
}

impl Arguments {
    pub fn empty() -> Self {
        Self {
            alignment: None,
            width:     None,
            pad_char:  None,
        }
    }

    pub fn set_width(&mut self, width: Width) -> Self {
        self.width = Some(width);
        *self
    }

    pub fn set_alignment(&mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        *self
    }

    pub fn set_pad_char(&mut self, pad_char: char) -> Self {
        self.pad_char = Some(pad_char);
        *self
    }

    pub fn update_width(&mut self, width: Width, open_pos: Pos) -> Result<(), FormatError> {
        match self.width {
            None => { self.width = Some(width); Ok(())},
            Some(existing) => Err(FormatError::DoubleWidth { open_pos, current_width: existing }),
        }
    }

    pub fn update_alignment(&mut self, alignment: Alignment, open_pos: Pos) -> Result<(), FormatError> {
        match self.alignment {
            None => { self.alignment = Some(alignment); Ok(())},
            Some(existing) => Err(FormatError::DoubleAlignment { open_pos, current_alignment: existing }),
        }
    }

    fn format(self, w: &mut String, string: &str, default_alignment: Alignment) {
        let width     = self.width.unwrap_or(0);
        let pad_char  = self.pad_char.unwrap_or(' ');
        let alignment = self.alignment.unwrap_or(default_alignment);

        w.push_str(&string.pad(width, pad_char, alignment, false));
    }

    pub fn is_empty(&self) -> bool {
        self.alignment.is_none() && self.width.is_none() && self.pad_char.is_none()
    }
}


#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct TextArguments(Arguments);

impl TextArguments {
    #[cfg(test)]
    fn empty() -> TextArguments {
        TextArguments(Arguments::empty())
    }

    fn format(self, w: &mut String, string: &str) {
        self.0.format(w, string, Alignment::Left)
    }
}


/// Numbers line up on the right unless told otherwise, and keep their
/// sign in front of any zeros used as padding.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct NumArguments(Arguments);

impl NumArguments {
    #[cfg(test)]
    fn empty() -> NumArguments {
        NumArguments(Arguments::empty())
    }

    fn format<N>(self, w: &mut String, number: N) where N: PrimInt + Signed + ToString {
        if number.is_negative() && self.0.pad_char == Some('0') {
            w.push('-');

            let width = self.0.width.map(|width| width.saturating_sub(1));
            Arguments { width, ..self.0 }.format(w, &number.abs().to_string(), Alignment::Right);
        }
        else {
            self.0.format(w, &number.to_string(), Alignment::Right);
        }
    }

    /// Fractions use the width as the number of digits to show.
    fn format_fraction(self, w: &mut String, nanosecond: i32) {
        let digits = self.fraction_digits();
        w.push_str(&format!("{:09}", nanosecond)[.. digits]);
    }

    fn fraction_digits(self) -> usize {
        self.0.width.unwrap_or(9).clamp(1, 9)
    }
}

impl<'a> DateFormat<'a> {
    pub fn format<T>(&self, when: &T, locale: &locale::Time) -> Result<String, FormatError> where T: Fields {
        let mut buf = String::new();

        for field in &self.fields {
            field.format(when, &mut buf, locale)?;
        }

        Ok(buf)
    }

    pub fn parse(input: &'a str) -> Result<DateFormat<'a>, FormatError> {
        let mut parser = FormatParser::new(input);
        parser.parse_format_string()?;

        Ok(DateFormat { fields: parser.fields })
    }

    /// Reads text written in this format, returning the fields it gave.
    /// The whole of the text has to be used up.
    pub fn parse_text(&self, text: &str, locale: &locale::Time) -> Result<Parsed, TextError> {
        let mut reader = TextReader { text, rest: text, parsed: Parsed::default() };

        for field in &self.fields {
            reader.read(field, locale)?;
        }

        if reader.rest.is_empty() {
            Ok(reader.parsed)
        }
        else {
            Err(TextError::Trailing { pos: reader.pos() })
        }
    }
}


struct FormatParser<'a> {
    iter:   CharIndices<'a>,
    fields: Vec<Field<'a>>,
    input:  &'a str,
    anchor: Option<Pos>,
    peekee: Option<Option<(Pos, char)>>,
}

impl<'a> FormatParser<'a> {
    fn new(input: &'a str) -> FormatParser<'a> {
        FormatParser {
            iter:   input.char_indices(),
            fields: Vec::new(),
            input,
            anchor: None,
            peekee: None,
        }
    }

    fn next(&mut self) -> Option<(Pos, char)> {
        match self.peekee {
            Some(p) => {
                self.peekee = None;
                p
            },
            None => { self.iter.next() },
        }
    }

    fn peek(&mut self) -> Option<(Pos, char)> {
        match self.peekee {
            Some(thing) => thing,
            None => {
                self.peekee = Some(self.iter.next());
                self.peek()
            }
        }
    }

    fn collect_up_to_anchor(&mut self, position: Option<Pos>) {
        if let Some(pos) = self.anchor {
            self.anchor = None;
            let text = match position {
                Some(new_pos) => &self.input[pos..new_pos],
                None          => &self.input[pos..],
            };
            self.fields.push(Field::Literal(text));
        }
    }

    fn parse_format_string(&mut self) -> Result<(), FormatError> {
        loop {
            match self.next() {
                Some((new_pos, '{')) => {
                    self.collect_up_to_anchor(Some(new_pos));

                    let field = self.parse_a_thing(new_pos)?;
                    self.fields.push(field);
                },
                Some((new_pos, '}')) => {
                    if let Some((_, '}')) = self.next() {
                        self.collect_up_to_anchor(Some(new_pos));

                        let field = Field::Literal(&self.input[new_pos ..=new_pos]);
                        self.fields.push(field);
                    }
                    else {
                        return Err(FormatError::CloseCurlyBrace { close_pos: new_pos });
                    }
                },
                Some((pos, _)) => {
                    if self.anchor.is_none() {
                        self.anchor = Some(pos);
                    }
                }
                None => break,
            }
        }

        // Finally, collect any literal characters after the last date field
        // that haven't been turned into a Literal field yet.
        self.collect_up_to_anchor(None);
        Ok(())
    }

    // Literals are slices of the pattern, so an escaped brace becomes a
    // Literal of its own rather than being joined onto its neighbours.

    fn parse_number(&mut self, just_parsed_character: char, open_pos: Pos) -> Result<Width, FormatError> {
        let mut buf = just_parsed_character.to_string();

        while let Some((_, n)) = self.peek() {
            if n.is_ascii_digit() {
                buf.push(n);
                let _ = self.next();
            }
            else {
                break;
            }
        }

        buf.parse().map_err(|_| FormatError::WidthOverflow { open_pos })
    }

    fn parse_a_thing(&mut self, open_pos: Pos) -> Result<Field<'a>, FormatError> {
        let mut args = Arguments::empty();
        let mut bit = None;
        let close_pos;
        let mut first = true;
        let mut long = false;

        loop {
            match self.next() {
                Some((pos, '{')) if first => return Ok(Field::Literal(&self.input[pos ..=pos])),
                Some((_, '<')) => { args.update_alignment(Alignment::Left, open_pos)?; continue },
                Some((_, '^')) => { args.update_alignment(Alignment::Middle, open_pos)?; continue },
                Some((_, '>')) => { args.update_alignment(Alignment::Right, open_pos)?; continue },
                Some((_, '0')) => { args.pad_char = Some('0'); continue },
                Some((_, n)) if n.is_ascii_digit() => { let width = self.parse_number(n, open_pos)?; args.update_width(width, open_pos)?; continue },
                Some((_, '_')) => { long = true; },
                Some((_, ':')) => {
                    let bitlet = match self.next() {
                        Some((_, 'Y')) => Field::Year(NumArguments(args)),
                        Some((_, 'y')) => Field::YearOfCentury(NumArguments(args)),
                        Some((_, 'n')) => Field::MonthNumber(NumArguments(args)),
                        Some((_, 'M')) => Field::MonthName(long, TextArguments(args)),
                        Some((_, 'D')) => Field::Day(NumArguments(args)),
                        Some((_, 'E')) => Field::WeekdayName(long, TextArguments(args)),
                        Some((_, 'h')) => Field::Hour(NumArguments(args)),
                        Some((_, 'm')) => Field::Minute(NumArguments(args)),
                        Some((_, 's')) => Field::Second(NumArguments(args)),
                        Some((_, 'f')) => Field::Fraction(NumArguments(args)),
                        Some((_, 'z')) => Field::Offset(TextArguments(args)),
                        Some((_, 'Z')) => Field::Zone(TextArguments(args)),
                        Some((pos, c)) => return Err(FormatError::InvalidChar { c, colon: true, pos }),
                        None => return Err(FormatError::OpenCurlyBrace { open_pos }),
                    };

                    bit = Some(bitlet);
                },
                Some((pos, '}')) => { close_pos = pos; break; },
                Some((pos, c)) => return Err(FormatError::InvalidChar { c, colon: false, pos }),
                None => return Err(FormatError::OpenCurlyBrace { open_pos }),
            };

            first = false;
        }

        match bit {
            Some(b) => Ok(b),
            None    => Err(FormatError::MissingField { open_pos, close_pos }),
        }
    }
}


/// Why some text couldn’t be read with a format.
#[derive(PartialEq, Eq, Clone, Debug, Error)]
pub enum TextError {

    /// The text at this position doesn’t match what the format expects.
    #[error("expected {expected} at position {pos}")]
    Mismatch { expected: &'static str, pos: Pos },

    /// There’s text left over after the last field.
    #[error("unexpected text at position {pos}")]
    Trailing { pos: Pos },

    /// The same part was given twice, with two different values.
    #[error("conflicting values for the {part}")]
    Conflict { part: &'static str },

    /// The format doesn’t give a part needed to build the value.
    #[error("the format gives no {part}")]
    Missing { part: &'static str },

    /// The weekday read doesn’t fall on the date read.
    #[error("the weekday doesn’t match the date")]
    WrongWeekday,

    /// The parts read don’t make a valid value.
    #[error("invalid value: {0}")]
    Invalid(#[from] DateTimeError),
}


/// The parts read from a piece of text, before they’re put together into
/// a value.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct Parsed {
    pub year:       Option<i64>,
    pub month:      Option<i64>,
    pub day:        Option<i64>,
    pub weekday:    Option<Weekday>,
    pub hour:       Option<i64>,
    pub minute:     Option<i64>,
    pub second:     Option<i64>,
    pub nanosecond: Option<i64>,
    pub offset:     Option<ZoneOffset>,
    pub zone:       Option<ZoneId>,
}

fn set<T: PartialEq>(slot: &mut Option<T>, value: T, part: &'static str) -> Result<(), TextError> {
    match slot {
        Some(existing) if *existing != value => Err(TextError::Conflict { part }),
        _ => { *slot = Some(value); Ok(()) }
    }
}

fn small(value: i64) -> Result<i8, TextError> {
    if value.is_within(0 .. 100) { Ok(value as i8) } else { Err(TextError::Invalid(DateTimeError::OutOfRange)) }
}

impl Parsed {
    pub fn to_date(&self) -> Result<LocalDate, TextError> {
        let year  = self.year.ok_or(TextError::Missing { part: "year" })?;
        let month = self.month.ok_or(TextError::Missing { part: "month" })?;
        let day   = self.day.ok_or(TextError::Missing { part: "day" })?;

        let date = LocalDate::ymd(year, Month::from_one(small(month)?)?, small(day)?)?;

        match self.weekday {
            Some(weekday) if weekday != date.weekday() => Err(TextError::WrongWeekday),
            _ => Ok(date),
        }
    }

    /// Only the hour is needed; the smaller parts default to zero.
    pub fn to_time(&self) -> Result<LocalTime, TextError> {
        let hour   = self.hour.ok_or(TextError::Missing { part: "hour" })?;
        let nanos  = self.nanosecond.unwrap_or(0);

        let time = LocalTime::hms_ns(small(hour)?,
                                     small(self.minute.unwrap_or(0))?,
                                     small(self.second.unwrap_or(0))?,
                                     i32::try_from(nanos).map_err(|_| DateTimeError::OutOfRange)?)?;
        Ok(time)
    }

    pub fn to_local_date_time(&self) -> Result<LocalDateTime, TextError> {
        Ok(LocalDateTime::new(self.to_date()?, self.to_time()?))
    }

    pub fn to_offset_date_time(&self) -> Result<OffsetDateTime, TextError> {
        let offset = self.offset.ok_or(TextError::Missing { part: "offset" })?;
        Ok(OffsetDateTime::new(self.to_local_date_time()?, offset))
    }

    /// Any offset read is used as the preferred one, should the local
    /// date-time happen twice in the zone.
    pub fn to_zoned_date_time(&self) -> Result<ZonedDateTime, TextError> {
        let zone = self.zone.ok_or(TextError::Missing { part: "zone" })?;
        Ok(ZonedDateTime::of_local(self.to_local_date_time()?, zone, self.offset)?)
    }
}


struct TextReader<'t> {
    text:   &'t str,
    rest:   &'t str,
    parsed: Parsed,
}

impl<'t> TextReader<'t> {
    fn pos(&self) -> Pos {
        self.text.len() - self.rest.len()
    }

    fn mismatch(&self, expected: &'static str) -> TextError {
        TextError::Mismatch { expected, pos: self.pos() }
    }

    fn skip_padding(&mut self) {
        self.rest = self.rest.trim_start_matches(' ');
    }

    /// Reads up to `max` digits, with a sign in front if `signed` allows one.
    fn number(&mut self, max: Width, signed: bool, expected: &'static str) -> Result<i64, TextError> {
        self.skip_padding();

        let mut sign = 1;
        if signed {
            if let Some(rest) = self.rest.strip_prefix('-') {
                sign = -1;
                self.rest = rest;
            }
            else if let Some(rest) = self.rest.strip_prefix('+') {
                self.rest = rest;
            }
        }

        let len = self.rest.bytes().take(max).take_while(u8::is_ascii_digit).count();
        if len == 0 {
            return Err(self.mismatch(expected));
        }

        let number = self.rest[.. len].parse::<i64>().map_err(|_| self.mismatch(expected))?;
        self.rest = &self.rest[len ..];
        Ok(sign * number)
    }

    /// Reads whichever of the names matches, preferring the longest.
    fn name(&mut self, names: &[String], expected: &'static str) -> Result<usize, TextError> {
        self.skip_padding();

        let found = names.iter().enumerate()
            .filter(|(_, name)| self.rest.get(.. name.len()).map_or(false, |prefix| prefix.eq_ignore_ascii_case(name)))
            .max_by_key(|(_, name)| name.len());

        match found {
            Some((index, name)) => {
                self.rest = &self.rest[name.len() ..];
                Ok(index)
            }
            None => Err(self.mismatch(expected)),
        }
    }

    fn read(&mut self, field: &Field<'_>, locale: &locale::Time) -> Result<(), TextError> {
        match *field {
            Field::Literal(s) => {
                match self.rest.strip_prefix(s) {
                    Some(rest) => self.rest = rest,
                    None       => return Err(self.mismatch("literal text")),
                }
            }
            Field::Year(a) => {
                let year = self.number(a.0.width.unwrap_or(10), true, "year")?;
                set(&mut self.parsed.year, year, "year")?;
            }
            Field::YearOfCentury(a) => {
                let year = self.number(a.0.width.unwrap_or(2), false, "year")?;
                set(&mut self.parsed.year, 2000 + year, "year")?;
            }
            Field::MonthNumber(a) => {
                let month = self.number(a.0.width.unwrap_or(2), false, "month")?;
                set(&mut self.parsed.month, month, "month")?;
            }
            Field::MonthName(long, _) => {
                let names: Vec<String> = (0 .. 12).map(|m| if long { locale.long_month_name(m) } else { locale.short_month_name(m) }).collect();
                let month = self.name(&names, "month name")?;
                set(&mut self.parsed.month, month as i64 + 1, "month")?;
            }
            Field::Day(a) => {
                let day = self.number(a.0.width.unwrap_or(2), false, "day")?;
                set(&mut self.parsed.day, day, "day")?;
            }
            Field::WeekdayName(long, _) => {
                let names: Vec<String> = (0 .. 7).map(|d| if long { locale.long_day_name(d) } else { locale.short_day_name(d) }).collect();
                let index = self.name(&names, "weekday name")?;
                set(&mut self.parsed.weekday, Weekday::from_zero(index as i8)?, "weekday")?;
            }
            Field::Hour(a) => {
                let hour = self.number(a.0.width.unwrap_or(2), false, "hour")?;
                set(&mut self.parsed.hour, hour, "hour")?;
            }
            Field::Minute(a) => {
                let minute = self.number(a.0.width.unwrap_or(2), false, "minute")?;
                set(&mut self.parsed.minute, minute, "minute")?;
            }
            Field::Second(a) => {
                let second = self.number(a.0.width.unwrap_or(2), false, "second")?;
                set(&mut self.parsed.second, second, "second")?;
            }
            Field::Fraction(a) => {
                self.skip_padding();
                let before = self.rest.len();
                let digits = self.number(a.fraction_digits(), false, "fraction")?;
                let read = before - self.rest.len();
                set(&mut self.parsed.nanosecond, digits * 10_i64.pow(9 - read as u32), "fraction")?;
            }
            Field::Offset(_) => {
                self.skip_padding();
                let (rest, offset) = leading_offset(self.rest).map_err(|_| self.mismatch("offset"))?;
                self.rest = rest;
                set(&mut self.parsed.offset, offset, "offset")?;
            }
            Field::Zone(_) => {
                self.skip_padding();
                let len = self.rest.find(|c: char| ! (c.is_ascii_alphanumeric() || "/_-+".contains(c))).unwrap_or(self.rest.len());
                let zone = self.rest[.. len].parse::<ZoneId>().map_err(|_| self.mismatch("zone"))?;
                self.rest = &self.rest[len ..];
                set(&mut self.parsed.zone, zone, "zone")?;
            }
        }

        Ok(())
    }
}
