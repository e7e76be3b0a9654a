//! Bounded incremental parser for `application/x-www-form-urlencoded`
//! request bodies.
//!
//! Chunks may split anywhere, including inside a `%XX` escape. Field names
//! are fixed at creation; values for unknown names are parsed and dropped.
//! Accumulated value bytes are capped by a hard capacity: exceeding it is a
//! feed error, never a truncation.

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};

/// Field names the message-board form recognizes, in index order.
pub const FIELD_NAMES: [&str; 2] = ["submit", "msg"];

/// Total value bytes one form submission may accumulate.
pub const MAX_FORM_BYTES: usize = 1024;

/// Indices into [`FIELD_NAMES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Submit,
    Msg,
}

impl FormField {
    pub const fn index(self) -> usize {
        match self {
            FormField::Submit => 0,
            FormField::Msg => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    /// Accumulated value bytes would exceed the configured capacity.
    CapacityExceeded,
    /// A `%` escape with a non-hex digit.
    BadEscape(u8),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::CapacityExceeded => write!(f, "form body exceeds capacity"),
            FormError::BadEscape(b) => {
                write!(f, "invalid percent escape byte 0x{b:02x} in form body")
            }
        }
    }
}

impl std::error::Error for FormError {}

#[derive(Clone, Copy)]
enum Target {
    Name,
    Value(Option<usize>),
}

#[derive(Clone, Copy)]
enum Escape {
    None,
    Percent,
    HighNibble(u8),
}

pub struct FormAccumulator {
    names: &'static [&'static str],
    values: Vec<BytesMut>,
    name: Vec<u8>,
    target: Target,
    escape: Escape,
    used: usize,
    capacity: usize,
}

impl FormAccumulator {
    pub fn new(names: &'static [&'static str], capacity: usize) -> Self {
        Self {
            names,
            values: names.iter().map(|_| BytesMut::new()).collect(),
            name: Vec::new(),
            target: Target::Name,
            escape: Escape::None,
            used: 0,
            capacity,
        }
    }

    /// Feed one body chunk. On error the accumulator must be discarded;
    /// nothing fed so far is usable.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<(), FormError> {
        for &b in chunk {
            self.step(b)?;
        }
        Ok(())
    }

    fn step(&mut self, b: u8) -> Result<(), FormError> {
        match self.target {
            Target::Name => match b {
                b'=' => {
                    let field = self
                        .names
                        .iter()
                        .position(|n| n.as_bytes() == self.name.as_slice());
                    self.name.clear();
                    self.target = Target::Value(field);
                }
                b'&' => self.name.clear(),
                _ => self.name.push(b),
            },
            Target::Value(field) => match (self.escape, b) {
                (Escape::None, b'&') => {
                    self.escape = Escape::None;
                    self.target = Target::Name;
                }
                (Escape::None, b'%') => self.escape = Escape::Percent,
                (Escape::None, b'+') => self.emit(field, b' ')?,
                (Escape::None, _) => self.emit(field, b)?,
                (Escape::Percent, _) => {
                    let high = hex(b).ok_or(FormError::BadEscape(b))?;
                    self.escape = Escape::HighNibble(high);
                }
                (Escape::HighNibble(high), _) => {
                    let low = hex(b).ok_or(FormError::BadEscape(b))?;
                    let decoded = (high << 4) | low;
                    self.escape = Escape::None;
                    self.emit(field, decoded)?;
                }
            },
        }
        Ok(())
    }

    fn emit(&mut self, field: Option<usize>, b: u8) -> Result<(), FormError> {
        let Some(index) = field else {
            // Unknown field: parsed but not stored.
            return Ok(());
        };
        if self.used == self.capacity {
            return Err(FormError::CapacityExceeded);
        }
        self.values[index].put_u8(b);
        self.used += 1;
        Ok(())
    }

    /// Complete parsing and hand back the field values. Consuming `self`
    /// makes a second finalize, or a feed after finalize, unrepresentable.
    pub fn finalize(self) -> FormFields {
        FormFields {
            values: self.values.into_iter().map(BytesMut::freeze).collect(),
        }
    }
}

/// The completed field mapping, indexed by field position.
pub struct FormFields {
    values: Vec<Bytes>,
}

impl FormFields {
    pub fn get(&self, index: usize) -> &[u8] {
        self.values[index].as_ref()
    }
}

fn hex(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
