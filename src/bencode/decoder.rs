use super::Value;
use crate::{Error, Result};
use std::collections::BTreeMap;

pub struct Decoder<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Decodes a single value starting at the current position. Trailing
    /// bytes after the root value are left unread.
    pub fn decode(&mut self) -> Result<Value> {
        self.next_value()
    }

    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }

    fn next_value(&mut self) -> Result<Value> {
        let v = match self.peek_byte()? {
            b'i' => Value::Integer(self.read_integer()?),
            b'l' => Value::List(self.read_list()?),
            b'd' => Value::Dictionary(self.read_dictionary()?),
            b'0'..=b'9' => Value::Bytes(self.read_bytes()?),
            b => {
                return Err(Error::Decode(format!(
                    "unrecognized type marker: {:?}",
                    b as char
                )))
            }
        };
        Ok(v)
    }

    fn read_dictionary(&mut self) -> Result<BTreeMap<Vec<u8>, Value>> {
        self.consume_byte(b'd')?;
        let mut m = BTreeMap::new();
        loop {
            if self.peek_byte()? == b'e' {
                self.pos += 1;
                break;
            }
            let key = match self.peek_byte()? {
                b'0'..=b'9' => self.read_bytes()?,
                b => {
                    return Err(Error::Decode(format!(
                        "dictionary key must be a byte string, got marker {:?}",
                        b as char
                    )))
                }
            };
            let value = self.next_value()?;
            m.insert(key, value);
        }
        Ok(m)
    }

    fn read_list(&mut self) -> Result<Vec<Value>> {
        self.consume_byte(b'l')?;
        let mut list = vec![];
        loop {
            if self.peek_byte()? == b'e' {
                self.pos += 1;
                break;
            }
            list.push(self.next_value()?);
        }
        Ok(list)
    }

    fn read_integer(&mut self) -> Result<i64> {
        self.consume_byte(b'i')?;
        let start = self.pos;
        loop {
            match self.take_byte()? {
                b'e' => break,
                _ => continue,
            }
        }
        let digits = &self.input[start..self.pos - 1];
        let s = std::str::from_utf8(digits)
            .map_err(|e| Error::Decode(format!("integer is not ascii: {e}")))?;
        let num = s
            .parse::<i64>()
            .map_err(|e| Error::Decode(format!("bad integer {s:?}: {e}")))?;
        Ok(num)
    }

    fn read_bytes(&mut self) -> Result<Vec<u8>> {
        let len = self.read_length()?;
        if self.input.len() - self.pos < len {
            return Err(Error::Decode(format!(
                "byte string length {} exceeds remaining input {}",
                len,
                self.input.len() - self.pos
            )));
        }
        let buf = self.input[self.pos..self.pos + len].to_vec();
        self.pos += len;
        Ok(buf)
    }

    fn read_length(&mut self) -> Result<usize> {
        let start = self.pos;
        loop {
            match self.take_byte()? {
                b':' => break,
                b'0'..=b'9' => continue,
                b => {
                    return Err(Error::Decode(format!(
                        "bad length prefix byte: {:?}",
                        b as char
                    )))
                }
            }
        }
        let digits = &self.input[start..self.pos - 1];
        if digits.is_empty() {
            return Err(Error::Decode("length not found".to_string()));
        }
        let len = std::str::from_utf8(digits)
            .expect("digits are ascii")
            .parse::<usize>()
            .map_err(|e| Error::Decode(format!("{e}")))?;
        Ok(len)
    }

    fn consume_byte(&mut self, expected: u8) -> Result<()> {
        match self.take_byte()? {
            actual if actual == expected => Ok(()),
            b => Err(Error::Decode(format!(
                "expect byte {:?}, actually got {:?}",
                expected as char, b as char
            ))),
        }
    }

    fn peek_byte(&self) -> Result<u8> {
        self.input
            .get(self.pos)
            .copied()
            .ok_or_else(|| Error::Decode("unexpected end of input".to_string()))
    }

    fn take_byte(&mut self) -> Result<u8> {
        let b = self.peek_byte()?;
        self.pos += 1;
        Ok(b)
    }
}
