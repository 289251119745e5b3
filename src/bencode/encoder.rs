use super::Value;
use crate::Result;
use byteorder::WriteBytesExt;
use std::io::Write;

pub struct Encoder<W> {
    w: W,
}

impl<W: Write> Encoder<W> {
    pub fn new(output: W) -> Self {
        Self { w: output }
    }

    fn write_bytes(&mut self, b: &[u8]) -> Result<()> {
        self.w.write_all(b.len().to_string().as_bytes())?;
        self.w.write_u8(b':')?;
        self.w.write_all(b)?;
        Ok(())
    }

    /// Canonical encoding: dictionary keys are emitted in ascending byte
    /// order, which the backing `BTreeMap` already guarantees.
    pub fn encode(&mut self, v: &Value) -> Result<()> {
        match v {
            Value::Bytes(b) => self.write_bytes(b)?,
            Value::Integer(i) => {
                self.w.write_u8(b'i')?;
                self.w.write_all(i.to_string().as_bytes())?;
                self.w.write_u8(b'e')?;
            }
            Value::List(list) => {
                self.w.write_u8(b'l')?;
                for item in list {
                    self.encode(item)?;
                }
                self.w.write_u8(b'e')?;
            }
            Value::Dictionary(m) => {
                self.w.write_u8(b'd')?;
                for (k, v) in m {
                    self.write_bytes(k)?;
                    self.encode(v)?;
                }
                self.w.write_u8(b'e')?;
            }
        }
        Ok(())
    }
}
