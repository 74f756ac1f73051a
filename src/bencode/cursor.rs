use super::error::BencodeError;

/// Bounds-checked read position over a borrowed byte buffer.
///
/// Slices returned by [`Cursor::take`] borrow from the underlying buffer; the
/// cursor never copies.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the next byte without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Consumes exactly `n` bytes.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], BencodeError> {
        if n > self.remaining() {
            return Err(BencodeError::UnexpectedEnd {
                position: self.data.len(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Consumes one byte if it equals `byte`.
    pub fn expect(&mut self, byte: u8) -> Result<(), BencodeError> {
        match self.peek() {
            Some(b) if b == byte => {
                self.pos += 1;
                Ok(())
            }
            Some(b) => Err(BencodeError::InvalidTag {
                byte: b,
                position: self.pos,
            }),
            None => Err(BencodeError::UnexpectedEnd { position: self.pos }),
        }
    }

    /// Consumes one byte unconditionally.
    pub fn next_byte(&mut self) -> Result<u8, BencodeError> {
        let byte = self
            .peek()
            .ok_or(BencodeError::UnexpectedEnd { position: self.pos })?;
        self.pos += 1;
        Ok(byte)
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}
