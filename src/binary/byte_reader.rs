/// A cursor over a byte slice, with the whitespace- and comment-aware reads
/// the PPM and compressed-image headers need.
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pub offset: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    pub fn read_byte(&mut self) -> Option<u8> {
        let byte = self.bytes.get(self.offset).copied();
        if byte.is_some() {
            self.offset += 1;
        }

        byte
    }

    pub fn read_bytes(&mut self, size: usize) -> Option<&'a [u8]> {
        if self.offset + size > self.bytes.len() {
            return None;
        }

        let result = &self.bytes[self.offset..self.offset + size];
        self.offset += size;

        Some(result)
    }

    pub fn read_u32_be(&mut self) -> Option<u32> {
        let bytes = self.read_bytes(4)?;

        Some(u32::from_be_bytes(bytes.try_into().unwrap()))
    }

    pub fn read_u16_be(&mut self) -> Option<u16> {
        let bytes = self.read_bytes(2)?;

        Some(u16::from_be_bytes(bytes.try_into().unwrap()))
    }

    /// Everything up to (not including) the next newline; consumes the
    /// newline itself.
    pub fn read_line(&mut self) -> Option<&'a [u8]> {
        let start_index = self.offset;
        loop {
            let byte = self.read_byte()?;
            if byte == b'\n' {
                return Some(&self.bytes[start_index..self.offset - 1]);
            }
        }
    }

    pub fn number_of_bytes_left(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset)
    }

    fn skip_line(&mut self) -> Option<()> {
        while self.read_byte()? != b'\n' {}

        Some(())
    }

    fn read_until_whitespace(&mut self) -> Option<&'a [u8]> {
        while Self::is_whitespace(self.read_byte()?) {}
        self.offset -= 1;
        let start_index = self.offset;
        while let Some(byte) = self.read_byte() {
            if Self::is_whitespace(byte) {
                self.offset -= 1;
                break;
            }
        }

        Some(&self.bytes[start_index..self.offset])
    }

    /// The next whitespace-delimited header symbol, skipping `#` comment
    /// lines.
    pub fn read_header_symbol(&mut self) -> Option<&'a [u8]> {
        loop {
            let symbol = self.read_until_whitespace()?;

            if symbol[0] != COMMENT_START_BYTE {
                return Some(symbol);
            }

            self.offset -= symbol.len();
            self.skip_line()?;
        }
    }

    fn is_whitespace(byte: u8) -> bool {
        WHITESPACE_SYMBOLS.contains(&byte)
    }
}

const WHITESPACE_SYMBOLS: [u8; 6] = [b'\n', b' ', b'\r', b'\t', 11, 12];
const COMMENT_START_BYTE: u8 = b'#';

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_skip_whitespace_and_comments() {
        let mut reader = ByteReader::new(b"P6  # a comment\n# another\n 12 7");
        assert_eq!(reader.read_header_symbol(), Some(&b"P6"[..]));
        assert_eq!(reader.read_header_symbol(), Some(&b"12"[..]));
        assert_eq!(reader.read_header_symbol(), Some(&b"7"[..]));
        assert_eq!(reader.read_header_symbol(), None);
    }

    #[test]
    fn symbol_ending_at_end_of_input_is_returned() {
        let mut reader = ByteReader::new(b"255");
        assert_eq!(reader.read_header_symbol(), Some(&b"255"[..]));
        assert_eq!(reader.read_header_symbol(), None);
        assert_eq!(reader.read_byte(), None);
        assert_eq!(reader.number_of_bytes_left(), 0);
    }

    #[test]
    fn lines_and_words() {
        let mut reader = ByteReader::new(b"header line\n\x00\x01\x02\x03rest");
        assert_eq!(reader.read_line(), Some(&b"header line"[..]));
        assert_eq!(reader.read_u32_be(), Some(0x00010203));
        assert_eq!(reader.number_of_bytes_left(), 4);
        assert_eq!(reader.read_u32_be(), Some(u32::from_be_bytes(*b"rest")));
        assert_eq!(reader.read_u32_be(), None);
    }
}
