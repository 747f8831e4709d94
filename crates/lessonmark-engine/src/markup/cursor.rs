/// A byte cursor for the inline emphasis pass.
///
/// Only ASCII delimiters are ever matched, so every position the renderer
/// slices at is a char boundary even though the cursor steps by bytes.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The paragraph being rendered.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// The byte just before the cursor.
    pub fn prev(&self) -> Option<u8> {
        self.i
            .checked_sub(1)
            .and_then(|i| self.s.as_bytes().get(i).copied())
    }

    /// Checks if the remaining input starts with `pat`.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s
            .as_bytes()
            .get(self.i..)
            .is_some_and(|rest| rest.starts_with(pat))
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Skips a tag opened at the cursor, up to and including its `>`.
    /// Returns false (without moving) when no tag starts here.
    pub fn skip_tag(&mut self) -> bool {
        if self.peek() != Some(b'<') {
            return false;
        }
        match self.s[self.i..].find('>') {
            Some(end) => {
                self.i += end + 1;
                true
            }
            None => false,
        }
    }
}
