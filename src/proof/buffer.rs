/*!
A fixed size buffer in which lines of a proof are staged before being written to a store.

Bytes are written to the buffer until the buffer is full (or a flush is requested), at which point the buffer is split into records:
- Each maximal sequence of bytes preceding a separator is a record.
- Any bytes following the last separator are an incomplete line, and are moved to the front of the buffer.

So, a record is always a complete line, regardless of where the buffer filled.

```rust
# use clause_bridge::proof::buffer::WriteBuffer;
let mut buffer = WriteBuffer::new(16);
for byte in b"a 1 0\nd 1 0\na 2" {
    buffer.push(*byte);
}

let records = buffer.records(b'\n').collect::<Vec<_>>();
assert_eq!(records, vec![&b"a 1 0"[..], &b"d 1 0"[..]]);

buffer.retain_incomplete(b'\n');
assert_eq!(buffer.contents(), b"a 2");
```
*/

/// A buffer of bytes with a fixed capacity.
pub struct WriteBuffer {
    chars: Vec<u8>,

    /// The position of the next byte, and so the count of bytes in the buffer.
    pos: usize,
}

impl WriteBuffer {
    pub fn new(capacity: usize) -> Self {
        WriteBuffer {
            chars: vec![0; capacity.max(1)],
            pos: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.chars.len()
    }

    pub fn is_full(&self) -> bool {
        self.pos == self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The bytes in the buffer.
    pub fn contents(&self) -> &[u8] {
        &self.chars[..self.pos]
    }

    /// Writes `byte` to the buffer.
    ///
    /// The buffer must not be full.
    pub fn push(&mut self, byte: u8) {
        debug_assert!(!self.is_full());
        self.chars[self.pos] = byte;
        self.pos += 1;
    }

    /// The count of bytes up to and including the last instance of `separator`.
    pub fn complete_len(&self, separator: u8) -> usize {
        match self.contents().iter().rposition(|byte| *byte == separator) {
            Some(index) => index + 1,
            None => 0,
        }
    }

    /// The records of the buffer, in order, each without its separator.
    pub fn records(&self, separator: u8) -> impl Iterator<Item = &[u8]> {
        let complete = self.complete_len(separator);
        self.chars[..complete]
            .split_inclusive(move |byte| *byte == separator)
            .map(|line| &line[..line.len() - 1])
    }

    /// Moves the bytes following the last instance of `separator` to the front of the buffer, discarding all other bytes.
    pub fn retain_incomplete(&mut self, separator: u8) {
        let complete = self.complete_len(separator);
        self.chars.copy_within(complete..self.pos, 0);
        self.pos -= complete;
    }

    /// Doubles the capacity of the buffer.
    ///
    /// Only used if a single line does not fit in the buffer.
    pub fn grow(&mut self) {
        let capacity = self.chars.len();
        self.chars.resize(capacity * 2, 0);
    }
}
