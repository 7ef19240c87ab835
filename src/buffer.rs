/// Mutable byte storage owned by the host editor. The applier only borrows
/// it for the duration of a single call.
pub trait ByteBuffer {
    fn len(&self) -> usize;

    fn bytes_mut(&mut self, range: std::ops::Range<usize>) -> Option<&mut [u8]>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ByteBuffer for [u8] {
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    fn bytes_mut(&mut self, range: std::ops::Range<usize>) -> Option<&mut [u8]> {
        self.get_mut(range)
    }
}

impl ByteBuffer for Vec<u8> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn bytes_mut(&mut self, range: std::ops::Range<usize>) -> Option<&mut [u8]> {
        self.get_mut(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_mut_bounds() {
        let mut data = vec![1u8, 2, 3, 4];
        assert_eq!(ByteBuffer::len(&data), 4);
        assert!(data.bytes_mut(2..5).is_none());

        let slice = data.bytes_mut(1..3).unwrap();
        slice[0] = 0xFF;
        assert_eq!(data, vec![1, 0xFF, 3, 4]);

        let raw: &[u8] = &[];
        assert!(<[u8] as ByteBuffer>::is_empty(raw));
    }
}
