/// A git blob — raw file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub data: Vec<u8>,
}

impl Blob {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Borrow the blob's bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Number of bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the blob is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_blob() {
        let blob = Blob::new(Vec::new());
        assert!(blob.is_empty());
    }

    #[test]
    fn blob_with_content() {
        let blob = Blob::new(b"hello world".to_vec());
        assert_eq!(blob.as_bytes(), b"hello world");
        assert_eq!(blob.len(), 11);
    }

    #[test]
    fn blob_with_null_bytes() {
        let data = b"hello\0world\0".to_vec();
        let blob = Blob::new(data.clone());
        assert_eq!(blob.as_bytes(), data.as_slice());
    }
}
