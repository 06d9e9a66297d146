//! JPEG frame extraction from byte streams.
//!
//! MJPEG bodies (HTTP stream or FFmpeg image2pipe output) are a
//! concatenation of JPEG images, each bracketed by the SOI (FFD8) and
//! EOI (FFD9) markers. The assembler accumulates arbitrary chunks and
//! yields complete frames as they close.

const SOI: [u8; 2] = [0xFF, 0xD8];
const EOI: [u8; 2] = [0xFF, 0xD9];

/// Whether the buffer starts with a JPEG SOI marker.
pub fn looks_like_jpeg(bytes: &[u8]) -> bool {
    bytes.len() >= 2 && bytes[0] == SOI[0] && bytes[1] == SOI[1]
}

/// Extract the last complete JPEG from a fully-buffered MJPEG body.
///
/// Used by the snapshot source when an endpoint answers with a short
/// multipart chunk instead of a bare image.
pub fn extract_last_jpeg(bytes: &[u8]) -> Option<Vec<u8>> {
    let mut last_frame = None;
    let mut i = 0;
    while i + 1 < bytes.len() {
        if bytes[i] == SOI[0] && bytes[i + 1] == SOI[1] {
            if let Some(end) = find_marker(bytes, i + 2, EOI) {
                last_frame = Some(bytes[i..end + 2].to_vec());
                i = end + 2;
                continue;
            }
        }
        i += 1;
    }
    last_frame
}

/// Incremental splitter for MJPEG byte streams.
///
/// Feed it chunks with [`FrameAssembler::extend`], then drain complete
/// frames with [`FrameAssembler::next_frame`]. Bytes between frames
/// (multipart boundaries, part headers) are discarded.
#[derive(Debug, Default)]
pub struct FrameAssembler {
    buf: Vec<u8>,
}

impl FrameAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk of stream data.
    pub fn extend(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Take the next complete frame out of the buffer, if one closed.
    pub fn next_frame(&mut self) -> Option<Vec<u8>> {
        let start = find_marker(&self.buf, 0, SOI)?;

        match find_marker(&self.buf, start + 2, EOI) {
            Some(end) => {
                let frame = self.buf[start..end + 2].to_vec();
                self.buf.drain(..end + 2);
                Some(frame)
            }
            None => {
                // Frame still open. Drop the inter-frame junk before the
                // SOI so the buffer stays bounded by one frame.
                if start > 0 {
                    self.buf.drain(..start);
                }
                None
            }
        }
    }

    /// Bytes currently buffered (incomplete frame plus boundary junk).
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}

fn find_marker(bytes: &[u8], from: usize, marker: [u8; 2]) -> Option<usize> {
    if bytes.len() < 2 {
        return None;
    }
    (from..bytes.len() - 1).find(|&i| bytes[i] == marker[0] && bytes[i + 1] == marker[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_jpeg(payload: &[u8]) -> Vec<u8> {
        let mut v = vec![0xFF, 0xD8];
        v.extend_from_slice(payload);
        v.extend_from_slice(&[0xFF, 0xD9]);
        v
    }

    #[test]
    fn single_frame_in_one_chunk() {
        let frame = fake_jpeg(b"abc");
        let mut asm = FrameAssembler::new();
        asm.extend(&frame);
        assert_eq!(asm.next_frame(), Some(frame));
        assert_eq!(asm.next_frame(), None);
    }

    #[test]
    fn frame_split_across_chunks() {
        let frame = fake_jpeg(&[1, 2, 3, 4, 5, 6]);
        let mut asm = FrameAssembler::new();
        asm.extend(&frame[..3]);
        assert_eq!(asm.next_frame(), None);
        asm.extend(&frame[3..7]);
        assert_eq!(asm.next_frame(), None);
        asm.extend(&frame[7..]);
        assert_eq!(asm.next_frame(), Some(frame));
    }

    #[test]
    fn boundary_junk_between_frames_is_skipped() {
        let a = fake_jpeg(b"first");
        let b = fake_jpeg(b"second");
        let mut asm = FrameAssembler::new();
        asm.extend(b"--frameboundary\r\nContent-Type: image/jpeg\r\n\r\n");
        asm.extend(&a);
        asm.extend(b"\r\n--frameboundary\r\n\r\n");
        asm.extend(&b);
        assert_eq!(asm.next_frame(), Some(a));
        assert_eq!(asm.next_frame(), Some(b));
        assert_eq!(asm.next_frame(), None);
    }

    #[test]
    fn eoi_split_across_chunks() {
        let frame = fake_jpeg(b"xy");
        let mut asm = FrameAssembler::new();
        // Split in the middle of the EOI marker itself.
        asm.extend(&frame[..frame.len() - 1]);
        assert_eq!(asm.next_frame(), None);
        asm.extend(&frame[frame.len() - 1..]);
        assert_eq!(asm.next_frame(), Some(frame));
    }

    #[test]
    fn extract_last_jpeg_takes_final_frame() {
        let a = fake_jpeg(b"old");
        let b = fake_jpeg(b"new");
        let mut body = Vec::new();
        body.extend_from_slice(&a);
        body.extend_from_slice(b"junk");
        body.extend_from_slice(&b);
        assert_eq!(extract_last_jpeg(&body), Some(b));
    }

    #[test]
    fn looks_like_jpeg_checks_soi() {
        assert!(looks_like_jpeg(&[0xFF, 0xD8, 0xFF, 0xE0]));
        assert!(!looks_like_jpeg(b"<html>"));
        assert!(!looks_like_jpeg(&[0xFF]));
    }
}
