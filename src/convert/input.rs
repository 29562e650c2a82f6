//! Inputs accepted by the conversion pipeline.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::io::{self, Read, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// Maximum length of the rendering used in diagnostics.
pub const MAX_RENDER_LENGTH: usize = 4000;

/// Input is any value the pipeline can be asked to convert.
///
/// It is implemented for every `'static` type with a `Debug` rendering, so
/// converters can match exact concrete types through [`Input::as_any`].
pub trait Input: Any + fmt::Debug {
    fn as_any(&self) -> &dyn Any;

    /// Returns the concrete type name of the value.
    fn type_name(&self) -> &'static str;
}

impl<T: Any + fmt::Debug> Input for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Renders an input as `<type>: debug`, truncated to [`MAX_RENDER_LENGTH`].
pub fn format_object(input: &dyn Input) -> String {
    let rendered = format!("{:?}", input);
    let rendered = if rendered.len() > MAX_RENDER_LENGTH {
        let mut end = MAX_RENDER_LENGTH;
        while !rendered.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &rendered[..end])
    } else {
        rendered
    };

    format!("    <{}>: {}", input.type_name(), rendered)
}

/// Stream wraps a reader that is drained to completion when converted.
///
/// Conversion consumes the stream; converting it a second time yields
/// whatever the reader has left, which is usually nothing.
pub struct Stream {
    reader: RefCell<Box<dyn Read + Send>>,
}

impl Stream {
    pub fn new(reader: impl Read + Send + 'static) -> Self {
        Stream {
            reader: RefCell::new(Box::new(reader)),
        }
    }

    /// Reads everything left in the stream.
    pub fn read_all(&self) -> io::Result<Vec<u8>> {
        let mut reader = self.reader.try_borrow_mut().map_err(|_| {
            io::Error::new(io::ErrorKind::WouldBlock, "stream is already being read")
        })?;

        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(data)
    }
}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Stream { .. }")
    }
}

/// CaptureBuffer records everything written to it for later assertions.
///
/// Clones share the same underlying buffer, so one clone can be handed to the
/// code under test while another is matched against.
#[derive(Clone, Default)]
pub struct CaptureBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        CaptureBuffer::default()
    }

    /// Returns a copy of everything written so far.
    pub fn contents(&self) -> Vec<u8> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Debug for CaptureBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let contents = self.contents();
        f.debug_struct("CaptureBuffer")
            .field("contents", &String::from_utf8_lossy(&contents))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Widget {
        #[allow(dead_code)]
        name: String,
    }

    #[test]
    fn test_format_object() {
        let widget = Widget { name: "w".into() };
        let rendered = format_object(&widget);

        assert!(rendered.contains("Widget"));
        assert!(rendered.contains("name: \"w\""));
    }

    #[test]
    fn test_format_object_truncates() {
        let long = "x".repeat(MAX_RENDER_LENGTH * 2);
        let rendered = format_object(&long);

        assert!(rendered.len() < MAX_RENDER_LENGTH + 100);
        assert!(rendered.ends_with("..."));
    }

    #[test]
    fn test_stream_is_single_pass() {
        let stream = Stream::new(io::Cursor::new(b"abc".to_vec()));
        assert_eq!(stream.read_all().unwrap(), b"abc");
        assert!(stream.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_capture_buffer_shares_contents() {
        let buffer = CaptureBuffer::new();
        let mut writer = buffer.clone();
        writer.write_all(b"hello").unwrap();

        assert_eq!(buffer.contents(), b"hello");
        assert_eq!(buffer.len(), 5);
        assert!(!buffer.is_empty());
    }
}
