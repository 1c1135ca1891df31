//! A log formatter that recycles its scratch buffers through a `FreeList`.
//!
//! Each call to `log_line` borrows a buffer, formats into it, writes it out and puts it back,
//! so a steady stream of log lines allocates only as many buffers as run concurrently.
//!
//! Run with `RUST_LOG=free_list=trace` to see the free list reuse its items.

use std::fmt::Write as _;
use std::io::{self, Write};

use free_list::{FreeList, Linked};
use tracing_subscriber::EnvFilter;

#[derive(Linked)]
struct LineBuffer {
    text: String,
    next: Option<Box<Self>>,
}

/// Owned by the component that formats log lines and shared with its callers by reference.
struct LineFormatter {
    buffers: FreeList<LineBuffer>,
}

impl LineFormatter {
    fn new() -> Self {
        Self {
            buffers: FreeList::builder()
                .factory(|| {
                    Box::new(LineBuffer {
                        text: String::with_capacity(128),
                        next: None,
                    })
                })
                .resetter(|buffer: &mut LineBuffer| buffer.text.clear())
                .build(),
        }
    }

    fn log_line(&self, out: &mut impl Write, key: &str, value: &str) -> io::Result<()> {
        let Some(mut buffer) = self.buffers.get() else {
            unreachable!("the factory always produces a buffer");
        };

        // A fixed timestamp keeps the output reproducible.
        let result = writeln!(buffer.text, "2006-01-02T15:04:05Z {key}={value}")
            .map_err(io::Error::other)
            .and_then(|()| out.write_all(buffer.text.as_bytes()));

        self.buffers.put(buffer);
        result
    }
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let formatter = LineFormatter::new();
    let mut stdout = io::stdout().lock();

    formatter.log_line(&mut stdout, "path", "/search?q=flowers")?;
    formatter.log_line(&mut stdout, "path", "/search?q=trees")?;

    Ok(())
}
