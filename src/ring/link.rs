//! Channel links between ring neighbours
//!
//! A link is one anonymous pipe. Its two ends are owned values; binding an
//! end copies it onto standard input or output, after which the original
//! descriptor must be closed so that only the standard stream keeps the
//! pipe open.

#![cfg(unix)]

use crate::error::{LinkError, LinkResult, StdStream};
use nix::libc::{STDIN_FILENO, STDOUT_FILENO};
use nix::unistd::{close, dup2, pipe};
use std::fs::File;
use std::os::fd::{AsRawFd, IntoRawFd, OwnedFd, RawFd};

/// Read end of a link
#[derive(Debug)]
pub struct ReadEnd(OwnedFd);

/// Write end of a link
#[derive(Debug)]
pub struct WriteEnd(OwnedFd);

/// Allocate a fresh unidirectional link
pub fn create_link() -> LinkResult<(ReadEnd, WriteEnd)> {
    let (read_fd, write_fd) = pipe().map_err(|e| LinkError::ResourceExhausted {
        reason: e.to_string(),
    })?;
    Ok((ReadEnd(read_fd), WriteEnd(write_fd)))
}

/// Make `end` this process's standard input
///
/// `dup2` closes whatever standard input was before, so the previous
/// upstream neighbour is released in the same call.
pub fn bind_as_input(end: &ReadEnd) -> LinkResult<()> {
    rebind(end.0.as_raw_fd(), STDIN_FILENO, StdStream::Input)
}

/// Make `end` this process's standard output
pub fn bind_as_output(end: &WriteEnd) -> LinkResult<()> {
    rebind(end.0.as_raw_fd(), STDOUT_FILENO, StdStream::Output)
}

fn rebind(fd: RawFd, target: RawFd, stream: StdStream) -> LinkResult<()> {
    dup2(fd, target).map_err(|e| LinkError::BindFailure {
        stream,
        reason: e.to_string(),
    })?;
    Ok(())
}

fn close_fd(fd: OwnedFd) -> LinkResult<()> {
    close(fd.into_raw_fd()).map_err(|e| LinkError::DescriptorCloseFailed {
        reason: e.to_string(),
    })
}

impl ReadEnd {
    /// Close the raw descriptor, reporting failure instead of ignoring it on drop
    pub fn close(self) -> LinkResult<()> {
        close_fd(self.0)
    }
}

impl WriteEnd {
    /// Close the raw descriptor, reporting failure instead of ignoring it on drop
    pub fn close(self) -> LinkResult<()> {
        close_fd(self.0)
    }
}

impl From<ReadEnd> for File {
    fn from(end: ReadEnd) -> Self {
        File::from(end.0)
    }
}

impl From<WriteEnd> for File {
    fn from(end: WriteEnd) -> Self {
        File::from(end.0)
    }
}

/// Close both ends of a link
pub fn close_link(read_end: ReadEnd, write_end: WriteEnd) -> LinkResult<()> {
    let read_result = read_end.close();
    let write_result = write_end.close();
    read_result.and(write_result)
}
