//! Reusable command-emission patterns.

use crate::commands::Command;
use crate::push_stream::PushStream;

/// Marks the start of a region whose output is consumed instead of emitted,
/// e.g. the synthetic tag markup of a `sly` element or the unrendered
/// children of a call block.
pub fn begin_stream_ignore(stream: &mut PushStream) {
    stream.write(Command::StreamIgnoreStart);
}

pub fn end_stream_ignore(stream: &mut PushStream) {
    stream.write(Command::StreamIgnoreEnd);
}
