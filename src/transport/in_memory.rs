use tokio::io::{duplex, split};

use super::{Link, LinkEvents};
use crate::config::LinkConfig;

/// Two links connected to each other through an in-process pipe.
///
/// Must be called from within a tokio runtime.
pub fn pair() -> anyhow::Result<((Link, LinkEvents), (Link, LinkEvents))> {
    pair_with_config(LinkConfig::default())
}

pub fn pair_with_config(
    config: LinkConfig,
) -> anyhow::Result<((Link, LinkEvents), (Link, LinkEvents))> {
    let (a, b) = duplex(config.max_frame_len + 1);
    let (a_read, a_write) = split(a);
    let (b_read, b_write) = split(b);
    let (left, left_events) = Link::with_config(config);
    let (right, right_events) = Link::with_config(config);
    left.attach(a_read, a_write)?;
    right.attach(b_read, b_write)?;
    Ok(((left, left_events), (right, right_events)))
}
