//! Clipboard access through the OSC 52 terminal escape sequence.

use std::io::{self, Write};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::{Error, Result};

const OSC52_PREFIX: &str = "\x1b]52;c;";
const OSC52_SUFFIX: &str = "\x07";

const TMUX_PREFIX: &str = "\x1bPtmux;\x1b\x1b]52;c;";
const TMUX_SUFFIX: &str = "\x07\x1b\\";

// Many terminals cap OSC 52 payloads well below this.
pub const OSC52_MAX_BYTES: usize = 100 * 1024;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Osc52Env {
    pub is_tmux: bool,
}

impl Osc52Env {
    pub fn detect() -> Self {
        Self {
            is_tmux: std::env::var_os("TMUX").is_some(),
        }
    }
}

pub fn build_sequence(text: &str, env: Osc52Env) -> Result<String> {
    let bytes = text.as_bytes();
    if bytes.len() > OSC52_MAX_BYTES {
        return Err(Error::TooLarge {
            bytes: bytes.len(),
            limit: OSC52_MAX_BYTES,
        });
    }

    let payload = STANDARD.encode(bytes);
    if env.is_tmux {
        Ok(format!("{TMUX_PREFIX}{payload}{TMUX_SUFFIX}"))
    } else {
        Ok(format!("{OSC52_PREFIX}{payload}{OSC52_SUFFIX}"))
    }
}

pub fn write_sequence<W: Write>(mut writer: W, text: &str, env: Osc52Env) -> Result<()> {
    let sequence = build_sequence(text, env)?;
    writer.write_all(sequence.as_bytes())?;
    writer.flush()?;
    Ok(())
}

pub fn copy_to_clipboard(text: &str) -> Result<()> {
    write_sequence(io::stdout(), text, Osc52Env::detect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_base64_payload() {
        let sequence = build_sequence("src/", Osc52Env::default()).unwrap();
        assert_eq!(sequence, "\x1b]52;c;c3JjLw==\x07");
    }

    #[test]
    fn wraps_for_tmux() {
        let sequence = build_sequence("a", Osc52Env { is_tmux: true }).unwrap();
        assert_eq!(sequence, "\x1bPtmux;\x1b\x1b]52;c;YQ==\x07\x1b\\");
    }

    #[test]
    fn refuses_oversized_text() {
        let text = "x".repeat(OSC52_MAX_BYTES + 1);
        assert!(matches!(
            build_sequence(&text, Osc52Env::default()),
            Err(Error::TooLarge { .. })
        ));
    }

    #[test]
    fn writes_sequence_to_writer() {
        let mut out = Vec::new();
        write_sequence(&mut out, "├──", Osc52Env::default()).unwrap();
        let written = String::from_utf8(out).unwrap();
        assert!(written.starts_with(OSC52_PREFIX));
        assert!(written.ends_with(OSC52_SUFFIX));
    }
}
