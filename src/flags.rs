//! Open flags and their `O_RDWR|O_CREATE` string form.
//!
//! ## Bit Layout
//!
//! The values match the Linux `open(2)` flags so they can be handed to an
//! OS-backed filer unchanged:
//!
//! | Flag | Bits | Meaning |
//! |------|------|---------|
//! | `RDONLY` | `0x0` | read only (no bits set) |
//! | `WRONLY` | `0x1` | write only |
//! | `RDWR` | `0x2` | read and write |
//! | `CREATE` | `0x40` | create the file if missing |
//! | `EXCL` | `0x80` | with `CREATE`, the file must not exist |
//! | `TRUNC` | `0x200` | truncate on open |
//! | `APPEND` | `0x400` | writes go to the end |
//! | `SYNC` | `0x101000` | synchronous I/O |
//!
//! The low two bits (`ACCESS_MASK`) hold exactly one access mode.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::ParseError;

bitflags! {
    /// Access mode and behavior flags for [`Filer::open_file`](crate::Filer::open_file).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct OpenFlags: u32 {
        /// Open write-only.
        const WRONLY = 0x1;
        /// Open read-write.
        const RDWR = 0x2;
        /// Create the file if it does not exist.
        const CREATE = 0x40;
        /// With `CREATE`, fail if the file exists.
        const EXCL = 0x80;
        /// Truncate the file when opened.
        const TRUNC = 0x200;
        /// Append data to the file when writing.
        const APPEND = 0x400;
        /// Open for synchronous I/O.
        const SYNC = 0x101000;
    }
}

/// The access mode held in the low bits of [`OpenFlags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessMode {
    /// `O_RDONLY`.
    ReadOnly,
    /// `O_WRONLY`.
    WriteOnly,
    /// `O_RDWR`.
    ReadWrite,
}

/// Behavior flags in display order.
const BEHAVIOR_NAMES: [(&str, OpenFlags); 5] = [
    ("O_APPEND", OpenFlags::APPEND),
    ("O_CREATE", OpenFlags::CREATE),
    ("O_EXCL", OpenFlags::EXCL),
    ("O_SYNC", OpenFlags::SYNC),
    ("O_TRUNC", OpenFlags::TRUNC),
];

impl OpenFlags {
    /// Open read-only (no bits set).
    pub const RDONLY: Self = Self::empty();

    /// Masks the access mode bits.
    pub const ACCESS_MASK: u32 = 0x3;

    /// The access mode encoded in these flags.
    ///
    /// The invalid combination `WRONLY | RDWR` is reported as `ReadWrite`.
    pub const fn access(&self) -> AccessMode {
        match self.bits() & Self::ACCESS_MASK {
            0 => AccessMode::ReadOnly,
            1 => AccessMode::WriteOnly,
            _ => AccessMode::ReadWrite,
        }
    }

    /// Returns `true` if the flags permit reading.
    #[inline]
    pub const fn readable(&self) -> bool {
        !matches!(self.access(), AccessMode::WriteOnly)
    }

    /// Returns `true` if the flags permit writing.
    #[inline]
    pub const fn writable(&self) -> bool {
        !matches!(self.access(), AccessMode::ReadOnly)
    }
}

impl fmt::Display for OpenFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let access = match self.access() {
            AccessMode::ReadOnly => "O_RDONLY",
            AccessMode::WriteOnly => "O_WRONLY",
            AccessMode::ReadWrite => "O_RDWR",
        };
        f.write_str(access)?;
        for (name, flag) in BEHAVIOR_NAMES {
            if self.contains(flag) {
                write!(f, "|{name}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for OpenFlags {
    type Err = ParseError;

    /// Parse `|`-separated flag names such as `O_RDWR|O_CREATE|O_TRUNC`.
    ///
    /// At most one access mode may appear; without one, `O_RDONLY` is
    /// assumed. Behavior flags may repeat.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut access: Option<&str> = None;
        let mut flags = OpenFlags::empty();

        for name in input.split('|') {
            let mode = match name {
                "O_RDONLY" => Some(OpenFlags::RDONLY),
                "O_WRONLY" => Some(OpenFlags::WRONLY),
                "O_RDWR" => Some(OpenFlags::RDWR),
                _ => None,
            };
            if let Some(mode) = mode {
                if let Some(first) = access {
                    return Err(ParseError::MultipleAccessModes {
                        first: first.to_string(),
                        second: name.to_string(),
                    });
                }
                access = Some(name);
                flags |= mode;
                continue;
            }

            let flag = BEHAVIOR_NAMES
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, flag)| *flag)
                .ok_or_else(|| ParseError::UnknownFlag(name.to_string()))?;
            flags |= flag;
        }

        Ok(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_read_only() {
        assert_eq!(OpenFlags::RDONLY.to_string(), "O_RDONLY");
    }

    #[test]
    fn display_create_truncate() {
        let flags = OpenFlags::RDWR | OpenFlags::CREATE | OpenFlags::TRUNC;
        assert_eq!(flags.to_string(), "O_RDWR|O_CREATE|O_TRUNC");
    }

    #[test]
    fn display_orders_behavior_flags() {
        let flags = OpenFlags::TRUNC | OpenFlags::APPEND | OpenFlags::WRONLY | OpenFlags::EXCL;
        assert_eq!(flags.to_string(), "O_WRONLY|O_APPEND|O_EXCL|O_TRUNC");
    }

    #[test]
    fn display_then_parse_every_combination() {
        for access in [OpenFlags::RDONLY, OpenFlags::WRONLY, OpenFlags::RDWR] {
            for mask in 0u32..(1 << BEHAVIOR_NAMES.len()) {
                let mut flags = access;
                for (i, (_, flag)) in BEHAVIOR_NAMES.iter().enumerate() {
                    if mask & (1 << i) != 0 {
                        flags |= *flag;
                    }
                }
                let text = flags.to_string();
                let parsed: OpenFlags = text.parse().unwrap();
                assert_eq!(parsed, flags, "{text}");
            }
        }
    }

    #[test]
    fn parse_defaults_to_read_only() {
        let flags: OpenFlags = "O_CREATE".parse().unwrap();
        assert_eq!(flags.access(), AccessMode::ReadOnly);
        assert!(flags.contains(OpenFlags::CREATE));
    }

    #[test]
    fn parse_allows_repeated_behavior_flags() {
        let flags: OpenFlags = "O_WRONLY|O_TRUNC|O_TRUNC".parse().unwrap();
        assert_eq!(flags, OpenFlags::WRONLY | OpenFlags::TRUNC);
    }

    #[test]
    fn parse_rejects_two_access_modes() {
        let err = "O_RDONLY|O_RDWR".parse::<OpenFlags>().unwrap_err();
        assert_eq!(
            err,
            ParseError::MultipleAccessModes {
                first: "O_RDONLY".into(),
                second: "O_RDWR".into(),
            }
        );
    }

    #[test]
    fn parse_rejects_unknown_flag() {
        let err = "O_RDWR|O_NOPE".parse::<OpenFlags>().unwrap_err();
        assert_eq!(err, ParseError::UnknownFlag("O_NOPE".into()));
    }

    #[test]
    fn access_helpers() {
        assert!(OpenFlags::RDONLY.readable());
        assert!(!OpenFlags::RDONLY.writable());
        assert!(!OpenFlags::WRONLY.readable());
        assert!(OpenFlags::WRONLY.writable());
        assert!(OpenFlags::RDWR.readable());
        assert!(OpenFlags::RDWR.writable());
    }
}
