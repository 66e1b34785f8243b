//! File mode bits and the `drwxr-xr-x` string form.
//!
//! ## Bit Layout
//!
//! ```text
//! bit 31 30 29 28 27 26 25 24 23 22 21 20 19 ... 8 7 6 5 4 3 2 1 0
//!      d  a  l  T  L  D  p  S  u  g  c  t  ?      r w x r w x r w x
//!     └──────────── type / special ────────┘     user  group other
//! ```
//!
//! The high bits describe what kind of entry a path is; the low nine bits are
//! the familiar Unix permission triplets.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::ParseError;

bitflags! {
    /// Type and permission bits of a filesystem entry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct FileMode: u32 {
        /// Directory.
        const DIR = 1 << 31;
        /// Append-only.
        const APPEND = 1 << 30;
        /// Exclusive use.
        const EXCLUSIVE = 1 << 29;
        /// Temporary file.
        const TEMPORARY = 1 << 28;
        /// Symbolic link.
        const SYMLINK = 1 << 27;
        /// Device file.
        const DEVICE = 1 << 26;
        /// Named pipe (FIFO).
        const NAMED_PIPE = 1 << 25;
        /// Unix domain socket.
        const SOCKET = 1 << 24;
        /// Setuid.
        const SETUID = 1 << 23;
        /// Setgid.
        const SETGID = 1 << 22;
        /// Character device, when `DEVICE` is set.
        const CHAR_DEVICE = 1 << 21;
        /// Sticky.
        const STICKY = 1 << 20;
        /// Non-regular file of unknown kind.
        const IRREGULAR = 1 << 19;

        /// Owner may read.
        const USER_R = 0o400;
        /// Owner may write.
        const USER_W = 0o200;
        /// Owner may execute.
        const USER_X = 0o100;
        /// Group may read.
        const GROUP_R = 0o040;
        /// Group may write.
        const GROUP_W = 0o020;
        /// Group may execute.
        const GROUP_X = 0o010;
        /// Others may read.
        const OTHER_R = 0o004;
        /// Others may write.
        const OTHER_W = 0o002;
        /// Others may execute.
        const OTHER_X = 0o001;

        /// `rwx` for the owner.
        const USER_RWX = Self::USER_R.bits() | Self::USER_W.bits() | Self::USER_X.bits();
        /// `rwx` for the group.
        const GROUP_RWX = Self::GROUP_R.bits() | Self::GROUP_W.bits() | Self::GROUP_X.bits();
        /// `rwx` for others.
        const OTHER_RWX = Self::OTHER_R.bits() | Self::OTHER_W.bits() | Self::OTHER_X.bits();
        /// Read for everyone.
        const ALL_R = Self::USER_R.bits() | Self::GROUP_R.bits() | Self::OTHER_R.bits();
        /// Write for everyone.
        const ALL_W = Self::USER_W.bits() | Self::GROUP_W.bits() | Self::OTHER_W.bits();
        /// Execute for everyone.
        const ALL_X = Self::USER_X.bits() | Self::GROUP_X.bits() | Self::OTHER_X.bits();
    }
}

/// Type characters in bit order, highest bit first.
const TYPE_CHARS: [(char, FileMode); 13] = [
    ('d', FileMode::DIR),
    ('a', FileMode::APPEND),
    ('l', FileMode::EXCLUSIVE),
    ('T', FileMode::TEMPORARY),
    ('L', FileMode::SYMLINK),
    ('D', FileMode::DEVICE),
    ('p', FileMode::NAMED_PIPE),
    ('S', FileMode::SOCKET),
    ('u', FileMode::SETUID),
    ('g', FileMode::SETGID),
    ('c', FileMode::CHAR_DEVICE),
    ('t', FileMode::STICKY),
    ('?', FileMode::IRREGULAR),
];

/// Permission characters in display order.
const PERM_CHARS: [(char, FileMode); 9] = [
    ('r', FileMode::USER_R),
    ('w', FileMode::USER_W),
    ('x', FileMode::USER_X),
    ('r', FileMode::GROUP_R),
    ('w', FileMode::GROUP_W),
    ('x', FileMode::GROUP_X),
    ('r', FileMode::OTHER_R),
    ('w', FileMode::OTHER_W),
    ('x', FileMode::OTHER_X),
];

impl FileMode {
    /// The nine permission bits.
    pub const PERM: Self = Self::from_bits_retain(0o777);

    /// Bits that describe the kind of entry rather than its permissions.
    pub const TYPE: Self = Self::from_bits_retain(
        Self::DIR.bits()
            | Self::SYMLINK.bits()
            | Self::NAMED_PIPE.bits()
            | Self::SOCKET.bits()
            | Self::DEVICE.bits()
            | Self::CHAR_DEVICE.bits()
            | Self::IRREGULAR.bits(),
    );

    /// Mode used when creating or truncating a file (`rw-rw-rw-`).
    pub const DEFAULT_FILE: Self = Self::from_bits_retain(0o666);

    /// Mode used when creating a directory (`rwxrwxrwx`).
    pub const DEFAULT_DIR: Self = Self::from_bits_retain(0o777);

    /// Create a mode from raw bits, keeping unknown bits.
    #[inline]
    pub const fn from_raw(bits: u32) -> Self {
        Self::from_bits_retain(bits)
    }

    /// Returns `true` if the directory bit is set.
    #[inline]
    pub const fn is_dir(&self) -> bool {
        self.contains(Self::DIR)
    }

    /// Returns `true` if no type bits are set.
    #[inline]
    pub const fn is_regular(&self) -> bool {
        !self.intersects(Self::TYPE)
    }

    /// The permission bits only.
    #[inline]
    pub const fn permissions(&self) -> Self {
        self.intersection(Self::PERM)
    }
}

impl Default for FileMode {
    fn default() -> Self {
        Self::DEFAULT_FILE
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote_type = false;
        for (c, bit) in TYPE_CHARS {
            if self.contains(bit) {
                write!(f, "{c}")?;
                wrote_type = true;
            }
        }
        if !wrote_type {
            write!(f, "-")?;
        }
        for (c, bit) in PERM_CHARS {
            write!(f, "{}", if self.contains(bit) { c } else { '-' })?;
        }
        Ok(())
    }
}

impl FromStr for FileMode {
    type Err = ParseError;

    /// Parse a Unix style mode string such as `drwxr-xr-x`.
    ///
    /// Exactly one type character (or `-`) is accepted, followed by nine
    /// permission characters. Permission letters are case-insensitive.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = input.chars().collect();
        if chars.len() != 10 {
            return Err(ParseError::ModeLength {
                input: input.to_string(),
                len: chars.len(),
            });
        }

        let mut mode = match chars[0] {
            '-' => FileMode::empty(),
            c => TYPE_CHARS
                .iter()
                .find(|(tc, _)| *tc == c)
                .map(|(_, bit)| *bit)
                .ok_or_else(|| ParseError::ModeType {
                    input: input.to_string(),
                    found: c,
                })?,
        };

        for (i, (&c, (expected, bit))) in chars[1..].iter().zip(PERM_CHARS).enumerate() {
            if c == '-' {
                continue;
            }
            if c.to_ascii_lowercase() != expected {
                return Err(ParseError::ModePermission {
                    input: input.to_string(),
                    found: c,
                    position: i + 1,
                });
            }
            mode |= bit;
        }

        Ok(mode)
    }
}
