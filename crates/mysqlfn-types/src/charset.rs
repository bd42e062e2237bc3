//! Character sets recognised by `CONVERT(expr USING name)`.
//!
//! Conversion between character sets is a passthrough: values are already
//! UTF-8 or raw bytes. The table only decides which names are valid.

/// A known character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charset {
    /// Canonical lower-case name.
    pub name: &'static str,
}

impl Charset {
    /// Whether values in this character set are binary strings.
    pub fn is_binary(&self) -> bool {
        self.name == "binary"
    }
}

/// Every character set name accepted by [`lookup`].
pub const CHARSETS: &[Charset] = &[
    Charset { name: "utf8mb4" },
    Charset { name: "utf8" },
    Charset { name: "ascii" },
    Charset { name: "latin1" },
    Charset { name: "binary" },
    Charset { name: "gbk" },
    Charset { name: "big5" },
    Charset { name: "ucs2" },
    Charset { name: "utf16" },
    Charset { name: "utf32" },
];

/// Resolve a character set name, case-insensitively.
///
/// `utf8mb3` is accepted as an alias of `utf8`.
pub fn lookup(name: &str) -> Option<&'static Charset> {
    let name = name.trim();
    let name = if name.eq_ignore_ascii_case("utf8mb3") {
        "utf8"
    } else {
        name
    };
    CHARSETS.iter().find(|cs| cs.name.eq_ignore_ascii_case(name))
}
