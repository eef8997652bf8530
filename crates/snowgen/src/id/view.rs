use crate::{Layout, to_padded_string};
use alloc::{format, string::String, string::ToString, vec::Vec};
use core::fmt;

/// An ID paired with the layout that produced it.
///
/// `Display` prints the plain decimal ID. `Debug` prints a table of the
/// individual fields, which is handy in logs and test failures:
///
/// ```text
/// IdView {
///     raw id     : 0x06504c9540312000 (454947766275219456)
///     padded     : 00454947766275219456
///     layout     :
///         +----------------+--------------+---------------+
///         | timestamp (42) | node_id (10) | sequence (12) |
///         +----------------+--------------+---------------+
///         |  108468000000  |     786      |       0       |
///         |  0x1941325500  |    0x312     |      0x0      |
///         +----------------+--------------+---------------+
/// }
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdView {
    layout: Layout,
    id: u64,
}

struct Field {
    name: &'static str,
    bits: u8,
    value: u64,
}

impl IdView {
    pub(crate) const fn new(layout: Layout, id: u64) -> Self {
        Self { layout, id }
    }

    /// The raw ID.
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// The layout used to decode the ID.
    pub const fn layout(&self) -> Layout {
        self.layout
    }

    fn fields(&self) -> [Field; 3] {
        let parts = self.layout.decompose(self.id);
        [
            Field {
                name: "timestamp",
                bits: self.layout.timestamp_bits(),
                value: parts.timestamp,
            },
            Field {
                name: "node_id",
                bits: self.layout.node_id_bits(),
                value: parts.node_id,
            },
            Field {
                name: "sequence",
                bits: self.layout.sequence_bits(),
                value: parts.sequence,
            },
        ]
    }
}

impl fmt::Display for IdView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for IdView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn center(s: impl ToString, width: usize) -> String {
            let s = s.to_string();
            let len = s.len();
            if len >= width {
                return s;
            }
            let pad = width - len;
            let left = pad / 2;
            let right = pad - left;
            format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
        }

        fn border(f: &mut fmt::Formatter<'_>, columns: &[usize]) -> fmt::Result {
            write!(f, "        +")?;
            for &w in columns {
                write!(f, "{}+", "-".repeat(w))?;
            }
            writeln!(f)
        }

        let fields = self.fields();
        let visible: Vec<&Field> = fields.iter().filter(|field| field.bits > 0).collect();

        // Max width per column: label, dec, hex, plus padding
        let columns: Vec<usize> = visible
            .iter()
            .map(|field| {
                let label_len = format!("{} ({})", field.name, field.bits).len();
                let dec_len = field.value.to_string().len();
                let hex_len = format!("0x{:x}", field.value).len();
                label_len.max(dec_len).max(hex_len) + 2
            })
            .collect();

        writeln!(f, "IdView {{")?;
        writeln!(f, "    raw id     : 0x{:016x} ({})", self.id, self.id)?;
        writeln!(f, "    padded     : {}", to_padded_string(self.id))?;
        writeln!(f, "    layout     :")?;

        border(f, &columns)?;

        write!(f, "        |")?;
        for (field, &w) in visible.iter().zip(&columns) {
            let label = format!("{} ({})", field.name, field.bits);
            write!(f, "{}|", center(label, w))?;
        }
        writeln!(f)?;

        border(f, &columns)?;

        write!(f, "        |")?;
        for (field, &w) in visible.iter().zip(&columns) {
            write!(f, "{}|", center(field.value, w))?;
        }
        writeln!(f)?;

        write!(f, "        |")?;
        for (field, &w) in visible.iter().zip(&columns) {
            write!(f, "{}|", center(format!("0x{:x}", field.value), w))?;
        }
        writeln!(f)?;

        border(f, &columns)?;

        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_renders_every_field() {
        let layout = Layout::default();
        let view = layout.view(layout.compose(108_468_000_000, 786, 0));
        let rendered = format!("{view:?}");

        assert!(rendered.contains("timestamp (42)"));
        assert!(rendered.contains("node_id (10)"));
        assert!(rendered.contains("sequence (12)"));
        assert!(rendered.contains("108468000000"));
        assert!(rendered.contains("0x312"));
        assert!(rendered.contains("00454947766275219456"));
    }

    #[test]
    fn zero_width_fields_are_hidden() {
        let layout = Layout::new(0, 4).unwrap();
        let rendered = format!("{:?}", layout.view(layout.compose(3, 0, 2)));
        assert!(!rendered.contains("node_id"));
        assert!(rendered.contains("sequence (4)"));
    }

    #[test]
    fn display_is_the_decimal_id() {
        let layout = Layout::default();
        assert_eq!(layout.view(42).to_string(), "42");
    }
}
