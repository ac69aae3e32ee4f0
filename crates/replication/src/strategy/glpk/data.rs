//! GMPL data section rendering.
//!
//! Binds the model's `nodes`, `slaves`, `tags_count` and `tags` parameters.
//! Values are written as given; range checks are left to the model's own
//! parameter domains.

use crate::error::RenderError;
use corelib::VbmapParams;
use std::io::Write;

/// Write the data section for `params` to `out`.
///
/// Layout:
///
/// ```text
/// data;
///
/// param nodes := 4;
/// param slaves := 1;
/// param tags_count := 2;
/// param tags := 0 0 1 0 2 1 3 1 ;
///
/// end;
/// ```
pub fn render<W: Write>(params: &VbmapParams, out: &mut W) -> Result<(), RenderError> {
    writeln!(out)?;
    writeln!(out, "data;")?;
    writeln!(out)?;
    writeln!(out, "param nodes := {};", params.num_nodes)?;
    writeln!(out, "param slaves := {};", params.num_slaves)?;
    writeln!(out, "param tags_count := {};", params.tags_count())?;

    write!(out, "param tags := ")?;
    for (node, tag) in params.tags.iter() {
        write!(out, "{} {} ", node, tag)?;
    }
    writeln!(out, ";")?;

    writeln!(out)?;
    writeln!(out, "end;")?;
    out.flush()?;
    Ok(())
}

pub fn render_to_string(params: &VbmapParams) -> Result<String, RenderError> {
    let mut buf = Vec::new();
    render(params, &mut buf)?;
    // Only ASCII digits and keywords are ever written.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::{Node, Tag, Tags};
    use proptest::prelude::*;
    use std::io;

    #[test]
    fn test_render_two_racks() {
        let params = VbmapParams::new(4, 1, "0:0,1:0,2:1,3:1".parse().unwrap());
        let data = render_to_string(&params).unwrap();
        assert_eq!(
            data,
            "\ndata;\n\nparam nodes := 4;\nparam slaves := 1;\nparam tags_count := 2;\n\
             param tags := 0 0 1 0 2 1 3 1 ;\n\nend;\n"
        );
    }

    #[test]
    fn test_render_passes_values_through() {
        // More slaves than nodes is left for the solver to reject.
        let params = VbmapParams::new(2, 5, Tags::trivial(2));
        let data = render_to_string(&params).unwrap();
        assert!(data.contains("param nodes := 2;"));
        assert!(data.contains("param slaves := 5;"));
        assert!(data.contains("param tags := 0 0 1 1 ;"));
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn declared<'a>(data: &'a str, name: &str) -> &'a str {
        let prefix = format!("param {} := ", name);
        let line = data.lines().find(|line| line.starts_with(&prefix)).unwrap();
        line[prefix.len()..].trim_end_matches(';').trim()
    }

    proptest! {
        /// Property: declared values and tag pairs match the params exactly
        #[test]
        fn rendered_values_match_params(
            slaves in 0usize..16,
            raw_tags in prop::collection::vec(0usize..6, 1..24),
        ) {
            let tags: Tags = raw_tags
                .iter()
                .enumerate()
                .map(|(i, &t)| (Node(i), Tag(t)))
                .collect();
            let params = VbmapParams::new(raw_tags.len(), slaves, tags);
            let data = render_to_string(&params).unwrap();

            prop_assert_eq!(declared(&data, "nodes"), params.num_nodes.to_string());
            prop_assert_eq!(declared(&data, "slaves"), slaves.to_string());
            prop_assert_eq!(declared(&data, "tags_count"), params.tags_count().to_string());

            let numbers: Vec<u64> = declared(&data, "tags")
                .split_whitespace()
                .map(|v| v.parse().unwrap())
                .collect();
            let pairs: Vec<(u64, u64)> = numbers.chunks(2).map(|c| (c[0], c[1])).collect();
            let expected: Vec<(u64, u64)> = raw_tags
                .iter()
                .enumerate()
                .map(|(i, &t)| (i as u64, t as u64))
                .collect();
            prop_assert_eq!(pairs, expected);
        }
    }

    #[test]
    fn test_render_write_failure() {
        let params = VbmapParams::new(1, 0, Tags::trivial(1));
        let err = render(&params, &mut FailingWriter).unwrap_err();
        assert_eq!(err.0.kind(), io::ErrorKind::Other);
    }
}
