use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result};
use miette::{GraphicalReportHandler, GraphicalTheme};
use nom::{
    character::complete::{char, digit1},
    combinator::{map_res, opt, recognize},
    sequence::tuple,
    IResult,
};
use nom_locate::LocatedSpan;
use nom_supreme::{
    error::{ErrorTree, GenericErrorTree},
    final_parser::final_parser,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

// Thanks to FasterThanLime! https://fasterthanli.me/series/advent-of-code-2022/part-11

/// Every puzzle reads its input from this file in the working directory.
pub const INPUT_FILE: &str = "input.txt";

pub type Span<'a> = LocatedSpan<&'a str>;

pub type ParseResult<'a, T> = IResult<Span<'a>, T, ErrorTree<Span<'a>>>;

#[derive(thiserror::Error, Debug, miette::Diagnostic)]
#[error("bad input")]
struct BadInput {
    #[source_code]
    src: String,

    #[label("{kind}")]
    bad_bit: miette::SourceSpan,

    kind: String,
}

/// Logs go to stderr so stdout only ever carries the answers.
/// Verbosity comes from `RUST_LOG`, defaulting to `warn`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // a second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Opens `path` and hands out its lines lazily, in order.
///
/// The file stays open for as long as the returned iterator lives. Read
/// failures show up as an `Err` item naming the line they happened on.
pub fn read_input_lines(path: impl AsRef<Path>) -> Result<impl Iterator<Item = Result<String>>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("unable to open {}", path.display()))?;
    let name = path.display().to_string();

    debug!(file = %name, "reading input");

    Ok(BufReader::new(file)
        .lines()
        .enumerate()
        .map(move |(i, line)| {
            line.with_context(|| format!("unable to read line {} of {name}", i + 1))
        }))
}

pub fn parse_number(i: Span<'_>) -> ParseResult<'_, i64> {
    map_res(recognize(tuple((opt(char('-')), digit1))), |i: Span| {
        i.fragment().parse::<i64>()
    })(i)
}

/// Position and description of the error that got furthest into the line.
fn furthest_error(tree: &ErrorTree<Span<'_>>) -> Option<(usize, String)> {
    match tree {
        GenericErrorTree::Base { location, kind } => {
            Some((location.location_offset(), kind.to_string()))
        }
        GenericErrorTree::Stack { base, .. } => furthest_error(base),
        GenericErrorTree::Alt(alternatives) => alternatives
            .iter()
            .filter_map(furthest_error)
            .max_by_key(|(offset, _)| *offset),
    }
}

fn render(report: &BadInput) -> String {
    let mut s = String::new();
    match GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
        .render_report(&mut s, report)
    {
        Ok(()) => s.trim_end().to_string(),
        Err(_) => format!("{report}: {} at column {}", report.kind, report.bad_bit.offset() + 1),
    }
}

/// Runs `parse_fun` over the whole of `l`.
///
/// On failure the error message is a rendered report pointing at the
/// offending column.
pub fn parse_nice<'a, T, F>(l: &'a str, parse_fun: F) -> Result<T>
where
    F: FnMut(Span<'a>) -> ParseResult<'a, T>,
{
    let line: Result<T, ErrorTree<Span<'a>>> = final_parser(parse_fun)(Span::new(l));

    line.map_err(|e| {
        let (offset, kind) =
            furthest_error(&e).unwrap_or_else(|| (0, "unparseable input".to_string()));
        let report = BadInput {
            src: l.to_string(),
            bad_bit: miette::SourceSpan::new(offset.into(), 0.into()),
            kind,
        };

        anyhow::Error::msg(render(&report))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::{fs, path::PathBuf};

    fn temp_input(name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = std::env::temp_dir().join(format!("util-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[rstest]
    #[case("0", 0)]
    #[case("42", 42)]
    #[case("-7", -7)]
    #[case("66000", 66000)]
    fn parse_number_ok(#[case] input: &str, #[case] expected: i64) {
        let n = parse_nice(input, parse_number);

        assert!(n.is_ok());

        assert_eq!(n.unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("4x")]
    #[case("x4")]
    #[case(" 4")]
    #[case("99999999999999999999")]
    fn parse_number_err(#[case] input: &str) {
        let n = parse_nice(input, parse_number);

        assert!(n.is_err());
    }

    #[test]
    fn parse_nice_reports_the_line() {
        let err = parse_nice("12a4", parse_number).unwrap_err().to_string();

        assert!(err.contains("bad input"));
        assert!(err.contains("12a4"));
    }

    #[test]
    fn read_input_lines_in_order() {
        let path = temp_input("in-order.txt", "1000\n2000\n\n3000\n");

        let lines = read_input_lines(&path)
            .unwrap()
            .collect::<Result<Vec<_>>>();
        fs::remove_file(&path).unwrap();

        assert!(lines.is_ok());

        assert_eq!(lines.unwrap(), vec!["1000", "2000", "", "3000"]);
    }

    #[test]
    fn read_input_lines_empty_file() {
        let path = temp_input("empty.txt", "");

        let n_lines = read_input_lines(&path).unwrap().count();
        fs::remove_file(&path).unwrap();

        assert_eq!(n_lines, 0);
    }

    #[test]
    fn read_input_lines_bad_line() {
        let path = temp_input("bad-line.txt", b"1\n\xff\xfe\n2\n");

        let lines = read_input_lines(&path)
            .unwrap()
            .collect::<Result<Vec<_>>>();
        fs::remove_file(&path).unwrap();

        assert!(lines.is_err());

        let message = lines.unwrap_err().to_string();
        assert!(message.contains("line 2"));
        assert!(message.contains("bad-line.txt"));
    }

    #[test]
    fn read_input_lines_missing_file() {
        let path = std::env::temp_dir().join("util-does-not-exist/input.txt");

        let err = read_input_lines(&path).err().unwrap();

        assert!(err.to_string().contains("util-does-not-exist"));
    }
}
